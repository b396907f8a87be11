use axum::{
    extract::FromRequestParts,
    http::{Request, header},
};
use note_portal::{
    AppState,
    auth::{self, Session},
    config::AppConfig,
    error::ApiError,
    models::Role,
    store::{InMemoryNoteStore, StoreState},
};
use std::sync::Arc;

fn test_state(config: AppConfig) -> AppState {
    AppState {
        store: Arc::new(InMemoryNoteStore::new()) as StoreState,
        config,
    }
}

/// Pulls the bare token out of a Set-Cookie value like
/// `session=<token>; Path=/; HttpOnly; SameSite=Lax`.
fn token_of(cookie: &str) -> &str {
    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, token)| token)
        .expect("cookie has a session token")
}

// --- Password -> Role Resolution ---

#[test]
fn test_resolve_role_matches_each_password() {
    let config = AppConfig::default();

    assert_eq!(auth::resolve_role("admin-password", &config), Some(Role::Admin));
    assert_eq!(
        auth::resolve_role("reader-password", &config),
        Some(Role::Reader)
    );
    assert_eq!(auth::resolve_role("something else", &config), None);
    assert_eq!(auth::resolve_role("", &config), None);
}

#[test]
fn test_admin_wins_when_both_passwords_are_identical() {
    let config = AppConfig {
        admin_password: Some("shared".to_string()),
        reader_password: Some("shared".to_string()),
        ..AppConfig::default()
    };

    // Admin is checked first; the tie-break is order-dependent by contract.
    assert_eq!(auth::resolve_role("shared", &config), Some(Role::Admin));
}

#[test]
fn test_unset_password_disables_that_role() {
    let config = AppConfig {
        admin_password: None,
        reader_password: Some("reader-password".to_string()),
        ..AppConfig::default()
    };

    // No string can log in as admin once the password is unset.
    assert_eq!(auth::resolve_role("", &config), None);
    assert_eq!(auth::resolve_role("admin-password", &config), None);
    assert_eq!(
        auth::resolve_role("reader-password", &config),
        Some(Role::Reader)
    );
}

// --- Access Guard ---

#[test]
fn test_require_role_gates_admin_operations() {
    let admin = Session { role: Role::Admin };
    let reader = Session { role: Role::Reader };

    assert!(auth::require_role(&admin, Role::Admin).is_ok());
    assert!(matches!(
        auth::require_role(&reader, Role::Admin),
        Err(ApiError::Forbidden)
    ));

    // Read-level operations accept any authenticated role.
    assert!(auth::require_role(&admin, Role::Reader).is_ok());
    assert!(auth::require_role(&reader, Role::Reader).is_ok());
}

// --- Session Cookie Round Trips ---

#[test]
fn test_issued_cookie_decodes_to_the_same_role() {
    let config = AppConfig::default();

    let cookie = auth::issue_session_cookie(Role::Reader, &config).unwrap();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let session = auth::decode_session(token_of(&cookie), &config).expect("valid token");
    assert_eq!(session.role, Role::Reader);
}

#[test]
fn test_tampered_or_foreign_tokens_are_rejected() {
    let config = AppConfig::default();
    let cookie = auth::issue_session_cookie(Role::Admin, &config).unwrap();
    let token = token_of(&cookie);

    // Garbage input.
    assert!(auth::decode_session("not-a-token", &config).is_none());

    // Flipping payload bytes breaks the signature.
    let tampered = format!("{}x", token);
    assert!(auth::decode_session(&tampered, &config).is_none());

    // A token signed under a different secret is a foreign session.
    let other = AppConfig {
        session_secret: "some-other-secret".to_string(),
        ..AppConfig::default()
    };
    assert!(auth::decode_session(token, &other).is_none());
}

#[test]
fn test_clear_cookie_expires_immediately() {
    let cleared = auth::clear_session_cookie();
    assert!(cleared.starts_with("session=;"));
    assert!(cleared.contains("Max-Age=0"));
}

// --- Extractor Behavior ---

#[tokio::test]
async fn test_extractor_accepts_the_session_cookie() {
    let config = AppConfig::default();
    let cookie = auth::issue_session_cookie(Role::Admin, &config).unwrap();
    let state = test_state(config);

    let (mut parts, _) = Request::builder()
        .uri("/api/notes")
        .header(header::COOKIE, cookie.split(';').next().unwrap().to_string())
        .body(())
        .unwrap()
        .into_parts();

    let session = <Session as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state)
        .await
        .expect("cookie session accepted");
    assert_eq!(session.role, Role::Admin);
}

#[tokio::test]
async fn test_extractor_accepts_a_bearer_token() {
    let config = AppConfig::default();
    let cookie = auth::issue_session_cookie(Role::Reader, &config).unwrap();
    let token = token_of(&cookie).to_string();
    let state = test_state(config);

    let (mut parts, _) = Request::builder()
        .uri("/api/notes")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(())
        .unwrap()
        .into_parts();

    let session = <Session as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state)
        .await
        .expect("bearer session accepted");
    assert_eq!(session.role, Role::Reader);
}

#[tokio::test]
async fn test_extractor_rejects_anonymous_requests() {
    let state = test_state(AppConfig::default());

    let (mut parts, _) = Request::builder()
        .uri("/api/notes")
        .body(())
        .unwrap()
        .into_parts();

    let result =
        <Session as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_extractor_ignores_unrelated_cookies() {
    let state = test_state(AppConfig::default());

    let (mut parts, _) = Request::builder()
        .uri("/api/notes")
        .header(header::COOKIE, "theme=dark; tracking=no")
        .body(())
        .unwrap()
        .into_parts();

    let result =
        <Session as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}
