use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::{config::AppConfig, error::ApiError, models::Role};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

// Stands in for the cookie mechanism's own default lifetime; there is no
// separate server-side expiry policy.
const SESSION_TTL_DAYS: i64 = 7;

/// Claims
///
/// The payload embedded in the signed session cookie. The cookie is the entire
/// session: there is no server-side session store, so everything the server
/// needs to re-derive the caller's access level travels in these claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The role granted at login. This is the only piece of session state.
    pub role: Role,
    /// Expiration Time (exp): timestamp after which the token is rejected.
    pub exp: usize,
    /// Issued At (iat): timestamp when the session was created.
    pub iat: usize,
}

/// Session
///
/// The resolved identity of an authenticated request: just a role, since the
/// application has no per-user accounts. Produced by the extractor below and
/// consumed by handlers for role checks.
#[derive(Debug, Clone)]
pub struct Session {
    pub role: Role,
}

/// resolve_role
///
/// Compares a submitted login password against the two configured constants.
/// Exact string match only. Admin is checked first, so if both passwords were
/// ever configured identically the admin role wins. An unset password never
/// matches, which disables that role's login path entirely.
pub fn resolve_role(password: &str, config: &AppConfig) -> Option<Role> {
    if config.admin_password.as_deref() == Some(password) {
        return Some(Role::Admin);
    }
    if config.reader_password.as_deref() == Some(password) {
        return Some(Role::Reader);
    }
    None
}

/// require_role
///
/// The explicit access-guard precondition, called at the top of each protected
/// handler. Reaching this function already implies an authenticated session
/// (the extractor rejects with 401 otherwise); this check only enforces the
/// admin requirement, since any valid role may read.
pub fn require_role(session: &Session, required: Role) -> Result<(), ApiError> {
    if required == Role::Admin && session.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

/// issue_session_cookie
///
/// Creates the session for a freshly resolved role: signs a token with the
/// configured secret and wraps it in a Set-Cookie value. HttpOnly keeps the
/// token out of page scripts; SameSite=Lax matches the browser default the
/// original deployment relied on.
pub fn issue_session_cookie(
    role: Role,
    config: &AppConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        role,
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )?;

    Ok(format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

/// clear_session_cookie
///
/// Produces the Set-Cookie value that destroys the session unconditionally,
/// whether or not one existed. Used by logout.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// decode_session
///
/// Validates a session token's signature and expiry against the configured
/// secret and returns the resolved session. Any failure (tampering, garbage,
/// expiry, wrong secret) collapses to `None`; the caller treats all of them
/// as "no session".
pub fn decode_session(token: &str, config: &AppConfig) -> Option<Session> {
    let decoding_key = DecodingKey::from_secret(config.session_secret.as_bytes());

    let mut validation = Validation::default();
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).ok()?;

    Some(Session {
        role: token_data.claims.role,
    })
}

/// session_token
///
/// Pulls the raw session token out of a request: the `session` cookie first
/// (the browser flow), falling back to a Bearer Authorization header so
/// non-browser API clients can pass the token directly.
fn session_token(parts: &Parts) -> Option<String> {
    let from_cookie = parts
        .headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == SESSION_COOKIE).then(|| value.to_string())
            })
        });

    from_cookie.or_else(|| {
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.to_string())
    })
}

/// Session Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making Session usable as a
/// function argument in any protected handler. This cleanly separates session
/// resolution (extractor) from business logic (the handler): a missing or
/// invalid token rejects the request with 401 before the handler runs.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    // Allows the extractor to pull the AppConfig (for the session secret).
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let token = session_token(parts).ok_or(ApiError::Unauthorized)?;

        decode_session(&token, &config).ok_or(ApiError::Unauthorized)
    }
}

/// Optional Session Extractor
///
/// Lets unauthenticated-but-session-aware handlers (the home page) take
/// `Option<Session>`: an absent or invalid session renders the login page
/// instead of rejecting the request.
impl<S> OptionalFromRequestParts<S> for Session
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(
            <Session as FromRequestParts<S>>::from_request_parts(parts, state)
                .await
                .ok(),
        )
    }
}
