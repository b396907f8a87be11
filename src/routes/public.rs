use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are accessible without a session: the page a browser
/// lands on and the session lifecycle endpoints themselves.
///
/// The home page is session-aware but not session-requiring: it renders the
/// login form for anonymous visitors instead of rejecting them, since it is
/// the application's entry point.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // GET /
        // Serves the notes page when the request carries a valid session cookie,
        // otherwise the login page.
        .route("/", get(handlers::home))
        // POST /login
        // Exchanges the shared password for a signed session cookie carrying the
        // resolved role. 401 with no cookie on mismatch.
        .route("/login", post(handlers::login))
        // GET /logout
        // Clears the session cookie unconditionally and redirects to /.
        .route("/logout", get(handlers::logout))
}
