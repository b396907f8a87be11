use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// API Router Module
///
/// Defines the note CRUD surface. Every route in this module relies on the
/// `Session` extractor middleware being layered above it in `create_router`,
/// which guarantees the request carries a valid signed session cookie (or
/// Bearer token) before any handler runs; anonymous requests are rejected
/// with 401 at that layer.
///
/// Access Control Strategy:
/// Authentication happens at the layer; authorization happens in the handlers.
/// Reads are open to any role, while the mutating handlers each begin with an
/// explicit `require_role(Role::Admin)` precondition that rejects readers
/// with 403.
pub fn api_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/notes — full current note list, any valid role.
        // POST /api/notes — admin-only: appends a note with a count-derived id.
        .route(
            "/api/notes",
            get(handlers::get_notes).post(handlers::create_note),
        )
        // PUT /api/notes/{id} — admin-only partial update of title/content.
        // DELETE /api/notes/{id} — admin-only removal; succeeds even when the
        // id does not exist.
        .route(
            "/api/notes/{id}",
            put(handlers::update_note).delete(handlers::delete_note),
        )
}
