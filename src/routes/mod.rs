/// Router Module Index
///
/// Organizes the application's routing logic into access-segregated modules,
/// so the session requirement is applied explicitly at the module level (via
/// an Axum route layer) rather than remembered per handler.
///
/// The two modules map directly to the two access tiers.

/// Routes accessible without a session: the home/login page, the login and
/// logout endpoints, and the health check.
pub mod public;

/// The /api/notes surface, protected by the `Session` extractor middleware.
/// Any valid role may read; the admin requirement for mutations is enforced
/// inside the handlers via `require_role`.
pub mod api;
