use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Core Application Schemas (Mapped to the Notes File) ---

/// Role
///
/// The two fixed access levels. "admin" grants full read/write over the shared
/// note list; "reader" grants read-only access. There is no per-user identity
/// beyond this role, and no transition between roles without a logout + login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    Reader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Reader => "reader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Note
///
/// A single shared note as stored in the flat JSON file. The file holds an
/// ordered array of these objects; order is insertion order.
///
/// Ids are assigned as `current count + 1` at creation time, matching the
/// persisted format. After a deletion the next assigned id can collide with a
/// surviving note, so uniqueness only holds for stores that have never shrunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
}

// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Input payload for POST /login. A missing `password` field is treated as the
/// empty string rather than a malformed request, so it simply fails to match.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// CreateNoteRequest
///
/// Input payload for POST /api/notes. Both fields default to the empty string;
/// empty titles and contents are permitted by the store.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// UpdateNoteRequest
///
/// Partial update payload for PUT /api/notes/{id}. Uses `Option<T>` so only the
/// provided fields are rewritten on the stored note.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateNoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// --- Response Schemas (Output) ---

/// LoginResponse
///
/// Output of a successful login: confirms the session was created and reports
/// which role the submitted password resolved to.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub success: bool,
    pub role: Role,
}

/// DeleteResponse
///
/// Output of DELETE /api/notes/{id}. Deletion is idempotent: the response is
/// the same whether or not a note with the id existed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DeleteResponse {
    pub success: bool,
}

/// ErrorResponse
///
/// The uniform JSON error body produced by `ApiError` for every failure the
/// application surfaces itself (401/403/404/500).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
