use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{models::ErrorResponse, store::StoreError};

/// ApiError
///
/// The application's error taxonomy, mapped one-to-one onto HTTP statuses:
/// no session -> 401, wrong role -> 403, bad login password -> 401,
/// unknown note id -> 404, store/session machinery failures -> 500.
///
/// Handlers return `Result<_, ApiError>` and let the `IntoResponse` impl
/// produce the uniform `{"error": ...}` JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Note not found")]
    NoteNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Session error")]
    Session(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NoteNotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal failures are logged with their source but reported to the
        // client only as a generic message, never the underlying cause.
        let message = match &self {
            ApiError::Store(source) => {
                tracing::error!(error = %source, "note store failure");
                "Note store unavailable".to_string()
            }
            ApiError::Session(source) => {
                tracing::error!(error = %source, "session token failure");
                "Session error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
