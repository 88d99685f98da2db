// --- File: crates/reservify_common/src/error.rs ---
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;

    /// The message shown to the caller. Must not leak internal details.
    fn public_message(&self) -> String;
}

/// JSON body of every error response: `{"error": "..."}`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[cfg_attr(feature = "openapi", schema(example = "Time slot not available"))]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Builds the `(status, Json<ErrorResponse>)` response for an error.
pub fn error_response<E: HttpStatusCode>(error: &E) -> axum::response::Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(error.public_message()))).into_response()
}
