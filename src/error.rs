use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;

static EXPOSE_DETAIL: OnceLock<bool> = OnceLock::new();

/// Decide once at startup whether 500 responses echo internal error detail
///
/// Detail is suppressed in production; development and tests may enable it.
pub fn set_expose_detail(expose: bool) {
    let _ = EXPOSE_DETAIL.set(expose);
}

fn expose_detail() -> bool {
    *EXPOSE_DETAIL.get().unwrap_or(&false)
}

/// Error taxonomy for the contact API
///
/// Every handler failure is translated into the uniform JSON envelope
/// `{success: false, message, error?}` with a status code per variant.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Contact not found")]
    NotFound,

    #[error("Database unavailable")]
    Unavailable,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "message": message}),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({"success": false, "message": "Contact not found"}),
            ),
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"success": false, "message": "Database unavailable"}),
            ),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "Unhandled error while serving request");
                let mut body = json!({"success": false, "message": "Internal server error"});
                if expose_detail() {
                    body["error"] = json!(e.to_string());
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}
