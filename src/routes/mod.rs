use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::config::Config;
use crate::email::EmailService;
use crate::store::ContactStore;

pub mod contact;
pub mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: ContactStore,
    pub email: EmailService,
}

/// JSON 404 for unknown API routes
pub async fn fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "message": "API route not found"})),
    )
}
