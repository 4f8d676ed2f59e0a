use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use crate::routes::AppState;

/// GET /api/health
///
/// Reports process liveness plus the state of the two external collaborators:
/// the document store and the mail dispatcher.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let connected = state.store.ping().await;

    Json(json!({
        "status": "OK",
        "message": "Server is running",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.config.environment,
        "database": {
            "status": if connected { "connected" } else { "disconnected" },
            "connected": connected,
        },
        "email": {
            "configured": state.email.configured(),
        },
    }))
}
