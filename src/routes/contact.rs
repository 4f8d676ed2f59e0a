//! Contact form CRUD handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::warn;

use crate::error::ApiError;
use crate::routes::AppState;
use crate::store::{ContactStatus, ContactSubmission, NewContact};

/// Matches `local@domain.tld`; anything stricter is left to the client form
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

#[derive(Debug, Deserialize, Default)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl CreateContactRequest {
    /// Trim all fields and check presence plus email shape
    fn validate(self) -> Result<NewContact, ApiError> {
        let input = NewContact {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        if input.name.is_empty()
            || input.email.is_empty()
            || input.subject.is_empty()
            || input.message.is_empty()
        {
            return Err(ApiError::validation("All fields are required"));
        }

        if !EMAIL_RE.is_match(&input.email) {
            return Err(ApiError::validation("Invalid email format"));
        }

        Ok(input)
    }
}

/// POST /api/contact
///
/// Persists the submission when the store is reachable and falls back to an
/// in-memory placeholder when it is not; either way the client gets a 201 and
/// the notification email is dispatched on a detached task.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = request.validate()?;

    let (submission, database_saved) = if state.store.ready() {
        match state.store.insert(&input).await {
            Ok(submission) => (submission, true),
            Err(e) => {
                warn!(error = %e, "Failed to persist contact, falling back to in-memory record");
                (ContactSubmission::placeholder(&input), false)
            }
        }
    } else {
        warn!("Store not ready, contact accepted without persistence");
        (ContactSubmission::placeholder(&input), false)
    };

    // Fire-and-forget: the response never waits on email delivery
    let email = state.email.clone();
    let record = submission.clone();
    tokio::spawn(async move {
        if let Err(e) = email.send_notification(&record) {
            warn!(error = %e, "Contact notification failed");
        }
        if let Err(e) = email.send_auto_reply(&record) {
            warn!(error = %e, "Auto-reply failed");
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Message sent successfully",
            "data": submission,
            "databaseSaved": database_saved,
        })),
    ))
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Coerce a query value to a positive integer, falling back to the default
fn coerce_param(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// GET /api/contact?page=&limit=
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.ready() {
        return Err(ApiError::Unavailable);
    }

    let page = coerce_param(query.page.as_deref(), 1);
    let limit = coerce_param(query.limit.as_deref(), 10);

    let (submissions, total) = state.store.list(page, limit).await?;
    let pages = (total as u64).div_ceil(limit as u64);

    Ok(Json(json!({
        "success": true,
        "data": submissions,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "pages": pages,
        },
    })))
}

/// GET /api/contact/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state.store.find(&id).await?.ok_or(ApiError::NotFound)?;

    Ok(Json(json!({"success": true, "data": submission})))
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// PUT /api/contact/{id}/status
pub async fn update_contact_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = ContactStatus::from_str(&request.status)
        .map_err(|_| ApiError::validation("Invalid status value"))?;

    let submission = state
        .store
        .update_status(&id, status)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({
        "success": true,
        "message": "Status updated successfully",
        "data": submission,
    })))
}

/// DELETE /api/contact/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.delete(&id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "message": "Contact deleted successfully",
    })))
}
