//! Contact submission model and document store access

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Lifecycle state of a contact submission
///
/// Submissions start as `new` and are only ever mutated through explicit
/// status updates; any value outside this set is rejected at the boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new submission, before the store assigns identity
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// In-memory record returned when the store is unavailable
    ///
    /// The synthetic id is derived from the current time so the client still
    /// receives a unique-looking identifier. Placeholder records are never
    /// retried or queued for later persistence.
    pub fn placeholder(input: &NewContact) -> Self {
        let now = Utc::now();
        Self {
            id: format!("local-{}", now.timestamp_millis()),
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            status: ContactStatus::New,
            created_at: now,
        }
    }
}

/// Document store for contact submissions
///
/// Constructed once at startup and injected into the handlers. The pool is
/// optional: in development the server keeps running without a database and
/// `ready()` gates every operation instead of retrying with backoff.
#[derive(Clone)]
pub struct ContactStore {
    pool: Option<SqlitePool>,
}

impl ContactStore {
    pub fn connected(pool: SqlitePool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn disconnected() -> Self {
        Self { pool: None }
    }

    /// Readiness flag checked before each operation
    pub fn ready(&self) -> bool {
        self.pool.is_some()
    }

    /// Cheap connectivity probe for the health endpoint
    pub async fn ping(&self) -> bool {
        match &self.pool {
            Some(pool) => sqlx::query("SELECT 1").fetch_one(pool).await.is_ok(),
            None => false,
        }
    }

    fn pool(&self) -> Result<&SqlitePool, sqlx::Error> {
        self.pool.as_ref().ok_or(sqlx::Error::PoolClosed)
    }

    /// Persist a new submission with a server-assigned id and timestamp
    pub async fn insert(&self, input: &NewContact) -> Result<ContactSubmission, sqlx::Error> {
        let submission = ContactSubmission {
            id: Uuid::new_v4().to_string(),
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            status: ContactStatus::New,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO contacts (id, name, email, subject, message, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(submission.status)
        .bind(submission.created_at)
        .execute(self.pool()?)
        .await?;

        Ok(submission)
    }

    /// Page of submissions sorted by creation time descending, plus total count
    pub async fn list(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ContactSubmission>, i64), sqlx::Error> {
        let pool = self.pool()?;
        // page is client-controlled and may be arbitrarily large; an
        // out-of-range OFFSET just yields an empty page
        let offset = (page - 1).saturating_mul(limit);

        let submissions = sqlx::query_as::<_, ContactSubmission>(
            "SELECT id, name, email, subject, message, status, created_at
             FROM contacts ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(pool)
            .await?;

        Ok((submissions, total))
    }

    pub async fn find(&self, id: &str) -> Result<Option<ContactSubmission>, sqlx::Error> {
        sqlx::query_as::<_, ContactSubmission>(
            "SELECT id, name, email, subject, message, status, created_at
             FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool()?)
        .await
    }

    /// Apply a status transition, returning the post-update record
    pub async fn update_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        sqlx::query_as::<_, ContactSubmission>(
            "UPDATE contacts SET status = ? WHERE id = ?
             RETURNING id, name, email, subject, message, status, created_at",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(self.pool()?)
        .await
    }

    /// Remove a submission; returns false when the id was absent
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(self.pool()?)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
