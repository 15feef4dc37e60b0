//! SQLite-backed linked-account repository.
//!
//! Implements the `AccountAssociationStore` port plus the write operations the
//! host needs when it links or unlinks an account. All database operations
//! run in `spawn_blocking` to avoid blocking the async runtime, and every
//! query is parameterized.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;
use tracing::debug;
use wikiauth_core::AccountAssociationStore;
use wikiauth_domain::{LinkedAccountRecord, Result as DomainResult, WikiAuthError};

use super::manager::{map_sql_error, DbManager};

const SELECT_COLUMNS: &str =
    "provider_name, provider_subject_id, stored_email, user_id, linked_at";

/// SQLite-backed linked-account repository.
pub struct SqliteLinkedAccountRepository {
    db: Arc<DbManager>,
}

impl SqliteLinkedAccountRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or update the record for `(provider_name, provider_subject_id)`.
    ///
    /// # Errors
    /// `WikiAuthError::AccountConflict` when another subject of the same
    /// provider already holds the non-empty `stored_email`.
    pub async fn save(&self, record: &LinkedAccountRecord) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let record = record.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            upsert_record(&conn, &record).map_err(map_sql_error)?;
            debug!(
                provider = %record.provider_name,
                subject_id = %record.provider_subject_id,
                "linked account saved"
            );
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    /// Record linked to `subject_id` under `provider_name`, if any.
    pub async fn find_by_subject(
        &self,
        provider_name: &str,
        subject_id: &str,
    ) -> DomainResult<Option<LinkedAccountRecord>> {
        let db = Arc::clone(&self.db);
        let provider_name = provider_name.to_string();
        let subject_id = subject_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<LinkedAccountRecord>> {
            let conn = db.get_connection()?;
            query_by_subject(&conn, &provider_name, &subject_id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    /// Remove the association. Returns whether a record existed.
    pub async fn delete_by_subject(&self, provider_name: &str, subject_id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let provider_name = provider_name.to_string();
        let subject_id = subject_id.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let deleted = conn
                .execute(
                    "DELETE FROM linked_accounts WHERE provider_name = ?1 AND provider_subject_id = ?2",
                    params![provider_name, subject_id],
                )
                .map_err(map_sql_error)?;
            Ok(deleted > 0)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl AccountAssociationStore for SqliteLinkedAccountRepository {
    async fn find_by_email_excluding_subject(
        &self,
        provider_name: &str,
        email: &str,
        exclude_subject_id: &str,
    ) -> DomainResult<Option<LinkedAccountRecord>> {
        let db = Arc::clone(&self.db);
        let provider_name = provider_name.to_string();
        let email = email.to_string();
        let exclude_subject_id = exclude_subject_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<LinkedAccountRecord>> {
            let conn = db.get_connection()?;
            query_conflict(&conn, &provider_name, &email, &exclude_subject_id)
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn upsert_record(conn: &Connection, record: &LinkedAccountRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO linked_accounts (provider_name, provider_subject_id, stored_email, user_id, linked_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(provider_name, provider_subject_id) DO UPDATE SET
            stored_email = excluded.stored_email,
            user_id = excluded.user_id",
        params![
            record.provider_name,
            record.provider_subject_id,
            record.stored_email,
            record.user_id,
            record.linked_at.timestamp(),
        ],
    )?;
    Ok(())
}

fn query_by_subject(
    conn: &Connection,
    provider_name: &str,
    subject_id: &str,
) -> rusqlite::Result<Option<LinkedAccountRecord>> {
    conn.query_row(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM linked_accounts
             WHERE provider_name = ?1 AND provider_subject_id = ?2"
        ),
        params![provider_name, subject_id],
        map_record,
    )
    .optional()
}

/// Exact (binary collation) email match under a different subject.
fn query_conflict(
    conn: &Connection,
    provider_name: &str,
    email: &str,
    exclude_subject_id: &str,
) -> rusqlite::Result<Option<LinkedAccountRecord>> {
    conn.query_row(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM linked_accounts
             WHERE provider_name = ?1 AND stored_email = ?2 AND provider_subject_id <> ?3
             LIMIT 1"
        ),
        params![provider_name, email, exclude_subject_id],
        map_record,
    )
    .optional()
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<LinkedAccountRecord> {
    let linked_at: i64 = row.get(4)?;
    Ok(LinkedAccountRecord {
        provider_name: row.get(0)?,
        provider_subject_id: row.get(1)?,
        stored_email: row.get(2)?,
        user_id: row.get(3)?,
        linked_at: DateTime::<Utc>::from_timestamp(linked_at, 0)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(4, linked_at))?,
    })
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Map JoinError from spawn_blocking to WikiAuthError.
fn map_join_error(err: task::JoinError) -> WikiAuthError {
    if err.is_cancelled() {
        WikiAuthError::Internal("blocking task cancelled".into())
    } else {
        WikiAuthError::Internal(format!("blocking task failed: {err}"))
    }
}

// ============================================================================
// Tests
// ============================================================================
