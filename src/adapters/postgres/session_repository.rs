//! PostgreSQL implementation of SessionRepository.
//!
//! Persists Session aggregates to the `sessions` table created by
//! `migrations/0001_create_sessions.sql`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, RecipientId, SessionId, Timestamp};
use crate::domain::session::{AccessToken, Session};
use crate::ports::{SessionFilter, SessionRepository};

const SESSION_COLUMNS: &str =
    "id, recipient_id, access_token, created_at, expires_at, revoked_at";

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE access_token = $1"
        ))
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch session by token"))?;

        row.map(row_to_session).transpose()
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch session"))?;

        row.map(row_to_session).transpose()
    }

    async fn find_many(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let offset = i64::try_from(filter.offset()).unwrap_or(i64::MAX);

        let rows = sqlx::query(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM sessions
            WHERE ($1::text IS NULL OR recipient_id = $1)
              AND (NOT $2 OR (revoked_at IS NULL AND expires_at >= now()))
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.recipient_id.as_ref().map(RecipientId::as_str))
        .bind(filter.only_valid)
        .bind(i64::from(filter.page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list sessions"))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn find_last_by_recipient_id(
        &self,
        recipient_id: &RecipientId,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM sessions
            WHERE recipient_id = $1
            ORDER BY created_at DESC, id
            LIMIT 1
            "#
        ))
        .bind(recipient_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch last session"))?;

        row.map(row_to_session).transpose()
    }

    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, recipient_id, access_token, created_at, expires_at, revoked_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.recipient_id().as_str())
        .bind(session.access_token().as_str())
        .bind(session.created_at().as_datetime())
        .bind(session.expires_at().as_datetime())
        .bind(session.revoked_at().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert session"))?;

        Ok(())
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        // A row that is already revoked is never rewritten.
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                expires_at = $2,
                revoked_at = $3
            WHERE id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.expires_at().as_datetime())
        .bind(session.revoked_at().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update session"))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sessions WHERE id = $1)")
            .bind(session.id().as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check session existence"))?;

        Err(update_miss(session.id(), exists.0))
    }

    async fn delete_expired_sessions(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < now()")
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete expired sessions"))?;

        Ok(result.rows_affected())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("{}: {}", context, e))
}

/// Classifies an UPDATE that matched no row.
fn update_miss(id: &SessionId, row_exists: bool) -> DomainError {
    if row_exists {
        DomainError::new(
            ErrorCode::SessionRevoked,
            format!("Session already revoked: {}", id),
        )
    } else {
        DomainError::new(
            ErrorCode::SessionNotFound,
            format!("Session not found: {}", id),
        )
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_error("Failed to get id"))?;
    let recipient_id: String = row
        .try_get("recipient_id")
        .map_err(db_error("Failed to get recipient_id"))?;
    let access_token: String = row
        .try_get("access_token")
        .map_err(db_error("Failed to get access_token"))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(db_error("Failed to get created_at"))?;
    let expires_at: chrono::DateTime<chrono::Utc> = row
        .try_get("expires_at")
        .map_err(db_error("Failed to get expires_at"))?;
    let revoked_at: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("revoked_at")
        .map_err(db_error("Failed to get revoked_at"))?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        RecipientId::new(recipient_id)
            .map_err(|e| DomainError::database(format!("Invalid recipient_id: {}", e)))?,
        AccessToken::new(&access_token)
            .map_err(|e| DomainError::database(format!("Invalid stored access token: {}", e)))?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(expires_at),
        revoked_at.map(Timestamp::from_datetime),
    ))
}
