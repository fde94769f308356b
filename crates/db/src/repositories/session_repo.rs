//! Repository for the `sessions` table.

use chatdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::SessionRow;

/// Column list for sessions queries.
const COLUMNS: &str = "id, tenant_id, created_at, closed_at";

/// Provides lifecycle operations for chat sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Open a new session for a tenant.
    pub async fn create(pool: &PgPool, tenant_id: DbId) -> Result<SessionRow, sqlx::Error> {
        let query = format!("INSERT INTO sessions (tenant_id) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(tenant_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set `closed_at` if the session is still open. Returns `true` when
    /// this call performed the transition.
    pub async fn mark_closed(pool: &PgPool, id: DbId, at: Timestamp) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET closed_at = $2 WHERE id = $1 AND closed_at IS NULL",
        )
        .bind(id)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
