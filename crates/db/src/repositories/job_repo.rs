//! Repository for the `jobs` queue table.

use sqlx::{PgConnection, PgPool};

use crate::models::job::Job;

/// Column list for jobs queries.
const COLUMNS: &str = "id, kind, payload, created_at";

pub struct JobRepo;

impl JobRepo {
    /// Queue a job on `conn`. Callers pass an open transaction so the job
    /// commits together with the row that triggered it.
    pub async fn enqueue(
        conn: &mut PgConnection,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<Job, sqlx::Error> {
        let query = format!("INSERT INTO jobs (kind, payload) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Job>(&query)
            .bind(kind)
            .bind(payload)
            .fetch_one(conn)
            .await
    }

    /// Jobs of one kind in insertion order.
    pub async fn list_by_kind(pool: &PgPool, kind: &str) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs WHERE kind = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(kind)
            .fetch_all(pool)
            .await
    }
}
