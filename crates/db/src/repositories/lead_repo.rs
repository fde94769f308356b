//! Repository for the `leads` table.

use chatdesk_core::session_close::NewJob;
use chatdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::LeadRow;
use crate::repositories::JobRepo;

/// Column list for leads queries.
const COLUMNS: &str = "id, session_id, created_at";

pub struct LeadRepo;

impl LeadRepo {
    /// Insert the lead and queue `job` in one transaction.
    ///
    /// A lead that already exists for the session fails on
    /// `uq_leads_session` and the job is rolled back with it.
    pub async fn create_with_job(
        pool: &PgPool,
        lead_id: DbId,
        session_id: DbId,
        job: &NewJob,
    ) -> Result<LeadRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO leads (id, session_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let lead = sqlx::query_as::<_, LeadRow>(&query)
            .bind(lead_id)
            .bind(session_id)
            .fetch_one(&mut *tx)
            .await?;

        let queued = JobRepo::enqueue(&mut *tx, &job.kind, &job.payload).await?;
        tx.commit().await?;

        tracing::debug!(
            lead_id = %lead.id,
            job_id = %queued.id,
            kind = %job.kind,
            "Lead written with job"
        );
        Ok(lead)
    }

    pub async fn find_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE session_id = $1");
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }
}
