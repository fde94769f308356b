//! Idempotent close workflow for chat sessions.
//!
//! Closing a session marks it closed, creates its lead, and hands the lead
//! to downstream delivery through an `export_lead` job. Callers may retry
//! and may race each other; the workflow still produces at most one lead
//! and at most one export job per session.
//!
//! Idempotency is read from persisted state rather than tracked in memory:
//! `closed_at` says the transition happened, the lead row (unique per
//! session) says the side effects were claimed. The lead and its export job
//! are written as one unit, so a lead never exists without its job and a
//! failed attempt leaves nothing behind for the retry to trip over.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::store::InsertOutcome;
use crate::types::{DbId, Timestamp};

/// Job kind consumed by the lead-export worker.
pub const EXPORT_LEAD_JOB: &str = "export_lead";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: DbId,
    pub tenant_id: DbId,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

impl Session {
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

/// The sales lead produced when a session closes. One per session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub session_id: DbId,
    pub created_at: Timestamp,
}

/// A queued unit of downstream work.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub kind: String,
    pub payload: Value,
}

/// The job that hands a lead to the export worker.
pub fn export_lead_job(session_id: DbId, lead_id: DbId) -> NewJob {
    NewJob {
        kind: EXPORT_LEAD_JOB.to_string(),
        payload: json!({ "session_id": session_id, "lead_id": lead_id }),
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_session(&self, id: DbId) -> Result<Option<Session>, CoreError>;

    /// Set `closed_at` only if the session is still open. Returns whether a
    /// row changed.
    async fn mark_closed(&self, id: DbId, at: Timestamp) -> Result<bool, CoreError>;

    async fn find_lead_for_session(&self, session_id: DbId) -> Result<Option<Lead>, CoreError>;

    /// Insert the lead with id `lead_id` together with `job`. Both rows are
    /// written or neither is. A second lead for the same session reports
    /// [`InsertOutcome::Duplicate`] and writes no job.
    async fn insert_lead_with_job(
        &self,
        lead_id: DbId,
        session_id: DbId,
        job: &NewJob,
    ) -> Result<InsertOutcome<Lead>, CoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// This call completed the close (or finished a partially failed one).
    Closed,
    /// Nothing to do: the session was closed and its lead already exists.
    AlreadyClosed,
}

/// Close a session and emit its lead exactly once.
///
/// Marking the session closed comes before any side effect. If writing the
/// lead or its export job fails afterwards, neither is kept, and a retry
/// sees a closed session without a lead and completes the work.
pub async fn close_session<S>(
    store: &S,
    clock: &dyn Clock,
    session_id: DbId,
) -> Result<CloseOutcome, CoreError>
where
    S: SessionStore + ?Sized,
{
    let session = store
        .find_session(session_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Session", session_id))?;

    if session.is_closed() {
        if store.find_lead_for_session(session_id).await?.is_some() {
            tracing::debug!(session_id = %session_id, "Session already closed");
            return Ok(CloseOutcome::AlreadyClosed);
        }
        tracing::warn!(
            session_id = %session_id,
            "Closed session has no lead, resuming close"
        );
    } else {
        let changed = store.mark_closed(session_id, clock.now()).await?;
        if !changed {
            tracing::debug!(session_id = %session_id, "Session closed concurrently");
        }
        if store.find_lead_for_session(session_id).await?.is_some() {
            return Ok(CloseOutcome::Closed);
        }
    }

    let lead_id = DbId::new_v4();
    let job = export_lead_job(session_id, lead_id);
    match store.insert_lead_with_job(lead_id, session_id, &job).await? {
        InsertOutcome::Inserted(lead) => {
            tracing::info!(
                session_id = %session_id,
                lead_id = %lead.id,
                "Session closed, lead export enqueued"
            );
            Ok(CloseOutcome::Closed)
        }
        InsertOutcome::Duplicate => {
            tracing::debug!(session_id = %session_id, "Lead created by concurrent closer");
            Ok(CloseOutcome::Closed)
        }
        InsertOutcome::ParentMissing => Err(CoreError::not_found("Session", session_id)),
    }
}
