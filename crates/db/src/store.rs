//! Postgres implementations of the `chatdesk-core` store traits.
//!
//! Repositories return raw `sqlx::Error`; this layer classifies the errors
//! the core workflows branch on (unique and foreign-key violations) into
//! outcome values and wraps everything else as `CoreError::Storage`.

use async_trait::async_trait;
use chatdesk_core::error::CoreError;
use chatdesk_core::pagination::{Cursor, KeysetSource};
use chatdesk_core::session_close::{Lead, NewJob, Session, SessionStore};
use chatdesk_core::store::{InsertOutcome, UpdateOutcome};
use chatdesk_core::types::{DbId, Timestamp};
use chatdesk_core::versioning::{TemplateVersion, TemplateVersionStore};
use serde_json::Value;
use sqlx::PgPool;

use crate::models::message::Message;
use crate::models::template::Template;
use crate::models::tenant::Tenant;
use crate::repositories::{
    LeadRepo, MessageRepo, SessionRepo, TemplateRepo, TemplateVersionRepo, TenantRepo,
};

/// Whether the error is a Postgres unique violation (23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Whether the error is a Postgres foreign-key violation (23503).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

/// Split a cursor into a typed keyset position. Every table keys on UUIDs,
/// so any other id cannot have come from us.
fn keyset_position(after: Option<&Cursor>) -> Result<Option<(Timestamp, DbId)>, CoreError> {
    after
        .map(|c| {
            let id = c.id.parse::<DbId>().map_err(|_| CoreError::InvalidCursor)?;
            Ok((c.created_at, id))
        })
        .transpose()
}

/// Store adapter over a connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ---------------------------------------------------------------------------
// Template versions
// ---------------------------------------------------------------------------

#[async_trait]
impl TemplateVersionStore for PgStore {
    async fn insert_next_draft(
        &self,
        template_id: DbId,
        content: &Value,
    ) -> Result<InsertOutcome<TemplateVersion>, CoreError> {
        match TemplateVersionRepo::insert_next_draft(&self.pool, template_id, content).await {
            Ok(Some(row)) => Ok(InsertOutcome::Inserted(row.into_domain()?)),
            Ok(None) => Ok(InsertOutcome::ParentMissing),
            Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(CoreError::storage(e)),
        }
    }

    async fn find_version(
        &self,
        template_id: DbId,
        version: i32,
    ) -> Result<Option<TemplateVersion>, CoreError> {
        TemplateVersionRepo::find_by_version(&self.pool, template_id, version)
            .await
            .map_err(CoreError::storage)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn find_published(
        &self,
        template_id: DbId,
    ) -> Result<Option<TemplateVersion>, CoreError> {
        TemplateVersionRepo::find_published(&self.pool, template_id)
            .await
            .map_err(CoreError::storage)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn swap_published(
        &self,
        template_id: DbId,
        displaced: Option<i32>,
        version: i32,
    ) -> Result<UpdateOutcome<TemplateVersion>, CoreError> {
        match TemplateVersionRepo::swap_published(&self.pool, template_id, displaced, version).await
        {
            Ok(Some(row)) => Ok(UpdateOutcome::Applied(row.into_domain()?)),
            Ok(None) => Ok(UpdateOutcome::NoRowsMatched),
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(
                    template_id = %template_id,
                    version,
                    "Publish blocked by one-published index"
                );
                Ok(UpdateOutcome::UniqueViolation)
            }
            Err(e) => Err(CoreError::storage(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Sessions and leads
// ---------------------------------------------------------------------------

#[async_trait]
impl SessionStore for PgStore {
    async fn find_session(&self, id: DbId) -> Result<Option<Session>, CoreError> {
        let row = SessionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::storage)?;
        Ok(row.map(Session::from))
    }

    async fn mark_closed(&self, id: DbId, at: Timestamp) -> Result<bool, CoreError> {
        SessionRepo::mark_closed(&self.pool, id, at)
            .await
            .map_err(CoreError::storage)
    }

    async fn find_lead_for_session(&self, session_id: DbId) -> Result<Option<Lead>, CoreError> {
        let row = LeadRepo::find_by_session(&self.pool, session_id)
            .await
            .map_err(CoreError::storage)?;
        Ok(row.map(Lead::from))
    }

    async fn insert_lead_with_job(
        &self,
        lead_id: DbId,
        session_id: DbId,
        job: &NewJob,
    ) -> Result<InsertOutcome<Lead>, CoreError> {
        match LeadRepo::create_with_job(&self.pool, lead_id, session_id, job).await {
            Ok(row) => Ok(InsertOutcome::Inserted(row.into())),
            Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
            Err(e) if is_foreign_key_violation(&e) => Ok(InsertOutcome::ParentMissing),
            Err(e) => Err(CoreError::storage(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyset sources
// ---------------------------------------------------------------------------

#[async_trait]
impl KeysetSource<Tenant> for PgStore {
    type Scope = ();

    async fn fetch_after(
        &self,
        _scope: &(),
        after: Option<&Cursor>,
        limit: i64,
    ) -> Result<Vec<Tenant>, CoreError> {
        let after = keyset_position(after)?;
        TenantRepo::list_after(&self.pool, after, limit)
            .await
            .map_err(CoreError::storage)
    }
}

/// Templates are listed per tenant.
#[async_trait]
impl KeysetSource<Template> for PgStore {
    type Scope = DbId;

    async fn fetch_after(
        &self,
        tenant_id: &DbId,
        after: Option<&Cursor>,
        limit: i64,
    ) -> Result<Vec<Template>, CoreError> {
        let after = keyset_position(after)?;
        TemplateRepo::list_after(&self.pool, *tenant_id, after, limit)
            .await
            .map_err(CoreError::storage)
    }
}

/// Messages are listed per session.
#[async_trait]
impl KeysetSource<Message> for PgStore {
    type Scope = DbId;

    async fn fetch_after(
        &self,
        session_id: &DbId,
        after: Option<&Cursor>,
        limit: i64,
    ) -> Result<Vec<Message>, CoreError> {
        let after = keyset_position(after)?;
        MessageRepo::list_after(&self.pool, *session_id, after, limit)
            .await
            .map_err(CoreError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    #[test]
    fn keyset_position_passes_through_none() {
        assert_eq!(keyset_position(None).unwrap(), None);
    }

    #[test]
    fn keyset_position_parses_uuid_ids() {
        let id = DbId::new_v4();
        let now = Utc::now();
        let cursor = Cursor::new(now, id.to_string());
        assert_eq!(keyset_position(Some(&cursor)).unwrap(), Some((now, id)));
    }

    #[test]
    fn keyset_position_rejects_foreign_ids() {
        let cursor = Cursor::new(Utc::now(), "m123");
        assert_matches!(keyset_position(Some(&cursor)), Err(CoreError::InvalidCursor));
    }

    #[test]
    fn non_database_errors_are_not_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut));
    }
}
