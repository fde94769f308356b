//! Chat session rows.

use chatdesk_core::session_close::Session;
use chatdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: DbId,
    pub tenant_id: DbId,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            tenant_id: row.tenant_id,
            created_at: row.created_at,
            closed_at: row.closed_at,
        }
    }
}
