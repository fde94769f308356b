use chatdesk_core::session_close::Lead;
use chatdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow)]
pub struct LeadRow {
    pub id: DbId,
    pub session_id: DbId,
    pub created_at: Timestamp,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id,
            session_id: row.session_id,
            created_at: row.created_at,
        }
    }
}
