//! Chat message models.

use chatdesk_core::pagination::{Cursor, Keyed};
use chatdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub session_id: DbId,
    pub role: String,
    pub content: String,
    pub tool_name: Option<String>,
    pub tool_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

impl Keyed for Message {
    fn cursor_key(&self) -> Cursor {
        Cursor::new(self.created_at, self.id.to_string())
    }
}
