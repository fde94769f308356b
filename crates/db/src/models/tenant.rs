//! Tenant models.

use chatdesk_core::pagination::{Cursor, Keyed};
use chatdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tenants` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Tenant {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

impl Keyed for Tenant {
    fn cursor_key(&self) -> Cursor {
        Cursor::new(self.created_at, self.id.to_string())
    }
}

/// Insert DTO. `slug` must already be normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub slug: String,
}
