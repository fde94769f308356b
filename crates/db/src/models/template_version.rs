//! Template version rows.
//!
//! The domain type is [`chatdesk_core::versioning::TemplateVersion`]; this
//! row only exists to decode the TEXT `status` column.

use chatdesk_core::error::CoreError;
use chatdesk_core::types::{DbId, Timestamp};
use chatdesk_core::versioning::{TemplateVersion, VersionStatus};
use sqlx::FromRow;

/// A row from the `template_versions` table.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateVersionRow {
    pub id: DbId,
    pub template_id: DbId,
    pub version: i32,
    pub status: String,
    pub content: serde_json::Value,
    pub created_at: Timestamp,
}

impl TemplateVersionRow {
    pub fn into_domain(self) -> Result<TemplateVersion, CoreError> {
        let status: VersionStatus = self.status.parse()?;
        Ok(TemplateVersion {
            id: self.id,
            template_id: self.template_id,
            version: self.version,
            status,
            content: self.content,
            created_at: self.created_at,
        })
    }
}
