//! Draft/publish lifecycle for template versions.
//!
//! Each template owns an append-only sequence of versions numbered from 1.
//! Versions start as drafts; publishing promotes one of them and demotes
//! whichever version held the slot before, in a single atomic store call.
//! At most one version per template is published at any instant. The store
//! guarantees this with a partial unique index; nothing here relies on
//! in-process locking.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::store::{InsertOutcome, UpdateOutcome};
use crate::types::{DbId, Timestamp};

/// Lifecycle state of a template version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Published,
}

impl VersionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl std::str::FromStr for VersionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(CoreError::Validation(format!(
                "unknown version status: {other}"
            ))),
        }
    }
}

/// One immutable-content revision of a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateVersion {
    pub id: DbId,
    pub template_id: DbId,
    pub version: i32,
    pub status: VersionStatus,
    pub content: Value,
    pub created_at: Timestamp,
}

/// Persistence required by the version lifecycle.
#[async_trait]
pub trait TemplateVersionStore: Send + Sync {
    /// Insert a draft numbered `max(version) + 1` for the template, assigned
    /// atomically with respect to concurrent callers.
    async fn insert_next_draft(
        &self,
        template_id: DbId,
        content: &Value,
    ) -> Result<InsertOutcome<TemplateVersion>, CoreError>;

    async fn find_version(
        &self,
        template_id: DbId,
        version: i32,
    ) -> Result<Option<TemplateVersion>, CoreError>;

    async fn find_published(&self, template_id: DbId)
        -> Result<Option<TemplateVersion>, CoreError>;

    /// Atomically demote `displaced` (if still published) and promote
    /// `version` from draft to published. Either both happen or neither.
    async fn swap_published(
        &self,
        template_id: DbId,
        displaced: Option<i32>,
        version: i32,
    ) -> Result<UpdateOutcome<TemplateVersion>, CoreError>;
}

/// The number the next draft of a template receives.
pub fn next_version_number(existing: &[i32]) -> i32 {
    existing.iter().copied().max().unwrap_or(0) + 1
}

/// Create a new draft. Missing content is stored as an empty JSON object.
pub async fn create_draft<S>(
    store: &S,
    template_id: DbId,
    content: Option<Value>,
) -> Result<TemplateVersion, CoreError>
where
    S: TemplateVersionStore + ?Sized,
{
    let content = content.unwrap_or_else(|| Value::Object(Default::default()));

    match store.insert_next_draft(template_id, &content).await? {
        InsertOutcome::Inserted(draft) => {
            tracing::info!(
                template_id = %template_id,
                version = draft.version,
                "Template draft created"
            );
            Ok(draft)
        }
        InsertOutcome::ParentMissing => Err(CoreError::not_found("Template", template_id)),
        // Numbering is serialized per template, so this only fires if the
        // store's locking is broken.
        InsertOutcome::Duplicate => Err(CoreError::Conflict(
            "version number already taken".to_string(),
        )),
    }
}

/// Publish `version`, displacing whichever version is currently published.
pub async fn publish<S>(
    store: &S,
    template_id: DbId,
    version: i32,
) -> Result<TemplateVersion, CoreError>
where
    S: TemplateVersionStore + ?Sized,
{
    if version <= 0 {
        return Err(CoreError::Validation(
            "version must be a positive integer".to_string(),
        ));
    }

    let displaced = store
        .find_published(template_id)
        .await?
        .map(|current| current.version);

    match store
        .swap_published(template_id, displaced, version)
        .await?
    {
        UpdateOutcome::Applied(published) => {
            tracing::info!(
                template_id = %template_id,
                version,
                displaced = ?displaced,
                "Template version published"
            );
            Ok(published)
        }
        UpdateOutcome::NoRowsMatched | UpdateOutcome::UniqueViolation => {
            match store.find_version(template_id, version).await? {
                None => Err(CoreError::not_found(
                    "TemplateVersion",
                    format!("{template_id}/{version}"),
                )),
                Some(_) => {
                    tracing::debug!(
                        template_id = %template_id,
                        version,
                        "Publish rejected: slot taken or version not a draft"
                    );
                    Err(CoreError::Conflict("version already published".to_string()))
                }
            }
        }
    }
}

/// The currently published version of a template.
pub async fn get_published<S>(store: &S, template_id: DbId) -> Result<TemplateVersion, CoreError>
where
    S: TemplateVersionStore + ?Sized,
{
    store
        .find_published(template_id)
        .await?
        .ok_or_else(|| CoreError::not_found("TemplateVersion", template_id))
}
