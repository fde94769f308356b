//! Repository for the `template_versions` table.
//!
//! Publishing is a conditional swap inside one transaction. The partial
//! unique index `uq_template_versions_one_published` rejects any promotion
//! that would leave two published versions, which surfaces here as a
//! unique-violation `sqlx::Error` and rolls the transaction back.

use chatdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::template_version::TemplateVersionRow;

/// Column list for template_versions queries.
const COLUMNS: &str = "id, template_id, version, status, content, created_at";

/// Provides version-management operations for template versions.
pub struct TemplateVersionRepo;

impl TemplateVersionRepo {
    /// Insert a draft numbered one past the template's highest version.
    ///
    /// The template row is locked for the duration of the transaction so
    /// concurrent callers are serialized. Returns `None` when the template
    /// does not exist.
    pub async fn insert_next_draft(
        pool: &PgPool,
        template_id: DbId,
        content: &serde_json::Value,
    ) -> Result<Option<TemplateVersionRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM templates WHERE id = $1 FOR UPDATE")
                .bind(template_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO template_versions (template_id, version, status, content)
             VALUES ($1,
                     COALESCE((SELECT MAX(version) FROM template_versions WHERE template_id = $1), 0) + 1,
                     'draft', $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TemplateVersionRow>(&query)
            .bind(template_id)
            .bind(content)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    pub async fn find_by_version(
        pool: &PgPool,
        template_id: DbId,
        version: i32,
    ) -> Result<Option<TemplateVersionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM template_versions
             WHERE template_id = $1 AND version = $2"
        );
        sqlx::query_as::<_, TemplateVersionRow>(&query)
            .bind(template_id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_published(
        pool: &PgPool,
        template_id: DbId,
    ) -> Result<Option<TemplateVersionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM template_versions
             WHERE template_id = $1 AND status = 'published'"
        );
        sqlx::query_as::<_, TemplateVersionRow>(&query)
            .bind(template_id)
            .fetch_optional(pool)
            .await
    }

    /// All versions of a template, highest number first.
    pub async fn list_for_template(
        pool: &PgPool,
        template_id: DbId,
    ) -> Result<Vec<TemplateVersionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM template_versions
             WHERE template_id = $1
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, TemplateVersionRow>(&query)
            .bind(template_id)
            .fetch_all(pool)
            .await
    }

    /// Demote `displaced` (if still published) and promote `version` from
    /// draft to published, atomically.
    ///
    /// Returns `None` and rolls back when `version` is not a draft of this
    /// template. A promotion blocked by another published version returns
    /// the unique-violation error, also rolled back.
    pub async fn swap_published(
        pool: &PgPool,
        template_id: DbId,
        displaced: Option<i32>,
        version: i32,
    ) -> Result<Option<TemplateVersionRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(old) = displaced {
            sqlx::query(
                "UPDATE template_versions SET status = 'draft' \
                 WHERE template_id = $1 AND version = $2 AND status = 'published'",
            )
            .bind(template_id)
            .bind(old)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE template_versions SET status = 'published' \
             WHERE template_id = $1 AND version = $2 AND status = 'draft' \
             RETURNING {COLUMNS}"
        );
        let promoted = sqlx::query_as::<_, TemplateVersionRow>(&query)
            .bind(template_id)
            .bind(version)
            .fetch_optional(&mut *tx)
            .await?;

        match promoted {
            Some(row) => {
                tx.commit().await?;
                Ok(Some(row))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }
}
