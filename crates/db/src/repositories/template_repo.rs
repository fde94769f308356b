//! Repository for the `templates` table.

use chatdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::template::{CreateTemplate, Template};

/// Column list for templates queries.
const COLUMNS: &str = "id, tenant_id, name, slug, created_at";

/// Provides CRUD operations for templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template. Fails with `uq_templates_tenant_slug` when the
    /// tenant already has a template with this slug.
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (tenant_id, name, slug)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(input.tenant_id)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        tenant_id: DbId,
        slug: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE tenant_id = $1 AND slug = $2");
        sqlx::query_as::<_, Template>(&query)
            .bind(tenant_id)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's templates newest first, strictly after the given
    /// keyset position.
    pub async fn list_after(
        pool: &PgPool,
        tenant_id: DbId,
        after: Option<(Timestamp, DbId)>,
        limit: i64,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let (after_ts, after_id) = after.unzip();
        let query = format!(
            "SELECT {COLUMNS} FROM templates
             WHERE tenant_id = $1
               AND ($2::timestamptz IS NULL OR (created_at, id) < ($2, $3::uuid))
             ORDER BY created_at DESC, id DESC
             LIMIT $4"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(tenant_id)
            .bind(after_ts)
            .bind(after_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
