//! Repository for the `tenants` table.

use chatdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::tenant::{CreateTenant, Tenant};

/// Column list for tenants queries.
const COLUMNS: &str = "id, name, slug, created_at";

/// Provides CRUD operations for tenants.
pub struct TenantRepo;

impl TenantRepo {
    /// Insert a new tenant. Fails with `uq_tenants_slug` on a taken slug.
    pub async fn create(pool: &PgPool, input: &CreateTenant) -> Result<Tenant, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenants (name, slug)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE slug = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List tenants newest first, strictly after the given keyset position.
    pub async fn list_after(
        pool: &PgPool,
        after: Option<(Timestamp, DbId)>,
        limit: i64,
    ) -> Result<Vec<Tenant>, sqlx::Error> {
        let (after_ts, after_id) = after.unzip();
        let query = format!(
            "SELECT {COLUMNS} FROM tenants
             WHERE $1::timestamptz IS NULL OR (created_at, id) < ($1, $2::uuid)
             ORDER BY created_at DESC, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(after_ts)
            .bind(after_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
