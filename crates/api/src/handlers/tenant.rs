//! Handlers for the `/tenants` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chatdesk_core::error::CoreError;
use chatdesk_core::pagination::list_page;
use chatdesk_core::slug::normalize_slug;
use chatdesk_db::models::tenant::{CreateTenant, Tenant};
use chatdesk_db::repositories::TenantRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::CursorParams;
use crate::response::{CursorPage, DataResponse};
use crate::state::AppState;

/// Request body for `POST /api/v1/tenants`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub slug: String,
}

/// Trim a display name and reject one that is blank.
pub(crate) fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be blank".to_string(),
        )));
    }
    Ok(name.to_string())
}

/// Resolve a tenant from a path slug, normalizing it first.
pub(crate) async fn resolve_tenant(state: &AppState, raw_slug: &str) -> AppResult<Tenant> {
    let slug = normalize_slug(raw_slug)?;
    TenantRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tenant", slug)))
}

/// POST /api/v1/tenants
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTenantRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Tenant>>)> {
    input.validate()?;
    let create = CreateTenant {
        name: clean_name(&input.name)?,
        slug: normalize_slug(&input.slug)?,
    };

    let tenant = TenantRepo::create(&state.pool, &create).await?;

    tracing::info!(tenant_id = %tenant.id, slug = %tenant.slug, "Tenant created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tenant })))
}

/// GET /api/v1/tenants?limit=&cursor=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<DataResponse<CursorPage<Tenant>>>> {
    let cursor = params.cursor()?;
    let page = list_page::<Tenant, _>(&state.store, &(), params.limit(), cursor.as_ref()).await?;
    Ok(Json(DataResponse { data: page.into() }))
}

/// GET /api/v1/tenants/{tenant_slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Tenant>>> {
    let tenant = resolve_tenant(&state, &slug).await?;
    Ok(Json(DataResponse { data: tenant }))
}
