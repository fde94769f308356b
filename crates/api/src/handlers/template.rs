//! Handlers for tenant-scoped templates.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chatdesk_core::error::CoreError;
use chatdesk_core::pagination::list_page;
use chatdesk_core::slug::normalize_slug;
use chatdesk_db::models::template::{CreateTemplate, Template};
use chatdesk_db::repositories::TemplateRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::tenant::{clean_name, resolve_tenant};
use crate::query::CursorParams;
use crate::response::{CursorPage, DataResponse};
use crate::state::AppState;

/// Request body for `POST /api/v1/tenants/{tenant_slug}/templates`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub slug: String,
}

/// POST /api/v1/tenants/{tenant_slug}/templates
pub async fn create(
    State(state): State<AppState>,
    Path(tenant_slug): Path<String>,
    Json(input): Json<CreateTemplateRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Template>>)> {
    input.validate()?;
    let tenant = resolve_tenant(&state, &tenant_slug).await?;
    let create = CreateTemplate {
        tenant_id: tenant.id,
        name: clean_name(&input.name)?,
        slug: normalize_slug(&input.slug)?,
    };

    let template = TemplateRepo::create(&state.pool, &create).await?;

    tracing::info!(
        tenant_id = %tenant.id,
        template_id = %template.id,
        slug = %template.slug,
        "Template created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /api/v1/tenants/{tenant_slug}/templates?limit=&cursor=
pub async fn list_by_tenant(
    State(state): State<AppState>,
    Path(tenant_slug): Path<String>,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<DataResponse<CursorPage<Template>>>> {
    let cursor = params.cursor()?;
    let tenant = resolve_tenant(&state, &tenant_slug).await?;
    let page =
        list_page::<Template, _>(&state.store, &tenant.id, params.limit(), cursor.as_ref()).await?;
    Ok(Json(DataResponse { data: page.into() }))
}

/// GET /api/v1/tenants/{tenant_slug}/templates/{template_slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path((tenant_slug, template_slug)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<Template>>> {
    let tenant = resolve_tenant(&state, &tenant_slug).await?;
    let slug = normalize_slug(&template_slug)?;
    let template = TemplateRepo::find_by_slug(&state.pool, tenant.id, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Template", slug)))?;
    Ok(Json(DataResponse { data: template }))
}
