//! Handlers for the template draft/publish lifecycle.
//!
//! All state transitions go through `chatdesk_core::versioning`; these
//! handlers only translate HTTP to workflow calls.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chatdesk_core::types::DbId;
use chatdesk_core::versioning::{self, TemplateVersion};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a draft. Missing content becomes `{}`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDraftRequest {
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub version: i32,
}

/// POST /api/v1/templates/{template_id}/drafts
pub async fn create_draft(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
    Json(input): Json<CreateDraftRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TemplateVersion>>)> {
    let draft = versioning::create_draft(&state.store, template_id, input.content).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// POST /api/v1/templates/{template_id}/publish
///
/// Publishes `version` and demotes the previously published version in the
/// same transaction. Returns 409 if the version is already published or a
/// concurrent publish won.
pub async fn publish(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
    Json(input): Json<PublishRequest>,
) -> AppResult<Json<DataResponse<TemplateVersion>>> {
    let published = versioning::publish(&state.store, template_id, input.version).await?;
    Ok(Json(DataResponse { data: published }))
}

/// GET /api/v1/templates/{template_id}/published
pub async fn get_published(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TemplateVersion>>> {
    let current = versioning::get_published(&state.store, template_id).await?;
    Ok(Json(DataResponse { data: current }))
}
