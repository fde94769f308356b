//! Handlers for chat sessions and their messages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chatdesk_core::error::CoreError;
use chatdesk_core::message::prepare_message;
use chatdesk_core::pagination::list_page;
use chatdesk_core::session_close::{close_session, Session};
use chatdesk_core::types::DbId;
use chatdesk_db::models::message::Message;
use chatdesk_db::repositories::{MessageRepo, SessionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::tenant::resolve_tenant;
use crate::query::CursorParams;
use crate::response::{CursorPage, DataResponse};
use crate::state::AppState;

/// Request body for `POST /api/v1/sessions/{session_id}/messages`.
#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub role: String,
    #[serde(default)]
    pub content: String,
    pub tool_name: Option<String>,
    pub tool_data: Option<serde_json::Value>,
}

async fn find_session(state: &AppState, id: DbId) -> AppResult<Session> {
    SessionRepo::find_by_id(&state.pool, id)
        .await?
        .map(Session::from)
        .ok_or_else(|| AppError::Core(CoreError::not_found("Session", id)))
}

/// POST /api/v1/tenants/{tenant_slug}/sessions
pub async fn create(
    State(state): State<AppState>,
    Path(tenant_slug): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<Session>>)> {
    let tenant = resolve_tenant(&state, &tenant_slug).await?;
    let session: Session = SessionRepo::create(&state.pool, tenant.id).await?.into();

    tracing::info!(tenant_id = %tenant.id, session_id = %session.id, "Session opened");
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/sessions/{session_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Session>>> {
    let session = find_session(&state, session_id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/sessions/{session_id}/close
///
/// Idempotent: closing an already closed session also returns 204.
pub async fn close(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<StatusCode> {
    close_session(&state.store, state.clock.as_ref(), session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/{session_id}/messages?limit=&cursor=
pub async fn list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<DataResponse<CursorPage<Message>>>> {
    let cursor = params.cursor()?;
    find_session(&state, session_id).await?;
    let page =
        list_page::<Message, _>(&state.store, &session_id, params.limit(), cursor.as_ref()).await?;
    Ok(Json(DataResponse { data: page.into() }))
}

/// POST /api/v1/sessions/{session_id}/messages
///
/// Rejected with 409 once the session is closed.
pub async fn append_message(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Json(input): Json<AppendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    let msg = prepare_message(
        &input.role,
        &input.content,
        input.tool_name.as_deref(),
        input.tool_data,
    )?;

    match MessageRepo::append_to_open_session(&state.pool, session_id, &msg).await? {
        Some(message) => {
            tracing::debug!(
                session_id = %session_id,
                message_id = %message.id,
                role = msg.role.as_str(),
                "Message appended"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
        }
        None => {
            // Either the session does not exist or it is closed.
            find_session(&state, session_id).await?;
            Err(AppError::Core(CoreError::Conflict("session closed".to_string())))
        }
    }
}
