//! Route definitions for the `/sessions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET    /{session_id}            -> get_by_id
/// POST   /{session_id}/close      -> close
/// GET    /{session_id}/messages   -> list_messages
/// POST   /{session_id}/messages   -> append_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{session_id}", get(session::get_by_id))
        .route("/{session_id}/close", post(session::close))
        .route(
            "/{session_id}/messages",
            get(session::list_messages).post(session::append_message),
        )
}
