//! Route definitions for template versions, addressed by template id.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::template_version;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// POST   /{template_id}/drafts      -> create_draft
/// POST   /{template_id}/publish     -> publish
/// GET    /{template_id}/published   -> get_published
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{template_id}/drafts", post(template_version::create_draft))
        .route("/{template_id}/publish", post(template_version::publish))
        .route("/{template_id}/published", get(template_version::get_published))
}
