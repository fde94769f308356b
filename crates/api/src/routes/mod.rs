pub mod health;
pub mod session;
pub mod template;
pub mod tenant;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tenants                                          list, create
/// /tenants/{tenant_slug}                            get by slug
/// /tenants/{tenant_slug}/templates                  list, create
/// /tenants/{tenant_slug}/templates/{template_slug}  get by slug
/// /tenants/{tenant_slug}/sessions                   open session (POST)
///
/// /templates/{template_id}/drafts                   create draft (POST)
/// /templates/{template_id}/publish                  publish version (POST)
/// /templates/{template_id}/published                current published version
///
/// /sessions/{session_id}                            get
/// /sessions/{session_id}/close                      close (POST, idempotent)
/// /sessions/{session_id}/messages                   list, append
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tenants", tenant::router())
        .nest("/templates", template::router())
        .nest("/sessions", session::router())
}
