//! Route definitions for the `/tenants` resource.
//!
//! Also nests tenant-scoped template and session routes under
//! `/tenants/{tenant_slug}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{session, template, tenant};
use crate::state::AppState;

/// Routes mounted at `/tenants`.
///
/// ```text
/// GET    /                                          -> list
/// POST   /                                          -> create
/// GET    /{tenant_slug}                             -> get_by_slug
///
/// GET    /{tenant_slug}/templates                   -> list_by_tenant
/// POST   /{tenant_slug}/templates                   -> create
/// GET    /{tenant_slug}/templates/{template_slug}   -> get_by_slug
///
/// POST   /{tenant_slug}/sessions                    -> create
/// ```
pub fn router() -> Router<AppState> {
    let template_routes = Router::new()
        .route("/", get(template::list_by_tenant).post(template::create))
        .route("/{template_slug}", get(template::get_by_slug));

    Router::new()
        .route("/", get(tenant::list).post(tenant::create))
        .route("/{tenant_slug}", get(tenant::get_by_slug))
        .nest("/{tenant_slug}/templates", template_routes)
        .route("/{tenant_slug}/sessions", post(session::create))
}
