//! HTTP-level integration tests for the draft/publish endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, expect_json, get};
use serde_json::json;
use sqlx::PgPool;

/// Create a tenant and a template over HTTP; returns the template id.
async fn setup_template(pool: &PgPool) -> String {
    expect_json(
        build_test_app(pool.clone()),
        "/api/v1/tenants",
        json!({"name": "Acme", "slug": "acme"}),
        StatusCode::CREATED,
    )
    .await;
    let template = expect_json(
        build_test_app(pool.clone()),
        "/api/v1/tenants/acme/templates",
        json!({"name": "Welcome", "slug": "welcome"}),
        StatusCode::CREATED,
    )
    .await;
    template["data"]["id"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_publish_lifecycle(pool: PgPool) {
    let id = setup_template(&pool).await;
    let drafts = format!("/api/v1/templates/{id}/drafts");
    let publish = format!("/api/v1/templates/{id}/publish");
    let published = format!("/api/v1/templates/{id}/published");

    let response = get(build_test_app(pool.clone()), &published).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let v1 = expect_json(
        build_test_app(pool.clone()),
        &drafts,
        json!({"content": {"text": "hello"}}),
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(v1["data"]["version"], 1);
    assert_eq!(v1["data"]["status"], "draft");

    let v2 = expect_json(build_test_app(pool.clone()), &drafts, json!({}), StatusCode::CREATED)
        .await;
    assert_eq!(v2["data"]["version"], 2);
    assert_eq!(v2["data"]["content"], json!({}));

    let p1 = expect_json(build_test_app(pool.clone()), &publish, json!({"version": 1}), StatusCode::OK)
        .await;
    assert_eq!(p1["data"]["status"], "published");

    expect_json(build_test_app(pool.clone()), &publish, json!({"version": 2}), StatusCode::OK)
        .await;

    let current = body_json(get(build_test_app(pool.clone()), &published).await).await;
    assert_eq!(current["data"]["version"], 2);

    let conflict = expect_json(
        build_test_app(pool.clone()),
        &publish,
        json!({"version": 2}),
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(conflict["error"], "version already published");

    expect_json(
        build_test_app(pool.clone()),
        &publish,
        json!({"version": 99}),
        StatusCode::NOT_FOUND,
    )
    .await;
    expect_json(build_test_app(pool), &publish, json!({"version": 0}), StatusCode::BAD_REQUEST)
        .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_for_unknown_template_is_404(pool: PgPool) {
    let uri = format!("/api/v1/templates/{}/drafts", uuid::Uuid::new_v4());
    expect_json(build_test_app(pool), &uri, json!({}), StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_template_id_is_400(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/templates/not-a-uuid/published").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
