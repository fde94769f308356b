//! Integration tests for keyset pagination over Postgres.
//!
//! Exercises `list_page` through `PgStore`:
//! - Draining a collection yields every row exactly once in strict
//!   `(created_at DESC, id DESC)` order, including rows sharing a timestamp
//! - Page counts follow `ceil(N / L)`, with one empty trailing page when
//!   N is a multiple of L
//! - Per-tenant and per-session scopes do not leak rows
//! - Cursors with non-UUID ids are rejected

use assert_matches::assert_matches;
use chatdesk_core::error::CoreError;
use chatdesk_core::pagination::{decode, list_page, Cursor, Keyed, KeysetSource};
use chatdesk_db::models::message::Message;
use chatdesk_db::models::template::Template;
use chatdesk_db::models::tenant::Tenant;
use chatdesk_db::store::PgStore;
use chrono::Utc;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert `n` tenants. Rows are created in groups of three sharing one
/// explicit timestamp so ties must be broken by id.
async fn seed_tenants(pool: &PgPool, n: usize) {
    let base = Utc::now();
    for i in 0..n {
        let created_at = base - chrono::Duration::seconds((i / 3) as i64);
        sqlx::query("INSERT INTO tenants (name, slug, created_at) VALUES ($1, $2, $3)")
            .bind(format!("Tenant {i}"))
            .bind(format!("tenant-{i:03}"))
            .bind(created_at)
            .execute(pool)
            .await
            .unwrap();
    }
}

async fn drain<T, S>(store: &S, scope: &S::Scope, limit: i64) -> (Vec<T>, usize)
where
    T: Keyed + Send,
    S: KeysetSource<T>,
{
    let mut all = Vec::new();
    let mut pages = 0;
    let mut cursor: Option<Cursor> = None;
    loop {
        let page = list_page::<T, S>(store, scope, limit, cursor.as_ref())
            .await
            .unwrap();
        pages += 1;
        let token = page.next_token();
        all.extend(page.items);
        match token {
            Some(token) => cursor = Some(decode(&token).unwrap()),
            None => break,
        }
    }
    (all, pages)
}

fn assert_strictly_descending<T: Keyed>(rows: &[T]) {
    for pair in rows.windows(2) {
        let (a, b) = (pair[0].cursor_key(), pair[1].cursor_key());
        let a_id: uuid::Uuid = a.id.parse().unwrap();
        let b_id: uuid::Uuid = b.id.parse().unwrap();
        assert!(
            (a.created_at, a_id) > (b.created_at, b_id),
            "rows out of order: {a:?} then {b:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// Tenants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tenants_drain_without_gaps_or_repeats(pool: PgPool) {
    seed_tenants(&pool, 10).await;
    let store = PgStore::new(pool);

    let (all, pages): (Vec<Tenant>, usize) = drain(&store, &(), 3).await;

    assert_eq!(pages, 4);
    assert_eq!(all.len(), 10);
    let mut ids: Vec<_> = all.iter().map(|t| t.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
    assert_strictly_descending(&all);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exact_multiple_ends_with_empty_page(pool: PgPool) {
    seed_tenants(&pool, 6).await;
    let store = PgStore::new(pool);

    let (all, pages): (Vec<Tenant>, usize) = drain(&store, &(), 3).await;

    assert_eq!(all.len(), 6);
    assert_eq!(pages, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_collection_is_one_empty_page(pool: PgPool) {
    let store = PgStore::new(pool);
    let page = list_page::<Tenant, _>(&store, &(), 10, None).await.unwrap();
    assert!(page.items.is_empty());
    assert!(page.next_cursor.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_uuid_cursor_id_is_invalid(pool: PgPool) {
    let store = PgStore::new(pool);
    let cursor = Cursor::new(Utc::now(), "m123");

    let result = list_page::<Tenant, _>(&store, &(), 10, Some(&cursor)).await;

    assert_matches!(result, Err(CoreError::InvalidCursor));
}

// ---------------------------------------------------------------------------
// Scoped collections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_templates_are_scoped_to_tenant(pool: PgPool) {
    seed_tenants(&pool, 2).await;
    let tenants: Vec<(uuid::Uuid,)> = sqlx::query_as("SELECT id FROM tenants ORDER BY slug")
        .fetch_all(&pool)
        .await
        .unwrap();
    let (a, b) = (tenants[0].0, tenants[1].0);

    // Same transaction, same now(): all five share created_at.
    let mut tx = pool.begin().await.unwrap();
    for i in 0..5 {
        sqlx::query("INSERT INTO templates (tenant_id, name, slug) VALUES ($1, $2, $3)")
            .bind(a)
            .bind(format!("T{i}"))
            .bind(format!("tpl-{i}"))
            .execute(&mut *tx)
            .await
            .unwrap();
    }
    sqlx::query("INSERT INTO templates (tenant_id, name, slug) VALUES ($1, 'Other', 'other')")
        .bind(b)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let store = PgStore::new(pool);
    let (all, pages): (Vec<Template>, usize) = drain(&store, &a, 2).await;

    assert_eq!(all.len(), 5);
    assert_eq!(pages, 3);
    assert!(all.iter().all(|t| t.tenant_id == a));
    assert_strictly_descending(&all);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_messages_are_scoped_to_session(pool: PgPool) {
    seed_tenants(&pool, 1).await;
    let (tenant_id,): (uuid::Uuid,) = sqlx::query_as("SELECT id FROM tenants")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (session_id,): (uuid::Uuid,) =
        sqlx::query_as("INSERT INTO sessions (tenant_id) VALUES ($1) RETURNING id")
            .bind(tenant_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let (other_session,): (uuid::Uuid,) =
        sqlx::query_as("INSERT INTO sessions (tenant_id) VALUES ($1) RETURNING id")
            .bind(tenant_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    for (session, count) in [(session_id, 7), (other_session, 2)] {
        for i in 0..count {
            sqlx::query("INSERT INTO messages (session_id, role, content) VALUES ($1, 'user', $2)")
                .bind(session)
                .bind(format!("msg {i}"))
                .execute(&pool)
                .await
                .unwrap();
        }
    }

    let store = PgStore::new(pool);
    let (all, pages): (Vec<Message>, usize) = drain(&store, &session_id, 50).await;

    assert_eq!(pages, 1);
    assert_eq!(all.len(), 7);
    assert!(all.iter().all(|m| m.session_id == session_id));
    assert_strictly_descending(&all);
}
