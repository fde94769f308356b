use std::sync::Arc;

use chatdesk_core::clock::Clock;
use chatdesk_db::store::PgStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else sits
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, for direct repository calls.
    pub pool: chatdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Store adapter for the core workflows (pagination, versioning, close).
    pub store: PgStore,
    /// Time source for session close timestamps.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(pool: chatdesk_db::DbPool, config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: PgStore::new(pool.clone()),
            pool,
            config: Arc::new(config),
            clock,
        }
    }
}
