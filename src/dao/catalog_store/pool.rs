use std::time::Duration;

use sqlx::{Database, pool::PoolOptions};

use crate::dao::storage::STORAGE_TIMEOUT;

/// Maximum number of open connections. Idle connections are bounded by the same limit.
pub const MAX_CONNECTIONS: u32 = 10;
/// Connections are recycled once they reach this age.
pub const CONNECTION_MAX_LIFETIME: Duration = Duration::from_secs(3 * 60);
/// Name of the single catalog table.
pub const TABLE: &str = "steamgame";

/// Fixed pool settings shared by every SQL backend.
pub fn pool_options<DB: Database>() -> PoolOptions<DB> {
    PoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .max_lifetime(Some(CONNECTION_MAX_LIFETIME))
        .idle_timeout(Some(CONNECTION_MAX_LIFETIME))
        .acquire_timeout(STORAGE_TIMEOUT)
}
