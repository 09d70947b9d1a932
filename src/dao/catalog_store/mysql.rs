//! MySQL-backed catalog store, the production target.

use std::str::FromStr;

use futures::future::BoxFuture;
use sqlx::{
    MySqlPool,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
};
use tracing::info;

use super::{
    CatalogStore, DELETE, INSERT, PING, SELECT_ALL, SELECT_ONE,
    error::{SqlDaoError, SqlResult},
    pool::{TABLE, pool_options},
};
use crate::dao::{
    models::{GameEntryEntity, NewGameEntryEntity},
    storage::{StorageResult, bounded},
};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS steamgame (
    gameid BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    gamename VARCHAR(255) NOT NULL,
    price DOUBLE NOT NULL,
    imageurl VARCHAR(1024) NOT NULL
)";

/// Catalog store talking to MySQL (or MariaDB) through a shared pool.
#[derive(Clone)]
pub struct MySqlCatalogStore {
    pool: MySqlPool,
}

impl MySqlCatalogStore {
    /// Open the pool with the fixed settings and make sure the catalog table exists.
    pub async fn connect(database_url: &str) -> SqlResult<Self> {
        let options = MySqlConnectOptions::from_str(database_url)
            .map_err(|source| SqlDaoError::InvalidUrl { source })?;
        let pool: MySqlPoolOptions = pool_options();
        let pool = pool
            .connect_with(options)
            .await
            .map_err(|source| SqlDaoError::Connect { source })?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!(table = TABLE, "MySQL catalog store ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> SqlResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|source| SqlDaoError::EnsureSchema {
                table: TABLE,
                source,
            })?;
        Ok(())
    }

    async fn find_entry(&self, id: i64) -> SqlResult<Option<GameEntryEntity>> {
        sqlx::query_as::<_, GameEntryEntity>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| SqlDaoError::LoadEntry { id, source })
    }

    async fn list_entries(&self) -> SqlResult<Vec<GameEntryEntity>> {
        sqlx::query_as::<_, GameEntryEntity>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| SqlDaoError::ListEntries { source })
    }

    async fn insert_entry(&self, entry: NewGameEntryEntity) -> SqlResult<i64> {
        let id = entry.gameid;
        let result = sqlx::query(INSERT)
            .bind(entry.gameid)
            .bind(entry.gamename)
            .bind(entry.price)
            .bind(entry.imageurl)
            .execute(&self.pool)
            .await
            .map_err(|source| SqlDaoError::InsertEntry { id, source })?;

        Ok(stored_key(id, result.last_insert_id()))
    }

    async fn delete_entry(&self, id: i64) -> SqlResult<()> {
        sqlx::query(DELETE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|source| SqlDaoError::DeleteEntry { id, source })?;
        Ok(())
    }

    async fn ping(&self) -> SqlResult<()> {
        sqlx::query(PING)
            .execute(&self.pool)
            .await
            .map_err(|source| SqlDaoError::HealthPing { source })?;
        Ok(())
    }
}

/// Key the row actually landed under.
///
/// With `AUTO_INCREMENT`, an explicit `0` (or `NULL`) makes MySQL generate a key, which it then
/// reports as the last insert id; otherwise the caller's key was stored as-is.
fn stored_key(requested: Option<i64>, last_insert_id: u64) -> i64 {
    match last_insert_id {
        0 => requested.unwrap_or_default(),
        generated => generated as i64,
    }
}

impl CatalogStore for MySqlCatalogStore {
    fn find_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<GameEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { bounded("find_entry", store.find_entry(id)).await })
    }

    fn list_entries(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { bounded("list_entries", store.list_entries()).await })
    }

    fn insert_entry(&self, entry: NewGameEntryEntity) -> BoxFuture<'static, StorageResult<i64>> {
        let store = self.clone();
        Box::pin(async move { bounded("insert_entry", store.insert_entry(entry)).await })
    }

    fn delete_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { bounded("delete_entry", store.delete_entry(id)).await })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { bounded("health_check", store.ping()).await })
    }
}
