//! SQLite-backed catalog store for local runs and tests.

use std::{str::FromStr, time::Duration};

use futures::future::BoxFuture;
use sqlx::{
    Sqlite, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
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
    gameid INTEGER PRIMARY KEY,
    gamename TEXT NOT NULL,
    price REAL NOT NULL,
    imageurl TEXT NOT NULL
)";

/// Catalog store backed by a SQLite file or in-memory database.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    /// Open the database (creating the file if needed) and make sure the catalog table exists.
    pub async fn connect(database_url: &str) -> SqlResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|source| SqlDaoError::InvalidUrl { source })?
            .create_if_missing(true);

        // An in-memory database lives as long as its connection, so pin exactly one.
        let pool: SqlitePoolOptions = if is_in_memory(database_url) {
            pool_options::<Sqlite>()
                .max_connections(1)
                .max_lifetime(None::<Duration>)
                .idle_timeout(None::<Duration>)
        } else {
            pool_options()
        };

        let pool = pool
            .connect_with(options)
            .await
            .map_err(|source| SqlDaoError::Connect { source })?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!(table = TABLE, "SQLite catalog store ready");
        Ok(store)
    }

    /// Fresh, empty in-memory catalog.
    pub async fn in_memory() -> SqlResult<Self> {
        Self::connect("sqlite::memory:").await
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

        // `gameid` aliases the rowid, so the last rowid is the stored key.
        Ok(id.unwrap_or(result.last_insert_rowid()))
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

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl CatalogStore for SqliteCatalogStore {
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
