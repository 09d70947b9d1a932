#[cfg(feature = "mysql-store")]
pub mod mysql;
#[cfg(feature = "sqlite-store")]
pub mod sqlite;

mod error;
mod pool;

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::dao::{
    models::{GameEntryEntity, NewGameEntryEntity},
    storage::{StorageError, StorageResult},
};

pub use error::{SqlDaoError, SqlResult};

pub(crate) const SELECT_ONE: &str =
    "SELECT gameid, gamename, price, imageurl FROM steamgame WHERE gameid = ?";
pub(crate) const SELECT_ALL: &str = "SELECT gameid, gamename, price, imageurl FROM steamgame";
pub(crate) const INSERT: &str =
    "INSERT INTO steamgame (gameid, gamename, price, imageurl) VALUES (?, ?, ?, ?)";
pub(crate) const DELETE: &str = "DELETE FROM steamgame WHERE gameid = ?";
pub(crate) const PING: &str = "SELECT 1";

/// Abstraction over the persistence layer for catalog entries.
pub trait CatalogStore: Send + Sync {
    /// Look up a single entry; `None` when no row carries this id.
    fn find_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<GameEntryEntity>>>;
    /// Scan the whole catalog, in no particular order.
    fn list_entries(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntryEntity>>>;
    /// Insert an entry and return the id of the stored row.
    fn insert_entry(&self, entry: NewGameEntryEntity) -> BoxFuture<'static, StorageResult<i64>>;
    /// Delete the entry with this id. Deleting a missing id succeeds.
    fn delete_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap round-trip to the database.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Open the store matching the scheme of `database_url`.
pub async fn connect(database_url: &str) -> StorageResult<Arc<dyn CatalogStore>> {
    let scheme = database_url.split(':').next().unwrap_or_default();
    match scheme {
        #[cfg(feature = "mysql-store")]
        "mysql" | "mariadb" => {
            let store = mysql::MySqlCatalogStore::connect(database_url).await?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "sqlite-store")]
        "sqlite" => {
            let store = sqlite::SqliteCatalogStore::connect(database_url).await?;
            Ok(Arc::new(store))
        }
        other => Err(SqlDaoError::UnsupportedScheme {
            scheme: other.to_owned(),
        }
        .into()),
    }
}

impl From<SqlDaoError> for StorageError {
    fn from(err: SqlDaoError) -> Self {
        match err {
            SqlDaoError::InsertEntry { id, source } if is_unique_violation(&source) => {
                let message = match id {
                    Some(id) => format!("entry `{id}` already exists"),
                    None => "entry already exists".to_owned(),
                };
                StorageError::conflict(message)
            }
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
