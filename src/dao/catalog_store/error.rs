//! Error types shared by the SQL storage implementations.

use thiserror::Error;

/// Convenient result alias returning [`SqlDaoError`] failures.
pub type SqlResult<T> = Result<T, SqlDaoError>;

/// Failures that can occur while talking to the SQL database.
#[derive(Debug, Error)]
pub enum SqlDaoError {
    /// The database URL names a backend this build does not support.
    #[error("unsupported database scheme `{scheme}`")]
    UnsupportedScheme {
        /// Scheme found in the URL.
        scheme: String,
    },
    /// The database URL could not be parsed into connection options.
    #[error("invalid database URL")]
    InvalidUrl {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// The connection pool could not be opened.
    #[error("failed to open connection pool")]
    Connect {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Creating the catalog table failed.
    #[error("failed to ensure table `{table}`")]
    EnsureSchema {
        /// Table being created.
        table: &'static str,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Fetching a single entry failed.
    #[error("failed to load entry `{id}`")]
    LoadEntry {
        /// Requested id.
        id: i64,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Scanning the catalog failed.
    #[error("failed to list entries")]
    ListEntries {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Inserting an entry failed.
    #[error("failed to insert entry")]
    InsertEntry {
        /// Id supplied by the caller, if any.
        id: Option<i64>,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Deleting an entry failed.
    #[error("failed to delete entry `{id}`")]
    DeleteEntry {
        /// Id being deleted.
        id: i64,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
    /// Liveness query failed.
    #[error("database ping failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },
}
