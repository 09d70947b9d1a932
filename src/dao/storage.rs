use std::{error::Error, future::Future, time::Duration};

use thiserror::Error;
use tokio::time::timeout;

/// Upper bound applied to every individual storage call.
pub const STORAGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend failed or could not be reached.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What was being attempted.
        message: String,
        /// Underlying driver error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Call did not finish within the allowed time.
    #[error("storage operation `{operation}` timed out after {after:?}")]
    Timeout {
        /// Name of the storage operation.
        operation: &'static str,
        /// Limit that was exceeded.
        after: Duration,
    },
    /// Write collided with an existing key.
    #[error("storage conflict: {message}")]
    Conflict {
        /// Description of the colliding key.
        message: String,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a conflict error, raised when a write collides with an existing key.
    pub fn conflict(message: impl Into<String>) -> Self {
        StorageError::Conflict {
            message: message.into(),
        }
    }
}

/// Run a backend future under [`STORAGE_TIMEOUT`], converting its error into a [`StorageError`].
pub async fn bounded<T, E, F>(operation: &'static str, work: F) -> StorageResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StorageError>,
{
    bounded_by(STORAGE_TIMEOUT, operation, work).await
}

async fn bounded_by<T, E, F>(limit: Duration, operation: &'static str, work: F) -> StorageResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StorageError>,
{
    match timeout(limit, work).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(StorageError::Timeout {
            operation,
            after: limit,
        }),
    }
}
