//! Catalog operations sitting between the HTTP handlers and the store.

use tracing::{debug, error};

use crate::{
    dao::storage::StorageError,
    dto::game_entry::{CreateGameEntryRequest, CreatedGameEntry, GameEntry},
    error::ServiceError,
    state::SharedState,
};

/// Return every entry in the catalog.
pub async fn list_entries(state: &SharedState) -> Result<Vec<GameEntry>, ServiceError> {
    let entries = state
        .catalog()
        .list_entries()
        .await
        .inspect_err(|err| log_storage_error("list_entries", err))?;

    Ok(entries.into_iter().map(GameEntry::from).collect())
}

/// Return the entry stored under `id`.
pub async fn get_entry(state: &SharedState, id: i64) -> Result<GameEntry, ServiceError> {
    let entry = state
        .catalog()
        .find_entry(id)
        .await
        .inspect_err(|err| log_storage_error("find_entry", err))?;

    entry
        .map(GameEntry::from)
        .ok_or_else(|| ServiceError::NotFound(format!("entry `{id}` not found")))
}

/// Persist a new entry and report the id it was stored under.
pub async fn create_entry(
    state: &SharedState,
    request: CreateGameEntryRequest,
) -> Result<CreatedGameEntry, ServiceError> {
    let gameid = state
        .catalog()
        .insert_entry(request.into())
        .await
        .inspect_err(|err| log_storage_error("insert_entry", err))?;

    debug!(gameid, "catalog entry created");
    Ok(CreatedGameEntry { gameid })
}

/// Remove the entry stored under `id`; removing a missing entry is not an error.
pub async fn delete_entry(state: &SharedState, id: i64) -> Result<(), ServiceError> {
    state
        .catalog()
        .delete_entry(id)
        .await
        .inspect_err(|err| log_storage_error("delete_entry", err))?;

    debug!(gameid = id, "catalog entry deleted");
    Ok(())
}

fn log_storage_error(operation: &'static str, err: &StorageError) {
    if !matches!(err, StorageError::Conflict { .. }) {
        error!(operation, error = %err, "catalog storage call failed");
    }
}
