use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the catalog store and report whether it answered.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let reachable = match state.catalog().health_check().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            false
        }
    };

    HealthResponse::from_store_reachable(reachable)
}
