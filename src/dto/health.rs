use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    /// "ok" when the catalog database answers, "degraded" otherwise.
    pub status: String,
}

impl HealthResponse {
    /// Build the payload from the outcome of a storage ping.
    pub fn from_store_reachable(reachable: bool) -> Self {
        let status = if reachable { "ok" } else { "degraded" };
        Self {
            status: status.to_owned(),
        }
    }
}
