use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::{GameEntryEntity, NewGameEntryEntity};

/// Catalog entry as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameEntry {
    /// Identifier of the entry, also used in `/api/gamedb/{id}`.
    pub gameid: i64,
    /// Display label.
    pub gamename: String,
    /// Price, non-negative by convention.
    pub price: f64,
    /// Opaque reference to the cover image.
    pub imageurl: String,
}

impl From<GameEntryEntity> for GameEntry {
    fn from(entity: GameEntryEntity) -> Self {
        Self {
            gameid: entity.gameid,
            gamename: entity.gamename,
            price: entity.price,
            imageurl: entity.imageurl,
        }
    }
}

/// Payload accepted by `POST /api/gamedb`.
///
/// Every field is optional: missing strings become empty, a missing price becomes zero and a
/// missing `gameid` lets the store pick one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateGameEntryRequest {
    /// Identifier to store the entry under.
    pub gameid: Option<i64>,
    /// Display label.
    pub gamename: String,
    /// Price of the entry.
    pub price: f64,
    /// Opaque reference to the cover image.
    pub imageurl: String,
}

impl From<CreateGameEntryRequest> for NewGameEntryEntity {
    fn from(request: CreateGameEntryRequest) -> Self {
        Self {
            gameid: request.gameid,
            gamename: request.gamename,
            price: request.price,
            imageurl: request.imageurl,
        }
    }
}

/// Body returned once an entry has been created.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedGameEntry {
    /// Identifier under which the entry was stored.
    pub gameid: i64,
}
