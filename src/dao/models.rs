/// Catalog row as persisted in the `steamgame` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct GameEntryEntity {
    /// Primary key of the entry.
    pub gameid: i64,
    /// Display label.
    pub gamename: String,
    /// Price of the entry; non-negative by convention only.
    pub price: f64,
    /// Opaque reference to the cover image.
    pub imageurl: String,
}

/// Entry about to be inserted. Without a `gameid` the store assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGameEntryEntity {
    /// Caller-chosen primary key, if any.
    pub gameid: Option<i64>,
    /// Display label.
    pub gamename: String,
    /// Price of the entry.
    pub price: f64,
    /// Opaque reference to the cover image.
    pub imageurl: String,
}
