/// Catalog entry payloads.
pub mod game_entry;
/// Health check payload.
pub mod health;
