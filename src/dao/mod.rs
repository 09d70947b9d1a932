/// Catalog persistence behind a backend-agnostic trait.
pub mod catalog_store;
/// Database model definitions.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;
