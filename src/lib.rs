//! Library crate for gamedb-api, exposing modules for binaries and tests.

/// Runtime configuration (defaults, JSON file, environment).
pub mod config;
/// Persistence layer: storage trait, SQL backends and row models.
pub mod dao;
/// Wire types exchanged over HTTP.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP route trees and middleware.
pub mod routes;
/// Business operations invoked by the handlers.
pub mod services;
/// Shared application state.
pub mod state;
