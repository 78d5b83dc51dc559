//! bookshelf-server: HTTP CRUD service for books
//!
//! Exposes a single `Book` resource over HTTP, stored in a PostgreSQL
//! table with soft-delete semantics.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{DatabaseConfig, ServerConfig};
pub use http::{build_app, run_server, AppState, ServerError};
pub use models::{Book, BookChanges, NewBook};
