//! HTTP server layer
//!
//! Axum server with:
//! - Case-insensitive, trailing-slash tolerant routing
//! - Request tracing
//! - Graceful shutdown
//! - Status-only error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_app, run_server, AppState, ServerError};
