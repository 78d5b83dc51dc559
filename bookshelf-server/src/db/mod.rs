//! Database layer - connection pool, schema bootstrap and repositories
//!
//! - One pool per process, shared by every request
//! - Soft-deleted rows are filtered explicitly in every statement
//! - Single-statement operations, no cross-row transactions

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{connect, create_pool};
pub use repos::*;
pub use schema::ensure_schema;
