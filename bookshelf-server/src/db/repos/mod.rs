//! Repository implementations for database access

pub mod books;

pub use books::{BookRepository, DbError, PgBookRepo};
