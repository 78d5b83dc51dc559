//! Domain models
//!
//! No validation beyond type coercion: any JSON string is an acceptable
//! title or author.

pub mod book;

pub use book::{Book, BookChanges, NewBook};
