//! Command implementations for bookshelf CLI

pub mod serve;

pub use serve::run_serve;
