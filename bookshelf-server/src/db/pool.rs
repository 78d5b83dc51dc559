//! Database connection pool management
//!
//! Uses sqlx PgPool with an explicit connection limit. Statements are logged
//! at DEBUG, and anything slower than a second at WARN.

use std::time::Duration;

use log::LevelFilter;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, Connection, PgPool};

use crate::config::DatabaseConfig;
use crate::http::ServerError;

use super::schema::ensure_schema;

/// Statements slower than this are logged at WARN.
pub const SLOW_STATEMENT_THRESHOLD: Duration = Duration::from_secs(1);

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the config is malformed or the connection fails.
/// A single direct connection is attempted first, so a refused or
/// unreachable server fails at once instead of entering the pool's
/// acquire-retry loop.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = config
        .connect_options()?
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT_THRESHOLD);

    options.connect().await?.close().await?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Open the pool and make sure the `books` table exists.
///
/// Any failure here is fatal for the process; there is no retry.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, ServerError> {
    let target = config.display_target();
    tracing::info!(database = %target, "Connecting to database");

    let pool = create_pool(config).await.map_err(|source| {
        tracing::error!(database = %target, error = %source, "Failed to connect database");
        ServerError::Connect { target: target.clone(), source }
    })?;
    tracing::info!(database = %target, "Connect successful");

    ensure_schema(&pool).await.map_err(ServerError::Schema)?;
    Ok(pool)
}
