//! HTTP server command for the bookshelf API
//!
//! Connects to PostgreSQL, ensures the books table, and serves until killed.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use bookshelf_server::config::DEFAULT_MAX_CONNECTIONS;
use bookshelf_server::{run_server, DatabaseConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BOOKSHELF_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "mydatabase")]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "myuser")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "mypassword", hide_env_values = true)]
    pub db_password: String,

    /// Database URL (overrides the individual --db-* options)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind_addr: args.bind,
            database: DatabaseConfig {
                host: args.db_host,
                port: args.db_port,
                name: args.db_name,
                username: args.db_user,
                password: args.db_password,
                url: args.database_url,
                max_connections: args.max_connections,
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::from(args);
    tracing::info!("Starting bookshelf server on {}", config.bind_addr);

    // Blocks until shutdown; a failed initial connection returns here
    run_server(config).await.context("Server error")?;

    Ok(())
}
