//! Axum server setup
//!
//! Server skeleton with:
//! - Path normalization ahead of routing (case-insensitive, trailing slash ignored)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::extract::Request;
use axum::http::Uri;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::db::{self, BookRepository, PgBookRepo};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookRepository>,
}

impl AppState {
    /// State backed by the PostgreSQL repository.
    pub fn new(pool: PgPool) -> Self {
        Self::with_repository(PgBookRepo::new(pool))
    }

    pub fn with_repository(repo: impl BookRepository + 'static) -> Self {
        Self {
            books: Arc::new(repo),
        }
    }
}

/// The full service: routes behind request path normalization.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Build the application service.
///
/// Normalization has to wrap the router rather than sit inside it as a
/// layer, since route matching happens before inner layers run.
pub fn build_app(state: AppState) -> App {
    let router = routes::books::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    MapRequestLayer::new(normalize_request as fn(Request) -> Request).layer(router)
}

/// Lowercase the path and drop one trailing slash, keeping the query.
fn normalize_request(mut req: Request) -> Request {
    if let Some(uri) = normalized_uri(req.uri()) {
        *req.uri_mut() = uri;
    }
    req
}

fn normalized_uri(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    let mut normalized = path.to_ascii_lowercase();
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized == path {
        return None;
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", normalized, query),
        None => normalized,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

/// Connect to the database, then serve until a shutdown signal.
///
/// # Example
///
/// ```ignore
/// run_server(ServerConfig::default()).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let pool = db::connect(&config.database).await?;
    let app = build_app(AppState::new(pool));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to connect database at {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to create books schema: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> String {
        let uri: Uri = raw.parse().unwrap();
        normalized_uri(&uri).map_or_else(|| raw.to_string(), |u| u.to_string())
    }

    #[test]
    fn lowercases_path() {
        assert_eq!(normalize("/Books"), "/books");
        assert_eq!(normalize("/BOOK/12"), "/book/12");
    }

    #[test]
    fn trims_one_trailing_slash() {
        assert_eq!(normalize("/Book/3/"), "/book/3");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn keeps_query_untouched() {
        assert_eq!(normalize("/Books?Sort=Title"), "/books?Sort=Title");
    }

    #[test]
    fn already_normal_is_unchanged() {
        let uri: Uri = "/book/1".parse().unwrap();
        assert!(normalized_uri(&uri).is_none());
    }
}
