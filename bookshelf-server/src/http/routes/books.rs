//! Book endpoints
//!
//! Paths are registered lowercase; `build_app` lowercases incoming paths
//! before routing, so `/Books` and `/Book/{id}` resolve here too.

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::DbError;
use crate::http::error::ApiError;
use crate::http::extractors::{decode_json, BookId, JsonBody};
use crate::http::server::AppState;
use crate::models::{Book, BookChanges, NewBook};

/// Acknowledgement body for mutating endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Lookup failures: NotFound is 404, anything else is logged and also 404.
fn lookup_error(id: i64, e: DbError) -> ApiError {
    if !matches!(e, DbError::NotFound { .. }) {
        tracing::warn!(id, "book lookup failed: {}", e);
    }
    ApiError::NotFound
}

/// GET /Books - list all live books
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.books.list_all().await.map_err(|e| ApiError::Internal {
        message: format!("list books: {}", e),
    })?;

    Ok(Json(books))
}

/// GET /Book/{id} - get a single book
async fn get_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .books
        .get_by_id(id)
        .await
        .map_err(|e| lookup_error(id, e))?;

    Ok(Json(book))
}

/// POST /Book - create a book
///
/// Insert failures answer 404, not 500.
async fn create_book(
    State(state): State<AppState>,
    JsonBody(new_book): JsonBody<NewBook>,
) -> Result<Json<MessageResponse>, ApiError> {
    let book = state.books.insert(new_book).await.map_err(|e| {
        tracing::warn!("book insert failed: {}", e);
        ApiError::NotFound
    })?;

    tracing::info!(id = book.id, "book created");
    Ok(Json(MessageResponse::new("Create successful")))
}

/// PUT /Book/{id} - overlay the body onto the stored book and save it
///
/// Existence is checked before the body is decoded.
async fn update_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let existing = state
        .books
        .get_by_id(id)
        .await
        .map_err(|e| lookup_error(id, e))?;

    let changes: BookChanges = decode_json(&body)?;
    let merged = existing.apply(changes);

    state
        .books
        .save(&merged)
        .await
        .map_err(|e| ApiError::Storage {
            detail: e.to_string(),
        })?;

    tracing::info!(id, "book updated");
    Ok(Json(MessageResponse::new("update successful.")))
}

/// DELETE /book/{id} - soft-delete a book
async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .books
        .get_by_id(id)
        .await
        .map_err(|e| lookup_error(id, e))?;

    state.books.delete_by_id(id).await.map_err(|e| {
        tracing::warn!(id, "book delete failed: {}", e);
        ApiError::NotFound
    })?;

    tracing::info!(id, "book deleted");
    Ok(Json(MessageResponse::new("Delete successful")))
}

/// Book routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books))
        .route("/book", post(create_book))
        .route(
            "/book/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
