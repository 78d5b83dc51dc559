//! Book repository
//!
//! Every read and write carries an explicit `deleted_at IS NULL` filter, so
//! soft-deleted rows behave as if absent while staying in the table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Book, NewBook};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Data access for books (testable)
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All non-deleted books in natural storage order. Empty when none.
    async fn list_all(&self) -> Result<Vec<Book>, DbError>;

    /// A single non-deleted book, or `DbError::NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<Book, DbError>;

    /// Persist a new row. Storage assigns `id` and timestamps.
    async fn insert(&self, book: NewBook) -> Result<Book, DbError>;

    /// Overwrite the mutable columns of `book.id`. Does not check that the
    /// row still exists; callers fetch first.
    async fn save(&self, book: &Book) -> Result<(), DbError>;

    /// Soft-delete the row. Does not check prior existence.
    async fn delete_by_id(&self, id: i64) -> Result<(), DbError>;
}

/// PostgreSQL-backed book repository
#[derive(Debug, Clone)]
pub struct PgBookRepo {
    pool: PgPool,
}

impl PgBookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepo {
    async fn list_all(&self) -> Result<Vec<Book>, DbError> {
        let books: Vec<Book> = sqlx::query_as(
            r#"
            SELECT id, title, author, created_at, updated_at, deleted_at
            FROM books
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn get_by_id(&self, id: i64) -> Result<Book, DbError> {
        let book: Book = sqlx::query_as(
            r#"
            SELECT id, title, author, created_at, updated_at, deleted_at
            FROM books
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "book",
            id: id.to_string(),
        })?;

        Ok(book)
    }

    async fn insert(&self, book: NewBook) -> Result<Book, DbError> {
        let book: Book = sqlx::query_as(
            r#"
            INSERT INTO books (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    async fn save(&self, book: &Book) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(id = book.id, "save matched no live row");
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        sqlx::query(
            r#"
            UPDATE books
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
