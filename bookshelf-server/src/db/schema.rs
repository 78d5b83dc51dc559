//! Schema bootstrap for the `books` table
//!
//! Idempotent; runs on every startup. There are no further migrations.

use sqlx::PgPool;

/// Create the `books` table and its soft-delete index if absent.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring books schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id BIGSERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ,
            title TEXT NOT NULL DEFAULT '',
            author TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_deleted_at ON books (deleted_at)")
        .execute(pool)
        .await?;

    tracing::info!("Books schema ready");
    Ok(())
}
