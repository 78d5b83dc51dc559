//! Book entity and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Non-null marks the row as soft-deleted. Reads never return such rows,
    /// so this serializes as `null` in practice.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create payload for `POST /Book`.
///
/// Missing keys default to empty strings. Anything else in the body,
/// including `id` and timestamps, is ignored: storage assigns those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// Overlay payload for `PUT /Book/{id}`.
///
/// Absent or `null` keys keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl Book {
    /// Overlay `changes` onto this book, returning the merged value.
    ///
    /// `id` and timestamps are never touched.
    pub fn apply(mut self, changes: BookChanges) -> Self {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        self
    }
}
