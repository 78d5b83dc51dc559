//! Shared test fixtures: an in-memory book repository and request helpers

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use bookshelf_server::db::{BookRepository, DbError};
use bookshelf_server::http::server::App;
use bookshelf_server::{build_app, AppState, Book, NewBook};
use chrono::Utc;
use tower::ServiceExt;

#[derive(Default)]
struct Inner {
    rows: Mutex<Vec<Book>>,
    calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_insert: AtomicBool,
    fail_save: AtomicBool,
    fail_delete: AtomicBool,
}

/// In-memory repository with soft-delete semantics and failure injection
#[derive(Clone, Default)]
pub struct MemoryBookRepo {
    inner: Arc<Inner>,
}

impl MemoryBookRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Row as stored, including soft-deleted ones
    pub fn physical_row(&self, id: i64) -> Option<Book> {
        self.inner.rows.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    pub fn fail_list(&self) {
        self.inner.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_insert(&self) {
        self.inner.fail_insert.store(true, Ordering::SeqCst);
    }

    pub fn fail_save(&self) {
        self.inner.fail_save.store(true, Ordering::SeqCst);
    }

    pub fn fail_delete(&self) {
        self.inner.fail_delete.store(true, Ordering::SeqCst);
    }

    fn record_call(&self) {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn injected(flag: &AtomicBool, what: &str) -> Result<(), DbError> {
        if flag.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::Protocol(format!("{} rejected", what))));
        }
        Ok(())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepo {
    async fn list_all(&self) -> Result<Vec<Book>, DbError> {
        self.record_call();
        Self::injected(&self.inner.fail_list, "list")?;
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().filter(|b| b.deleted_at.is_none()).cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Book, DbError> {
        self.record_call();
        let rows = self.inner.rows.lock().unwrap();
        rows.iter()
            .find(|b| b.id == id && b.deleted_at.is_none())
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                resource: "book",
                id: id.to_string(),
            })
    }

    async fn insert(&self, book: NewBook) -> Result<Book, DbError> {
        self.record_call();
        Self::injected(&self.inner.fail_insert, "insert")?;
        let mut rows = self.inner.rows.lock().unwrap();
        let now = Utc::now();
        let stored = Book {
            id: rows.len() as i64 + 1,
            title: book.title,
            author: book.author,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn save(&self, book: &Book) -> Result<(), DbError> {
        self.record_call();
        Self::injected(&self.inner.fail_save, "save")?;
        let mut rows = self.inner.rows.lock().unwrap();
        if let Some(row) = rows
            .iter_mut()
            .find(|b| b.id == book.id && b.deleted_at.is_none())
        {
            row.title = book.title.clone();
            row.author = book.author.clone();
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        self.record_call();
        Self::injected(&self.inner.fail_delete, "delete")?;
        let mut rows = self.inner.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|b| b.id == id && b.deleted_at.is_none()) {
            row.deleted_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// App wired to a fresh in-memory repository
pub fn test_app() -> (App, MemoryBookRepo) {
    let repo = MemoryBookRepo::new();
    let app = build_app(AppState::with_repository(repo.clone()));
    (app, repo)
}

/// Send one request and return status plus body text
pub async fn send(app: &App, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_owned())
        }
        None => Body::empty(),
    };

    let response: Response<Body> = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send one request and parse the body as JSON
pub async fn send_json(
    app: &App,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let (status, text) = send(app, method, uri, body).await;
    let value = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("body is not JSON ({}): {:?}", e, text));
    (status, value)
}
