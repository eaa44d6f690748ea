//! Bookmark storage backed by a local SQLite file.
//!
//! The pool is opened once at startup and shared by every handler. Each
//! operation acquires a connection for exactly one statement and releases it
//! when the statement completes; no transaction spans two operations.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info, Instrument};

use crate::config::DatabaseConfig;
use crate::observability::db_span;

const BOOKMARKS_TABLE: &str = "bookmarks";

/// A full stored row, as returned by [`BookmarkStore::read`]. The handlers
/// only need the narrower [`BookmarkLabel`] and [`BookmarkLink`] projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// Entry of the deletion selection menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkLabel {
    pub id: i64,
    pub name: String,
}

/// Entry of the textual listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkLink {
    pub name: String,
    pub url: String,
}

/// Store for bookmark records
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    pool: SqlitePool,
}

impl BookmarkStore {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if absent) the database file described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!(database_path = %config.path, "Opening bookmark database");

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database at {}", config.path))?;

        Ok(Self::new(pool))
    }

    /// Underlying pool, for closing it or running ad-hoc queries in tests
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ensure the bookmarks table exists. Idempotent.
    pub async fn initialize(&self) -> Result<()> {
        info!("Initializing database schema");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                url TEXT
            )",
        )
        .execute(&self.pool)
        .instrument(db_span("initialize", BOOKMARKS_TABLE))
        .await
        .context("Failed to create bookmarks table")?;

        info!("Database schema initialized successfully");
        Ok(())
    }

    /// Insert a new bookmark and return its id
    pub async fn create(&self, name: &str, url: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO bookmarks (name, url) VALUES (?, ?)")
            .bind(name)
            .bind(url)
            .execute(&self.pool)
            .instrument(db_span("create", BOOKMARKS_TABLE))
            .await
            .context("Failed to insert new bookmark")?;

        let bookmark_id = result.last_insert_rowid();
        debug!(bookmark_id = %bookmark_id, name = %name, "Bookmark created successfully");

        Ok(bookmark_id)
    }

    /// Overwrite name and url of every bookmark currently named `name`.
    ///
    /// Names are not unique, so this can touch several rows. Returns the
    /// number of rows changed; 0 means nothing matched.
    pub async fn update_by_name(&self, name: &str, new_name: &str, new_url: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE bookmarks SET name = ?, url = ? WHERE name = ?")
            .bind(new_name)
            .bind(new_url)
            .bind(name)
            .execute(&self.pool)
            .instrument(db_span("update_by_name", BOOKMARKS_TABLE))
            .await
            .context("Failed to update bookmark")?;

        let rows_affected = result.rows_affected();
        if rows_affected > 0 {
            debug!(name = %name, rows_affected = %rows_affected, "Bookmark updated successfully");
        } else {
            info!("No bookmark found with name: {name}");
        }

        Ok(rows_affected)
    }

    /// List (id, name) of every bookmark, in creation order
    pub async fn list_labels(&self) -> Result<Vec<BookmarkLabel>> {
        let rows = sqlx::query("SELECT id, name FROM bookmarks ORDER BY id")
            .fetch_all(&self.pool)
            .instrument(db_span("list_labels", BOOKMARKS_TABLE))
            .await
            .context("Failed to list bookmark labels")?;

        let labels: Vec<BookmarkLabel> = rows
            .into_iter()
            .map(|row| BookmarkLabel {
                id: row.get(0),
                name: row.get::<Option<String>, _>(1).unwrap_or_default(),
            })
            .collect();

        debug!("Found {} bookmarks for selection", labels.len());
        Ok(labels)
    }

    /// List (name, url) of every bookmark, in creation order
    pub async fn list_links(&self) -> Result<Vec<BookmarkLink>> {
        let rows = sqlx::query("SELECT name, url FROM bookmarks ORDER BY id")
            .fetch_all(&self.pool)
            .instrument(db_span("list_links", BOOKMARKS_TABLE))
            .await
            .context("Failed to list bookmarks")?;

        let links: Vec<BookmarkLink> = rows
            .into_iter()
            .map(|row| BookmarkLink {
                name: row.get::<Option<String>, _>(0).unwrap_or_default(),
                url: row.get::<Option<String>, _>(1).unwrap_or_default(),
            })
            .collect();

        debug!("Found {} bookmarks", links.len());
        Ok(links)
    }

    /// Read one bookmark by id. Not used by the chat handlers; it lets tests
    /// and maintenance code check a single row.
    pub async fn read(&self, bookmark_id: i64) -> Result<Option<Bookmark>> {
        let row = sqlx::query("SELECT id, name, url FROM bookmarks WHERE id = ?")
            .bind(bookmark_id)
            .fetch_optional(&self.pool)
            .instrument(db_span("read", BOOKMARKS_TABLE))
            .await
            .context("Failed to read bookmark")?;

        Ok(row.map(|row| Bookmark {
            id: row.get(0),
            name: row.get::<Option<String>, _>(1).unwrap_or_default(),
            url: row.get::<Option<String>, _>(2).unwrap_or_default(),
        }))
    }

    /// Delete the bookmark with this id. A missing id is not an error.
    ///
    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, bookmark_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(bookmark_id)
            .execute(&self.pool)
            .instrument(db_span("delete_by_id", BOOKMARKS_TABLE))
            .await
            .context("Failed to delete bookmark")?;

        let rows_affected = result.rows_affected();
        if rows_affected > 0 {
            debug!(bookmark_id = %bookmark_id, "Bookmark deleted successfully");
        } else {
            info!("No bookmark found with ID: {bookmark_id}");
        }

        Ok(rows_affected)
    }
}
