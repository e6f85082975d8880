//! Database Connection and Setup
//!
//! Manages the SQLite connection backing local document collections.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared SQLite connection
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
}

impl DbState {
    /// Open (or create) the database at `path` and run migrations.
    /// `":memory:"` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let conn = if path == Path::new(":memory:") {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| DomainError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

        run_migrations(&conn)?;
        log::debug!("[DB] opened {}", path.display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            owner TEXT,
            body TEXT NOT NULL,
            updated_at INTEGER,
            UNIQUE (collection, id)
        );
        CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents(collection, owner);",
    )
    .map_err(|e| DomainError::Storage(format!("Failed to create documents table: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(conn: &Connection) -> Vec<String> {
        let mut stmt = conn.prepare("PRAGMA table_info(documents)").unwrap();
        let names = stmt.query_map([], |row| row.get::<_, String>(1)).unwrap();
        names.map(|n| n.unwrap()).collect()
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screens.db");
        DbState::open(&path).unwrap();
        let db = DbState::open(&path).unwrap();
        let conn = db.connection();
        let conn = conn.blocking_lock();
        assert_eq!(columns(&conn).iter().filter(|c| *c == "updated_at").count(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_has_documents_table() {
        let db = DbState::open(":memory:").unwrap();
        let conn = db.connection();
        let conn = conn.lock().await;
        assert_eq!(columns(&conn), vec!["seq", "collection", "id", "owner", "body", "updated_at"]);
    }
}
