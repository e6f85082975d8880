//! SQLite Collection
//!
//! Document collection stored as JSON text in the shared `documents` table.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{Document, DomainError, DomainResult, RecordId};
use super::db::DbState;
use super::traits::{document_owner, merge_json, DocumentCollection};

/// SQLite implementation of one named collection
pub struct SqliteCollection {
    conn: Arc<Mutex<Connection>>,
    name: String,
}

impl SqliteCollection {
    pub fn new(db: &DbState, name: impl Into<String>) -> Self {
        Self {
            conn: db.connection(),
            name: name.into(),
        }
    }
}

fn storage_err(e: rusqlite::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Decode a stored body
fn parse_body(id: &str, raw: &str) -> DomainResult<serde_json::Value> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Serialization(format!("document {}: {}", id, e)))
}

#[async_trait]
impl DocumentCollection for SqliteCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_by_owner(&self, owner: &str) -> DomainResult<Vec<Document>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, body FROM documents WHERE collection = ? AND owner = ? ORDER BY seq ASC")
            .map_err(storage_err)?;
        let rows = stmt
            .query_map(params![self.name, owner], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(storage_err)?;

        let mut docs = Vec::new();
        for row in rows {
            let (id, raw) = row.map_err(storage_err)?;
            let body = parse_body(&id, &raw)?;
            docs.push(Document { id: RecordId::new(id), body });
        }
        Ok(docs)
    }

    async fn create(&self, body: &serde_json::Value) -> DomainResult<RecordId> {
        let conn = self.conn.lock().await;
        let id = RecordId::generate();

        conn.execute(
            "INSERT INTO documents (collection, id, owner, body, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![self.name, id.as_str(), document_owner(body), body.to_string(), now_millis()],
        )
        .map_err(storage_err)?;

        Ok(id)
    }

    async fn merge(&self, id: &RecordId, body: &serde_json::Value) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let existing: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ? AND id = ?",
                params![self.name, id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(storage_err)?;

        let merged = match existing {
            Some(raw) => {
                let mut stored = parse_body(id.as_str(), &raw)?;
                merge_json(&mut stored, body);
                stored
            }
            None => body.clone(),
        };

        conn.execute(
            "INSERT INTO documents (collection, id, owner, body, updated_at) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (collection, id) DO UPDATE SET owner = excluded.owner, body = excluded.body, updated_at = excluded.updated_at",
            params![self.name, id.as_str(), document_owner(&merged), merged.to_string(), now_millis()],
        )
        .map_err(storage_err)?;

        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        conn.execute(
            "DELETE FROM documents WHERE collection = ? AND id = ?",
            params![self.name, id.as_str()],
        )
        .map_err(storage_err)?;

        Ok(())
    }
}
