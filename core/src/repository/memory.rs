//! In-Memory Collection
//!
//! Process-local document collection. Keeps insertion order and can be
//! switched offline to simulate an unreachable remote store.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Document, DomainError, DomainResult, RecordId};
use super::traits::{document_owner, merge_json, DocumentCollection};

pub struct MemoryCollection {
    name: String,
    docs: Mutex<Vec<Document>>,
    offline: AtomicBool,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// While offline every operation fails with a storage error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored documents, regardless of owner
    pub fn len(&self) -> usize {
        self.docs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw body of a stored document
    pub fn get(&self, id: &RecordId) -> Option<serde_json::Value> {
        self.docs().iter().find(|doc| &doc.id == id).map(|doc| doc.body.clone())
    }

    fn docs(&self) -> MutexGuard<'_, Vec<Document>> {
        self.docs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_online(&self) -> DomainResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(DomainError::Storage(format!("collection '{}' is unreachable", self.name)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_by_owner(&self, owner: &str) -> DomainResult<Vec<Document>> {
        self.ensure_online()?;
        Ok(self
            .docs()
            .iter()
            .filter(|doc| document_owner(&doc.body) == Some(owner))
            .cloned()
            .collect())
    }

    async fn create(&self, body: &serde_json::Value) -> DomainResult<RecordId> {
        self.ensure_online()?;
        let id = RecordId::generate();
        self.docs().push(Document { id: id.clone(), body: body.clone() });
        Ok(id)
    }

    async fn merge(&self, id: &RecordId, body: &serde_json::Value) -> DomainResult<()> {
        self.ensure_online()?;
        let mut docs = self.docs();
        match docs.iter_mut().find(|doc| &doc.id == id) {
            Some(doc) => merge_json(&mut doc.body, body),
            None => docs.push(Document { id: id.clone(), body: body.clone() }),
        }
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> DomainResult<()> {
        self.ensure_online()?;
        self.docs().retain(|doc| &doc.id != id);
        Ok(())
    }
}
