//! Browser Document Collection
//!
//! Keeps one collection as a JSON array under a single `localStorage` key.
//! Storage is looked up on every call and never held across an await.

use async_trait::async_trait;
use data_screens_core::domain::{Document, DomainError, DomainResult, RecordId};
use data_screens_core::repository::{document_owner, merge_json, DocumentCollection};
use serde::{Deserialize, Serialize};

const KEY_PREFIX: &str = "data-screens";
const USER_KEY: &str = "data-screens:user";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Email remembered from the last sign-in
pub fn load_user() -> Option<String> {
    local_storage()?.get_item(USER_KEY).ok().flatten()
}

pub fn save_user(user: Option<&str>) {
    let Some(storage) = local_storage() else {
        return;
    };
    let _ = match user {
        Some(email) => storage.set_item(USER_KEY, email),
        None => storage.remove_item(USER_KEY),
    };
}

/// Configuration override stored under its `DATA_SCREENS_*` name
pub fn load_setting(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[derive(Serialize, Deserialize)]
struct StoredDocument {
    id: String,
    body: serde_json::Value,
}

pub struct LocalStorageCollection {
    name: String,
    key: String,
}

impl LocalStorageCollection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            key: format!("{}:{}", KEY_PREFIX, name),
        }
    }

    fn storage(&self) -> DomainResult<web_sys::Storage> {
        local_storage().ok_or_else(|| DomainError::Storage(format!("localStorage unavailable for '{}'", self.name)))
    }

    fn load(&self) -> DomainResult<Vec<StoredDocument>> {
        let raw = self
            .storage()?
            .get_item(&self.key)
            .map_err(|_| DomainError::Storage(format!("cannot read '{}'", self.key)))?;
        match raw {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| DomainError::Serialization(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, docs: &[StoredDocument]) -> DomainResult<()> {
        let raw = serde_json::to_string(docs)?;
        self.storage()?
            .set_item(&self.key, &raw)
            .map_err(|_| DomainError::Storage(format!("cannot write '{}'", self.key)))
    }
}

#[async_trait]
impl DocumentCollection for LocalStorageCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_by_owner(&self, owner: &str) -> DomainResult<Vec<Document>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|doc| document_owner(&doc.body) == Some(owner))
            .map(|doc| Document {
                id: RecordId::new(doc.id),
                body: doc.body,
            })
            .collect())
    }

    async fn create(&self, body: &serde_json::Value) -> DomainResult<RecordId> {
        let mut docs = self.load()?;
        let id = RecordId::generate();
        docs.push(StoredDocument {
            id: id.to_string(),
            body: body.clone(),
        });
        self.save(&docs)?;
        Ok(id)
    }

    async fn merge(&self, id: &RecordId, body: &serde_json::Value) -> DomainResult<()> {
        let mut docs = self.load()?;
        match docs.iter_mut().find(|doc| doc.id == id.as_str()) {
            Some(doc) => merge_json(&mut doc.body, body),
            None => docs.push(StoredDocument {
                id: id.to_string(),
                body: body.clone(),
            }),
        }
        self.save(&docs)
    }

    async fn delete(&self, id: &RecordId) -> DomainResult<()> {
        let mut docs = self.load()?;
        let before = docs.len();
        docs.retain(|doc| doc.id != id.as_str());
        if docs.len() != before {
            self.save(&docs)?;
        }
        Ok(())
    }
}
