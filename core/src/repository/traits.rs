//! Repository Layer - Core Traits
//!
//! Defines the remote document collection the stores talk to.
//! Implementations can use SQLite, browser storage, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{Document, DomainResult, RecordId};

/// Document field holding the owner identity
pub const OWNER_FIELD: &str = "ownerEmail";

/// Older documents carry the owner under this name
pub const LEGACY_OWNER_FIELD: &str = "userEmail";

/// One owner-scoped collection of schemaless JSON documents
///
/// All operations are async to support remote backends.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Collection name, used in logs
    fn name(&self) -> &str;

    /// Every document whose owner field equals `owner`
    async fn list_by_owner(&self, owner: &str) -> DomainResult<Vec<Document>>;

    /// Store a new document and return its assigned identifier
    async fn create(&self, body: &serde_json::Value) -> DomainResult<RecordId>;

    /// Merge `body` into the document `id`, creating it when absent
    async fn merge(&self, id: &RecordId, body: &serde_json::Value) -> DomainResult<()>;

    /// Delete document `id`; deleting an absent id succeeds
    async fn delete(&self, id: &RecordId) -> DomainResult<()>;
}

/// Owner recorded in a document body, under either field name
pub fn document_owner(body: &serde_json::Value) -> Option<&str> {
    body.get(OWNER_FIELD)
        .or_else(|| body.get(LEGACY_OWNER_FIELD))
        .and_then(serde_json::Value::as_str)
}

/// Set-with-merge: nested objects merge key by key, everything else
/// (arrays included) replaces the stored value.
pub fn merge_json(target: &mut serde_json::Value, patch: &serde_json::Value) {
    match (target, patch) {
        (serde_json::Value::Object(target), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}
