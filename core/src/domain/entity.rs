//! Domain Layer - Core Entity Trait
//!
//! Every record kept in a document collection implements [`Entity`].
//! Identifiers live outside the document body and are attached after reads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque document identifier assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier for backends that mint their own ids
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A stored document: identifier plus schemaless JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: RecordId,
    pub body: serde_json::Value,
}

/// Core trait for all owner-scoped records
pub trait Entity: Sized + Send + Sync + Clone + Serialize + DeserializeOwned {
    /// Identifier, absent until the record is first saved
    fn id(&self) -> Option<&RecordId>;

    fn set_id(&mut self, id: RecordId);

    fn owner_email(&self) -> &str;

    fn set_owner_email(&mut self, owner: &str);

    /// Restore invariants on data that came from outside (storage, imports)
    fn normalize(&mut self) {}

    /// JSON body written to the collection (never contains the id)
    fn to_document_body(&self) -> DomainResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| DomainError::Serialization(e.to_string()))
    }

    /// Decode a stored document and attach its identifier
    fn from_document(doc: Document) -> DomainResult<Self> {
        let mut entity: Self = serde_json::from_value(doc.body)
            .map_err(|e| DomainError::Serialization(format!("document {}: {}", doc.id, e)))?;
        entity.set_id(doc.id);
        entity.normalize();
        Ok(entity)
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("no authenticated user")]
    Unauthenticated,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Serialization(e.to_string())
    }
}
