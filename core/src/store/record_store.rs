//! Record Store
//!
//! In-memory cache of one owner-scoped collection. Local state changes
//! only after the remote call has succeeded; on failure it is left as is.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{DomainError, DomainResult, Entity, RecordId};
use crate::repository::DocumentCollection;
use crate::session::Session;

/// Raises the loading flag for its lifetime
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct RecordStore<T: Entity> {
    collection: Arc<dyn DocumentCollection>,
    session: Session,
    /// `None` until listed, and again after listing with nobody signed in
    records: Mutex<Option<Vec<T>>>,
    loading: AtomicBool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RecordStore<T> {
    pub fn new(collection: Arc<dyn DocumentCollection>, session: Session) -> Self {
        Self {
            collection,
            session,
            records: Mutex::new(None),
            loading: AtomicBool::new(false),
            _entity: PhantomData,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// True while a remote call is in flight. Not a lock.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Current local state; `None` when nothing has been listed
    pub fn records(&self) -> Option<Vec<T>> {
        self.local().clone()
    }

    /// Current local state, empty when nothing has been listed
    pub fn snapshot(&self) -> Vec<T> {
        self.local().clone().unwrap_or_default()
    }

    pub fn find(&self, id: &RecordId) -> Option<T> {
        self.local()
            .as_ref()
            .and_then(|records| records.iter().find(|r| r.id() == Some(id)).cloned())
    }

    fn local(&self) -> MutexGuard<'_, Option<Vec<T>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn failed(&self, op: &str, e: DomainError) -> DomainError {
        log::warn!("[{}] {} failed: {}", self.collection.name(), op, e);
        e
    }

    /// Writes need somebody signed in; nothing is sent otherwise
    fn require_owner(&self, op: &str) -> DomainResult<String> {
        self.session
            .owner()
            .ok_or_else(|| self.failed(op, DomainError::Unauthenticated))
    }

    /// Fetch everything the signed-in user owns and replace local state.
    /// With nobody signed in, local state is cleared and the call succeeds.
    /// Documents that do not decode are logged and left out.
    pub async fn list(&self) -> DomainResult<Vec<T>> {
        let Some(owner) = self.session.owner() else {
            *self.local() = None;
            return Ok(Vec::new());
        };

        let _loading = LoadingGuard::raise(&self.loading);
        let docs = self
            .collection
            .list_by_owner(&owner)
            .await
            .map_err(|e| self.failed("list", e))?;
        let records: Vec<T> = docs
            .into_iter()
            .filter_map(|doc| match T::from_document(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("[{}] skipping document: {}", self.collection.name(), e);
                    None
                }
            })
            .collect();

        log::debug!("[{}] loaded {} records for {}", self.collection.name(), records.len(), owner);
        *self.local() = Some(records.clone());
        Ok(records)
    }

    /// Persist a new record owned by the signed-in user; the stored copy
    /// (with its id) is appended locally
    pub async fn add(&self, mut record: T) -> DomainResult<T> {
        let owner = self.require_owner("add")?;
        record.set_owner_email(&owner);
        record.normalize();

        let _loading = LoadingGuard::raise(&self.loading);
        let body = record.to_document_body().map_err(|e| self.failed("add", e))?;
        let id = self
            .collection
            .create(&body)
            .await
            .map_err(|e| self.failed("add", e))?;

        record.set_id(id);
        log::debug!("[{}] added {:?}", self.collection.name(), record.id());
        self.local().get_or_insert_with(Vec::new).push(record.clone());
        Ok(record)
    }

    /// Merge a saved record's fields remotely, then replace the local entry
    pub async fn update(&self, mut record: T) -> DomainResult<T> {
        let owner = self.require_owner("update")?;
        let id = record
            .id()
            .cloned()
            .ok_or_else(|| self.failed("update", DomainError::InvalidInput("record has no id".to_string())))?;
        if record.owner_email().is_empty() {
            record.set_owner_email(&owner);
        } else if record.owner_email() != owner {
            let e = DomainError::InvalidInput(format!("record {} belongs to another user", id));
            return Err(self.failed("update", e));
        }
        record.normalize();

        let _loading = LoadingGuard::raise(&self.loading);
        let body = record.to_document_body().map_err(|e| self.failed("update", e))?;
        self.collection
            .merge(&id, &body)
            .await
            .map_err(|e| self.failed("update", e))?;

        log::debug!("[{}] updated {}", self.collection.name(), id);
        if let Some(records) = self.local().as_mut() {
            if let Some(existing) = records.iter_mut().find(|r| r.id() == Some(&id)) {
                *existing = record.clone();
            }
        }
        Ok(record)
    }

    /// Delete remotely, then drop the local entry if there is one
    pub async fn remove(&self, id: &RecordId) -> DomainResult<()> {
        self.require_owner("remove")?;
        let _loading = LoadingGuard::raise(&self.loading);
        self.collection
            .delete(id)
            .await
            .map_err(|e| self.failed("remove", e))?;

        log::debug!("[{}] removed {}", self.collection.name(), id);
        if let Some(records) = self.local().as_mut() {
            records.retain(|r| r.id() != Some(id));
        }
        Ok(())
    }
}
