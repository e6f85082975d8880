//! Data Item Store
//!
//! Owner-scoped cache of data items, plus bulk import from pasted JSON.

use std::sync::Arc;

use crate::domain::{DataItem, DomainResult};
use crate::repository::DocumentCollection;
use crate::session::Session;
use super::record_store::RecordStore;

pub type DataItemStore = RecordStore<DataItem>;

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub added: Vec<DataItem>,
    pub failed: usize,
}

impl RecordStore<DataItem> {
    /// New items are stamped with the signed-in owner, imported ones included
    pub fn for_data_items(collection: Arc<dyn DocumentCollection>, session: Session) -> Self {
        Self::new(collection, session)
    }

    /// Add every item of a JSON array, one remote write each.
    ///
    /// Malformed JSON fails before anything is written. Individual write
    /// failures are counted and the remaining items are still attempted.
    pub async fn import_json(&self, json: &str) -> DomainResult<ImportReport> {
        let items: Vec<DataItem> = serde_json::from_str(json)?;
        let mut report = ImportReport::default();
        for item in items {
            match self.add(item).await {
                Ok(added) => report.added.push(added),
                Err(_) => report.failed += 1,
            }
        }
        log::info!(
            "[{}] imported {} items ({} failed)",
            self.collection_name(),
            report.added.len(),
            report.failed
        );
        Ok(report)
    }

    /// Items carrying `tag`
    pub fn tagged(&self, tag: &str) -> Vec<DataItem> {
        self.snapshot().into_iter().filter(|item| item.has_tag(tag)).collect()
    }
}
