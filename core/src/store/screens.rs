//! Screen Store
//!
//! Owner-scoped cache of screens. New screens are always stamped with
//! the signed-in owner before the remote write.

use std::sync::Arc;

use crate::domain::{DomainResult, Screen};
use crate::repository::DocumentCollection;
use crate::session::Session;
use super::record_store::RecordStore;

pub type ScreenStore = RecordStore<Screen>;

impl RecordStore<Screen> {
    pub fn for_screens(collection: Arc<dyn DocumentCollection>, session: Session) -> Self {
        Self::new(collection, session)
    }

    /// Create when the screen has no id yet, update otherwise
    pub async fn save(&self, screen: Screen) -> DomainResult<Screen> {
        if screen.is_saved() {
            self.update(screen).await
        } else {
            self.add(screen).await
        }
    }

    /// First screen with this display name
    pub fn find_by_name(&self, name: &str) -> Option<Screen> {
        self.snapshot().into_iter().find(|screen| screen.name == name)
    }
}
