//! Application Shell
//!
//! Wires the session, both stores and the configuration together.
//! Signing in or out re-lists both stores so their state always belongs
//! to the current user.

use std::sync::Arc;

use crate::composer::{layout, LayoutNode};
use crate::config::ShellConfig;
use crate::domain::{suggest_tags, DataItem, DomainResult, Screen};
use crate::repository::DocumentCollection;
use crate::session::Session;
use crate::store::{DataItemStore, ImportReport, ScreenStore};

pub struct Shell {
    session: Session,
    config: ShellConfig,
    data_items: Arc<DataItemStore>,
    screens: Arc<ScreenStore>,
}

impl Shell {
    pub fn new(
        items: Arc<dyn DocumentCollection>,
        screens: Arc<dyn DocumentCollection>,
        session: Session,
        config: ShellConfig,
    ) -> Self {
        Self {
            data_items: Arc::new(DataItemStore::for_data_items(items, session.clone())),
            screens: Arc::new(ScreenStore::for_screens(screens, session.clone())),
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn data_items(&self) -> Arc<DataItemStore> {
        self.data_items.clone()
    }

    pub fn screens(&self) -> Arc<ScreenStore> {
        self.screens.clone()
    }

    pub async fn sign_in(&self, email: &str) -> DomainResult<()> {
        self.session.sign_in(email)?;
        log::info!("signed in as {}", email.trim());
        self.refresh().await
    }

    /// Clears both stores; listing without a user cannot fail
    pub async fn sign_out(&self) -> DomainResult<()> {
        self.session.sign_out();
        log::info!("signed out");
        self.refresh().await
    }

    /// Re-list both stores. Both are attempted; the first failure is returned.
    pub async fn refresh(&self) -> DomainResult<()> {
        let items = self.data_items.list().await;
        let screens = self.screens.list().await;
        items?;
        screens?;
        Ok(())
    }

    /// Tags in use across the user's data items, minus `selected`
    pub fn suggest_tags(&self, selected: &[String]) -> Vec<String> {
        suggest_tags(&self.data_items.snapshot(), selected)
    }

    /// Screen resolved against the current data items
    pub fn layout<'a>(&self, screen: &Screen, items: &'a [DataItem]) -> LayoutNode<'a> {
        layout(screen, items, self.config.tag_match)
    }

    pub async fn import_data_items(&self, json: &str) -> DomainResult<ImportReport> {
        self.data_items.import_json(json).await
    }
}
