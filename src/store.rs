//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds mirrors of
//! the core stores' snapshots, refreshed after every confirmed operation.

use std::sync::Arc;

use data_screens_core::{DataItem, Screen, Shell};
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user's email
    pub user: Option<String>,
    /// Current user's data items
    pub data_items: Vec<DataItem>,
    /// Current user's screens
    pub screens: Vec<Screen>,
    /// A store call is in flight
    pub loading: bool,
    /// Last failure shown in the status line
    pub error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// New value for the `user` field, `None` when it already holds `next`
fn owner_update(current: &Option<String>, next: Option<String>) -> Option<Option<String>> {
    (*current != next).then_some(next)
}

/// Copy the shell's current state into the store.
/// `user` is only written on sign-in or sign-out so views keyed on it survive.
pub fn store_sync(store: &AppStore, shell: &Shell) {
    if let Some(owner) = owner_update(&store.user().get_untracked(), shell.session().owner()) {
        store.user().set(owner);
    }
    store.data_items().set(shell.data_items().snapshot());
    store.screens().set(shell.screens().snapshot());
    store
        .loading()
        .set(shell.data_items().is_loading() || shell.screens().is_loading());
}

/// Record a failed operation; the rest of the state is left as is
pub fn store_fail(store: &AppStore, op: &str, err: impl std::fmt::Display) {
    log::warn!("{} failed: {}", op, err);
    store.error().set(Some(format!("{} failed: {}", op, err)));
}

pub fn store_clear_error(store: &AppStore) {
    store.error().set(None);
}

/// Run a shell operation, then mirror the outcome into the store
pub async fn run_and_sync<F, Fut, T>(store: AppStore, shell: Arc<Shell>, op: &'static str, f: F) -> Option<T>
where
    F: FnOnce(Arc<Shell>) -> Fut,
    Fut: std::future::Future<Output = data_screens_core::DomainResult<T>>,
{
    store.loading().set(true);
    let result = f(shell.clone()).await;
    store_sync(&store, &shell);
    match result {
        Ok(value) => {
            store_clear_error(&store);
            Some(value)
        }
        Err(e) => {
            store_fail(&store, op, e);
            None
        }
    }
}
