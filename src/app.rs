//! Data Screens Frontend App
//!
//! Main application component: auth bar, screen tabs, and either the active
//! screen or the data item list.

use std::sync::Arc;

use data_screens_core::{Session, Shell, ShellConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::color_mode;
use crate::components::{AuthBar, BulkImport, DataItemList, ScreenTabBar, ScreenToolbar, ScreenView};
use crate::context::AppContext;
use crate::storage::{self, LocalStorageCollection};
use crate::store::{run_and_sync, AppState, AppStateStoreFields};

fn build_shell() -> Arc<Shell> {
    let config = ShellConfig::from_lookup(storage::load_setting).unwrap_or_else(|e| {
        log::warn!("Invalid configuration, using defaults: {}", e);
        ShellConfig::default()
    });
    let session = Session::anonymous();
    if let Some(email) = storage::load_user() {
        if session.sign_in(&email).is_err() {
            storage::save_user(None);
        }
    }
    let items = Arc::new(LocalStorageCollection::new(&config.data_items_collection));
    let screens = Arc::new(LocalStorageCollection::new(&config.screens_collection));
    Arc::new(Shell::new(items, screens, session, config))
}

#[component]
pub fn App() -> impl IntoView {
    let shell = build_shell();
    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let ctx = AppContext::new(shell, (reload_trigger, set_reload_trigger));

    provide_context(store);
    provide_context(ctx);

    color_mode::apply(color_mode::read_preference());

    // Re-list both stores on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        log::debug!("[APP] refreshing stores, trigger={}", trigger);
        spawn_local(async move {
            run_and_sync(store, ctx.shell(), "refresh", |shell| async move { shell.refresh().await }).await;
        });
    });

    let composing = move || ctx.composer.with(|c| c.active().is_some());

    view! {
        <div class="app-layout">
            <AuthBar />

            <Show when=move || store.user().get().is_some()>
                <main class="main-content">
                    <ScreenTabBar />

                    <Show
                        when=composing
                        fallback=|| view! {
                            <DataItemList />
                            <BulkImport />
                        }
                    >
                        <ScreenToolbar />
                        <ScreenView />
                    </Show>

                    <p class="item-count">
                        {move || format!(
                            "{} items, {} screens",
                            store.data_items().get().len(),
                            store.screens().get().len()
                        )}
                    </p>
                </main>
            </Show>

            {move || store.error().get().map(|e| view! { <p class="status-error">{e}</p> })}
            <Show when=move || store.loading().get()>
                <p class="status-loading">"Loading…"</p>
            </Show>
        </div>
    }
}
