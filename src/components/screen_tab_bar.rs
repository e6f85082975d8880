//! Screen Tab Bar Component
//!
//! Tab bar for switching between the user's screens. The leading tab goes
//! back to the data item list; "+" starts a new screen.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ScreenTabBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let active_id = move || ctx.composer.with(|c| c.active().map(|s| s.id.clone()));

    view! {
        <div class="screen-tab-bar">
            <button
                class=move || if active_id().is_none() { "screen-tab active" } else { "screen-tab" }
                on:click=move |_| ctx.composer.update(|c| c.close())
            >
                "Data"
            </button>
            <For
                each=move || store.screens().get()
                key=|screen| (screen.id.clone(), screen.name.clone())
                children=move |screen| {
                    let id = screen.id.clone();
                    let is_active = move || active_id() == Some(id.clone());
                    let label = if screen.name.is_empty() { "Untitled".to_string() } else { screen.name.clone() };
                    view! {
                        <button
                            class=move || if is_active() { "screen-tab active" } else { "screen-tab" }
                            on:click=move |_| {
                                let screen = screen.clone();
                                ctx.composer.update(|c| c.open(screen));
                            }
                        >
                            {label}
                        </button>
                    }
                }
            />
            <button
                class="screen-add-btn"
                on:click=move |_| ctx.composer.update(|c| {
                    c.create();
                })
            >
                "+"
            </button>
        </div>
    }
}
