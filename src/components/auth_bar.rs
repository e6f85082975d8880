//! Auth Bar Component
//!
//! Email sign-in / sign-out plus the colour mode toggle. Signing in or out
//! re-lists both stores through the shell.

use data_screens_core::DomainError;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::color_mode;
use crate::context::use_app_context;
use crate::storage;
use crate::store::{run_and_sync, use_app_store, AppStateStoreFields};

#[component]
pub fn AuthBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (email, set_email) = signal(String::new());
    let (dark, set_dark) = signal(color_mode::read_preference());

    let on_sign_in = move |e: ev::SubmitEvent| {
        e.prevent_default();
        let value = email.get();
        if value.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            let signed_in = run_and_sync(store, ctx.shell(), "sign in", move |shell| async move {
                shell.sign_in(&value).await?;
                Ok::<_, DomainError>(shell.session().owner())
            })
            .await;
            if let Some(owner) = signed_in {
                storage::save_user(owner.as_deref());
                set_email.set(String::new());
            }
        });
    };

    let on_sign_out = move |_: ev::MouseEvent| {
        ctx.composer.update(|c| c.close());
        storage::save_user(None);
        spawn_local(async move {
            run_and_sync(store, ctx.shell(), "sign out", |shell| async move { shell.sign_out().await }).await;
        });
    };

    view! {
        <header class="auth-bar">
            <h1>"Data Screens"</h1>
            {move || match store.user().get() {
                Some(user) => view! {
                    <span class="auth-user">{user}</span>
                    <button type="button" on:click=on_sign_out>"Sign out"</button>
                }.into_any(),
                None => view! {
                    <form class="auth-form" on:submit=on_sign_in>
                        <input
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <button type="submit">"Sign in"</button>
                    </form>
                }.into_any(),
            }}
            <button
                type="button"
                class="color-mode-btn"
                on:click=move |_| set_dark.set(color_mode::toggle(dark.get()))
            >
                {move || if dark.get() { "Light" } else { "Dark" }}
            </button>
        </header>
    }
}
