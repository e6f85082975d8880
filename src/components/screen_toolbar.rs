//! Screen Toolbar Component
//!
//! Name, root axis and save/delete controls for the active screen.

use data_screens_core::{ComposerCommand, ComposerMode, ScreenComposer};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::store::{run_and_sync, store_fail, use_app_store, AppStore};

/// Send a prepared save or delete to the screen store; the composer only
/// moves on once the store confirms.
fn submit(ctx: AppContext, store: AppStore, op: &'static str, command: ComposerCommand) {
    let deleting = matches!(command, ComposerCommand::Delete(_));
    spawn_local(async move {
        let done = run_and_sync(store, ctx.shell(), op, move |shell| async move {
            let screens = shell.screens();
            match command {
                ComposerCommand::Create(screen) => screens.add(screen).await.map(|_| ()),
                ComposerCommand::Update(screen) => screens.update(screen).await.map(|_| ()),
                ComposerCommand::Delete(id) => screens.remove(&id).await,
            }
        })
        .await;
        if done.is_some() {
            ctx.composer.update(|c| if deleting { c.finish_delete() } else { c.finish_save() });
        }
    });
}

#[component]
pub fn ScreenToolbar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let mode = move || ctx.composer.with(ScreenComposer::mode);
    let editing = move || mode() == Some(ComposerMode::Editing);
    let name = move || ctx.composer.with(|c| c.active().map(|s| s.name.clone()).unwrap_or_default());
    let axis = move || ctx.composer.with(|c| c.active().map(|s| s.axis.as_str()).unwrap_or_default());
    let saved = move || ctx.composer.with(|c| c.active().is_some_and(|s| s.is_saved()));

    let on_save = move |_: ev::MouseEvent| match ctx.composer.with(ScreenComposer::prepare_save) {
        Ok(command) => submit(ctx, store, "save screen", command),
        Err(e) => store_fail(&store, "save screen", e),
    };

    let on_delete = move |_: ()| match ctx.composer.with(ScreenComposer::prepare_delete) {
        Ok(command) => submit(ctx, store, "delete screen", command),
        Err(e) => store_fail(&store, "delete screen", e),
    };

    let on_rename = move |e: ev::Event| {
        let value = event_target_value(&e);
        if let Some(Err(e)) = ctx.composer.try_update(|c| c.rename(&value)) {
            store_fail(&store, "rename screen", e);
        }
    };

    let on_flip = move |_: ev::MouseEvent| {
        if let Some(Err(e)) = ctx.composer.try_update(|c| c.flip_axis()) {
            store_fail(&store, "flip axis", e);
        }
    };

    view! {
        <div class="screen-toolbar">
            {move || if editing() {
                view! {
                    <input
                        type="text"
                        class="screen-name-input"
                        placeholder="Screen name"
                        prop:value=name()
                        on:change=on_rename
                    />
                    <button type="button" on:click=on_flip>{move || format!("Axis: {}", axis())}</button>
                    <button type="button" class="save-btn" on:click=on_save>"Save"</button>
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.composer.update(|c| c.cancel())>
                        "Cancel"
                    </button>
                }.into_any()
            } else {
                view! {
                    <h2 class="screen-name">{name}</h2>
                    <button
                        type="button"
                        class="edit-btn"
                        on:click=move |_| {
                            if let Some(Err(e)) = ctx.composer.try_update(|c| c.begin_edit()) {
                                store_fail(&store, "edit screen", e);
                            }
                        }
                    >
                        "Edit"
                    </button>
                }.into_any()
            }}
            <Show when=saved>
                <DeleteConfirmButton label="Delete screen" on_confirm=on_delete />
            </Show>
            <button type="button" class="close-btn" on:click=move |_| ctx.composer.update(|c| c.close())>
                "Close"
            </button>
        </div>
    }
}
