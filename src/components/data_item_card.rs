//! Data Item Card Component
//!
//! One data item form. Shows the item read-only until Edit is pressed; the
//! new-item form starts in edit mode. Store writes run in the background and
//! the form only moves on once they are confirmed.

use data_screens_core::domain::{CreationDate, DomainResult, ItemKind};
use data_screens_core::{DataItem, DataItemEditor, EditorAction, EditorCommand};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DeleteConfirmButton, TagAutocomplete, TypeSelector};
use crate::context::use_app_context;
use crate::store::{run_and_sync, store_fail, use_app_store, AppStateStoreFields, AppStore};

fn action_label(action: EditorAction) -> &'static str {
    match action {
        EditorAction::Add => "Add",
        EditorAction::Duplicate => "Duplicate",
        EditorAction::Update => "Save",
        EditorAction::Remove => "Remove",
    }
}

type EditFn = Box<dyn FnOnce(&mut DataItemEditor) -> DomainResult<()>>;

/// Apply a field edit, reporting rejections instead of changing the form
fn apply_edit(editor: RwSignal<DataItemEditor>, store: &AppStore, op: &str, f: EditFn) {
    if let Some(Err(e)) = editor.try_update(f) {
        store_fail(store, op, e);
    }
}

#[component]
pub fn DataItemCard(editor: DataItemEditor) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editor = RwSignal::new(editor);

    let edit = move |op: &'static str, f: EditFn| apply_edit(editor, &store, op, f);

    let run_action = move |action: EditorAction| {
        let command = match editor.with(|e| e.prepare(action)) {
            Ok(command) => command,
            Err(e) => {
                store_fail(&store, action_label(action), e);
                return;
            }
        };
        spawn_local(async move {
            let outcome = run_and_sync(store, ctx.shell(), action_label(action), move |shell| async move {
                let items = shell.data_items();
                match command {
                    EditorCommand::Create(item) => items.add(item).await.map(Some),
                    EditorCommand::Update(item) => items.update(item).await.map(Some),
                    EditorCommand::Remove(id) => items.remove(&id).await.map(|_| None),
                }
            })
            .await;
            if let Some(saved) = outcome {
                // The card may be gone already when its item was removed
                editor.try_update(|e| e.finish(action, saved.as_ref()));
            }
        });
    };

    let values = move || editor.with(|e| e.values().clone());
    let is_editing = move || editor.with(DataItemEditor::is_editing);
    let suggestions = Signal::derive(move || {
        let items = store.data_items().get();
        editor.with(|e| e.suggestions(&items))
    });

    let display = move || {
        let item: DataItem = values();
        view! {
            <div class="data-item-display">
                <span class="data-item-kind">{item.kind.as_str()}</span>
                <span class="data-item-date">{item.creation_date.to_string()}</span>
                <span class="data-item-label">{item.field1.clone()}</span>
                <span class="data-item-content">{item.field2.to_string()}</span>
                <div class="tag-list">
                    {item.tags.iter().map(|t| view! { <span class="tag">{t.clone()}</span> }).collect_view()}
                </div>
                <button type="button" class="edit-btn" on:click=move |_| editor.update(DataItemEditor::begin_edit)>
                    "Edit"
                </button>
            </div>
        }
    };

    let form = move || {
        let item = values();
        let numeric = item.kind.is_numeric();
        let actions = editor.with(DataItemEditor::available_actions);
        let has_original = editor.with(|e| e.original().is_some());
        view! {
            <div class="data-item-form">
                <TypeSelector
                    current=Signal::derive(move || editor.with(|e| e.values().kind))
                    on_change=move |kind: ItemKind| edit("change type", Box::new(move |e| e.set_kind(kind)))
                />
                <input
                    type="date"
                    prop:value=item.creation_date.date().format("%Y-%m-%d").to_string()
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<CreationDate>() {
                            Ok(date) => edit("set date", Box::new(move |e| e.set_creation_date(date))),
                            Err(e) => store_fail(&store, "set date", e),
                        }
                    }
                />
                <input
                    type="text"
                    placeholder="Label"
                    prop:value=item.field1.clone()
                    on:change=move |ev| {
                        let label = event_target_value(&ev);
                        edit("set label", Box::new(move |e| e.set_field1(&label)));
                    }
                />
                {if numeric {
                    view! {
                        <input
                            type="number"
                            step="any"
                            prop:value=item.field2.to_string()
                            on:change=move |ev| {
                                match event_target_value(&ev).trim().parse::<f64>() {
                                    Ok(value) => edit("set value", Box::new(move |e| e.set_number(value))),
                                    Err(e) => store_fail(&store, "set value", e),
                                }
                            }
                        />
                    }.into_any()
                } else {
                    view! {
                        <textarea
                            placeholder="Content"
                            prop:value=item.field2.to_string()
                            on:change=move |ev| {
                                let text = event_target_value(&ev);
                                edit("set content", Box::new(move |e| e.set_text(&text)));
                            }
                        ></textarea>
                    }.into_any()
                }}
                <div class="tag-list">
                    {item.tags.iter().map(|t| {
                        let tag = t.clone();
                        view! {
                            <span class="tag">
                                {t.clone()}
                                <button
                                    type="button"
                                    class="tag-delete-btn"
                                    on:click=move |_| {
                                        let tag = tag.clone();
                                        edit("remove tag", Box::new(move |e| e.remove_tag(&tag).map(|_| ())));
                                    }
                                >
                                    "×"
                                </button>
                            </span>
                        }
                    }).collect_view()}
                </div>
                <TagAutocomplete
                    suggestions=suggestions
                    on_select=move |tag: String| edit("add tag", Box::new(move |e| e.add_tag(&tag).map(|_| ())))
                />
                <div class="data-item-actions">
                    {actions.into_iter().map(|action| match action {
                        EditorAction::Remove => view! {
                            <DeleteConfirmButton label="Remove" on_confirm=move |_: ()| run_action(EditorAction::Remove) />
                        }.into_any(),
                        _ => view! {
                            <button type="button" on:click=move |_| run_action(action)>
                                {action_label(action)}
                            </button>
                        }.into_any(),
                    }).collect_view()}
                    <Show when=move || has_original>
                        <button type="button" class="cancel-btn" on:click=move |_| editor.update(DataItemEditor::cancel)>
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </div>
        }
    };

    view! {
        <div class="data-item-card">
            {move || if is_editing() { form().into_any() } else { display().into_any() }}
        </div>
    }
}
