//! Bulk Import Component
//!
//! Paste a JSON array of data items and add them all at once.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{run_and_sync, use_app_store};

#[component]
pub fn BulkImport() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (open, set_open) = signal(false);
    let (json, set_json) = signal(String::new());
    let (summary, set_summary) = signal::<Option<String>>(None);

    let on_import = move |_: ev::MouseEvent| {
        let text = json.get();
        spawn_local(async move {
            let report = run_and_sync(store, ctx.shell(), "import", move |shell| async move {
                shell.import_data_items(&text).await
            })
            .await;
            if let Some(report) = report {
                set_summary.set(Some(format!("Imported {} items, {} failed", report.added.len(), report.failed)));
                if report.failed == 0 {
                    set_json.set(String::new());
                }
            }
        });
    };

    view! {
        <section class="bulk-import">
            <button type="button" class="bulk-import-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>
                {move || if open.get() { "Hide import" } else { "Import JSON" }}
            </button>
            <Show when=move || open.get()>
                <textarea
                    class="bulk-import-input"
                    placeholder=r#"[{"creationDate": "01-01-2024", "type": "text", "field2": "...", "tags": ["a"]}]"#
                    prop:value=move || json.get()
                    on:input=move |ev| set_json.set(event_target_value(&ev))
                ></textarea>
                <button type="button" on:click=on_import>"Import"</button>
                {move || summary.get().map(|s| view! { <p class="bulk-import-summary">{s}</p> })}
            </Show>
        </section>
    }
}
