//! Type Selector Component
//!
//! Reusable data item kind selector buttons.

use data_screens_core::domain::ItemKind;
use leptos::prelude::*;

fn label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Text => "Text",
        ItemKind::Note => "Note",
        ItemKind::Link => "Link",
        ItemKind::Number => "Number",
    }
}

/// Kind selector buttons for data items
#[component]
pub fn TypeSelector(
    #[prop(into)] current: Signal<ItemKind>,
    #[prop(into)] on_change: Callback<ItemKind>,
) -> impl IntoView {
    view! {
        <div class="type-selector">
            {ItemKind::ALL.iter().map(|kind| {
                let kind = *kind;
                let is_selected = move || current.get() == kind;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn small active" } else { "type-btn small" }
                        on:click=move |_| on_change.run(kind)
                    >
                        {label(kind)}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
