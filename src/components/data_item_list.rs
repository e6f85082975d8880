//! Data Item List Component
//!
//! New-item form followed by one card per stored data item.

use data_screens_core::domain::CreationDate;
use data_screens_core::DataItemEditor;
use leptos::prelude::*;

use crate::components::DataItemCard;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DataItemList() -> impl IntoView {
    let store = use_app_store();
    // the blank card is rebuilt only when the signed-in user changes
    let owner = Memo::new(move |_| store.user().get());

    view! {
        <section class="data-item-list">
            {move || owner.get().map(|owner| view! {
                <DataItemCard editor=DataItemEditor::blank(&owner, CreationDate::today()) />
            })}
            <For
                each=move || store.data_items().get()
                key=|item| item.id.clone()
                children=move |item| view! { <DataItemCard editor=DataItemEditor::for_item(item) /> }
            />
        </section>
    }
}
