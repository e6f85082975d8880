//! UI Components
//!
//! Reusable Leptos components.

mod auth_bar;
mod bulk_import;
mod data_item_card;
mod data_item_list;
mod delete_confirm_button;
mod screen_tab_bar;
mod screen_toolbar;
mod screen_view;
mod tag_autocomplete;
mod type_selector;

pub use auth_bar::AuthBar;
pub use bulk_import::BulkImport;
pub use data_item_card::DataItemCard;
pub use data_item_list::DataItemList;
pub use delete_confirm_button::DeleteConfirmButton;
pub use screen_tab_bar::ScreenTabBar;
pub use screen_toolbar::ScreenToolbar;
pub use screen_view::ScreenView;
pub use tag_autocomplete::TagAutocomplete;
pub use type_selector::TypeSelector;
