//! Store Layer
//!
//! Local caches of the remote collections, kept in step with confirmed writes.

mod record_store;
mod data_items;
mod screens;

#[cfg(test)]
mod tests;

pub use record_store::RecordStore;
pub use data_items::{DataItemStore, ImportReport};
pub use screens::ScreenStore;
