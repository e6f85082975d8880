//! Repository Layer
//!
//! Document collection abstraction and its backends.

mod traits;
mod memory;
#[cfg(feature = "sqlite")]
mod db;
#[cfg(feature = "sqlite")]
mod sqlite_collection;


pub use traits::{DocumentCollection, document_owner, merge_json, OWNER_FIELD, LEGACY_OWNER_FIELD};
pub use memory::MemoryCollection;
#[cfg(feature = "sqlite")]
pub use db::DbState;
#[cfg(feature = "sqlite")]
pub use sqlite_collection::SqliteCollection;
