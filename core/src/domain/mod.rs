//! Domain Layer
//!
//! Records, their invariants and the pure functions over them.
//! No storage or UI concerns live here.

mod entity;
mod date;
mod data_item;
mod screen;
mod tags;

pub use entity::{Entity, Document, RecordId, DomainError, DomainResult};
pub use date::{CreationDate, DATE_FORMAT};
pub use data_item::{DataItem, ItemKind, Content};
pub use screen::{Screen, Node, Container, Leaf, Axis, NodePath};
pub use tags::{suggest_tags, normalize_tag, dedupe_tags, TagMatch};
