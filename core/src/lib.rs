//! Data Screens Core
//!
//! Layered architecture:
//! - domain: records, invariants and tag helpers
//! - repository: document collection abstraction and backends
//! - store: owner-scoped local caches of the remote collections
//! - editor / composer: form state for data items and screen layouts
//! - shell: session, stores and configuration wired together

pub mod domain;
pub mod repository;
pub mod session;
pub mod store;
pub mod editor;
pub mod composer;
pub mod config;
pub mod shell;

pub use composer::{ComposerCommand, ComposerMode, LayoutNode, ScreenComposer};
pub use config::ShellConfig;
pub use domain::{DataItem, DomainError, DomainResult, RecordId, Screen, TagMatch};
pub use editor::{DataItemEditor, EditorAction, EditorCommand, EditorMode};
pub use session::Session;
pub use shell::Shell;
pub use store::{DataItemStore, ImportReport, ScreenStore};
