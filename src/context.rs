//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use data_screens_core::{ScreenComposer, Shell};
use leptos::prelude::*;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    shell: StoredValue<Arc<Shell>>,
    /// Screen being viewed or edited
    pub composer: RwSignal<ScreenComposer>,
    /// Trigger to re-list both stores - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to re-list both stores - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(shell: Arc<Shell>, reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            shell: StoredValue::new(shell),
            composer: RwSignal::new(ScreenComposer::new()),
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn shell(&self) -> Arc<Shell> {
        self.shell.get_value()
    }

    /// Trigger a reload of both stores
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
