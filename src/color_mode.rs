//! Colour mode preference.
//!
//! Stored in `localStorage`; falls back to the system preference. Applied as
//! the `dark` class on `<html>`.

const STORAGE_KEY: &str = "data-screens:dark";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn read_preference() -> bool {
    if let Some(val) = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) {
        return val == "true";
    }
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|mq| mq.matches())
}

pub fn apply(enabled: bool) {
    let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let class_list = el.class_list();
    let _ = if enabled {
        class_list.add_1("dark")
    } else {
        class_list.remove_1("dark")
    };
}

/// Flip the mode, persist it and return the new value
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    if let Some(storage) = storage() {
        let _ = storage.set_item(STORAGE_KEY, if next { "true" } else { "false" });
    }
    next
}
