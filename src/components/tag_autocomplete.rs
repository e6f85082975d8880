//! Tag Autocomplete Component
//!
//! Tag input with fuzzy search over the tags already in use.
//! Supports semicolon-separated batch input for pasting multiple tags.

use leptos::prelude::*;

/// Simple fuzzy match: check if query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

/// Get the current search segment (text after the last semicolon)
fn get_current_segment(input: &str) -> &str {
    input.rsplit(';').next().unwrap_or("").trim()
}

/// Replace the current segment (after last semicolon) with a new value
fn replace_current_segment(input: &str, new_segment: &str) -> String {
    match input.rfind(';') {
        Some(pos) => format!("{}; {}", &input[..pos], new_segment),
        None => new_segment.to_string(),
    }
}

/// Tags to add for a submitted input. The last segment becomes `picked`,
/// the suggestion highlighted with the arrow keys, when there is one;
/// otherwise every segment is kept as typed.
fn submitted_tags(input: &str, picked: Option<&str>) -> Vec<String> {
    let mut tags: Vec<String> = input
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if let (Some(last), Some(picked)) = (tags.last_mut(), picked) {
        *last = picked.to_string();
    }
    tags
}

/// Tag input with autocomplete.
///
/// `suggestions` should already exclude the tags the target carries;
/// `on_select` runs once per submitted tag.
#[component]
pub fn TagAutocomplete(
    #[prop(into)] suggestions: Signal<Vec<String>>,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());
    let (selected_idx, set_selected_idx) = signal(0usize);
    // set once the highlight has been moved with the arrow keys
    let (picked, set_picked) = signal(false);

    let matches = move || {
        let full_input = input_value.get();
        let current_segment = get_current_segment(&full_input);
        if current_segment.is_empty() {
            return vec![];
        }
        suggestions
            .get()
            .into_iter()
            .filter(|tag| fuzzy_match(current_segment, tag))
            .take(5)
            .collect::<Vec<_>>()
    };

    let handle_suggestion_select = move |name: String| {
        let new_input = replace_current_segment(&input_value.get(), &name);
        set_input_value.set(new_input);
        set_selected_idx.set(0);
        set_picked.set(false);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let sugg = matches();
        let highlighted = if picked.get() { sugg.get(selected_idx.get()) } else { None };
        for tag_name in submitted_tags(&input_value.get(), highlighted.map(String::as_str)) {
            on_select.run(tag_name);
        }

        set_input_value.set(String::new());
        set_selected_idx.set(0);
        set_picked.set(false);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = matches();
        match ev.key().as_str() {
            "Tab" => {
                if let Some(s) = sugg.get(selected_idx.get()) {
                    ev.prevent_default();
                    handle_suggestion_select(s.clone());
                }
            }
            "ArrowDown" if !sugg.is_empty() => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if picked.get() && sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
                set_picked.set(true);
            }
            "ArrowUp" if !sugg.is_empty() => {
                ev.prevent_default();
                set_selected_idx.update(|sel| *sel = sel.saturating_sub(1));
                set_picked.set(true);
            }
            _ => {}
        }
    };

    view! {
        <div class="tag-input-wrapper">
            <form class="tag-editor-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Add tags (separate with ;)..."
                    autocomplete="off"
                    prop:value=move || input_value.get()
                    on:input=move |ev| {
                        set_input_value.set(event_target_value(&ev));
                        set_selected_idx.set(0);
                        set_picked.set(false);
                    }
                    on:keydown=on_keydown
                />
                <button type="submit">"+"</button>
            </form>

            {move || {
                let sugg = matches();
                if sugg.is_empty() {
                    return view! { <div></div> }.into_any();
                }
                let selected = picked.get().then(|| selected_idx.get());
                view! {
                    <div class="autocomplete-list">
                        {sugg.into_iter().enumerate().map(|(i, name)| {
                            let name_for_click = name.clone();
                            view! {
                                <button
                                    type="button"
                                    class=if selected == Some(i) { "autocomplete-item selected" } else { "autocomplete-item" }
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        handle_suggestion_select(name_for_click.clone());
                                    }
                                >
                                    {name}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
