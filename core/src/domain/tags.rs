//! Tags
//!
//! Tags are case-sensitive strings. They join data items to screen cells
//! at render time; nothing persists the relationship.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use super::data_item::DataItem;
use super::entity::DomainError;

/// Trim user input into a tag, rejecting blanks
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

/// Drop repeated tags, keeping the first occurrence
pub fn dedupe_tags(tags: &mut Vec<String>) {
    let mut seen = HashSet::new();
    tags.retain(|tag| seen.insert(tag.clone()));
}

/// Autocomplete suggestions: every tag used by `items`, minus `selected`,
/// without duplicates and in first-seen order.
pub fn suggest_tags<'a, I>(items: I, selected: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a DataItem>,
{
    let mut seen: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let mut suggestions = Vec::new();
    for item in items {
        for tag in &item.tags {
            if seen.insert(tag.as_str()) {
                suggestions.push(tag.clone());
            }
        }
    }
    suggestions
}

/// How a screen cell's tag list selects data items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// Item carries at least one of the cell's tags
    #[default]
    Any,
    /// Item carries every one of the cell's tags
    All,
}

impl TagMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagMatch::Any => "any",
            TagMatch::All => "all",
        }
    }

    /// A cell without tags selects nothing under either policy
    pub fn matches(&self, cell_tags: &[String], item_tags: &[String]) -> bool {
        if cell_tags.is_empty() {
            return false;
        }
        match self {
            TagMatch::Any => cell_tags.iter().any(|tag| item_tags.contains(tag)),
            TagMatch::All => cell_tags.iter().all(|tag| item_tags.contains(tag)),
        }
    }
}

impl FromStr for TagMatch {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(TagMatch::Any),
            "all" => Ok(TagMatch::All),
            other => Err(DomainError::InvalidInput(format!("unknown tag match '{}'", other))),
        }
    }
}
