//! Data Item Entity
//!
//! A short owner-scoped record: optional label, text or numeric content,
//! a creation date and a list of tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date::CreationDate;
use super::entity::{DomainError, Entity, RecordId};
use super::tags::{dedupe_tags, normalize_tag};

/// Item kind decides how `field2` is represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Single line of text
    #[default]
    Text,
    /// Longer free-form text
    Note,
    /// URL or reference
    Link,
    /// Numeric value
    Number,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [ItemKind::Text, ItemKind::Note, ItemKind::Link, ItemKind::Number];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Note => "note",
            ItemKind::Link => "link",
            ItemKind::Number => "number",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ItemKind::Number)
    }

    /// Empty content in this kind's representation
    pub fn default_content(&self) -> Content {
        if self.is_numeric() {
            Content::Number(0.0)
        } else {
            Content::Text(String::new())
        }
    }
}

impl FromStr for ItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown item type '{}'", wanted)))
    }
}

/// Primary content of a data item (`field2`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Number(f64),
    Text(String),
}

impl Content {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Content::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Content::Number(n) => Some(*n),
            Content::Text(_) => None,
        }
    }

    /// Convert to the representation `kind` expects, keeping the value when possible
    fn coerced_to(self, kind: ItemKind) -> Content {
        match (self, kind.is_numeric()) {
            (Content::Text(text), true) => Content::Number(text.trim().parse().unwrap_or(0.0)),
            (Content::Number(n), false) => Content::Text(n.to_string()),
            (content, _) => content,
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Number(n) => write!(f, "{}", n),
            Content::Text(text) => f.write_str(text),
        }
    }
}

/// A tagged text/numeric record owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    /// Assigned by the store on first save
    #[serde(skip)]
    pub id: Option<RecordId>,
    #[serde(rename = "ownerEmail", alias = "userEmail", default)]
    pub owner_email: String,
    #[serde(rename = "creationDate")]
    pub creation_date: CreationDate,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    /// Optional short label, empty when unused
    #[serde(default)]
    pub field1: String,
    #[serde(default)]
    pub field2: Content,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DataItem {
    /// Unsaved item with the default kind and empty fields
    pub fn new(owner_email: &str, creation_date: CreationDate) -> Self {
        let kind = ItemKind::default();
        Self {
            id: None,
            owner_email: owner_email.to_string(),
            creation_date,
            kind,
            field1: String::new(),
            field2: kind.default_content(),
            tags: Vec::new(),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Change kind; content resets whenever the change crosses the numeric boundary
    pub fn set_kind(&mut self, kind: ItemKind) {
        if self.kind == kind {
            return;
        }
        if self.kind.is_numeric() || kind.is_numeric() {
            self.field2 = kind.default_content();
        }
        self.kind = kind;
    }

    /// Add a tag; returns false when it is blank or already present
    pub fn add_tag(&mut self, raw: &str) -> bool {
        match normalize_tag(raw) {
            Some(tag) if !self.tags.contains(&tag) => {
                self.tags.push(tag);
                true
            }
            _ => false,
        }
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Copy of this item's values as a new, unsaved record
    pub fn duplicate(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

impl Entity for DataItem {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn owner_email(&self) -> &str {
        &self.owner_email
    }

    fn set_owner_email(&mut self, owner: &str) {
        self.owner_email = owner.to_string();
    }

    fn normalize(&mut self) {
        dedupe_tags(&mut self.tags);
        let content = std::mem::take(&mut self.field2);
        self.field2 = content.coerced_to(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Document;
    use serde_json::json;

    fn date() -> CreationDate {
        CreationDate::from_ymd(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_item_kind_parses_known_names_only() {
        assert_eq!(" Number ".parse::<ItemKind>(), Ok(ItemKind::Number));
        assert_eq!("link".parse::<ItemKind>(), Ok(ItemKind::Link));
        for kind in ItemKind::ALL {
            assert_eq!(kind.as_str().parse::<ItemKind>(), Ok(kind));
        }
        assert!(matches!("video".parse::<ItemKind>(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_new_item_defaults() {
        let item = DataItem::new("a@x.com", date());
        assert!(!item.is_saved());
        assert_eq!(item.kind, ItemKind::Text);
        assert_eq!(item.field2, Content::Text(String::new()));
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_kind_switch_resets_across_numeric_boundary() {
        let mut item = DataItem::new("a@x.com", date());
        item.field2 = Content::Text("hello".into());

        item.set_kind(ItemKind::Note);
        assert_eq!(item.field2, Content::Text("hello".into()));

        item.set_kind(ItemKind::Number);
        assert_eq!(item.field2, Content::Number(0.0));

        item.field2 = Content::Number(42.0);
        item.set_kind(ItemKind::Text);
        assert_eq!(item.field2, Content::Text(String::new()));
    }

    #[test]
    fn test_same_kind_is_noop() {
        let mut item = DataItem::new("a@x.com", date());
        item.set_kind(ItemKind::Number);
        item.field2 = Content::Number(3.5);
        item.set_kind(ItemKind::Number);
        assert_eq!(item.field2, Content::Number(3.5));
    }

    #[test]
    fn test_tags_stay_distinct() {
        let mut item = DataItem::new("a@x.com", date());
        assert!(item.add_tag("work"));
        assert!(!item.add_tag(" work "));
        assert!(!item.add_tag(""));
        assert!(item.add_tag("Work"));
        assert_eq!(item.tags, vec!["work".to_string(), "Work".to_string()]);
        assert!(item.remove_tag("work"));
        assert!(!item.remove_tag("work"));
    }

    #[test]
    fn test_document_body_shape() {
        let mut item = DataItem::new("a@x.com", date());
        item.id = Some(RecordId::new("abc"));
        item.set_kind(ItemKind::Number);
        item.field2 = Content::Number(7.0);
        item.tags = vec!["x".into()];

        let body = item.to_document_body().unwrap();
        assert_eq!(
            body,
            json!({
                "ownerEmail": "a@x.com",
                "creationDate": "01-05-2024",
                "type": "number",
                "field1": "",
                "field2": 7.0,
                "tags": ["x"],
            })
        );
    }

    #[test]
    fn test_from_document_normalizes_legacy_shape() {
        let doc = Document {
            id: RecordId::new("d1"),
            body: json!({
                "userEmail": "a@x.com",
                "creationDate": "1-5-2024",
                "type": "number",
                "field2": "12",
                "tags": ["a", "a", "b"],
            }),
        };
        let item = DataItem::from_document(doc).unwrap();
        assert_eq!(item.id, Some(RecordId::new("d1")));
        assert_eq!(item.owner_email, "a@x.com");
        assert_eq!(item.field2, Content::Number(12.0));
        assert_eq!(item.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(item.field1, "");
    }

    #[test]
    fn test_duplicate_drops_id() {
        let mut item = DataItem::new("a@x.com", date());
        item.id = Some(RecordId::new("abc"));
        item.field1 = "label".into();
        let copy = item.duplicate();
        assert!(copy.id.is_none());
        assert_eq!(copy.field1, "label");
    }
}
