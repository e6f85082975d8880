//! Data Item Editor
//!
//! Form state for one data item: a read-only Display mode and an Edit mode
//! with four terminal actions. Remote writes go through [`DataItemStore`];
//! the editor only decides what to send and how to react to success.

use crate::domain::{suggest_tags, Content, CreationDate, DataItem, DomainError, DomainResult, ItemKind, RecordId};
use crate::store::DataItemStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Display,
    Edit,
}

/// Terminal actions available from Edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Create a new item from the form
    Add,
    /// Create a new item from an existing item's edited values
    Duplicate,
    /// Persist the form over the existing item
    Update,
    /// Delete the existing item
    Remove,
}

/// Store call an action resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Create(DataItem),
    Update(DataItem),
    Remove(RecordId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataItemEditor {
    /// Saved item this form edits; `None` for the new-item form
    original: Option<DataItem>,
    values: DataItem,
    mode: EditorMode,
    /// Creation date a cleared form starts from
    blank_date: CreationDate,
}

impl DataItemEditor {
    /// Empty new-item form, opened for editing
    pub fn blank(owner_email: &str, today: CreationDate) -> Self {
        Self {
            original: None,
            values: DataItem::new(owner_email, today),
            mode: EditorMode::Edit,
            blank_date: today,
        }
    }

    /// Form over a saved item, shown read-only
    pub fn for_item(item: DataItem) -> Self {
        Self {
            blank_date: item.creation_date,
            values: item.clone(),
            original: Some(item),
            mode: EditorMode::Display,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Edit
    }

    pub fn values(&self) -> &DataItem {
        &self.values
    }

    pub fn original(&self) -> Option<&DataItem> {
        self.original.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        match &self.original {
            Some(original) => original != &self.values,
            None => false,
        }
    }

    /// Actions offered for this form
    pub fn available_actions(&self) -> Vec<EditorAction> {
        if self.original.is_some() {
            vec![EditorAction::Remove, EditorAction::Update, EditorAction::Duplicate]
        } else {
            vec![EditorAction::Add]
        }
    }

    pub fn begin_edit(&mut self) {
        self.mode = EditorMode::Edit;
    }

    /// Leave Edit mode without persisting anything
    pub fn cancel(&mut self) {
        if let Some(original) = &self.original {
            self.values = original.clone();
        }
        self.mode = EditorMode::Display;
    }

    fn editable(&mut self) -> DomainResult<&mut DataItem> {
        if self.mode != EditorMode::Edit {
            return Err(DomainError::InvalidState("item is not being edited".to_string()));
        }
        Ok(&mut self.values)
    }

    pub fn set_kind(&mut self, kind: ItemKind) -> DomainResult<()> {
        self.editable()?.set_kind(kind);
        Ok(())
    }

    pub fn set_field1(&mut self, label: &str) -> DomainResult<()> {
        self.editable()?.field1 = label.to_string();
        Ok(())
    }

    /// Set text content; rejected for numeric kinds
    pub fn set_text(&mut self, text: &str) -> DomainResult<()> {
        let values = self.editable()?;
        if values.kind.is_numeric() {
            return Err(DomainError::InvalidInput("numeric items take a number".to_string()));
        }
        values.field2 = Content::Text(text.to_string());
        Ok(())
    }

    /// Set numeric content; rejected for text kinds
    pub fn set_number(&mut self, value: f64) -> DomainResult<()> {
        let values = self.editable()?;
        if !values.kind.is_numeric() {
            return Err(DomainError::InvalidInput("text items take text".to_string()));
        }
        if !value.is_finite() {
            return Err(DomainError::InvalidInput(format!("{} is not a finite number", value)));
        }
        values.field2 = Content::Number(value);
        Ok(())
    }

    pub fn set_creation_date(&mut self, date: CreationDate) -> DomainResult<()> {
        self.editable()?.creation_date = date;
        Ok(())
    }

    pub fn add_tag(&mut self, tag: &str) -> DomainResult<bool> {
        Ok(self.editable()?.add_tag(tag))
    }

    pub fn remove_tag(&mut self, tag: &str) -> DomainResult<bool> {
        Ok(self.editable()?.remove_tag(tag))
    }

    /// Autocomplete options: tags used anywhere, minus the form's own
    pub fn suggestions(&self, items: &[DataItem]) -> Vec<String> {
        suggest_tags(items, &self.values.tags)
    }

    /// Store call for `action`, without touching form state
    pub fn prepare(&self, action: EditorAction) -> DomainResult<EditorCommand> {
        if self.mode != EditorMode::Edit {
            return Err(DomainError::InvalidState("item is not being edited".to_string()));
        }
        let saved_id = || {
            self.original
                .as_ref()
                .and_then(|original| original.id.clone())
                .ok_or_else(|| DomainError::InvalidState("item has not been saved".to_string()))
        };
        match action {
            EditorAction::Add => Ok(EditorCommand::Create(self.values.duplicate())),
            EditorAction::Duplicate => {
                saved_id()?;
                Ok(EditorCommand::Create(self.values.duplicate()))
            }
            EditorAction::Update => {
                let id = saved_id()?;
                let mut updated = self.values.clone();
                updated.id = Some(id);
                Ok(EditorCommand::Update(updated))
            }
            EditorAction::Remove => Ok(EditorCommand::Remove(saved_id()?)),
        }
    }

    /// Apply the form transition for an action whose store call succeeded
    pub fn finish(&mut self, action: EditorAction, outcome: Option<&DataItem>) {
        match action {
            EditorAction::Add => {
                self.values = DataItem::new(&self.values.owner_email, self.blank_date);
            }
            EditorAction::Duplicate => {
                self.cancel();
            }
            EditorAction::Update => {
                if let Some(saved) = outcome {
                    self.original = Some(saved.clone());
                    self.values = saved.clone();
                }
                self.mode = EditorMode::Display;
            }
            EditorAction::Remove => {
                self.mode = EditorMode::Display;
            }
        }
    }

    /// Run `action` against the store. On failure the form is left as it was.
    pub async fn submit(&mut self, action: EditorAction, store: &DataItemStore) -> DomainResult<Option<DataItem>> {
        let outcome = match self.prepare(action)? {
            EditorCommand::Create(item) => Some(store.add(item).await?),
            EditorCommand::Update(item) => Some(store.update(item).await?),
            EditorCommand::Remove(id) => {
                store.remove(&id).await?;
                None
            }
        };
        self.finish(action, outcome.as_ref());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryCollection;
    use crate::session::Session;
    use std::sync::Arc;

    fn today() -> CreationDate {
        CreationDate::from_ymd(2024, 6, 1).unwrap()
    }

    fn store() -> (Arc<MemoryCollection>, DataItemStore) {
        let collection = Arc::new(MemoryCollection::new("dataItems"));
        let store = DataItemStore::for_data_items(collection.clone(), Session::signed_in("a@x.com").unwrap());
        (collection, store)
    }

    #[test]
    fn test_blank_form_starts_in_edit_mode() {
        let editor = DataItemEditor::blank("a@x.com", today());
        assert!(editor.is_editing());
        assert_eq!(editor.available_actions(), vec![EditorAction::Add]);
        assert_eq!(editor.values().creation_date, today());
    }

    #[test]
    fn test_display_mode_rejects_edits() {
        let mut editor = DataItemEditor::for_item(DataItem::new("a@x.com", today()));
        assert!(matches!(editor.set_field1("x"), Err(DomainError::InvalidState(_))));
        editor.begin_edit();
        editor.set_field1("x").unwrap();
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_kind_change_resets_content() {
        let mut editor = DataItemEditor::blank("a@x.com", today());
        editor.set_text("hello").unwrap();
        editor.set_kind(ItemKind::Link).unwrap();
        assert_eq!(editor.values().field2, Content::Text("hello".into()));
        editor.set_kind(ItemKind::Number).unwrap();
        assert_eq!(editor.values().field2, Content::Number(0.0));
        assert!(editor.set_text("nope").is_err());
        editor.set_number(4.0).unwrap();
        editor.set_kind(ItemKind::Text).unwrap();
        assert_eq!(editor.values().field2, Content::Text(String::new()));
        assert!(editor.set_number(1.0).is_err());
    }

    #[test]
    fn test_suggestions_skip_form_tags() {
        let mut editor = DataItemEditor::blank("a@x.com", today());
        editor.add_tag("y").unwrap();
        let mut a = DataItem::new("a@x.com", today());
        a.tags = vec!["x".into(), "y".into()];
        let mut b = DataItem::new("a@x.com", today());
        b.tags = vec!["y".into(), "z".into()];
        assert_eq!(editor.suggestions(&[a, b]), vec!["x".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_unsaved_form_cannot_update_or_remove() {
        let editor = DataItemEditor::blank("a@x.com", today());
        assert!(editor.prepare(EditorAction::Update).is_err());
        assert!(editor.prepare(EditorAction::Remove).is_err());
        assert!(editor.prepare(EditorAction::Duplicate).is_err());
    }

    #[tokio::test]
    async fn test_add_clears_form_on_success() {
        let (_, store) = store();
        let mut editor = DataItemEditor::blank("a@x.com", today());
        editor.set_field1("label").unwrap();
        editor.add_tag("x").unwrap();

        let added = editor.submit(EditorAction::Add, &store).await.unwrap().unwrap();
        assert!(added.id.is_some());
        assert_eq!(added.field1, "label");
        assert!(editor.values().tags.is_empty());
        assert_eq!(editor.values().field1, "");
        assert!(editor.is_editing());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_add_keeps_form() {
        let (collection, store) = store();
        collection.set_offline(true);
        let mut editor = DataItemEditor::blank("a@x.com", today());
        editor.set_field1("keep me").unwrap();
        assert!(editor.submit(EditorAction::Add, &store).await.is_err());
        assert_eq!(editor.values().field1, "keep me");
    }

    #[tokio::test]
    async fn test_duplicate_keeps_original() {
        let (_, store) = store();
        let mut original = DataItem::new("a@x.com", today());
        original.field1 = "first".into();
        let original = store.add(original).await.unwrap();

        let mut editor = DataItemEditor::for_item(original.clone());
        editor.begin_edit();
        editor.set_field1("copy").unwrap();
        let copy = editor.submit(EditorAction::Duplicate, &store).await.unwrap().unwrap();

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.field1, "copy");
        assert_eq!(store.find(original.id.as_ref().unwrap()), Some(original.clone()));
        assert_eq!(editor.values(), &original);
        assert_eq!(editor.mode(), EditorMode::Display);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let (collection, store) = store();
        let saved = store.add(DataItem::new("a@x.com", today())).await.unwrap();
        let id = saved.id.clone().unwrap();

        let mut editor = DataItemEditor::for_item(saved);
        editor.begin_edit();
        editor.add_tag("done").unwrap();
        let updated = editor.submit(EditorAction::Update, &store).await.unwrap().unwrap();
        assert_eq!(updated.id, Some(id.clone()));
        assert_eq!(store.find(&id).unwrap().tags, vec!["done".to_string()]);
        assert!(!editor.is_dirty());
        assert_eq!(editor.mode(), EditorMode::Display);

        editor.begin_edit();
        assert_eq!(editor.submit(EditorAction::Remove, &store).await.unwrap(), None);
        assert!(store.find(&id).is_none());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let item = DataItem::new("a@x.com", today());
        let mut editor = DataItemEditor::for_item(item.clone());
        editor.begin_edit();
        editor.set_field1("scratch").unwrap();
        editor.cancel();
        assert_eq!(editor.values(), &item);
        assert_eq!(editor.mode(), EditorMode::Display);
    }
}
