//! Screen Composer
//!
//! Owns at most one active screen. A screen opened from the store starts in
//! Viewing; a new one starts in Editing. Edits apply to a working copy and
//! reach the store only through an explicit save.

mod layout;

pub use layout::{layout, LayoutNode};

use crate::domain::{Axis, DataItem, DomainError, DomainResult, Node, NodePath, RecordId, Screen, TagMatch};
use crate::store::ScreenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerMode {
    Viewing,
    Editing,
}

/// Store call a save or delete resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerCommand {
    Create(Screen),
    Update(Screen),
    Delete(RecordId),
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveScreen {
    draft: Screen,
    /// Last version opened from the store; `None` for unsaved screens
    original: Option<Screen>,
    mode: ComposerMode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenComposer {
    active: Option<ActiveScreen>,
}

impl ScreenComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Screen> {
        self.active.as_ref().map(|a| &a.draft)
    }

    pub fn mode(&self) -> Option<ComposerMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    pub fn is_editing(&self) -> bool {
        self.mode() == Some(ComposerMode::Editing)
    }

    /// Select a stored screen for viewing, replacing any current selection
    pub fn open(&mut self, screen: Screen) {
        self.active = Some(ActiveScreen {
            draft: screen.clone(),
            original: Some(screen),
            mode: ComposerMode::Viewing,
        });
    }

    /// Start a new screen from the template, already in Editing
    pub fn create(&mut self) -> &Screen {
        let active = self.active.insert(ActiveScreen {
            draft: Screen::template(),
            original: None,
            mode: ComposerMode::Editing,
        });
        &active.draft
    }

    pub fn begin_edit(&mut self) -> DomainResult<()> {
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| DomainError::InvalidState("no screen selected".to_string()))?;
        active.mode = ComposerMode::Editing;
        Ok(())
    }

    /// Discard edits. Stored screens go back to Viewing; new ones are closed.
    pub fn cancel(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(original) = active.original {
            self.open(original);
        }
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    fn draft_mut(&mut self) -> DomainResult<&mut Screen> {
        match self.active.as_mut() {
            Some(active) if active.mode == ComposerMode::Editing => Ok(&mut active.draft),
            Some(_) => Err(DomainError::InvalidState("screen is not being edited".to_string())),
            None => Err(DomainError::InvalidState("no screen selected".to_string())),
        }
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.draft_mut()?.name = name.to_string();
        Ok(())
    }

    /// Flip the screen's own axis
    pub fn flip_axis(&mut self) -> DomainResult<Axis> {
        self.draft_mut()?.flip_axis(&NodePath::root())
    }

    pub fn add_leaf(&mut self, parent: &NodePath) -> DomainResult<NodePath> {
        self.draft_mut()?.insert_node(parent, Node::leaf())
    }

    pub fn add_container(&mut self, parent: &NodePath, axis: Axis) -> DomainResult<NodePath> {
        self.draft_mut()?.insert_node(parent, Node::container(axis))
    }

    pub fn remove_node(&mut self, path: &NodePath) -> DomainResult<Node> {
        self.draft_mut()?.remove_node(path)
    }

    pub fn set_flex(&mut self, path: &NodePath, flex: f64) -> DomainResult<()> {
        self.draft_mut()?.set_flex(path, flex)
    }

    pub fn rename_node(&mut self, path: &NodePath, name: &str) -> DomainResult<()> {
        self.draft_mut()?.rename_node(path, name)
    }

    pub fn flip_node_axis(&mut self, path: &NodePath) -> DomainResult<Axis> {
        self.draft_mut()?.flip_axis(path)
    }

    pub fn add_cell_tag(&mut self, path: &NodePath, tag: &str) -> DomainResult<bool> {
        self.draft_mut()?.add_leaf_tag(path, tag)
    }

    pub fn remove_cell_tag(&mut self, path: &NodePath, tag: &str) -> DomainResult<bool> {
        self.draft_mut()?.remove_leaf_tag(path, tag)
    }

    pub fn prepare_save(&self) -> DomainResult<ComposerCommand> {
        let active = self
            .active
            .as_ref()
            .filter(|a| a.mode == ComposerMode::Editing)
            .ok_or_else(|| DomainError::InvalidState("no screen being edited".to_string()))?;
        Ok(if active.draft.is_saved() {
            ComposerCommand::Update(active.draft.clone())
        } else {
            ComposerCommand::Create(active.draft.clone())
        })
    }

    /// A successful save ends the session with the screen
    pub fn finish_save(&mut self) {
        self.close();
    }

    pub async fn save(&mut self, store: &ScreenStore) -> DomainResult<Screen> {
        let saved = match self.prepare_save()? {
            ComposerCommand::Create(screen) => store.add(screen).await?,
            ComposerCommand::Update(screen) => store.update(screen).await?,
            ComposerCommand::Delete(_) => {
                return Err(DomainError::InvalidState("save resolved to a delete".to_string()));
            }
        };
        self.finish_save();
        Ok(saved)
    }

    pub fn prepare_delete(&self) -> DomainResult<ComposerCommand> {
        let active = self
            .active
            .as_ref()
            .ok_or_else(|| DomainError::InvalidState("no screen selected".to_string()))?;
        active
            .draft
            .id
            .clone()
            .map(ComposerCommand::Delete)
            .ok_or_else(|| DomainError::InvalidState("screen has not been saved".to_string()))
    }

    pub fn finish_delete(&mut self) {
        self.close();
    }

    pub async fn delete(&mut self, store: &ScreenStore) -> DomainResult<()> {
        if let ComposerCommand::Delete(id) = self.prepare_delete()? {
            store.remove(&id).await?;
        }
        self.finish_delete();
        Ok(())
    }

    /// Active screen resolved against `items`
    pub fn layout<'a>(&self, items: &'a [DataItem], policy: TagMatch) -> Option<LayoutNode<'a>> {
        self.active().map(|screen| layout(screen, items, policy))
    }
}
