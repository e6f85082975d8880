//! Screen Entity
//!
//! A named layout tree. Containers split their axis between children in
//! proportion to each child's `flex`; leaves select data items by tag.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{DomainError, DomainResult, Entity, RecordId};
use super::tags::{dedupe_tags, normalize_tag};

/// Layout axis of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Row,
    Column,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }

    pub fn flipped(&self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

fn default_flex() -> f64 {
    1.0
}

fn check_flex(flex: f64) -> DomainResult<f64> {
    if flex.is_finite() && flex > 0.0 {
        Ok(flex)
    } else {
        Err(DomainError::InvalidInput(format!("flex must be a positive number, got {}", flex)))
    }
}

/// Nested row/column container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default = "default_flex")]
    pub flex: f64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "flexDirection")]
    pub axis: Axis,
    #[serde(rename = "rowsColumns")]
    pub children: Vec<Node>,
}

/// Terminal cell showing the data items that match its tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    #[serde(default = "default_flex")]
    pub flex: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for Leaf {
    fn default() -> Self {
        Self {
            flex: 1.0,
            name: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Child of a screen or container.
///
/// Documents tell the two apart by shape: containers carry
/// `flexDirection` and `rowsColumns`, leaves don't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Container(Container),
    Leaf(Leaf),
}

impl Node {
    pub fn leaf() -> Self {
        Node::Leaf(Leaf::default())
    }

    /// Container holding a single empty leaf
    pub fn container(axis: Axis) -> Self {
        Node::Container(Container {
            flex: 1.0,
            name: String::new(),
            axis,
            children: vec![Node::leaf()],
        })
    }

    pub fn flex(&self) -> f64 {
        match self {
            Node::Container(c) => c.flex,
            Node::Leaf(l) => l.flex,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Container(c) => &c.name,
            Node::Leaf(l) => &l.name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    fn set_flex(&mut self, flex: f64) {
        match self {
            Node::Container(c) => c.flex = flex,
            Node::Leaf(l) => l.flex = flex,
        }
    }

    fn set_name(&mut self, name: &str) {
        match self {
            Node::Container(c) => c.name = name.to_string(),
            Node::Leaf(l) => l.name = name.to_string(),
        }
    }

    fn normalize(&mut self) {
        match self {
            Node::Container(c) => {
                if check_flex(c.flex).is_err() {
                    c.flex = default_flex();
                }
                c.children.iter_mut().for_each(Node::normalize);
            }
            Node::Leaf(l) => {
                if check_flex(l.flex).is_err() {
                    l.flex = default_flex();
                }
                dedupe_tags(&mut l.tags);
            }
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Container(c) => c.children.iter().map(Node::leaf_count).sum(),
            Node::Leaf(_) => 1,
        }
    }
}

/// Position of a node: child indices walked from the screen root.
/// The empty path is the screen itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Parent path and own index; `None` for the root
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((NodePath(parent.to_vec()), *last))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// A named, nested row/column layout owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    #[serde(skip)]
    pub id: Option<RecordId>,
    #[serde(rename = "ownerEmail", alias = "userEmail", default)]
    pub owner_email: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "flexDirection", default)]
    pub axis: Axis,
    #[serde(rename = "rowsColumns", default)]
    pub children: Vec<Node>,
}

impl Screen {
    /// Starting shape for new screens: one row, one column, one leaf
    pub fn template() -> Self {
        Self {
            id: None,
            owner_email: String::new(),
            name: String::new(),
            axis: Axis::Row,
            children: vec![Node::container(Axis::Column)],
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(Node::leaf_count).sum()
    }

    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = match node {
                Node::Container(c) => c.children.get(*index)?,
                Node::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    fn node_mut(&mut self, path: &NodePath) -> DomainResult<&mut Node> {
        let missing = || DomainError::NotFound(format!("node {}", path));
        let (first, rest) = path.indices().split_first().ok_or_else(missing)?;
        let mut node = self.children.get_mut(*first).ok_or_else(missing)?;
        for index in rest {
            node = match node {
                Node::Container(c) => c.children.get_mut(*index).ok_or_else(missing)?,
                Node::Leaf(_) => return Err(missing()),
            };
        }
        Ok(node)
    }

    /// Children list of the container at `path` (root = the screen's own)
    fn children_mut(&mut self, path: &NodePath) -> DomainResult<&mut Vec<Node>> {
        if path.is_root() {
            return Ok(&mut self.children);
        }
        match self.node_mut(path)? {
            Node::Container(c) => Ok(&mut c.children),
            Node::Leaf(_) => Err(DomainError::InvalidInput(format!("node {} is a leaf", path))),
        }
    }

    fn leaf_mut(&mut self, path: &NodePath) -> DomainResult<&mut Leaf> {
        match self.node_mut(path)? {
            Node::Leaf(leaf) => Ok(leaf),
            Node::Container(_) => Err(DomainError::InvalidInput(format!("node {} is not a leaf", path))),
        }
    }

    /// Append a child to the container at `parent`; returns the new node's path
    pub fn insert_node(&mut self, parent: &NodePath, node: Node) -> DomainResult<NodePath> {
        let children = self.children_mut(parent)?;
        children.push(node);
        Ok(parent.child(children.len() - 1))
    }

    pub fn remove_node(&mut self, path: &NodePath) -> DomainResult<Node> {
        let (parent, index) = path
            .split_last()
            .ok_or_else(|| DomainError::InvalidInput("cannot remove the screen root".to_string()))?;
        let children = self.children_mut(&parent)?;
        if index >= children.len() {
            return Err(DomainError::NotFound(format!("node {}", path)));
        }
        Ok(children.remove(index))
    }

    pub fn set_flex(&mut self, path: &NodePath, flex: f64) -> DomainResult<()> {
        let flex = check_flex(flex)?;
        self.node_mut(path)?.set_flex(flex);
        Ok(())
    }

    pub fn rename_node(&mut self, path: &NodePath, name: &str) -> DomainResult<()> {
        self.node_mut(path)?.set_name(name);
        Ok(())
    }

    /// Flip the axis of the screen (root path) or of a nested container
    pub fn flip_axis(&mut self, path: &NodePath) -> DomainResult<Axis> {
        if path.is_root() {
            self.axis = self.axis.flipped();
            return Ok(self.axis);
        }
        match self.node_mut(path)? {
            Node::Container(c) => {
                c.axis = c.axis.flipped();
                Ok(c.axis)
            }
            Node::Leaf(_) => Err(DomainError::InvalidInput(format!("node {} is a leaf", path))),
        }
    }

    /// Add a tag to a leaf; returns false when blank or already present
    pub fn add_leaf_tag(&mut self, path: &NodePath, raw: &str) -> DomainResult<bool> {
        let leaf = self.leaf_mut(path)?;
        match normalize_tag(raw) {
            Some(tag) if !leaf.tags.contains(&tag) => {
                leaf.tags.push(tag);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn remove_leaf_tag(&mut self, path: &NodePath, tag: &str) -> DomainResult<bool> {
        let leaf = self.leaf_mut(path)?;
        let before = leaf.tags.len();
        leaf.tags.retain(|t| t != tag);
        Ok(leaf.tags.len() != before)
    }
}

impl Entity for Screen {
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
        self.children.iter_mut().for_each(Node::normalize);
    }
}
