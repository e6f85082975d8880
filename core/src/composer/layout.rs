//! Screen Layout
//!
//! Resolves a screen tree against the current data items. Each node gets
//! its share of the parent's axis; each cell gets the items its tags select.

use crate::domain::{Axis, DataItem, Node, NodePath, Screen, TagMatch};

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode<'a> {
    Container {
        path: NodePath,
        name: String,
        axis: Axis,
        /// Fraction of the parent's axis, in `0.0..=1.0`
        share: f64,
        children: Vec<LayoutNode<'a>>,
    },
    Cell {
        path: NodePath,
        name: String,
        share: f64,
        tags: Vec<String>,
        items: Vec<&'a DataItem>,
    },
}

impl<'a> LayoutNode<'a> {
    pub fn path(&self) -> &NodePath {
        match self {
            LayoutNode::Container { path, .. } | LayoutNode::Cell { path, .. } => path,
        }
    }

    pub fn share(&self) -> f64 {
        match self {
            LayoutNode::Container { share, .. } | LayoutNode::Cell { share, .. } => *share,
        }
    }

    /// Cells in depth-first order
    pub fn cells(&self) -> Vec<&LayoutNode<'a>> {
        match self {
            LayoutNode::Cell { .. } => vec![self],
            LayoutNode::Container { children, .. } => children.iter().flat_map(LayoutNode::cells).collect(),
        }
    }
}

/// Render the whole screen; the root container always has share 1
pub fn layout<'a>(screen: &Screen, items: &'a [DataItem], policy: TagMatch) -> LayoutNode<'a> {
    LayoutNode::Container {
        path: NodePath::root(),
        name: screen.name.clone(),
        axis: screen.axis,
        share: 1.0,
        children: layout_children(&NodePath::root(), &screen.children, items, policy),
    }
}

fn layout_children<'a>(parent: &NodePath, children: &[Node], items: &'a [DataItem], policy: TagMatch) -> Vec<LayoutNode<'a>> {
    let total: f64 = children.iter().map(Node::flex).sum();
    children
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let path = parent.child(index);
            let share = if total > 0.0 { node.flex() / total } else { 0.0 };
            match node {
                Node::Container(c) => LayoutNode::Container {
                    children: layout_children(&path, &c.children, items, policy),
                    path,
                    name: c.name.clone(),
                    axis: c.axis,
                    share,
                },
                Node::Leaf(leaf) => LayoutNode::Cell {
                    path,
                    name: leaf.name.clone(),
                    share,
                    tags: leaf.tags.clone(),
                    items: items.iter().filter(|item| policy.matches(&leaf.tags, &item.tags)).collect(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreationDate, Leaf};

    fn item(field1: &str, tags: &[&str]) -> DataItem {
        let mut item = DataItem::new("a@x.com", CreationDate::from_ymd(2024, 1, 1).unwrap());
        item.field1 = field1.to_string();
        item.tags = tags.iter().map(|t| t.to_string()).collect();
        item
    }

    fn leaf(flex: f64, tags: &[&str]) -> Node {
        Node::Leaf(Leaf {
            flex,
            name: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
    }

    fn titles(node: &LayoutNode<'_>) -> Vec<String> {
        match node {
            LayoutNode::Cell { items, .. } => items.iter().map(|i| i.field1.clone()).collect(),
            LayoutNode::Container { .. } => panic!("expected a cell"),
        }
    }

    #[test]
    fn test_shares_are_proportional_to_flex() {
        let mut screen = Screen::template();
        screen.children = vec![leaf(1.0, &[]), leaf(3.0, &[])];
        let rendered = layout(&screen, &[], TagMatch::Any);
        let cells = rendered.cells();
        assert_eq!(cells.len(), 2);
        assert!((cells[0].share() - 0.25).abs() < 1e-9);
        assert!((cells[1].share() - 0.75).abs() < 1e-9);
        assert_eq!(rendered.share(), 1.0);
    }

    #[test]
    fn test_cells_select_items_by_policy() {
        let items = vec![item("a", &["x"]), item("b", &["x", "y"]), item("c", &["z"])];
        let mut screen = Screen::template();
        screen.children = vec![leaf(1.0, &["x", "y"]), leaf(1.0, &[])];

        let any = layout(&screen, &items, TagMatch::Any);
        let cells = any.cells();
        assert_eq!(titles(cells[0]), vec!["a", "b"]);
        assert!(titles(cells[1]).is_empty());

        let all = layout(&screen, &items, TagMatch::All);
        assert_eq!(titles(all.cells()[0]), vec!["b"]);
    }

    #[test]
    fn test_nested_paths() {
        let screen = Screen::template();
        let rendered = layout(&screen, &[], TagMatch::Any);
        let cells = rendered.cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].path(), &NodePath::from(vec![0, 0]));
        match &rendered {
            LayoutNode::Container { axis, children, .. } => {
                assert_eq!(*axis, Axis::Row);
                assert!(matches!(children[0], LayoutNode::Container { axis: Axis::Column, .. }));
            }
            LayoutNode::Cell { .. } => panic!("root must be a container"),
        }
    }
}
