//! Arena-backed AMT tree with read-only navigation handles.
//!
//! Nodes live in a single `Vec`, indexed by [`NodeId`]. A parent owns its
//! children by id and every child records its parent id, so navigation goes
//! both ways without reference cycles. The root is always [`NodeId::ROOT`].

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use crate::definitions::ReferenceTable;
use crate::node::{Attributes, NodeData, NodeKind, Position};

/// Index of a node within its [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    /// Position within the parent's children.
    index: usize,
    children: Vec<NodeId>,
}

/// A complete document tree.
///
/// Built once by [`TreeBuilder`](crate::TreeBuilder) and read-only afterwards.
/// Arena order is document pre-order.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    definitions: Option<ReferenceTable>,
}

impl Tree {
    /// Create a tree holding only an empty root.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::new(NodeKind::Root),
                parent: None,
                index: 0,
                children: Vec::new(),
            }],
            definitions: None,
        }
    }

    /// Append a node as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        let siblings = &mut self.nodes[parent.0].children;
        let index = siblings.len();
        siblings.push(id);
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            index,
            children: Vec::new(),
        });
        id
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0].data
    }

    pub(crate) fn set_definitions(&mut self, definitions: ReferenceTable) {
        self.definitions = Some(definitions);
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no content (only the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Reference definitions, if the document declared any.
    #[must_use]
    pub fn definitions(&self) -> Option<&ReferenceTable> {
        self.definitions.as_ref()
    }

    /// Iterate over all nodes in document pre-order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(|i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    /// Depth-first walk of the whole document.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        self.root().walk()
    }
}

/// Borrowed handle to a node, used for navigation.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef {
            tree: self.tree,
            id,
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    #[must_use]
    pub fn data(&self) -> &'a NodeData {
        &self.node().data
    }

    #[must_use]
    pub fn kind(&self) -> &'a NodeKind {
        &self.node().data.kind
    }

    #[must_use]
    pub fn attrs(&self) -> &'a Attributes {
        &self.node().data.attrs
    }

    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.node().data.position
    }

    #[must_use]
    pub fn markup(&self) -> Option<&'a str> {
        self.node().data.markup.as_deref()
    }

    /// The parent node, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.at(id))
    }

    /// The document root reached by following parent links.
    #[must_use]
    pub fn root(&self) -> NodeRef<'a> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> Children<'a> {
        Children {
            tree: self.tree,
            ids: self.node().children.iter(),
        }
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.node().children.get(index).map(|&id| self.at(id))
    }

    #[must_use]
    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.child(0)
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.node().children.is_empty()
    }

    /// Position of this node in its parent's children (0 for the root).
    #[must_use]
    pub fn index(&self) -> usize {
        self.node().index
    }

    #[must_use]
    pub fn previous_sibling(&self) -> Option<NodeRef<'a>> {
        let index = self.index().checked_sub(1)?;
        self.parent()?.child(index)
    }

    #[must_use]
    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        self.parent()?.child(self.index() + 1)
    }

    /// Whether this is a paragraph of a tight list item.
    ///
    /// Such paragraphs render without `<p>` tags.
    #[must_use]
    pub fn is_tight_paragraph(&self) -> bool {
        if *self.kind() != NodeKind::Paragraph {
            return false;
        }
        self.parent()
            .and_then(|item| item.parent())
            .is_some_and(|list| {
                *list.kind() == NodeKind::List && !list.attrs().spread.unwrap_or(false)
            })
    }

    /// Reference definitions of the document this node belongs to.
    #[must_use]
    pub fn definitions(&self) -> Option<&'a ReferenceTable> {
        self.tree.definitions()
    }

    /// Depth-first walk of this subtree.
    #[must_use]
    pub fn walk(&self) -> Walk<'a> {
        Walk {
            tree: self.tree,
            pending: Some(self.id),
            stack: Vec::new(),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id.0)
            .field("kind", self.kind())
            .finish()
    }
}

/// Iterator over a node's children.
#[derive(Clone)]
pub struct Children<'a> {
    tree: &'a Tree,
    ids: slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next_back()?;
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }
}

/// Step of a depth-first walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    /// Descending into a node, before its children.
    Enter(NodeRef<'a>),
    /// Leaving a node, after its children.
    Exit(NodeRef<'a>),
}

/// Depth-first iterator yielding an enter and an exit step for every node.
pub struct Walk<'a> {
    tree: &'a Tree,
    pending: Option<NodeId>,
    /// Open nodes with the index of the next child to visit.
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        if let Some(id) = self.pending.take() {
            self.stack.push((id, 0));
            return Some(WalkEvent::Enter(NodeRef { tree, id }));
        }

        let (id, cursor) = self.stack.last_mut()?;
        if let Some(&child) = tree.nodes[id.0].children.get(*cursor) {
            *cursor += 1;
            self.stack.push((child, 0));
            return Some(WalkEvent::Enter(NodeRef { tree, id: child }));
        }

        let (id, _) = self.stack.pop()?;
        Some(WalkEvent::Exit(NodeRef { tree, id }))
    }
}

impl FusedIterator for Walk<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// root
    /// ├── paragraph
    /// │   ├── text "a"
    /// │   └── emphasis
    /// │       └── text "b"
    /// └── thematicBreak
    fn sample() -> Tree {
        let mut tree = Tree::new();
        let para = tree.append(NodeId::ROOT, NodeData::new(NodeKind::Paragraph));
        tree.append(para, NodeData::literal(NodeKind::Text, "a"));
        let em = tree.append(para, NodeData::new(NodeKind::Emphasis));
        tree.append(em, NodeData::literal(NodeKind::Text, "b"));
        tree.append(NodeId::ROOT, NodeData::new(NodeKind::ThematicBreak));
        tree
    }

    #[test]
    fn test_parent_links_match_child_positions() {
        let tree = sample();
        for node in tree.iter().skip(1) {
            let parent = node.parent().unwrap();
            assert_eq!(parent.child(node.index()), Some(node));
        }
    }

    #[test]
    fn test_root_navigation() {
        let tree = sample();
        let deepest = tree.get(NodeId(4)).unwrap();
        assert_eq!(*deepest.kind(), NodeKind::Text);
        assert_eq!(deepest.root(), tree.root());
        assert!(tree.root().is_root());
        assert!(tree.root().parent().is_none());
    }

    #[test]
    fn test_siblings() {
        let tree = sample();
        let para = tree.root().first_child().unwrap();
        let rule = para.next_sibling().unwrap();
        assert_eq!(*rule.kind(), NodeKind::ThematicBreak);
        assert_eq!(rule.previous_sibling(), Some(para));
        assert!(para.previous_sibling().is_none());
        assert!(rule.next_sibling().is_none());
        assert!(tree.root().next_sibling().is_none());
    }

    #[test]
    fn test_children_iterator() {
        let tree = sample();
        let para = tree.root().first_child().unwrap();
        let kinds: Vec<_> = para.children().map(|n| n.kind().clone()).collect();
        assert_eq!(kinds, vec![NodeKind::Text, NodeKind::Emphasis]);
        assert_eq!(para.children().len(), 2);
        assert_eq!(
            para.children().next_back().map(|n| n.kind().clone()),
            Some(NodeKind::Emphasis)
        );
    }

    #[test]
    fn test_walk_order() {
        let tree = sample();
        let steps: Vec<String> = tree
            .walk()
            .map(|step| match step {
                WalkEvent::Enter(n) => format!("+{}", n.kind()),
                WalkEvent::Exit(n) => format!("-{}", n.kind()),
            })
            .collect();
        assert_eq!(
            steps,
            vec![
                "+root",
                "+paragraph",
                "+text",
                "-text",
                "+emphasis",
                "+text",
                "-text",
                "-emphasis",
                "-paragraph",
                "+thematicBreak",
                "-thematicBreak",
                "-root",
            ]
        );
    }

    #[test]
    fn test_walk_subtree() {
        let tree = sample();
        let em = tree.get(NodeId(3)).unwrap();
        assert_eq!(em.walk().count(), 4);
    }

    #[test]
    fn test_tight_paragraph_requires_tight_list_grandparent() {
        let mut tree = Tree::new();
        let mut list = NodeData::new(NodeKind::List);
        list.attrs.spread = Some(false);
        let list = tree.append(NodeId::ROOT, list);
        let item = tree.append(list, NodeData::new(NodeKind::ListItem));
        let para = tree.append(item, NodeData::new(NodeKind::Paragraph));
        let top = tree.append(NodeId::ROOT, NodeData::new(NodeKind::Paragraph));

        assert!(tree.get(para).unwrap().is_tight_paragraph());
        assert!(!tree.get(top).unwrap().is_tight_paragraph());

        tree.data_mut(list).attrs.spread = Some(true);
        assert!(!tree.get(para).unwrap().is_tight_paragraph());
    }

    #[test]
    fn test_get_out_of_range() {
        let tree = sample();
        assert!(tree.get(NodeId(99)).is_none());
        assert_eq!(tree.len(), 6);
        assert!(!tree.is_empty());
        assert!(Tree::new().is_empty());
    }
}
