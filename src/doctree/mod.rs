//! Document Tree (§3, §4.6): the external contract this crate defines for a
//! host-supplied document model, plus an in-memory arena reference
//! implementation (`DocTree`) built on `ego_tree`.
//!
//! Mirrors the teacher's own `ast::elements::traversal` module's choice of an
//! `ego_tree`-backed arena with integer node ids over a GC'd graph: detach,
//! insert-before/after and clone-subtree are all O(1)-ish arena operations
//! rather than reference-counted graph surgery.

pub mod backend;

use ego_tree::{NodeId, NodeRef, Tree};

use crate::doctree::format::RunFormat;

pub mod format;

/// The payload carried by every node in a `DocTree`.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// The single root of the tree.
    Document,
    Paragraph,
    Run { text: String, format: RunFormat },
    Table,
    TableRow,
    TableCell,
}

impl NodeData {
    pub fn is_run(&self) -> bool {
        matches!(self, NodeData::Run { .. })
    }

    pub fn as_run(&self) -> Option<(&str, &RunFormat)> {
        match self {
            NodeData::Run { text, format } => Some((text.as_str(), format)),
            _ => None,
        }
    }
}

/// Arena-backed document tree: this crate's reference `DocumentBackend`.
#[derive(Debug, Clone)]
pub struct DocTree {
    tree: Tree<NodeData>,
}

impl Default for DocTree {
    fn default() -> Self {
        DocTree::new()
    }
}

impl DocTree {
    pub fn new() -> Self {
        DocTree {
            tree: Tree::new(NodeData::Document),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, NodeData>> {
        self.tree.get(id)
    }

    pub fn value(&self, id: NodeId) -> Option<&NodeData> {
        self.tree.get(id).map(|n| n.value())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id).and_then(|n| n.parent()).map(|p| p.id())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    pub fn siblings_after(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|n| n.next_siblings().map(|s| s.id()).collect())
            .unwrap_or_default()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id).and_then(|n| n.next_sibling()).map(|s| s.id())
    }

    /// Append a new child under `parent`, returning the new node's id.
    pub fn append_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let mut node = self.tree.get_mut(parent).expect("parent node must exist");
        node.append(data).id()
    }

    pub fn insert_before(&mut self, sibling: NodeId, data: NodeData) -> NodeId {
        let mut node = self.tree.get_mut(sibling).expect("node must exist");
        node.insert_before(data).id()
    }

    pub fn insert_after(&mut self, sibling: NodeId, data: NodeData) -> NodeId {
        let mut node = self.tree.get_mut(sibling).expect("node must exist");
        node.insert_after(data).id()
    }

    /// Detach `id` (and its subtree) from its parent. The node remains a
    /// valid, orphaned entry in the arena but is no longer reachable from the
    /// root; the walker's "skip nodes without a parent" rule (§4.8) relies on
    /// exactly this state to stay idempotent.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Detach and drop a node: an alias for `detach` kept distinct because
    /// callers that only ever intend permanent removal (as opposed to a
    /// detach-then-reinsert splice) read more clearly this way.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    /// Deep-clone the subtree rooted at `id`, inserted as a new child of
    /// `new_parent`. Used by the loop visitor to produce one clone of the
    /// block body per iteration.
    pub fn clone_subtree(&mut self, id: NodeId, new_parent: NodeId) -> NodeId {
        let data = self.value(id).cloned().unwrap_or(NodeData::Document);
        let children: Vec<NodeId> = self.children(id);
        let new_id = self.append_child(new_parent, data);
        for child in children {
            self.clone_subtree(child, new_id);
        }
        new_id
    }

    /// Deep-clone the subtree rooted at `id`, inserted immediately before
    /// `before` as its new previous sibling. Used by the loop visitor so
    /// each iteration's clone lands exactly where the original block sat,
    /// in source order.
    pub fn clone_subtree_before(&mut self, id: NodeId, before: NodeId) -> NodeId {
        let data = self.value(id).cloned().unwrap_or(NodeData::Document);
        let children: Vec<NodeId> = self.children(id);
        let new_id = self.insert_before(before, data);
        for child in children {
            self.clone_subtree(child, new_id);
        }
        new_id
    }

    /// Set the text of a `Run` node in place, keeping its `RunFormat`.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(mut node) = self.tree.get_mut(id) {
            if let NodeData::Run { text: slot, .. } = node.value_mut() {
                *slot = text.into();
            }
        }
    }

    /// Replace all of a paragraph's (or other container's) children with a
    /// freshly built run list, used by the inline conditional/placeholder
    /// visitors once the replacement text and formatting has been computed.
    pub fn replace_children(&mut self, parent: NodeId, new_children: Vec<(String, RunFormat)>) {
        let existing = self.children(parent);
        for child in existing {
            self.detach(child);
        }
        for (text, format) in new_children {
            self.append_child(parent, NodeData::Run { text, format });
        }
    }

    /// Concatenate the text of every `Run` descendant of `id`, in document
    /// order. Used by the inline detectors to scan a paragraph as one buffer.
    pub fn concatenated_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(node) = self.tree.get(id) {
            for edge in node.traverse() {
                if let ego_tree::iter::Edge::Open(n) = edge {
                    if let NodeData::Run { text, .. } = n.value() {
                        out.push_str(text);
                    }
                }
            }
        }
        out
    }
}
