//! Narrow trait boundary (§1, §4.6) so a host can supply a document tree
//! backed by something other than this crate's own arena (e.g. a real OOXML
//! reader's node types) without the engine depending on `ego_tree` directly.
//!
//! `DocTree` is the reference implementor. The walker and visitors in
//! `crate::visit` are written against `DocTree` concretely rather than
//! against this trait object — `clone_subtree`-style recursive mutation
//! through `&mut dyn DocumentBackend` runs into object-safety and borrow
//! conflicts that aren't worth the indirection for a single in-crate
//! backend. This trait stays as the documented contract a host would
//! implement to swap backends; it is exercised by `DocTree`'s own impl
//! below but not threaded through the engine's internals.

use ego_tree::NodeId;

use crate::doctree::{DocTree, NodeData};

/// The document-tree operations the engine needs: navigation, detection of
/// node kind, and the mutations the visitors perform.
pub trait DocumentBackend {
    fn root_id(&self) -> NodeId;
    fn value(&self, id: NodeId) -> Option<&NodeData>;
    fn parent(&self, id: NodeId) -> Option<NodeId>;
    fn children(&self, id: NodeId) -> Vec<NodeId>;
    fn next_sibling(&self, id: NodeId) -> Option<NodeId>;

    fn append_child(&mut self, parent: NodeId, data: NodeData) -> NodeId;
    fn insert_before(&mut self, sibling: NodeId, data: NodeData) -> NodeId;
    fn insert_after(&mut self, sibling: NodeId, data: NodeData) -> NodeId;
    fn detach(&mut self, id: NodeId);
    fn remove(&mut self, id: NodeId);
    fn clone_subtree(&mut self, id: NodeId, new_parent: NodeId) -> NodeId;
    fn set_text(&mut self, id: NodeId, text: String);
}

impl DocumentBackend for DocTree {
    fn root_id(&self) -> NodeId {
        DocTree::root_id(self)
    }

    fn value(&self, id: NodeId) -> Option<&NodeData> {
        DocTree::value(self, id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        DocTree::parent(self, id)
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        DocTree::children(self, id)
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        DocTree::next_sibling(self, id)
    }

    fn append_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        DocTree::append_child(self, parent, data)
    }

    fn insert_before(&mut self, sibling: NodeId, data: NodeData) -> NodeId {
        DocTree::insert_before(self, sibling, data)
    }

    fn insert_after(&mut self, sibling: NodeId, data: NodeData) -> NodeId {
        DocTree::insert_after(self, sibling, data)
    }

    fn detach(&mut self, id: NodeId) {
        DocTree::detach(self, id)
    }

    fn remove(&mut self, id: NodeId) {
        DocTree::remove(self, id)
    }

    fn clone_subtree(&mut self, id: NodeId, new_parent: NodeId) -> NodeId {
        DocTree::clone_subtree(self, id, new_parent)
    }

    fn set_text(&mut self, id: NodeId, text: String) {
        DocTree::set_text(self, id, text)
    }
}
