use super::{aggregate, CoverageTree, NodeId};
use crate::model::FileRecord;

/// Expand/collapse state over an aggregated [`CoverageTree`].
#[derive(Debug, Clone)]
pub struct TreeView {
    tree: CoverageTree,
}

impl TreeView {
    /// Build, aggregate and compact the tree for a new file list.
    pub fn new(files: &[FileRecord]) -> Self {
        let mut tree = CoverageTree::build(files);
        aggregate(&mut tree);
        let mut view = Self { tree };
        view.compact();
        view
    }

    pub fn tree(&self) -> &CoverageTree {
        &self.tree
    }

    /// Expand every directory that has exactly one child, along with that
    /// child, so pass-through chains open up on the first render.
    pub fn compact(&mut self) {
        for index in 0..self.tree.len() {
            let id = NodeId(index);
            let node = self.tree.node(id);
            if !node.is_dir() || node.children.len() != 1 {
                continue;
            }
            let child = node.children[0];
            self.tree.node_mut(id).expanded = true;
            self.tree.node_mut(child).expanded = true;
        }
    }

    /// Flip a directory's expansion. Files and the root are unaffected.
    pub fn toggle(&mut self, id: NodeId) {
        if id == NodeId::ROOT {
            return;
        }
        let node = self.tree.node_mut(id);
        if node.is_dir() {
            node.expanded = !node.expanded;
        }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.tree.node(id).expanded
    }

    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, expanded: bool) {
        for index in 1..self.tree.len() {
            let node = self.tree.node_mut(NodeId(index));
            if node.is_dir() {
                node.expanded = expanded;
            }
        }
    }

    /// Pre-order list of the rows currently on screen. The root itself is
    /// never listed; a directory's children appear only while it is expanded.
    pub fn visible_rows(&self) -> Vec<NodeId> {
        let mut rows = Vec::new();
        let mut stack: Vec<NodeId> = self.tree.root().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            rows.push(id);
            let node = self.tree.node(id);
            if node.is_dir() && node.expanded {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        rows
    }

    /// Path of the selected file, which the caller uses to fetch its source
    /// view. Directories have nothing to show.
    pub fn select(&self, id: NodeId) -> Option<&str> {
        self.tree.node(id).path.as_deref()
    }
}
