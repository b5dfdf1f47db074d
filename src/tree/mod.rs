//! Directory tree of per-file coverage.
//!
//! The tree is an arena of [`TreeNode`]s rebuilt from scratch for every file
//! list. Node 0 is a synthetic, always-expanded root directory with an empty
//! name. Every node is pushed after its parent, so a child's [`NodeId`] is
//! always greater than its parent's.

pub mod aggregate;
pub mod view;

pub use aggregate::aggregate;
pub use view::TreeView;

use std::collections::HashMap;

use tracing::warn;

use crate::model::{format_percent, FileRecord, RatioClass};

/// Index of a node in a [`CoverageTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Directories sort before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeKind {
    Dir,
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub hits: u64,
    pub lines: u64,
    /// Percentage; 0.0 when `lines` is zero.
    pub ratio: f64,
    /// Number of directory segments above this node.
    pub depth: usize,
    pub expanded: bool,
    pub children: Vec<NodeId>,
    /// Full record path, files only.
    pub path: Option<String>,
}

impl TreeNode {
    fn dir(name: &str, depth: usize) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Dir,
            hits: 0,
            lines: 0,
            ratio: 0.0,
            depth,
            expanded: false,
            children: Vec::new(),
            path: None,
        }
    }

    fn file(name: &str, depth: usize, record: &FileRecord) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::File,
            hits: record.hits,
            lines: record.lines,
            ratio: record.ratio(),
            depth,
            expanded: false,
            children: Vec::new(),
            path: Some(record.path.clone()),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Ratio for display, `-` when there are no lines.
    pub fn ratio_label(&self) -> String {
        format_percent(self.hits, self.lines)
    }

    /// Neutral when there are no lines to rate.
    pub fn ratio_class(&self) -> RatioClass {
        if self.lines == 0 {
            return RatioClass::Neutral;
        }
        RatioClass::of(self.ratio)
    }
}

#[derive(Debug, Clone)]
pub struct CoverageTree {
    nodes: Vec<TreeNode>,
}

impl CoverageTree {
    /// Build the tree for `files`. Directory totals stay zero until
    /// [`aggregate`] runs.
    pub fn build(files: &[FileRecord]) -> Self {
        let mut root = TreeNode::dir("", 0);
        root.expanded = true;
        let mut tree = Self { nodes: vec![root] };

        let mut by_name: HashMap<(NodeId, String), NodeId> = HashMap::new();
        for record in files {
            tree.insert(record, &mut by_name);
        }
        tree.sort_children();
        tree
    }

    fn insert(&mut self, record: &FileRecord, by_name: &mut HashMap<(NodeId, String), NodeId>) {
        let segments: Vec<&str> = record.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, dirs)) = segments.split_last() else {
            warn!(path = %record.path, "skipping file record with an empty path");
            return;
        };

        let mut parent = NodeId::ROOT;
        for (depth, dir) in dirs.iter().enumerate() {
            let key = (parent, dir.to_string());
            parent = match by_name.get(&key) {
                Some(&id) if self.node(id).is_dir() => id,
                Some(_) => {
                    warn!(path = %record.path, segment = %dir, "directory collides with a file, skipping");
                    return;
                }
                None => {
                    let id = self.push(parent, TreeNode::dir(dir, depth));
                    by_name.insert(key, id);
                    id
                }
            };
        }

        let key = (parent, file_name.to_string());
        if by_name.contains_key(&key) {
            warn!(path = %record.path, "duplicate path in file list, keeping the first");
            return;
        }
        let id = self.push(parent, TreeNode::file(file_name, dirs.len(), record));
        by_name.insert(key, id);
    }

    fn push(&mut self, parent: NodeId, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn sort_children(&mut self) {
        for index in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[index].children);
            children.sort_by(|a, b| {
                let (a, b) = (&self.nodes[a.0], &self.nodes[b.0]);
                a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name))
            });
            self.nodes[index].children = children;
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Look a node up by its slash-separated path (`""` is the root).
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = *self
                .node(current)
                .children
                .iter()
                .find(|&&c| self.node(c).name == segment)?;
        }
        Some(current)
    }
}
