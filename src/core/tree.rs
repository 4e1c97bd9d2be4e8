//! The in-memory model of a picked directory subtree.
//!
//! Nodes live in an arena owned by [`Tree`] and are addressed by [`NodeId`].
//! Every flag mutation bumps the tree's version so observers can tell that a
//! redraw is due without comparing node references.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::CoreError;

/// A stable handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a node is a directory or a file, with the flag that applies to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory {
        children: Vec<NodeId>,
        expanded: bool,
    },
    File {
        enabled: bool,
    },
}

/// A single directory or file of the picked subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    path: Vec<String>,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn directory(path: Vec<String>, children: Vec<NodeId>) -> Self {
        Self {
            path,
            kind: NodeKind::Directory {
                children,
                expanded: false,
            },
        }
    }

    pub(crate) fn file(path: Vec<String>) -> Self {
        Self {
            path,
            kind: NodeKind::File { enabled: true },
        }
    }

    /// Name segments from the picked root down to this node, root included.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Depth below the root (the root itself has depth 0).
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Children in stored order, or `None` for a file.
    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.kind {
            NodeKind::Directory { children, .. } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    /// `Some(enabled)` for files, `None` for directories.
    pub fn enabled(&self) -> Option<bool> {
        match self.kind {
            NodeKind::File { enabled } => Some(enabled),
            NodeKind::Directory { .. } => None,
        }
    }

    /// `Some(expanded)` for directories, `None` for files.
    pub fn expanded(&self) -> Option<bool> {
        match self.kind {
            NodeKind::Directory { expanded, .. } => Some(expanded),
            NodeKind::File { .. } => None,
        }
    }
}

/// An eagerly materialized directory tree with per-node UI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    version: u64,
}

impl Tree {
    /// Assembles a tree from arena parts. The root starts expanded.
    pub(crate) fn from_parts(mut nodes: Vec<Node>, root: NodeId) -> Self {
        if let Some(NodeKind::Directory { expanded, .. }) =
            nodes.get_mut(root.0).map(|node| &mut node.kind)
        {
            *expanded = true;
        }
        Self {
            nodes,
            root,
            version: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The picked directory's own name.
    pub fn root_name(&self) -> &str {
        self.get(self.root).map(Node::name).unwrap_or_default()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Incremented on every flag mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Total number of nodes, directories included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_directory()).count()
    }

    pub fn enabled_file_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.enabled() == Some(true))
            .count()
    }

    /// Flips `enabled` on a file node and returns the new value.
    pub fn toggle_enabled(&mut self, id: NodeId) -> Result<bool, CoreError> {
        let node = self.nodes.get_mut(id.0).ok_or(CoreError::UnknownNode(id))?;
        let NodeKind::File { enabled } = &mut node.kind else {
            return Err(CoreError::NotAFileNode(id));
        };
        *enabled = !*enabled;
        let value = *enabled;
        self.version += 1;
        Ok(value)
    }

    /// Flips `expanded` on a directory node and returns the new value.
    pub fn toggle_expanded(&mut self, id: NodeId) -> Result<bool, CoreError> {
        let node = self.nodes.get_mut(id.0).ok_or(CoreError::UnknownNode(id))?;
        let NodeKind::Directory { expanded, .. } = &mut node.kind else {
            return Err(CoreError::NotADirectoryNode(id));
        };
        *expanded = !*expanded;
        let value = *expanded;
        self.version += 1;
        Ok(value)
    }

    /// Looks up a node by its relative path below the root (root name excluded).
    pub fn find(&self, relative: &[&str]) -> Option<NodeId> {
        relative.iter().try_fold(self.root, |current, segment| {
            self.get(current)?
                .children()?
                .iter()
                .copied()
                .find(|child| self.get(*child).map(Node::name) == Some(*segment))
        })
    }

    /// Node ids in depth-first stored order, starting with the root.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(children) = self.get(id).and_then(Node::children) {
                stack.extend(children.iter().rev());
            }
        }
        order
    }
}
