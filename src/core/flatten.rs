//! Collects the relative paths of enabled files for export.

use super::tree::{NodeId, NodeKind, Tree};

/// A utility struct for flattening a tree into its exported path list.
///
/// This struct is stateless and provides methods as associated functions.
pub struct ExportFlattener;

impl ExportFlattener {
    /// Returns the path of every enabled file, relative to the picked root.
    ///
    /// The walk is depth-first in stored sibling order and ignores `expanded`,
    /// so collapsed subtrees still contribute their enabled files.
    pub fn flatten(tree: &Tree) -> Vec<Vec<String>> {
        let mut paths = Vec::with_capacity(tree.enabled_file_count());
        Self::collect(tree, tree.root(), &mut paths);
        paths
    }

    fn collect(tree: &Tree, id: NodeId, paths: &mut Vec<Vec<String>>) {
        let Some(node) = tree.get(id) else {
            return;
        };
        match node.kind() {
            NodeKind::Directory { children, .. } => {
                for child in children {
                    Self::collect(tree, *child, paths);
                }
            }
            NodeKind::File { enabled: true } => {
                paths.push(node.path().iter().skip(1).cloned().collect());
            }
            NodeKind::File { enabled: false } => {}
        }
    }
}
