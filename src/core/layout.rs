//! Row-unit sizing of tree nodes for proportional layout.

use super::tree::{NodeId, NodeKind, Tree};

/// A utility struct for computing how many rows a subtree occupies.
///
/// This struct is stateless and provides methods as associated functions.
pub struct LayoutSizer;

impl LayoutSizer {
    /// Number of row units `id` occupies, given whether it is rendered at all.
    ///
    /// Files count 1 when visible and 0 otherwise. Collapsed or invisible
    /// directories count as a single row; expanded visible directories count
    /// the sum of their children, but never less than 1. Unknown ids count 0.
    pub fn size(tree: &Tree, id: NodeId, visible: bool) -> usize {
        let Some(node) = tree.get(id) else {
            return 0;
        };
        match node.kind() {
            NodeKind::File { .. } => usize::from(visible),
            NodeKind::Directory { children, expanded } => {
                let children_visible = *expanded && visible;
                if !children_visible {
                    return 1;
                }
                children
                    .iter()
                    .map(|child| Self::size(tree, *child, children_visible))
                    .sum::<usize>()
                    .max(1)
            }
        }
    }

    /// Pixel height of a node given the height of one row unit.
    pub fn pixel_height(tree: &Tree, id: NodeId, visible: bool, row_height_px: u32) -> u64 {
        Self::size(tree, id, visible) as u64 * u64::from(row_height_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::Node;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    /// R/{A/{a1, a2, a3}, E/{}, f}
    fn sample_tree() -> Tree {
        let nodes = vec![
            Node::file(path(&["R", "A", "a1"])),
            Node::file(path(&["R", "A", "a2"])),
            Node::file(path(&["R", "A", "a3"])),
            Node::directory(path(&["R", "A"]), vec![NodeId(0), NodeId(1), NodeId(2)]),
            Node::directory(path(&["R", "E"]), vec![]),
            Node::file(path(&["R", "f"])),
            Node::directory(path(&["R"]), vec![NodeId(3), NodeId(4), NodeId(5)]),
        ];
        Tree::from_parts(nodes, NodeId(6))
    }

    #[test]
    fn test_collapsed_directory_is_one_row() {
        let tree = sample_tree();
        assert_eq!(LayoutSizer::size(&tree, NodeId(3), true), 1);
    }

    #[test]
    fn test_root_counts_collapsed_children_as_single_rows() {
        let tree = sample_tree();
        // A (collapsed) + E (collapsed) + f
        assert_eq!(LayoutSizer::size(&tree, tree.root(), true), 3);
    }

    #[test]
    fn test_expanded_directory_sums_children() {
        let mut tree = sample_tree();
        tree.toggle_expanded(NodeId(3)).unwrap();
        assert_eq!(LayoutSizer::size(&tree, NodeId(3), true), 3);
        assert_eq!(LayoutSizer::size(&tree, tree.root(), true), 5);
    }

    #[test]
    fn test_expanded_empty_directory_keeps_one_row() {
        let mut tree = sample_tree();
        tree.toggle_expanded(NodeId(4)).unwrap();
        assert_eq!(LayoutSizer::size(&tree, NodeId(4), true), 1);
    }

    #[test]
    fn test_invisible_nodes() {
        let mut tree = sample_tree();
        tree.toggle_expanded(NodeId(3)).unwrap();
        assert_eq!(LayoutSizer::size(&tree, NodeId(0), false), 0);
        assert_eq!(LayoutSizer::size(&tree, NodeId(3), false), 1);
    }

    #[test]
    fn test_collapsing_root_hides_everything() {
        let mut tree = sample_tree();
        tree.toggle_expanded(NodeId(3)).unwrap();
        tree.toggle_expanded(tree.root()).unwrap();
        assert_eq!(LayoutSizer::size(&tree, tree.root(), true), 1);
    }

    #[test]
    fn test_size_is_idempotent() {
        let mut tree = sample_tree();
        tree.toggle_expanded(NodeId(3)).unwrap();
        let first = LayoutSizer::size(&tree, tree.root(), true);
        let second = LayoutSizer::size(&tree, tree.root(), true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_node_and_pixel_height() {
        let tree = sample_tree();
        assert_eq!(LayoutSizer::size(&tree, NodeId(42), true), 0);
        assert_eq!(LayoutSizer::pixel_height(&tree, tree.root(), true, 40), 120);
    }
}
