//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! Only the nodes that are actually rendered are serialized: children are
//! included for expanded, visible directories. Every node carries the number of
//! row units it occupies so the frontend can size it proportionally.

use serde::Serialize;

use super::state::AppState;
use crate::core::{LayoutSizer, NodeId, NodeKind, Tree};

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug)]
pub struct UiState {
    pub current_path: String,
    pub pattern: String,
    pub can_export: bool,
    pub is_building: bool,
    pub status_message: String,
    pub file_count: usize,
    pub enabled_count: usize,
    pub tree_version: u64,
    pub row_height_px: u32,
    pub tree: Option<UiNode>,
}

/// A serializable representation of a single rendered tree node.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UiNode {
    pub id: NodeId,
    pub name: String,
    pub is_directory: bool,
    /// Set for files only.
    pub enabled: Option<bool>,
    /// Set for directories only.
    pub expanded: Option<bool>,
    /// Row units occupied by this node.
    pub rows: usize,
    /// `rows` times the configured row height.
    pub height_px: u64,
    pub children: Vec<UiNode>,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let tree = state.tree.as_ref();

    UiState {
        current_path: state.current_path.clone(),
        pattern: state.pattern.clone(),
        can_export: tree.is_some() && !state.is_building,
        is_building: state.is_building,
        status_message: state.status_message.clone(),
        file_count: tree.map_or(0, Tree::file_count),
        enabled_count: tree.map_or(0, Tree::enabled_file_count),
        tree_version: tree.map_or(0, Tree::version),
        row_height_px: state.config.row_height_px,
        tree: tree.and_then(|tree| {
            build_ui_node(tree, tree.root(), true, state.config.row_height_px)
        }),
    }
}

fn build_ui_node(
    tree: &Tree,
    id: NodeId,
    visible: bool,
    row_height_px: u32,
) -> Option<UiNode> {
    let node = tree.get(id)?;
    let children = match node.kind() {
        NodeKind::Directory { children, expanded } if *expanded && visible => children
            .iter()
            .filter_map(|child| build_ui_node(tree, *child, true, row_height_px))
            .collect(),
        _ => Vec::new(),
    };

    Some(UiNode {
        id,
        name: node.name().to_string(),
        is_directory: node.is_directory(),
        enabled: node.enabled(),
        expanded: node.expanded(),
        rows: LayoutSizer::size(tree, id, visible),
        height_px: LayoutSizer::pixel_height(tree, id, visible, row_height_px),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::{NaturalOrdering, TreeBuilder};
    use crate::utils::test_helpers::MemoryDirectorySource;

    async fn state_with_tree() -> AppState {
        let source = MemoryDirectorySource::new("R")
            .with_file("docs/a.txt")
            .with_file("docs/b.txt")
            .with_dir("empty")
            .with_file("z.txt");
        let tree = TreeBuilder::new(&NaturalOrdering)
            .build(&source, &source.root())
            .await
            .unwrap();
        let mut state = AppState::with_config(AppConfig::default(), None);
        state.current_path = "/tmp/R".to_string();
        state.pattern = "R_${DIR}".to_string();
        state.tree = Some(tree);
        state
    }

    fn names(node: &UiNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_collapsed_directories_render_without_children() {
        let state = state_with_tree().await;
        let ui = generate_ui_state(&state);

        let root = ui.tree.expect("tree should be rendered");
        assert_eq!(root.name, "R");
        assert_eq!(root.expanded, Some(true));
        assert_eq!(names(&root), vec!["docs", "empty", "z.txt"]);
        assert!(root.children.iter().all(|c| c.children.is_empty()));
        // docs (collapsed) + empty (collapsed) + z.txt
        assert_eq!(root.rows, 3);
        assert!(ui.can_export);
        assert_eq!(ui.file_count, 3);
        assert_eq!(ui.enabled_count, 3);
        assert_eq!(ui.row_height_px, 40);
    }

    #[tokio::test]
    async fn test_expanding_directory_renders_children_and_grows_rows() {
        let mut state = state_with_tree().await;
        let tree = state.tree.as_mut().unwrap();
        let docs = tree.find(&["docs"]).unwrap();
        let empty = tree.find(&["empty"]).unwrap();
        tree.toggle_expanded(docs).unwrap();
        tree.toggle_expanded(empty).unwrap();

        let ui = generate_ui_state(&state);
        let root = ui.tree.unwrap();

        assert_eq!(names(&root.children[0]), vec!["a.txt", "b.txt"]);
        assert_eq!(root.children[0].rows, 2);
        // An expanded empty directory still takes one row.
        assert_eq!(root.children[1].rows, 1);
        assert_eq!(root.rows, 4);
        assert_eq!(root.height_px, 160);
        assert_eq!(ui.tree_version, 2);
    }

    #[tokio::test]
    async fn test_disabled_file_is_reported() {
        let mut state = state_with_tree().await;
        let tree = state.tree.as_mut().unwrap();
        let z = tree.find(&["z.txt"]).unwrap();
        tree.toggle_enabled(z).unwrap();

        let ui = generate_ui_state(&state);
        let root = ui.tree.unwrap();

        assert_eq!(root.children[2].enabled, Some(false));
        assert_eq!(root.children[2].expanded, None);
        assert_eq!(ui.enabled_count, 2);
    }

    #[test]
    fn test_no_tree_cannot_export() {
        let mut state = AppState::with_config(AppConfig::default(), None);
        state.is_building = true;

        let ui = generate_ui_state(&state);

        assert!(ui.tree.is_none());
        assert!(!ui.can_export);
        assert_eq!(ui.tree_version, 0);
    }
}
