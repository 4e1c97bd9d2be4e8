//! Builds a [`Tree`] by walking a [`DirectorySource`].

use std::future::Future;
use std::pin::Pin;

use super::error::CoreError;
use super::natural::NameOrdering;
use super::source::{DirectorySource, EntryKind};
use super::tree::{Node, NodeId, Tree};

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<NodeId, CoreError>> + Send + 'a>>;

/// Walks a directory source eagerly and orders every sibling group.
///
/// Siblings are ordered by the configured [`NameOrdering`] first and then
/// stably partitioned so that directories precede files.
pub struct TreeBuilder<'o, O: NameOrdering + ?Sized> {
    ordering: &'o O,
}

impl<'o, O: NameOrdering + ?Sized> TreeBuilder<'o, O> {
    pub fn new(ordering: &'o O) -> Self {
        Self { ordering }
    }

    /// Builds the complete tree below `root`.
    ///
    /// Any enumeration error aborts the walk; no partial tree is returned.
    pub async fn build<S>(&self, source: &S, root: &S::Handle) -> Result<Tree, CoreError>
    where
        S: DirectorySource + ?Sized,
    {
        let mut nodes = Vec::new();
        let root_path = vec![source.name(root)];
        let root_id = self.walk(source, root, root_path, &mut nodes).await?;
        tracing::debug!(
            "Built tree '{}' with {} nodes",
            source.name(root),
            nodes.len()
        );
        Ok(Tree::from_parts(nodes, root_id))
    }

    fn walk<'a, S>(
        &'a self,
        source: &'a S,
        handle: &'a S::Handle,
        path: Vec<String>,
        nodes: &'a mut Vec<Node>,
    ) -> WalkFuture<'a>
    where
        S: DirectorySource + ?Sized,
    {
        Box::pin(async move {
            let entries = source.entries(handle).await?;
            let mut children = Vec::with_capacity(entries.len());
            let mut names = Vec::with_capacity(entries.len());

            for entry in entries {
                let mut child_path = path.clone();
                child_path.push(entry.name.clone());

                let child = match entry.kind {
                    EntryKind::File => push_node(nodes, Node::file(child_path)),
                    EntryKind::Directory => {
                        self.walk(source, &entry.handle, child_path, &mut *nodes)
                            .await?
                    }
                    EntryKind::Other => {
                        tracing::debug!("Skipping non-regular entry '{}'", child_path.join("/"));
                        continue;
                    }
                };
                children.push(child);
                names.push(entry.name);
            }

            let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut ordered: Vec<NodeId> = self
                .ordering
                .order(&name_refs)
                .into_iter()
                .map(|index| children[index])
                .collect();
            // Stable: the name order survives within each group.
            ordered.sort_by_key(|id| !nodes[id.0].is_directory());

            Ok(push_node(nodes, Node::directory(path, ordered)))
        })
    }
}

fn push_node(nodes: &mut Vec<Node>, node: Node) -> NodeId {
    nodes.push(node);
    NodeId(nodes.len() - 1)
}
