//! Whole-tree queries over borrowed node slices.

use std::collections::HashSet;

use crate::drag::ListOwner;
use crate::error::TableError;
use crate::node::{Node, NodeId};

/// A node in the flattened tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode<'a> {
    pub node: &'a Node,
    /// Depth in tree (0 = root).
    pub depth: u16,
}

/// Flatten the tree in depth-first pre-order, ignoring expansion state.
pub fn flatten(nodes: &[Node]) -> Vec<FlatNode<'_>> {
    fn recurse<'a>(nodes: &'a [Node], depth: u16, out: &mut Vec<FlatNode<'a>>) {
        for node in nodes {
            out.push(FlatNode { node, depth });
            recurse(node.children(), depth + 1, out);
        }
    }

    let mut out = Vec::new();
    recurse(nodes, 0, &mut out);
    out
}

/// Ids of every node, in flatten order.
pub fn all_ids(nodes: &[Node]) -> Vec<NodeId> {
    flatten(nodes).into_iter().map(|flat| flat.node.id.clone()).collect()
}

/// Total number of nodes at every depth.
pub fn count_nodes(nodes: &[Node]) -> usize {
    nodes.iter().map(|node| 1 + count_nodes(node.children())).sum()
}

/// Find a node anywhere in the tree.
pub fn find_node<'a>(nodes: &'a [Node], id: &NodeId) -> Option<&'a Node> {
    for node in nodes {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// The array a list owner controls: the roots, or a node's children.
///
/// Returns `None` if the owning node does not exist. A node without a
/// children array yields an empty slice.
pub fn list_of<'a>(nodes: &'a [Node], owner: &ListOwner) -> Option<&'a [Node]> {
    match owner {
        ListOwner::Root => Some(nodes),
        ListOwner::Node(id) => find_node(nodes, id).map(Node::children),
    }
}

/// Whether `id` is `root` itself or one of its descendants.
pub fn subtree_contains(root: &Node, id: &NodeId) -> bool {
    &root.id == id || find_node(root.children(), id).is_some()
}

/// Check that every id occurs once across the whole tree.
pub fn validate_unique_ids(nodes: &[Node]) -> Result<(), TableError> {
    let mut seen = HashSet::new();
    for flat in flatten(nodes) {
        if !seen.insert(&flat.node.id) {
            return Err(TableError::DuplicateId(flat.node.id.clone()));
        }
    }
    Ok(())
}
