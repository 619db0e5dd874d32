//! Expanded-id bookkeeping.
//!
//! The expanded list is shared by every level of the table and owned by
//! the embedder; toggling produces a replacement list.

use crate::node::NodeId;

/// Check if a node's children should be shown.
pub fn is_expanded(expanded_row_keys: &[NodeId], id: &NodeId) -> bool {
    expanded_row_keys.contains(id)
}

/// Expanded list after flipping membership of `id`.
///
/// Removal takes out the first occurrence; insertion appends.
pub fn toggle_expanded(expanded_row_keys: &[NodeId], id: &NodeId) -> Vec<NodeId> {
    let mut next = expanded_row_keys.to_vec();
    match next.iter().position(|key| key == id) {
        Some(index) => {
            next.remove(index);
        }
        None => next.push(id.clone()),
    }
    next
}
