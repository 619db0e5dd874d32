//! Drag-and-drop list plumbing.
//!
//! Every level of the table is a sortable list. All lists of one table
//! share a single group, so a row can be moved within its level or into any
//! other rendered level. [`Sortable`] tracks the one drag in progress; the
//! list helpers compute the arrays each affected list hands back to its
//! owner when the row is dropped.
//!
//! A drag is well-formed: one `start`, any number of `hover`s, then exactly
//! one `finish` or `cancel`.

use crate::error::TableError;
use crate::node::{Node, NodeId};

/// The array a draggable list controls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListOwner {
    /// The top-level array.
    Root,
    /// The children of a node.
    Node(NodeId),
}

impl std::fmt::Display for ListOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => f.write_str("root list"),
            Self::Node(id) => write!(f, "children of {id}"),
        }
    }
}

/// Payload of the `start`, `move` and `end` events.
///
/// Forwarded to the embedder as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableEvent {
    /// The dragged row.
    pub item: NodeId,
    /// List the row was picked up from.
    pub from: ListOwner,
    /// List the row currently sits over.
    pub to: ListOwner,
    /// Position in `from` when picked up.
    pub old_index: usize,
    /// Position in `to`.
    pub new_index: usize,
    /// Shared drag group name.
    pub group: String,
}

impl SortableEvent {
    /// Whether the row would end up where it started.
    pub fn is_noop(&self) -> bool {
        self.from == self.to && self.old_index == self.new_index
    }
}

/// Drag session shared by every list of a table.
#[derive(Debug, Clone)]
pub struct Sortable {
    group: String,
    handle: Option<String>,
    active: Option<SortableEvent>,
}

impl Sortable {
    pub fn new(group: impl Into<String>, handle: Option<String>) -> Self {
        Self {
            group: group.into(),
            handle,
            active: None,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    pub fn set_handle(&mut self, handle: Option<String>) {
        self.handle = handle;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The drag in progress.
    pub fn active(&self) -> Option<&SortableEvent> {
        self.active.as_ref()
    }

    /// Whether a pointer-down on `target` may start a drag.
    ///
    /// Without a handle the whole row is draggable.
    pub fn accepts(&self, target: Option<&str>) -> bool {
        match &self.handle {
            None => true,
            Some(handle) => target == Some(handle.as_str()),
        }
    }

    /// Pick up `item` at `index` of `from`.
    pub fn start(
        &mut self,
        item: NodeId,
        from: ListOwner,
        index: usize,
    ) -> Result<SortableEvent, TableError> {
        if self.active.is_some() {
            return Err(TableError::DragInProgress);
        }
        let event = SortableEvent {
            item,
            to: from.clone(),
            from,
            old_index: index,
            new_index: index,
            group: self.group.clone(),
        };
        self.active = Some(event.clone());
        Ok(event)
    }

    /// Move the dragged row over `index` of `to`.
    pub fn hover(&mut self, to: ListOwner, index: usize) -> Result<SortableEvent, TableError> {
        let active = self.active.as_mut().ok_or(TableError::NoActiveDrag)?;
        active.to = to;
        active.new_index = index;
        Ok(active.clone())
    }

    /// Release the row where it hovers, ending the drag.
    pub fn finish(&mut self) -> Result<SortableEvent, TableError> {
        self.active.take().ok_or(TableError::NoActiveDrag)
    }

    /// Abandon the drag; the row returns to where it was picked up.
    pub fn cancel(&mut self) -> Result<SortableEvent, TableError> {
        let mut event = self.active.take().ok_or(TableError::NoActiveDrag)?;
        event.to = event.from.clone();
        event.new_index = event.old_index;
        Ok(event)
    }
}

/// A list after moving the row at `old_index` to `new_index`.
pub fn reorder(list: &[Node], old_index: usize, new_index: usize) -> Vec<Node> {
    let mut items = list.to_vec();
    if old_index < items.len() {
        let node = items.remove(old_index);
        let at = new_index.min(items.len());
        items.insert(at, node);
    }
    items
}

/// Split the row at `index` out of a list.
pub fn remove_at(list: &[Node], index: usize) -> Option<(Node, Vec<Node>)> {
    let node = list.get(index)?.clone();
    let mut items = list.to_vec();
    items.remove(index);
    Some((node, items))
}

/// A list with `node` inserted at `index` (clamped to the end).
pub fn insert_at(list: &[Node], index: usize, node: Node) -> Vec<Node> {
    let mut items = list.to_vec();
    let at = index.min(items.len());
    items.insert(at, node);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[i64]) -> Vec<Node> {
        ids.iter().map(|&id| Node::new(id, format!("n{id}"))).collect()
    }

    fn ids(nodes: &[Node]) -> Vec<NodeId> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    fn expected(values: &[i64]) -> Vec<NodeId> {
        values.iter().map(|&v| NodeId::from(v)).collect()
    }

    #[test]
    fn test_reorder_forward_and_back() {
        let items = list(&[1, 2, 3, 4]);
        assert_eq!(ids(&reorder(&items, 0, 2)), expected(&[2, 3, 1, 4]));
        assert_eq!(ids(&reorder(&items, 3, 0)), expected(&[4, 1, 2, 3]));
        assert_eq!(ids(&reorder(&items, 1, 1)), expected(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_remove_and_insert() {
        let items = list(&[1, 2, 3]);
        let (node, rest) = remove_at(&items, 1).unwrap();
        assert_eq!(node.id, NodeId::from(2));
        assert_eq!(ids(&rest), expected(&[1, 3]));
        assert!(remove_at(&items, 5).is_none());

        assert_eq!(ids(&insert_at(&rest, 0, node.clone())), expected(&[2, 1, 3]));
        assert_eq!(ids(&insert_at(&rest, 9, node)), expected(&[1, 3, 2]));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut sortable = Sortable::new("g1", None);
        assert!(!sortable.is_dragging());

        let start = sortable.start(NodeId::from(2), ListOwner::Root, 1).unwrap();
        assert!(start.is_noop());
        assert_eq!(start.group, "g1");

        let moved = sortable.hover(ListOwner::Node(NodeId::from(1)), 0).unwrap();
        assert_eq!(moved.from, ListOwner::Root);
        assert_eq!(moved.to, ListOwner::Node(NodeId::from(1)));

        let end = sortable.finish().unwrap();
        assert_eq!(end, moved);
        assert!(!sortable.is_dragging());
    }

    #[test]
    fn test_cancel_restores_origin() {
        let mut sortable = Sortable::new("g1", None);
        sortable.start(NodeId::from(2), ListOwner::Root, 1).unwrap();
        sortable.hover(ListOwner::Root, 3).unwrap();

        let end = sortable.cancel().unwrap();
        assert!(end.is_noop());
        assert_eq!(end.new_index, 1);
    }

    #[test]
    fn test_session_misuse() {
        let mut sortable = Sortable::new("g1", None);
        assert!(matches!(sortable.finish(), Err(TableError::NoActiveDrag)));
        assert!(matches!(
            sortable.hover(ListOwner::Root, 0),
            Err(TableError::NoActiveDrag)
        ));

        sortable.start(NodeId::from(1), ListOwner::Root, 0).unwrap();
        assert!(matches!(
            sortable.start(NodeId::from(2), ListOwner::Root, 1),
            Err(TableError::DragInProgress)
        ));
    }

    #[test]
    fn test_handle_restricts_start() {
        let free = Sortable::new("g1", None);
        assert!(free.accepts(None));
        assert!(free.accepts(Some("anything")));

        let handled = Sortable::new("g1", Some(".drag-handle".to_string()));
        assert!(handled.accepts(Some(".drag-handle")));
        assert!(!handled.accepts(Some(".cell")));
        assert!(!handled.accepts(None));
    }
}
