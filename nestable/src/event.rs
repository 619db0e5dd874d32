//! Interactions flowing into the table and events flowing out.

use crate::drag::{ListOwner, SortableEvent};
use crate::node::{Node, NodeId};

/// A user interaction the host forwards to the table.
///
/// Hosts usually obtain these from the rendered views
/// (`CheckboxView::toggle`, `View::Caret`) or from their own drag gestures.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// A row's expand caret was clicked.
    ToggleExpand(NodeId),
    /// A row checkbox changed to `checked`.
    ToggleRow { id: NodeId, checked: bool },
    /// The header checkbox changed to `checked`.
    ToggleAll { checked: bool },
    /// A drag began on row `index` of `list`.
    ///
    /// `target` names the element the pointer went down on; when a handle
    /// is configured, drags only start on matching targets.
    DragStart {
        list: ListOwner,
        index: usize,
        target: Option<String>,
    },
    /// The dragged row hovers position `index` of `list`.
    DragOver { list: ListOwner, index: usize },
    /// The dragged row was released at its current position.
    Drop,
    /// The drag was abandoned; the row stays where it was.
    DragCancel,
}

/// An event the table emits toward its owner.
///
/// Every level of the table speaks the same events. `UpdateModelValue`
/// carries the replacement array of the emitting level; by the time it
/// leaves the table it has been substituted upward into a full tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// Replacement tree (or, inside the table, replacement level).
    UpdateModelValue(Vec<Node>),
    /// Replacement expanded-id list.
    UpdateExpandedRowKeys(Vec<NodeId>),
    /// Drag started.
    Start(SortableEvent),
    /// Drag finished.
    End(SortableEvent),
    /// Dragged row moved over a new position.
    Move(SortableEvent),
}

impl TableEvent {
    /// The emitted event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateModelValue(_) => "update:modelValue",
            Self::UpdateExpandedRowKeys(_) => "update:expandedRowKeys",
            Self::Start(_) => "start",
            Self::End(_) => "end",
            Self::Move(_) => "move",
        }
    }
}
