//! Table error types.

use thiserror::Error;

use crate::drag::ListOwner;
use crate::node::NodeId;

/// Errors reported by the table when an interaction or configuration
/// cannot be honored.
///
/// Toggling rows or carets that are not rendered is not an error; those are
/// silent no-ops.
#[derive(Debug, Error)]
pub enum TableError {
    /// A checkbox was toggled but the table was built without row selection.
    #[error("row selection is not configured")]
    SelectionDisabled,

    /// A drag referenced a list whose owner is not in the tree.
    #[error("unknown drag list: {0}")]
    UnknownList(ListOwner),

    /// A drag targeted the children of a node that is collapsed or a leaf.
    #[error("children of node {0} are not rendered")]
    ListNotRendered(NodeId),

    /// A drag index fell outside the list.
    #[error("index {index} out of range for {owner} (len {len})")]
    IndexOutOfRange {
        /// The list that was addressed.
        owner: ListOwner,
        /// The offending index.
        index: usize,
        /// Length of the list.
        len: usize,
    },

    /// A node was dropped into its own subtree.
    #[error("node {0} cannot be dropped into its own subtree")]
    DropIntoSelf(NodeId),

    /// A drag move or drop arrived with no drag in progress.
    #[error("no drag in progress")]
    NoActiveDrag,

    /// A drag start arrived while another drag was in progress.
    #[error("a drag is already in progress")]
    DragInProgress,

    /// The same id occurs more than once in the tree.
    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    /// Table configuration could not be parsed.
    #[error("invalid table configuration: {0}")]
    Config(#[from] serde_json::Error),
}
