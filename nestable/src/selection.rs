//! Row selection: externally owned selected ids and the derived header state.
//!
//! The table never stores selection itself. It reads `selected_row_keys`
//! and reports every change as a complete replacement list through the
//! `on_change` callback.

use std::sync::Arc;

use crate::node::NodeId;

/// Callback receiving the full replacement selection.
pub type OnChange = Arc<dyn Fn(Vec<NodeId>) + Send + Sync>;

/// Externally supplied selection state.
#[derive(Clone)]
pub struct RowSelection {
    /// Currently selected ids, in the order they were selected.
    pub selected_row_keys: Vec<NodeId>,
    on_change: OnChange,
}

impl std::fmt::Debug for RowSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSelection")
            .field("selected_row_keys", &self.selected_row_keys)
            .finish_non_exhaustive()
    }
}

impl RowSelection {
    pub fn new(
        selected_row_keys: Vec<NodeId>,
        on_change: impl Fn(Vec<NodeId>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            selected_row_keys,
            on_change: Arc::new(on_change),
        }
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected_row_keys.contains(id)
    }

    /// Hand a replacement selection to the owner.
    pub fn emit(&self, selected_row_keys: Vec<NodeId>) {
        (self.on_change)(selected_row_keys);
    }
}

/// Visual state of a checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckState {
    pub checked: bool,
    pub indeterminate: bool,
}

impl CheckState {
    pub const UNCHECKED: Self = Self {
        checked: false,
        indeterminate: false,
    };
    pub const CHECKED: Self = Self {
        checked: true,
        indeterminate: false,
    };
    pub const INDETERMINATE: Self = Self {
        checked: false,
        indeterminate: true,
    };

    /// Header state for `selected` of `total` nodes.
    ///
    /// Only the counts are compared. An empty tree reads as unchecked.
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if selected == 0 {
            Self::UNCHECKED
        } else if selected == total {
            Self::CHECKED
        } else {
            Self::INDETERMINATE
        }
    }
}

/// Recomputes the header state whenever its inputs change.
///
/// The first observation always computes, so a freshly built table shows
/// the right state before any selection change arrives.
#[derive(Debug, Clone, Default)]
pub struct CheckAllWatch {
    observed: Option<(usize, usize)>,
    state: CheckState,
}

impl CheckAllWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current counts, returning the (possibly recomputed) state.
    pub fn observe(&mut self, selected: usize, total: usize) -> CheckState {
        if self.observed != Some((selected, total)) {
            self.observed = Some((selected, total));
            self.state = CheckState::from_counts(selected, total);
            log::trace!("check-all state {selected}/{total} -> {:?}", self.state);
        }
        self.state
    }

    pub fn state(&self) -> CheckState {
        self.state
    }
}

/// Selection after toggling one row's checkbox.
///
/// Checking appends the id; unchecking removes it and keeps the order of
/// the rest.
pub fn toggle_row(selected: &[NodeId], id: &NodeId, checked: bool) -> Vec<NodeId> {
    if checked {
        let mut next = selected.to_vec();
        if !next.contains(id) {
            next.push(id.clone());
        }
        next
    } else {
        selected.iter().filter(|key| *key != id).cloned().collect()
    }
}
