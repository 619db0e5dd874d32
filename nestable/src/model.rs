//! Host-side state that the table reads from and writes back to.

use std::sync::{Arc, Mutex};

use crate::event::TableEvent;
use crate::node::{Node, NodeId};

/// Snapshot of the two-way bound values for one render or dispatch.
#[derive(Debug, Clone, Copy)]
pub struct TableData<'a> {
    /// The tree.
    pub model_value: &'a [Node],
    /// Expanded ids, shared by every level.
    pub expanded_row_keys: &'a [NodeId],
}

impl<'a> TableData<'a> {
    pub fn new(model_value: &'a [Node], expanded_row_keys: &'a [NodeId]) -> Self {
        Self {
            model_value,
            expanded_row_keys,
        }
    }
}

/// Canonical table state owned by the host.
///
/// The table never writes here itself; the host applies the events the
/// table emits, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableModel {
    pub nodes: Vec<Node>,
    pub expanded_row_keys: Vec<NodeId>,
    pub selected_row_keys: Vec<NodeId>,
}

impl TableModel {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    pub fn data(&self) -> TableData<'_> {
        TableData::new(&self.nodes, &self.expanded_row_keys)
    }

    /// Apply one emitted event. Returns whether state changed.
    pub fn apply(&mut self, event: &TableEvent) -> bool {
        match event {
            TableEvent::UpdateModelValue(nodes) => {
                self.nodes = nodes.clone();
                true
            }
            TableEvent::UpdateExpandedRowKeys(keys) => {
                self.expanded_row_keys = keys.clone();
                true
            }
            TableEvent::Start(_) | TableEvent::End(_) | TableEvent::Move(_) => false,
        }
    }

    /// Apply a batch of events in order. Returns whether state changed.
    pub fn apply_all<'e>(&mut self, events: impl IntoIterator<Item = &'e TableEvent>) -> bool {
        events
            .into_iter()
            .fold(false, |changed, event| self.apply(event) || changed)
    }
}

/// Collects selection changes so the host can apply them after dispatch.
///
/// ```ignore
/// let mailbox = Mailbox::new();
/// let selection = RowSelection::new(model.selected_row_keys.clone(), mailbox.sender());
/// // ... dispatch ...
/// if let Some(keys) = mailbox.take() {
///     model.selected_row_keys = keys;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mailbox {
    latest: Arc<Mutex<Option<Vec<NodeId>>>>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that stores the most recent selection.
    pub fn sender(&self) -> impl Fn(Vec<NodeId>) + Send + Sync + 'static {
        let latest = Arc::clone(&self.latest);
        move |keys| {
            if let Ok(mut guard) = latest.lock() {
                *guard = Some(keys);
            }
        }
    }

    /// Take the most recent selection, if one arrived.
    pub fn take(&self) -> Option<Vec<NodeId>> {
        self.latest.lock().ok().and_then(|mut guard| guard.take())
    }
}
