//! Named render slots.
//!
//! A slot replaces the default text rendering of a column's cells. Two
//! extra hooks render immediately left and right of each row checkbox.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::column::{ColumnKey, ColumnSpec};
use crate::node::Node;
use crate::view::View;

/// Where a slot renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// Left of each row checkbox.
    CheckboxLeft,
    /// Right of each row checkbox.
    CheckboxRight,
    /// Cells of the column bound to this field.
    Column(String),
}

impl SlotKey {
    pub fn column(key: impl Into<String>) -> Self {
        Self::Column(key.into())
    }
}

/// Arguments passed to a slot.
#[derive(Debug, Clone, Copy)]
pub struct SlotProps<'a> {
    /// The row being rendered.
    pub record: &'a Node,
    /// Raw field value; `None` for the checkbox hooks.
    pub text: Option<&'a Value>,
}

/// A slot renderer.
pub type SlotFn = Arc<dyn for<'a> Fn(SlotProps<'a>) -> View + Send + Sync>;

/// Slot renderers registered by the embedder.
#[derive(Clone, Default)]
pub struct Slots {
    slots: HashMap<SlotKey, SlotFn>,
}

impl std::fmt::Debug for Slots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.slots.keys()).finish()
    }
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer, replacing any previous one for `key`.
    pub fn insert(
        &mut self,
        key: SlotKey,
        render: impl for<'a> Fn(SlotProps<'a>) -> View + Send + Sync + 'static,
    ) {
        self.slots.insert(key, Arc::new(render));
    }

    pub fn get(&self, key: &SlotKey) -> Option<&SlotFn> {
        self.slots.get(key)
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Slot lookups resolved once per column for one render pass.
///
/// Holds the two checkbox hooks plus, for each rendered column, the slot
/// bound to its key. Slots for keys that match no column are dropped.
#[derive(Clone, Default)]
pub struct ResolvedSlots {
    left: Option<SlotFn>,
    right: Option<SlotFn>,
    columns: Vec<Option<SlotFn>>,
}

impl ResolvedSlots {
    pub fn resolve(slots: &Slots, columns: &[ColumnSpec]) -> Self {
        let columns = columns
            .iter()
            .map(|column| match &column.key {
                ColumnKey::Field(key) => slots.get(&SlotKey::Column(key.clone())).cloned(),
                ColumnKey::Checkbox => None,
            })
            .collect();
        Self {
            left: slots.get(&SlotKey::CheckboxLeft).cloned(),
            right: slots.get(&SlotKey::CheckboxRight).cloned(),
            columns,
        }
    }

    /// Render the hook left of a row checkbox.
    pub fn checkbox_left(&self, record: &Node) -> Option<View> {
        self.left
            .as_ref()
            .map(|render| render(SlotProps { record, text: None }))
    }

    /// Render the hook right of a row checkbox.
    pub fn checkbox_right(&self, record: &Node) -> Option<View> {
        self.right
            .as_ref()
            .map(|render| render(SlotProps { record, text: None }))
    }

    /// Render a cell of column `index`: the column's slot if one is bound,
    /// otherwise the raw value as text.
    pub fn cell(&self, index: usize, record: &Node, key: &str) -> View {
        let value = record.value(key);
        match self.columns.get(index).and_then(Option::as_ref) {
            Some(render) => render(SlotProps {
                record,
                text: value.as_ref(),
            }),
            None => View::Text(value.as_ref().map(crate::node::display_value).unwrap_or_default()),
        }
    }

    /// Number of columns with a bound slot.
    pub fn bound_columns(&self) -> usize {
        self.columns.iter().filter(|slot| slot.is_some()).count()
    }
}
