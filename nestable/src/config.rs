//! Table configuration.

use serde::Deserialize;

use crate::column::ColumnSpec;
use crate::error::TableError;

/// Static table configuration.
///
/// Everything here is plain data; callbacks (selection, row classes,
/// slots) are attached to the table itself.
///
/// Deserializes from the camelCase JSON shape embedders already use:
///
/// ```ignore
/// let config = TableConfig::from_json(r#"{
///     "indentSize": 20,
///     "handle": ".drag-handle",
///     "columns": [
///         {"dataIndex": "name", "title": "Name"},
///         {"dataIndex": "size", "title": "Size", "width": 120}
///     ]
/// }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Pixels of indentation per level.
    pub indent_size: u32,

    /// User columns, in display order.
    pub columns: Vec<ColumnSpec>,

    /// Drag handle; when unset the whole row is draggable.
    pub handle: Option<String>,

    /// Drag group shared by every level.
    pub group: String,

    /// Reorder animation in milliseconds.
    pub animation: u32,

    /// Width in pixels of the injected checkbox column.
    pub checkbox_width: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            indent_size: 15,
            columns: Vec::new(),
            handle: None,
            group: "g1".to_string(),
            animation: 150,
            checkbox_width: 80,
        }
    }
}

impl TableConfig {
    /// Create a config with the given columns.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the indentation per level.
    pub fn indent_size(mut self, pixels: u32) -> Self {
        self.indent_size = pixels;
        self
    }

    /// Restrict drags to elements matching `handle`.
    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// Set the drag group name.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the reorder animation duration.
    pub fn animation(mut self, millis: u32) -> Self {
        self.animation = millis;
        self
    }

    /// Set the checkbox column width.
    pub fn checkbox_width(mut self, pixels: u32) -> Self {
        self.checkbox_width = pixels;
        self
    }
}
