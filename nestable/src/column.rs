//! Column configuration and grid track computation.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Index of the column that carries indentation and the expand caret.
///
/// This is the first user column when selection is enabled, and the second
/// user column otherwise.
pub const PRIMARY_COLUMN: usize = 1;

/// Identifies what a column displays.
///
/// The injected checkbox column is its own variant, so no user `dataIndex`
/// can ever be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// The synthetic selection column.
    Checkbox,
    /// A user column bound to a node field.
    Field(String),
}

impl ColumnKey {
    pub fn field(key: impl Into<String>) -> Self {
        Self::Field(key.into())
    }

    /// The bound field name, if this is a user column.
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(key) => Some(key),
            Self::Checkbox => None,
        }
    }
}

/// Requested column width.
#[derive(Debug, Clone, PartialEq)]
pub enum Width {
    /// Pixel width.
    Px(f64),
    /// Raw grid track size, e.g. `2fr` or `minmax(100px, 1fr)`.
    Track(String),
}

impl Width {
    /// The grid track this width produces.
    ///
    /// Zero, negative, non-finite and blank widths fall back to `1fr`.
    pub fn track(&self) -> String {
        match self {
            Self::Px(px) if px.is_finite() && *px > 0.0 => {
                if px.fract() == 0.0 && *px < 1e15 {
                    format!("{}px", *px as i64)
                } else {
                    format!("{px}px")
                }
            }
            Self::Track(raw) if !raw.trim().is_empty() => raw.clone(),
            _ => FLEX_TRACK.to_string(),
        }
    }
}

impl From<u32> for Width {
    fn from(px: u32) -> Self {
        Self::Px(f64::from(px))
    }
}

impl From<i32> for Width {
    fn from(px: i32) -> Self {
        Self::Px(f64::from(px))
    }
}

impl From<f64> for Width {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl From<&str> for Width {
    fn from(track: &str) -> Self {
        Self::Track(track.to_string())
    }
}

impl From<String> for Width {
    fn from(track: String) -> Self {
        Self::Track(track)
    }
}

const FLEX_TRACK: &str = "1fr";

/// Column configuration.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     ColumnSpec::new("name", "Name"),
///     ColumnSpec::new("size", "Size").width(120),
///     ColumnSpec::new("kind", "Kind").width("2fr"),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub key: ColumnKey,
    pub title: String,
    pub width: Option<Width>,
}

impl ColumnSpec {
    /// Create a user column bound to `data_index`.
    pub fn new(data_index: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: ColumnKey::Field(data_index.into()),
            title: title.into(),
            width: None,
        }
    }

    /// The synthetic checkbox column.
    pub fn checkbox(width: u32) -> Self {
        Self {
            key: ColumnKey::Checkbox,
            title: " ".to_string(),
            width: Some(Width::from(width)),
        }
    }

    pub fn width(mut self, width: impl Into<Width>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.key == ColumnKey::Checkbox
    }

    /// The grid track for this column; `1fr` when no width is set.
    pub fn track(&self) -> String {
        self.width
            .as_ref()
            .map(Width::track)
            .unwrap_or_else(|| FLEX_TRACK.to_string())
    }
}

impl<'de> Deserialize<'de> for ColumnSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct RawColumn {
            data_index: String,
            #[serde(default)]
            title: String,
            #[serde(default)]
            width: Value,
        }

        let raw = RawColumn::deserialize(deserializer)?;
        // Anything other than a number or string is tolerated as "no width".
        let width = match raw.width {
            Value::Number(n) => n.as_f64().map(Width::Px),
            Value::String(s) => Some(Width::Track(s)),
            _ => None,
        };
        Ok(Self {
            key: ColumnKey::Field(raw.data_index),
            title: raw.title,
            width,
        })
    }
}

/// The columns actually rendered: the checkbox column first when selection
/// is enabled, then the user columns as given.
pub fn effective_columns(
    columns: &[ColumnSpec],
    selection: bool,
    checkbox_width: u32,
) -> Vec<ColumnSpec> {
    if selection {
        std::iter::once(ColumnSpec::checkbox(checkbox_width))
            .chain(columns.iter().cloned())
            .collect()
    } else {
        columns.to_vec()
    }
}

/// The `grid-template-columns` value for a set of columns.
pub fn grid_template(columns: &[ColumnSpec]) -> String {
    columns
        .iter()
        .map(ColumnSpec::track)
        .collect::<Vec<_>>()
        .join(" ")
}
