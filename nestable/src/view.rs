//! Render output.
//!
//! Rendering produces a plain description of the table: a header and a
//! nested list of rows, one [`ListView`] per rendered level. Hosts draw it
//! however they like and turn clicks back into [`Interaction`]s.

use crate::column::ColumnKey;
use crate::drag::ListOwner;
use crate::event::Interaction;
use crate::node::NodeId;
use crate::selection::CheckState;

/// What a checkbox toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckTarget {
    /// The header "select all" checkbox.
    All,
    /// One row's checkbox.
    Row(NodeId),
}

/// A checkbox with its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxView {
    pub target: CheckTarget,
    pub state: CheckState,
}

impl CheckboxView {
    /// The header checkbox.
    pub fn all(state: CheckState) -> Self {
        Self {
            target: CheckTarget::All,
            state,
        }
    }

    /// A row checkbox.
    pub fn row(id: NodeId, checked: bool) -> Self {
        let state = if checked {
            CheckState::CHECKED
        } else {
            CheckState::UNCHECKED
        };
        Self {
            target: CheckTarget::Row(id),
            state,
        }
    }

    /// The interaction produced by clicking this checkbox.
    ///
    /// Clicking an indeterminate checkbox checks it.
    pub fn toggle(&self) -> Interaction {
        let checked = !self.state.checked;
        match &self.target {
            CheckTarget::All => Interaction::ToggleAll { checked },
            CheckTarget::Row(id) => Interaction::ToggleRow {
                id: id.clone(),
                checked,
            },
        }
    }

    /// Glyph for terminal hosts.
    pub fn glyph(&self) -> &'static str {
        if self.state.checked {
            "■"
        } else if self.state.indeterminate {
            "▣"
        } else {
            "□"
        }
    }
}

/// A piece of cell content.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Renders nothing.
    Empty,
    Text(String),
    Checkbox(CheckboxView),
    /// Expand caret: points down when expanded, right when collapsed.
    Caret { node: NodeId, expanded: bool },
    /// Several pieces side by side.
    Group(Vec<View>),
    /// Content carrying a class name.
    Styled { class: String, child: Box<View> },
}

impl View {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn styled(class: impl Into<String>, child: View) -> Self {
        Self::Styled {
            class: class.into(),
            child: Box::new(child),
        }
    }

    /// The interaction produced by clicking this view, if it is clickable.
    pub fn click(&self) -> Option<Interaction> {
        match self {
            Self::Checkbox(checkbox) => Some(checkbox.toggle()),
            Self::Caret { node, .. } => Some(Interaction::ToggleExpand(node.clone())),
            _ => None,
        }
    }

    /// Flatten to text for terminal hosts and assertions.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Checkbox(checkbox) => checkbox.glyph().to_string(),
            Self::Caret { expanded: true, .. } => "▼".to_string(),
            Self::Caret { expanded: false, .. } => "▶".to_string(),
            Self::Group(children) => children
                .iter()
                .map(View::plain_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Styled { child, .. } => child.plain_text(),
        }
    }
}

/// One cell of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub key: ColumnKey,
    /// Indentation in pixels.
    pub margin_left: u32,
    pub content: Vec<View>,
}

impl CellView {
    pub fn plain_text(&self) -> String {
        View::Group(self.content.clone()).plain_text()
    }

    /// The caret in this cell, if any.
    pub fn caret(&self) -> Option<&View> {
        self.content.iter().find(|v| matches!(v, View::Caret { .. }))
    }

    /// The checkbox in this cell, if any.
    pub fn checkbox(&self) -> Option<&CheckboxView> {
        self.content.iter().find_map(|v| match v {
            View::Checkbox(checkbox) => Some(checkbox),
            _ => None,
        })
    }
}

/// One row, plus its rendered children when expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: NodeId,
    /// Element anchor (the node name).
    pub anchor: String,
    /// Classes from the row class-name function.
    pub classes: Vec<String>,
    pub grid_template: String,
    pub level: u16,
    pub cells: Vec<CellView>,
    pub children: Option<ListView>,
}

/// One rendered level: a draggable list of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub owner: ListOwner,
    /// Shared drag group.
    pub group: String,
    /// Drag handle; `None` makes whole rows draggable.
    pub handle: Option<String>,
    /// Reorder animation in milliseconds.
    pub animation: u32,
    pub level: u16,
    pub rows: Vec<RowView>,
}

/// A row as seen from a flat, top-to-bottom walk of the table.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub row: &'a RowView,
    /// The list the row belongs to.
    pub owner: &'a ListOwner,
    /// Position within that list.
    pub index: usize,
}

impl ListView {
    /// Every rendered row, top to bottom.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        fn walk<'a>(list: &'a ListView, out: &mut Vec<VisibleRow<'a>>) {
            for (index, row) in list.rows.iter().enumerate() {
                out.push(VisibleRow {
                    row,
                    owner: &list.owner,
                    index,
                });
                if let Some(children) = &row.children {
                    walk(children, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Find a rendered row by id.
    pub fn find_row(&self, id: &NodeId) -> Option<&RowView> {
        self.visible_rows()
            .into_iter()
            .find(|visible| &visible.row.id == id)
            .map(|visible| visible.row)
    }

    /// The list and position a rendered row occupies.
    pub fn locate(&self, id: &NodeId) -> Option<(ListOwner, usize)> {
        self.visible_rows()
            .into_iter()
            .find(|visible| &visible.row.id == id)
            .map(|visible| (visible.owner.clone(), visible.index))
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub key: ColumnKey,
    pub content: View,
}

/// The header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub grid_template: String,
    pub cells: Vec<HeaderCell>,
}

impl HeaderView {
    /// The "select all" checkbox, when selection is enabled.
    pub fn checkbox(&self) -> Option<&CheckboxView> {
        self.cells.iter().find_map(|cell| match &cell.content {
            View::Checkbox(checkbox) => Some(checkbox),
            _ => None,
        })
    }
}

/// A fully rendered table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub header: HeaderView,
    pub body: ListView,
}
