//! A nested, drag-and-droppable tree table.
//!
//! [`NestTable`] renders a tree of [`Node`]s as indented rows with expand
//! carets, optional row checkboxes with a tri-state "select all" header, and
//! drag-and-drop between any two rendered levels. The table never owns the
//! tree: the host passes a [`TableData`] snapshot in and applies the
//! [`TableEvent`]s that come back out.

pub mod column;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod expand;
pub mod model;
pub mod node;
pub mod row;
pub mod selection;
pub mod shell;
pub mod slots;
pub mod tree;
pub mod view;

pub use column::{ColumnKey, ColumnSpec, Width};
pub use config::TableConfig;
pub use drag::{ListOwner, SortableEvent};
pub use error::TableError;
pub use event::{Interaction, TableEvent};
pub use model::{Mailbox, TableData, TableModel};
pub use node::{Node, NodeId};
pub use row::{RecursiveRow, RowProps};
pub use selection::{CheckState, RowSelection};
pub use shell::NestTable;
pub use slots::{SlotKey, SlotProps, Slots};
pub use view::{CellView, CheckboxView, ListView, RowView, TableView, View};

pub mod prelude {
    pub use crate::column::{ColumnKey, ColumnSpec, Width};
    pub use crate::config::TableConfig;
    pub use crate::drag::{ListOwner, SortableEvent};
    pub use crate::error::TableError;
    pub use crate::event::{Interaction, TableEvent};
    pub use crate::model::{Mailbox, TableData, TableModel};
    pub use crate::node::{Node, NodeId};
    pub use crate::selection::{CheckState, RowSelection};
    pub use crate::shell::NestTable;
    pub use crate::slots::{SlotKey, SlotProps};
    pub use crate::tree::{all_ids, count_nodes, find_node, flatten, validate_unique_ids};
    pub use crate::view::{CheckTarget, CheckboxView, TableView, View, VisibleRow};
}
