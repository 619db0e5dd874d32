//! One level of the table.
//!
//! A [`RecursiveRow`] renders the rows of one array and, for every expanded
//! row with children, another `RecursiveRow` one level deeper. The same
//! chain carries events back up: an event raised at some level passes
//! through every ancestor, and a replacement array is substituted into the
//! ancestor's own array on the way, so the shell always receives a
//! replacement for the whole tree.

use std::sync::Arc;

use crate::column::{ColumnKey, ColumnSpec, PRIMARY_COLUMN};
use crate::drag::ListOwner;
use crate::error::TableError;
use crate::event::TableEvent;
use crate::expand::{is_expanded, toggle_expanded};
use crate::node::{Node, NodeId};
use crate::selection::{RowSelection, toggle_row};
use crate::slots::ResolvedSlots;
use crate::view::{CellView, CheckboxView, ListView, RowView, View};

/// Computes extra class names for a row.
pub type RowClassName = Arc<dyn Fn(&Node) -> Vec<String> + Send + Sync>;

/// Props shared unchanged by every level.
#[derive(Clone, Copy)]
pub struct RowProps<'a> {
    /// Effective columns, checkbox column included.
    pub columns: &'a [ColumnSpec],
    pub grid_template: &'a str,
    pub indent_size: u32,
    pub handle: Option<&'a str>,
    pub group: &'a str,
    pub animation: u32,
    pub selection: Option<&'a RowSelection>,
    pub row_class_name: Option<&'a RowClassName>,
    pub slots: &'a ResolvedSlots,
}

/// One rendered level of the tree.
#[derive(Clone)]
pub struct RecursiveRow<'p, 'a> {
    props: &'p RowProps<'p>,
    nodes: &'a [Node],
    expanded_row_keys: &'a [NodeId],
    owner: ListOwner,
    level: u16,
}

impl<'p, 'a> RecursiveRow<'p, 'a> {
    /// The top level, rendering `nodes` at level 0.
    pub fn root(
        props: &'p RowProps<'p>,
        nodes: &'a [Node],
        expanded_row_keys: &'a [NodeId],
    ) -> Self {
        Self {
            props,
            nodes,
            expanded_row_keys,
            owner: ListOwner::Root,
            level: 0,
        }
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn owner(&self) -> &ListOwner {
        &self.owner
    }

    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    /// The level rendered below `node`, if it is expanded with children.
    pub fn child(&self, node: &'a Node) -> Option<RecursiveRow<'p, 'a>> {
        if !(is_expanded(self.expanded_row_keys, &node.id) && node.has_children()) {
            return None;
        }
        Some(Self {
            props: self.props,
            nodes: node.children(),
            expanded_row_keys: self.expanded_row_keys,
            owner: ListOwner::Node(node.id.clone()),
            level: self.level + 1,
        })
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Render this level and every expanded level below it.
    pub fn render(&self) -> ListView {
        ListView {
            owner: self.owner.clone(),
            group: self.props.group.to_string(),
            handle: self.props.handle.map(str::to_string),
            animation: self.props.animation,
            level: self.level,
            rows: self.nodes.iter().map(|node| self.render_row(node)).collect(),
        }
    }

    fn render_row(&self, node: &'a Node) -> RowView {
        let classes = self
            .props
            .row_class_name
            .map(|class_name| class_name(node))
            .unwrap_or_default();
        let cells = self
            .props
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| self.render_cell(node, index, column))
            .collect();

        RowView {
            id: node.id.clone(),
            anchor: node.name.clone(),
            classes,
            grid_template: self.props.grid_template.to_string(),
            level: self.level,
            cells,
            children: self.child(node).map(|child| child.render()),
        }
    }

    fn render_cell(&self, node: &Node, index: usize, column: &ColumnSpec) -> CellView {
        let field = match &column.key {
            ColumnKey::Checkbox => return self.render_checkbox_cell(node),
            ColumnKey::Field(field) => field,
        };

        let primary = index == PRIMARY_COLUMN;
        let mut content = Vec::new();
        if primary && node.has_children() {
            content.push(View::Caret {
                node: node.id.clone(),
                expanded: is_expanded(self.expanded_row_keys, &node.id),
            });
        }
        content.push(self.props.slots.cell(index, node, field));

        CellView {
            key: column.key.clone(),
            margin_left: if primary {
                self.props.indent_size * u32::from(self.level)
            } else {
                0
            },
            content,
        }
    }

    fn render_checkbox_cell(&self, node: &Node) -> CellView {
        let checked = self
            .props
            .selection
            .is_some_and(|selection| selection.is_selected(&node.id));

        let mut content = Vec::with_capacity(3);
        content.extend(self.props.slots.checkbox_left(node));
        content.push(View::Checkbox(CheckboxView::row(node.id.clone(), checked)));
        content.extend(self.props.slots.checkbox_right(node));

        CellView {
            key: ColumnKey::Checkbox,
            margin_left: 0,
            content,
        }
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// A rendered node by id.
    pub fn find_rendered(&self, id: &NodeId) -> Option<&'a Node> {
        for node in self.nodes {
            if &node.id == id {
                return Some(node);
            }
            if let Some(found) = self.child(node).and_then(|child| child.find_rendered(id)) {
                return Some(found);
            }
        }
        None
    }

    /// The array of a rendered list.
    ///
    /// Lists of collapsed nodes and leaves are not rendered.
    pub fn rendered_list(&self, owner: &ListOwner) -> Option<&'a [Node]> {
        if &self.owner == owner {
            return Some(self.nodes);
        }
        self.nodes
            .iter()
            .filter_map(|node| self.child(node))
            .find_map(|child| child.rendered_list(owner))
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Toggle the caret of node `id`.
    ///
    /// Returns the replacement expanded list, or `None` when the node is not
    /// rendered or has no caret.
    pub fn toggle(&self, id: &NodeId) -> Option<TableEvent> {
        self.route_to_node(id, &|level, node| {
            if !node.has_children() {
                return None;
            }
            log::trace!("level {} toggles node {}", level.level, node.id);
            Some(TableEvent::UpdateExpandedRowKeys(toggle_expanded(
                level.expanded_row_keys,
                &node.id,
            )))
        })
    }

    /// Toggle the checkbox of node `id`, handing the new selection to the
    /// selection owner.
    ///
    /// Returns whether a change was emitted; unrendered rows are ignored.
    pub fn on_check_change(&self, id: &NodeId, checked: bool) -> Result<bool, TableError> {
        let selection = self.props.selection.ok_or(TableError::SelectionDisabled)?;
        if self.find_rendered(id).is_none() {
            log::trace!("checkbox toggle for unrendered node {id} ignored");
            return Ok(false);
        }
        selection.emit(toggle_row(&selection.selected_row_keys, id, checked));
        Ok(true)
    }

    /// Hand `items` to the level owning `owner`, returning the replacement
    /// for this level's array.
    pub fn replace_list(&self, owner: &ListOwner, items: &[Node]) -> Option<TableEvent> {
        self.route(owner, &|_| Some(TableEvent::UpdateModelValue(items.to_vec())))
    }

    /// Raise a drag lifecycle event at the level owning `owner` and carry it
    /// up to this level unchanged.
    pub fn forward(&self, owner: &ListOwner, event: &TableEvent) -> Option<TableEvent> {
        self.route(owner, &|_| Some(event.clone()))
    }

    /// Run `handler` at the level owning `owner` and bubble its event up.
    fn route(
        &self,
        owner: &ListOwner,
        handler: &dyn Fn(&RecursiveRow<'p, 'a>) -> Option<TableEvent>,
    ) -> Option<TableEvent> {
        if &self.owner == owner {
            return handler(self);
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let Some(child) = self.child(node) else {
                continue;
            };
            if let Some(event) = child.route(owner, handler) {
                return Some(self.bubble(index, event));
            }
        }
        None
    }

    /// Run `handler` at the level rendering node `id` and bubble its event up.
    fn route_to_node(
        &self,
        id: &NodeId,
        handler: &dyn Fn(&RecursiveRow<'p, 'a>, &'a Node) -> Option<TableEvent>,
    ) -> Option<TableEvent> {
        for (index, node) in self.nodes.iter().enumerate() {
            if &node.id == id {
                return handler(self, node);
            }
            let Some(child) = self.child(node) else {
                continue;
            };
            if let Some(event) = child.route_to_node(id, handler) {
                return Some(self.bubble(index, event));
            }
        }
        None
    }

    /// Receive an event from the child level below `nodes[index]`.
    ///
    /// A replacement array from the child becomes that node's children in a
    /// replacement of this level; everything else passes through.
    fn bubble(&self, index: usize, event: TableEvent) -> TableEvent {
        match event {
            TableEvent::UpdateModelValue(children) => {
                let mut nodes = self.nodes.to_vec();
                nodes[index].children = Some(children);
                TableEvent::UpdateModelValue(nodes)
            }
            other => other,
        }
    }
}
