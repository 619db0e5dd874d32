//! The table shell.
//!
//! [`NestTable`] owns the column configuration and the header, derives the
//! "select all" state from the whole tree, and delegates the rows to a
//! [`RecursiveRow`] at level 0. It never owns the tree, the expanded list or
//! the selection: each render and dispatch receives a [`TableData`]
//! snapshot, and every change leaves as a [`TableEvent`] or through the
//! selection's `on_change`.
//!
//! # Example
//!
//! ```ignore
//! use nestable::prelude::*;
//!
//! let mut model = TableModel::new(nodes);
//! let mailbox = Mailbox::new();
//! let mut table = NestTable::new(TableConfig::new(vec![
//!     ColumnSpec::new("name", "Name"),
//!     ColumnSpec::new("size", "Size").width(120),
//! ]))
//! .row_selection(RowSelection::new(vec![], mailbox.sender()));
//!
//! let view = table.render(model.data());
//! let events = table.dispatch(model.data(), Interaction::ToggleExpand(NodeId::from(1)))?;
//! model.apply_all(&events);
//! ```

use crate::column::{ColumnKey, ColumnSpec, effective_columns, grid_template};
use crate::config::TableConfig;
use crate::drag::{ListOwner, SortableEvent, Sortable, insert_at, remove_at, reorder};
use crate::error::TableError;
use crate::event::{Interaction, TableEvent};
use crate::model::TableData;
use crate::node::{Node, NodeId};
use crate::row::{RecursiveRow, RowClassName, RowProps};
use crate::selection::{CheckAllWatch, CheckState, RowSelection};
use crate::slots::{ResolvedSlots, SlotKey, SlotProps, Slots};
use crate::tree::{all_ids, count_nodes, list_of, subtree_contains};
use crate::view::{CheckboxView, HeaderCell, HeaderView, TableView, View};

/// A nested, drag-and-droppable tree table.
pub struct NestTable {
    config: TableConfig,
    selection: Option<RowSelection>,
    row_class_name: Option<RowClassName>,
    slots: Slots,
    /// Effective columns (checkbox column included).
    columns: Vec<ColumnSpec>,
    grid_template: String,
    check_all: CheckAllWatch,
    sortable: Sortable,
}

impl std::fmt::Debug for NestTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NestTable")
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("slots", &self.slots)
            .field("grid_template", &self.grid_template)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

impl NestTable {
    pub fn new(config: TableConfig) -> Self {
        let sortable = Sortable::new(config.group.clone(), config.handle.clone());
        let mut table = Self {
            config,
            selection: None,
            row_class_name: None,
            slots: Slots::new(),
            columns: Vec::new(),
            grid_template: String::new(),
            check_all: CheckAllWatch::new(),
            sortable,
        };
        table.rebuild_columns();
        table
    }

    /// Enable row selection.
    pub fn row_selection(mut self, selection: RowSelection) -> Self {
        self.set_row_selection(Some(selection));
        self
    }

    /// Set the row class-name function.
    pub fn row_class_name(
        mut self,
        class_name: impl Fn(&Node) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.row_class_name = Some(std::sync::Arc::new(class_name));
        self
    }

    /// Register a slot renderer.
    pub fn slot(
        mut self,
        key: SlotKey,
        render: impl for<'a> Fn(SlotProps<'a>) -> View + Send + Sync + 'static,
    ) -> Self {
        self.slots.insert(key, render);
        self
    }

    // -------------------------------------------------------------------------
    // Props
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Replace the user columns.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) {
        self.config.columns = columns;
        self.rebuild_columns();
    }

    /// Enable, replace or remove row selection.
    pub fn set_row_selection(&mut self, selection: Option<RowSelection>) {
        let toggled = self.selection.is_some() != selection.is_some();
        self.selection = selection;
        if toggled {
            self.rebuild_columns();
        }
    }

    /// Update the selected ids after the owner applied a change.
    ///
    /// Does nothing when selection is disabled.
    pub fn set_selected_row_keys(&mut self, keys: Vec<NodeId>) {
        if let Some(selection) = &mut self.selection {
            selection.selected_row_keys = keys;
        }
    }

    pub fn selection(&self) -> Option<&RowSelection> {
        self.selection.as_ref()
    }

    pub fn set_indent_size(&mut self, pixels: u32) {
        self.config.indent_size = pixels;
    }

    pub fn set_handle(&mut self, handle: Option<String>) {
        self.sortable.set_handle(handle.clone());
        self.config.handle = handle;
    }

    /// Effective columns, checkbox column first when selection is enabled.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn grid_template(&self) -> &str {
        &self.grid_template
    }

    pub fn is_dragging(&self) -> bool {
        self.sortable.is_dragging()
    }

    /// The drag in progress.
    pub fn active_drag(&self) -> Option<&SortableEvent> {
        self.sortable.active()
    }

    fn rebuild_columns(&mut self) {
        self.columns = effective_columns(
            &self.config.columns,
            self.selection.is_some(),
            self.config.checkbox_width,
        );
        self.grid_template = grid_template(&self.columns);
        log::debug!("grid template: {}", self.grid_template);
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Header checkbox state for the given tree.
    ///
    /// Recomputed whenever the selected count or the node count changes.
    pub fn check_all_state(&mut self, nodes: &[Node]) -> CheckState {
        match &self.selection {
            Some(selection) => self
                .check_all
                .observe(selection.selected_row_keys.len(), count_nodes(nodes)),
            None => CheckState::UNCHECKED,
        }
    }

    /// Render the header and every visible row.
    pub fn render(&mut self, data: TableData<'_>) -> TableView {
        let check_all = self.check_all_state(data.model_value);
        let header = self.render_header(check_all);

        let slots = ResolvedSlots::resolve(&self.slots, &self.columns);
        let props = row_props(
            &self.config,
            &self.columns,
            &self.grid_template,
            self.selection.as_ref(),
            self.row_class_name.as_ref(),
            &slots,
        );
        let body = RecursiveRow::root(&props, data.model_value, data.expanded_row_keys).render();

        TableView { header, body }
    }

    fn render_header(&self, check_all: CheckState) -> HeaderView {
        let cells = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                content: match column.key {
                    ColumnKey::Checkbox => View::Checkbox(CheckboxView::all(check_all)),
                    ColumnKey::Field(_) => View::Text(column.title.clone()),
                },
            })
            .collect();
        HeaderView {
            grid_template: self.grid_template.clone(),
            cells,
        }
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Handle one interaction against the current snapshot.
    ///
    /// Returns the events for the owner, in the order they must be applied.
    /// Selection changes go to the selection's `on_change` instead.
    pub fn dispatch(
        &mut self,
        data: TableData<'_>,
        interaction: Interaction,
    ) -> Result<Vec<TableEvent>, TableError> {
        log::debug!("dispatch {interaction:?}");
        let slots = ResolvedSlots::resolve(&self.slots, &self.columns);
        let props = row_props(
            &self.config,
            &self.columns,
            &self.grid_template,
            self.selection.as_ref(),
            self.row_class_name.as_ref(),
            &slots,
        );
        let pass = Pass { props: &props };
        let sortable = &mut self.sortable;

        let events = match interaction {
            Interaction::ToggleExpand(id) => pass.root(data).toggle(&id).into_iter().collect(),
            Interaction::ToggleRow { id, checked } => {
                pass.root(data).on_check_change(&id, checked)?;
                Vec::new()
            }
            Interaction::ToggleAll { checked } => {
                pass.on_check_all_change(data.model_value, checked)?;
                Vec::new()
            }
            Interaction::DragStart {
                list,
                index,
                target,
            } => pass.drag_start(sortable, data, list, index, target.as_deref())?,
            Interaction::DragOver { list, index } => pass.drag_over(sortable, data, list, index)?,
            Interaction::Drop => pass.drop(sortable, data)?,
            Interaction::DragCancel => {
                let event = sortable.cancel()?;
                vec![pass.forward(data, TableEvent::End(event))]
            }
        };
        for event in &events {
            log::debug!("emit {}", event.name());
        }
        Ok(events)
    }
}

fn row_props<'a>(
    config: &'a TableConfig,
    columns: &'a [ColumnSpec],
    grid_template: &'a str,
    selection: Option<&'a RowSelection>,
    row_class_name: Option<&'a RowClassName>,
    slots: &'a ResolvedSlots,
) -> RowProps<'a> {
    RowProps {
        columns,
        grid_template,
        indent_size: config.indent_size,
        handle: config.handle.as_deref(),
        group: &config.group,
        animation: config.animation,
        selection,
        row_class_name,
        slots,
    }
}

/// One dispatch: the props, with slots resolved once, shared by every
/// level built while handling it.
struct Pass<'p> {
    props: &'p RowProps<'p>,
}

impl<'p> Pass<'p> {
    fn root<'d>(&self, data: TableData<'d>) -> RecursiveRow<'p, 'd> {
        RecursiveRow::root(self.props, data.model_value, data.expanded_row_keys)
    }

    fn on_check_all_change(&self, nodes: &[Node], checked: bool) -> Result<(), TableError> {
        let selection = self.props.selection.ok_or_else(|| {
            log::warn!("select-all toggled without row selection");
            TableError::SelectionDisabled
        })?;
        if checked {
            selection.emit(all_ids(nodes));
        } else {
            selection.emit(Vec::new());
        }
        Ok(())
    }

    /// Carry a drag lifecycle event from the list it belongs to up to the
    /// shell.
    fn forward(&self, data: TableData<'_>, event: TableEvent) -> TableEvent {
        let owner = match &event {
            TableEvent::Start(e) | TableEvent::End(e) | TableEvent::Move(e) => e.from.clone(),
            _ => ListOwner::Root,
        };
        self.root(data).forward(&owner, &event).unwrap_or_else(|| {
            log::trace!("{owner} no longer rendered; emitting {} from the shell", event.name());
            event
        })
    }

    /// The array of a rendered list, or why it cannot be used.
    fn rendered_list<'d>(
        &self,
        data: TableData<'d>,
        owner: &ListOwner,
    ) -> Result<&'d [Node], TableError> {
        if let Some(list) = self.root(data).rendered_list(owner) {
            return Ok(list);
        }
        match owner {
            ListOwner::Node(id) if list_of(data.model_value, owner).is_some() => {
                Err(TableError::ListNotRendered(id.clone()))
            }
            _ => Err(TableError::UnknownList(owner.clone())),
        }
    }

    fn drag_start(
        &self,
        sortable: &mut Sortable,
        data: TableData<'_>,
        list: ListOwner,
        index: usize,
        target: Option<&str>,
    ) -> Result<Vec<TableEvent>, TableError> {
        if !sortable.accepts(target) {
            log::debug!("drag start on {target:?} ignored: outside the handle");
            return Ok(Vec::new());
        }
        let items = self.rendered_list(data, &list)?;
        let item = items
            .get(index)
            .ok_or_else(|| TableError::IndexOutOfRange {
                owner: list.clone(),
                index,
                len: items.len(),
            })?
            .id
            .clone();

        let event = sortable.start(item, list, index)?;
        Ok(vec![self.forward(data, TableEvent::Start(event))])
    }

    fn drag_over(
        &self,
        sortable: &mut Sortable,
        data: TableData<'_>,
        list: ListOwner,
        index: usize,
    ) -> Result<Vec<TableEvent>, TableError> {
        let active = sortable.active().ok_or(TableError::NoActiveDrag)?.clone();
        let items = self.rendered_list(data, &list)?;

        // Within its own list the row can take any existing slot; elsewhere
        // it can also go after the last row.
        let len = if list == active.from {
            items.len().saturating_sub(1)
        } else {
            items.len()
        };
        if index > len {
            return Err(TableError::IndexOutOfRange {
                owner: list,
                index,
                len: items.len(),
            });
        }
        if let ListOwner::Node(target) = &list {
            let source = self.rendered_list(data, &active.from)?;
            if let Some(moved) = source.get(active.old_index)
                && subtree_contains(moved, target)
            {
                log::warn!("rejected drop of {} into its own subtree", moved.id);
                return Err(TableError::DropIntoSelf(moved.id.clone()));
            }
        }

        let event = sortable.hover(list, index)?;
        Ok(vec![self.forward(data, TableEvent::Move(event))])
    }

    /// Release the dragged row. The drag only ends once its updates are
    /// computed; a rejected drop leaves it active so it can be cancelled.
    fn drop(
        &self,
        sortable: &mut Sortable,
        data: TableData<'_>,
    ) -> Result<Vec<TableEvent>, TableError> {
        let active = sortable.active().ok_or(TableError::NoActiveDrag)?;
        let mut events = self.drop_updates(data, active)?;
        let event = sortable.finish()?;
        events.push(self.forward(data, TableEvent::End(event)));
        Ok(events)
    }

    /// Replacement trees for a finished drag.
    ///
    /// A move across lists yields two replacements: the source list without
    /// the row, then the target list with it, the second computed from the
    /// first so applying them in order is always consistent.
    fn drop_updates(
        &self,
        data: TableData<'_>,
        event: &SortableEvent,
    ) -> Result<Vec<TableEvent>, TableError> {
        if event.is_noop() {
            return Ok(Vec::new());
        }

        let source = self.rendered_list(data, &event.from)?;
        if event.from == event.to {
            let items = reorder(source, event.old_index, event.new_index);
            let tree = self.replace_list(data, &event.from, &items)?;
            return Ok(vec![TableEvent::UpdateModelValue(tree)]);
        }

        let (moved, remaining) =
            remove_at(source, event.old_index).ok_or_else(|| TableError::IndexOutOfRange {
                owner: event.from.clone(),
                index: event.old_index,
                len: source.len(),
            })?;
        if let ListOwner::Node(target) = &event.to
            && subtree_contains(&moved, target)
        {
            log::warn!("rejected drop of {} into its own subtree", moved.id);
            return Err(TableError::DropIntoSelf(moved.id));
        }

        let after_removal = self.replace_list(data, &event.from, &remaining)?;
        let after = TableData::new(&after_removal, data.expanded_row_keys);
        let target = self.rendered_list(after, &event.to)?;
        let items = insert_at(target, event.new_index, moved);
        let after_insertion = self.replace_list(after, &event.to, &items)?;

        log::debug!(
            "moved {} from {} to {} at {}",
            event.item,
            event.from,
            event.to,
            event.new_index
        );
        Ok(vec![
            TableEvent::UpdateModelValue(after_removal),
            TableEvent::UpdateModelValue(after_insertion),
        ])
    }

    /// The whole tree after `owner`'s list is replaced by `items`.
    fn replace_list(
        &self,
        data: TableData<'_>,
        owner: &ListOwner,
        items: &[Node],
    ) -> Result<Vec<Node>, TableError> {
        match self.root(data).replace_list(owner, items) {
            Some(TableEvent::UpdateModelValue(tree)) => Ok(tree),
            _ => Err(TableError::UnknownList(owner.clone())),
        }
    }
}
