//! The interactive host.
//!
//! Owns the tree, the expanded ids and the selection, renders the table
//! into screen lines and turns keys and clicks into table interactions.

use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use nestable::drag::reorder;
use nestable::prelude::*;
use nestable::tree::list_of;

use crate::grid::{self, GAP};
use crate::sample;
use crate::terminal::{Line, Style, Terminal};

const HELP: &str = "↑↓ move  ←→ collapse/expand  space select  a all  d drag  q quit";
const DRAG_HELP: &str = "↑↓ move  > into  < out  d drop  esc cancel";

/// A clickable span of the last frame.
#[derive(Debug, Clone)]
struct Hit {
    y: u16,
    x: u16,
    width: u16,
    interaction: Interaction,
}

/// Where a visible row of the last frame sits in the tree.
#[derive(Debug, Clone)]
struct RowSlot {
    id: NodeId,
    owner: ListOwner,
    index: usize,
}

pub struct App {
    table: NestTable,
    model: TableModel,
    mailbox: Mailbox,
    rows: Vec<RowSlot>,
    hits: Vec<Hit>,
    cursor: usize,
    scroll: usize,
    /// Row the cursor should land on once it is rendered.
    follow: Option<NodeId>,
    status: String,
    quit: bool,
}

impl App {
    pub fn new(config: TableConfig, nodes: Vec<Node>) -> Self {
        let mailbox = Mailbox::new();
        let table = sample::decorate(NestTable::new(config))
            .row_selection(RowSelection::new(Vec::new(), mailbox.sender()));
        Self {
            table,
            model: TableModel::new(nodes),
            mailbox,
            rows: Vec::new(),
            hits: Vec::new(),
            cursor: 0,
            scroll: 0,
            follow: None,
            status: String::new(),
            quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal) -> io::Result<()> {
        while !self.quit {
            let (width, height) = terminal.size()?;
            let lines = self.frame(width, height);
            terminal.draw(&lines)?;
            for event in terminal.poll(Some(Duration::from_millis(250)))? {
                self.handle_event(event);
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Render the table into `height` screen lines.
    fn frame(&mut self, width: u16, height: u16) -> Vec<Line> {
        let view = self.table.render(self.model.data());
        let widths = grid::resolve(&view.header.grid_template, width);
        self.hits.clear();

        let mut lines = Vec::with_capacity(usize::from(height));
        let header: Vec<_> = view
            .header
            .cells
            .iter()
            .map(|cell| (std::slice::from_ref(&cell.content), 0))
            .collect();
        let text = self.layout_cells(&header, &widths, 0);
        lines.push(Line::new(
            text,
            Style {
                bold: true,
                underline: true,
                ..Style::default()
            },
        ));

        let visible = view.body.visible_rows();
        self.rows = visible
            .iter()
            .map(|v| RowSlot {
                id: v.row.id.clone(),
                owner: v.owner.clone(),
                index: v.index,
            })
            .collect();
        if let Some(id) = self.follow.take() {
            match self.rows.iter().position(|row| row.id == id) {
                Some(position) => self.cursor = position,
                None => self.follow = Some(id),
            }
        }
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));

        let body_height = usize::from(height.saturating_sub(2));
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if body_height > 0 && self.cursor >= self.scroll + body_height {
            self.scroll = self.cursor + 1 - body_height;
        }

        let active = self.table.active_drag().cloned();
        for (i, visible) in visible.iter().enumerate().skip(self.scroll).take(body_height) {
            let y = (1 + i - self.scroll) as u16;
            let cells: Vec<_> = visible
                .row
                .cells
                .iter()
                .map(|cell| (cell.content.as_slice(), cell.margin_left))
                .collect();
            let text = self.layout_cells(&cells, &widths, y);

            let dragged = active.as_ref().is_some_and(|a| a.item == visible.row.id);
            let target = active
                .as_ref()
                .is_some_and(|a| &a.to == visible.owner && a.new_index == visible.index);
            lines.push(Line::new(
                text,
                Style {
                    bold: visible.row.classes.iter().any(|c| c == "folder"),
                    dim: dragged,
                    reverse: i == self.cursor,
                    underline: target && !dragged,
                },
            ));
        }

        lines.resize(usize::from(height.saturating_sub(1)), Line::default());
        lines.push(Line::new(
            self.status_text(active.as_ref()),
            Style {
                dim: true,
                ..Style::default()
            },
        ));
        lines
    }

    /// Lay out one line of cells, recording clickable spans at row `y`.
    fn layout_cells(&mut self, cells: &[(&[View], u32)], widths: &[u16], y: u16) -> String {
        let mut line = String::new();
        let mut x = 0u16;
        for ((content, margin_left), &width) in cells.iter().zip(widths) {
            let indent = if *margin_left == 0 {
                0
            } else {
                grid::px_to_cells(f64::from(*margin_left))
            };
            let mut text = " ".repeat(usize::from(indent));
            let mut pos = x.saturating_add(indent);
            for view in content.iter() {
                let piece = view.plain_text();
                if piece.is_empty() {
                    continue;
                }
                let piece_width = grid::text_width(&piece);
                if let Some(interaction) = view.click() {
                    self.hits.push(Hit {
                        y,
                        x: pos,
                        width: piece_width,
                        interaction,
                    });
                }
                text.push_str(&piece);
                text.push(' ');
                pos = pos.saturating_add(piece_width + 1);
            }
            line.push_str(&grid::fit(&text, width));
            line.push_str(&" ".repeat(usize::from(GAP)));
            x = x.saturating_add(width + GAP);
        }
        line
    }

    fn status_text(&self, active: Option<&SortableEvent>) -> String {
        match active {
            Some(drag) => format!(
                "moving {} to {} at {}  |  {DRAG_HELP}",
                drag.item, drag.to, drag.new_index
            ),
            None if !self.status.is_empty() => format!("{}  |  {HELP}", self.status),
            None => HELP.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            _ => {}
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        if let Some(active) = self.table.active_drag().cloned() {
            self.on_drag_key(key.code, active);
            return;
        }

        let last = self.rows.len().saturating_sub(1);
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(last),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = last,
            KeyCode::Right => self.expand(),
            KeyCode::Left => self.collapse(),
            KeyCode::Enter => {
                if let Some(row) = self.current() {
                    self.dispatch(Interaction::ToggleExpand(row.id));
                }
            }
            KeyCode::Char(' ') => {
                if let Some(row) = self.current() {
                    let checked = !self.model.selected_row_keys.contains(&row.id);
                    self.dispatch(Interaction::ToggleRow {
                        id: row.id,
                        checked,
                    });
                }
            }
            KeyCode::Char('a') => {
                let checked = !self.table.check_all_state(&self.model.nodes).checked;
                self.dispatch(Interaction::ToggleAll { checked });
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.current() {
                    let target = self.table.config().handle.clone();
                    self.dispatch(Interaction::DragStart {
                        list: row.owner,
                        index: row.index,
                        target,
                    });
                }
            }
            _ => {}
        }
    }

    fn on_drag_key(&mut self, code: KeyCode, active: SortableEvent) {
        match code {
            KeyCode::Up => {
                if let Some(index) = active.new_index.checked_sub(1) {
                    self.dispatch(Interaction::DragOver {
                        list: active.to,
                        index,
                    });
                }
            }
            KeyCode::Down => self.dispatch(Interaction::DragOver {
                list: active.to,
                index: active.new_index + 1,
            }),
            KeyCode::Char('>') => self.drag_into_previous(&active),
            KeyCode::Char('<') => self.drag_out(&active),
            KeyCode::Char('d') | KeyCode::Enter => {
                self.dispatch(Interaction::Drop);
                self.follow = Some(active.item);
            }
            KeyCode::Esc => self.dispatch(Interaction::DragCancel),
            KeyCode::Char('q') => {
                self.dispatch(Interaction::DragCancel);
                self.quit = true;
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .hits
                    .iter()
                    .find(|hit| {
                        hit.y == mouse.row
                            && mouse.column >= hit.x
                            && mouse.column < hit.x.saturating_add(hit.width)
                    })
                    .map(|hit| hit.interaction.clone());
                if let Some(interaction) = hit {
                    self.dispatch(interaction);
                } else if mouse.row > 0 {
                    let row = self.scroll + usize::from(mouse.row) - 1;
                    if row < self.rows.len() {
                        self.cursor = row;
                    }
                }
            }
            MouseEventKind::ScrollUp => self.cursor = self.cursor.saturating_sub(1),
            MouseEventKind::ScrollDown => {
                self.cursor = (self.cursor + 1).min(self.rows.len().saturating_sub(1));
            }
            _ => {}
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    fn current(&self) -> Option<RowSlot> {
        self.rows.get(self.cursor).cloned()
    }

    fn is_expanded(&self, id: &NodeId) -> bool {
        self.model.expanded_row_keys.contains(id)
    }

    /// Expand the current row, or step into it when already expanded.
    fn expand(&mut self) {
        let Some(row) = self.current() else { return };
        let Some(node) = find_node(&self.model.nodes, &row.id) else {
            return;
        };
        if !node.has_children() {
            return;
        }
        if self.is_expanded(&row.id) {
            self.cursor = (self.cursor + 1).min(self.rows.len().saturating_sub(1));
        } else {
            self.dispatch(Interaction::ToggleExpand(row.id));
        }
    }

    /// Collapse the current row, or step out to its parent.
    fn collapse(&mut self) {
        let Some(row) = self.current() else { return };
        let has_children = find_node(&self.model.nodes, &row.id).is_some_and(Node::has_children);
        if has_children && self.is_expanded(&row.id) {
            self.dispatch(Interaction::ToggleExpand(row.id));
        } else if let ListOwner::Node(parent) = &row.owner
            && let Some(position) = self.rows.iter().position(|r| &r.id == parent)
        {
            self.cursor = position;
        }
    }

    /// Hover the dragged row at the end of the children of the row above
    /// its drop position, expanding that row first if needed.
    fn drag_into_previous(&mut self, active: &SortableEvent) {
        let Some(items) = list_of(&self.model.nodes, &active.to) else {
            return;
        };
        let Some(above) = active.new_index.checked_sub(1) else {
            self.status = "nothing above to move into".to_string();
            return;
        };
        let previous = if active.to == active.from {
            reorder(items, active.old_index, active.new_index)
                .get(above)
                .cloned()
        } else {
            items.get(above).cloned()
        };
        let Some(previous) = previous else { return };

        if previous.has_children() && !self.is_expanded(&previous.id) {
            self.dispatch(Interaction::ToggleExpand(previous.id.clone()));
        }
        let list = ListOwner::Node(previous.id.clone());
        let len = previous.children().len();
        let index = if list == active.from {
            len.saturating_sub(1)
        } else {
            len
        };
        self.dispatch(Interaction::DragOver { list, index });
    }

    /// Hover the dragged row just below its current parent.
    fn drag_out(&mut self, active: &SortableEvent) {
        let ListOwner::Node(parent) = &active.to else {
            self.status = "already at the top level".to_string();
            return;
        };
        let Some(slot) = self.rows.iter().find(|r| &r.id == parent).cloned() else {
            return;
        };
        let mut index = slot.index + 1;
        if slot.owner == active.from
            && let Some(items) = list_of(&self.model.nodes, &slot.owner)
        {
            index = index.min(items.len().saturating_sub(1));
        }
        self.dispatch(Interaction::DragOver {
            list: slot.owner,
            index,
        });
    }

    /// Send one interaction to the table and apply what comes back.
    fn dispatch(&mut self, interaction: Interaction) {
        match self.table.dispatch(self.model.data(), interaction) {
            Ok(events) => {
                if self.model.apply_all(&events) {
                    log::debug!("applied {} events", events.len());
                }
                self.status.clear();
            }
            Err(err) => {
                log::warn!("{err}");
                self.status = err.to_string();
            }
        }
        if let Some(keys) = self.mailbox.take() {
            self.table.set_selected_row_keys(keys.clone());
            self.model.selected_row_keys = keys;
        }
    }
}
