//! Built-in tree and table setup used when no files are given.

use nestable::prelude::*;

pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("kind", "Kind").width(96),
        ColumnSpec::new("size", "Size").width(80),
    ]
}

pub fn config() -> TableConfig {
    TableConfig::new(columns())
}

fn file(id: i64, name: &str, kind: &str, size: i64) -> Node {
    Node::new(id, name).field("kind", kind).field("size", size)
}

fn folder(id: i64, name: &str) -> Node {
    Node::new(id, name).field("kind", "folder")
}

pub fn tree() -> Vec<Node> {
    vec![
        folder(1, "src")
            .child(file(2, "main.rs", "rust", 2_310))
            .child(file(3, "lib.rs", "rust", 1_024))
            .child(
                folder(4, "widgets")
                    .child(file(5, "table.rs", "rust", 14_880))
                    .child(file(6, "row.rs", "rust", 9_412)),
            ),
        folder(7, "docs").child(file(8, "guide.md", "markdown", 5_120)),
        file(9, "Cargo.toml", "toml", 412),
        file(10, "README.md", "markdown", 1_893),
    ]
}

/// Row classes and cell slots the host knows how to draw.
pub fn decorate(table: NestTable) -> NestTable {
    table
        .row_class_name(|node| {
            if node.has_children() {
                vec!["folder".to_string()]
            } else {
                Vec::new()
            }
        })
        .slot(SlotKey::column("size"), |props| {
            match props.text.and_then(|v| v.as_u64()) {
                Some(bytes) => View::text(human_size(bytes)),
                None => View::Empty,
            }
        })
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
