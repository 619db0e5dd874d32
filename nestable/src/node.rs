//! Row records and their identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a node.
///
/// Must be unique across the entire tree, not just among siblings: selection
/// and expansion are tracked by id alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Numeric id, as produced by most JSON sources.
    Int(i64),
    /// Textual id.
    Str(String),
}

impl NodeId {
    /// The id as a JSON value (used when a column binds to `id`).
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(n) => Value::from(*n),
            Self::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Str(value.to_string()),
        }
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// One row of the table, possibly carrying nested rows.
///
/// Display fields live in `fields` keyed by column `dataIndex`; `id` and
/// `name` are addressable by column key as well.
///
/// # Example
///
/// ```
/// use nestable::Node;
///
/// let node = Node::new(1, "Parent")
///     .field("size", 42)
///     .child(Node::new(2, "Child"));
///
/// assert!(node.has_children());
/// assert_eq!(node.text("size"), "42");
/// assert_eq!(node.text("name"), "Parent");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set a display field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Append a child, creating the children array if needed.
    pub fn child(mut self, child: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Replace the children array.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    /// Children of this node; empty for leaves.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Whether the node has a non-empty children array.
    ///
    /// A present but empty array counts as a leaf.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Raw value bound to a column key.
    pub fn value(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.to_value()),
            "name" => Some(Value::from(self.name.as_str())),
            _ => self.fields.get(key).cloned(),
        }
    }

    /// Value bound to a column key, as display text.
    ///
    /// Missing fields and `null` render as the empty string.
    pub fn text(&self, key: &str) -> String {
        self.value(key).as_ref().map(display_value).unwrap_or_default()
    }
}

/// Render a JSON value the way a cell shows it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_and_string_ids() {
        let json = r#"[
            {"id": 1, "name": "A", "size": 10, "children": [{"id": "b", "name": "B"}]}
        ]"#;
        let nodes: Vec<Node> = serde_json::from_str(json).unwrap();

        assert_eq!(nodes[0].id, NodeId::Int(1));
        assert_eq!(nodes[0].children()[0].id, NodeId::from("b"));
        assert_eq!(nodes[0].text("size"), "10");
        assert!(!nodes[0].fields.contains_key("children"));
    }

    #[test]
    fn test_empty_children_is_leaf() {
        let node = Node::new(1, "A").with_children(vec![]);
        assert!(node.children.is_some());
        assert!(!node.has_children());
    }

    #[test]
    fn test_text_of_missing_and_null_fields() {
        let node = Node::new(1, "A").field("note", Value::Null);
        assert_eq!(node.text("note"), "");
        assert_eq!(node.text("absent"), "");
        assert_eq!(node.text("id"), "1");
    }

    #[test]
    fn test_serialize_skips_absent_children() {
        let json = serde_json::to_string(&Node::new(7, "Leaf")).unwrap();
        assert!(!json.contains("children"));
        assert!(json.contains("\"id\":7"));
    }
}
