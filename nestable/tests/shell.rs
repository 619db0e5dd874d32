use std::sync::{Arc, Mutex};

use nestable::prelude::*;

fn ids(values: &[i64]) -> Vec<NodeId> {
    values.iter().map(|&v| NodeId::from(v)).collect()
}

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("size", "Size").width(120),
    ]
}

fn tree() -> Vec<Node> {
    vec![
        Node::new(1, "A")
            .field("size", 10)
            .child(Node::new(2, "B").child(Node::new(3, "C")))
            .child(Node::new(4, "D")),
        Node::new(5, "E").field("size", 3),
    ]
}

/// A table with selection whose changes land in the returned log.
fn selectable(selected: Vec<NodeId>) -> (NestTable, Arc<Mutex<Vec<Vec<NodeId>>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let table = NestTable::new(TableConfig::new(columns())).row_selection(RowSelection::new(
        selected,
        move |keys| sink.lock().unwrap().push(keys),
    ));
    (table, log)
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_check_select_all_then_collapse() {
    let mut model = TableModel::new(vec![Node::new(1, "A").child(Node::new(2, "B"))]);
    model.expanded_row_keys = ids(&[1]);
    let mailbox = Mailbox::new();
    let mut table = NestTable::new(TableConfig::new(vec![ColumnSpec::new("name", "Name")]))
        .row_selection(RowSelection::new(vec![], mailbox.sender()));

    // Row checkbox of node 1.
    let view = table.render(model.data());
    let checkbox = view.body.find_row(&NodeId::from(1)).unwrap().cells[0]
        .checkbox()
        .unwrap()
        .clone();
    let events = table.dispatch(model.data(), checkbox.toggle()).unwrap();
    assert!(events.is_empty());
    model.selected_row_keys = mailbox.take().unwrap();
    assert_eq!(model.selected_row_keys, ids(&[1]));
    table.set_selected_row_keys(model.selected_row_keys.clone());

    // Header checkbox is now indeterminate; clicking it selects everything.
    let view = table.render(model.data());
    let header = view.header.checkbox().unwrap();
    assert_eq!(header.state, CheckState::INDETERMINATE);
    table.dispatch(model.data(), header.toggle()).unwrap();
    model.selected_row_keys = mailbox.take().unwrap();
    assert_eq!(model.selected_row_keys, ids(&[1, 2]));
    table.set_selected_row_keys(model.selected_row_keys.clone());

    // Collapse node 1.
    let events = table
        .dispatch(model.data(), Interaction::ToggleExpand(NodeId::from(1)))
        .unwrap();
    assert_eq!(events, vec![TableEvent::UpdateExpandedRowKeys(vec![])]);
    model.apply_all(&events);

    let view = table.render(model.data());
    assert!(view.body.find_row(&NodeId::from(2)).is_none());
    assert_eq!(mailbox.take(), None);
    assert_eq!(model.selected_row_keys, ids(&[1, 2]));
}

// ============================================================================
// Header checkbox
// ============================================================================

#[test]
fn test_header_state_follows_counts() {
    let nodes = tree();
    let (mut table, _) = selectable(vec![]);
    assert_eq!(table.check_all_state(&nodes), CheckState::UNCHECKED);

    table.set_selected_row_keys(ids(&[3]));
    assert_eq!(table.check_all_state(&nodes), CheckState::INDETERMINATE);

    table.set_selected_row_keys(ids(&[1, 2, 3, 4, 5]));
    assert_eq!(table.check_all_state(&nodes), CheckState::CHECKED);

    // A node added to the tree drops the header back to indeterminate.
    let mut grown = nodes.clone();
    grown.push(Node::new(6, "F"));
    assert_eq!(table.check_all_state(&grown), CheckState::INDETERMINATE);
}

#[test]
fn test_header_empty_tree_is_unchecked() {
    let (mut table, _) = selectable(vec![]);
    assert_eq!(table.check_all_state(&[]), CheckState::UNCHECKED);
}

#[test]
fn test_select_all_uses_preorder() {
    let nodes = tree();
    let (mut table, log) = selectable(vec![]);

    table
        .dispatch(TableData::new(&nodes, &[]), Interaction::ToggleAll { checked: true })
        .unwrap();
    table
        .dispatch(TableData::new(&nodes, &[]), Interaction::ToggleAll { checked: false })
        .unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log[0], ids(&[1, 2, 3, 4, 5]));
    assert!(log[1].is_empty());
}

#[test]
fn test_header_without_selection() {
    let nodes = tree();
    let mut table = NestTable::new(TableConfig::new(columns()));

    let view = table.render(TableData::new(&nodes, &[]));
    assert!(view.header.checkbox().is_none());
    assert_eq!(view.header.grid_template, "1fr 120px");

    let err = table
        .dispatch(TableData::new(&nodes, &[]), Interaction::ToggleAll { checked: true })
        .unwrap_err();
    assert!(matches!(err, TableError::SelectionDisabled));
}

// ============================================================================
// Row checkboxes
// ============================================================================

#[test]
fn test_row_toggle_appends_and_removes() {
    let nodes = tree();
    let expanded = ids(&[1]);
    let (mut table, log) = selectable(ids(&[5, 1]));

    table
        .dispatch(
            TableData::new(&nodes, &expanded),
            Interaction::ToggleRow {
                id: NodeId::from(4),
                checked: true,
            },
        )
        .unwrap();
    table
        .dispatch(
            TableData::new(&nodes, &expanded),
            Interaction::ToggleRow {
                id: NodeId::from(5),
                checked: false,
            },
        )
        .unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log[0], ids(&[5, 1, 4]));
    assert_eq!(log[1], ids(&[1]));
}

#[test]
fn test_row_toggle_of_hidden_row_is_ignored() {
    let nodes = tree();
    let (mut table, log) = selectable(vec![]);

    let events = table
        .dispatch(
            TableData::new(&nodes, &[]),
            Interaction::ToggleRow {
                id: NodeId::from(3),
                checked: true,
            },
        )
        .unwrap();

    assert!(events.is_empty());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_row_toggle_without_selection() {
    let nodes = tree();
    let mut table = NestTable::new(TableConfig::new(columns()));

    let err = table
        .dispatch(
            TableData::new(&nodes, &[]),
            Interaction::ToggleRow {
                id: NodeId::from(1),
                checked: true,
            },
        )
        .unwrap_err();
    assert!(matches!(err, TableError::SelectionDisabled));
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_expand_nested_level() {
    let mut model = TableModel::new(tree());
    let mut table = NestTable::new(TableConfig::new(columns()));

    for id in [1, 2] {
        let events = table
            .dispatch(model.data(), Interaction::ToggleExpand(NodeId::from(id)))
            .unwrap();
        model.apply_all(&events);
    }
    assert_eq!(model.expanded_row_keys, ids(&[1, 2]));

    let view = table.render(model.data());
    let order: Vec<_> = view
        .body
        .visible_rows()
        .iter()
        .map(|visible| visible.row.id.clone())
        .collect();
    assert_eq!(order, ids(&[1, 2, 3, 4, 5]));
    assert_eq!(
        view.body.locate(&NodeId::from(3)),
        Some((ListOwner::Node(NodeId::from(2)), 0))
    );
}

#[test]
fn test_expand_leaf_and_hidden_rows_are_noops() {
    let nodes = tree();
    let mut table = NestTable::new(TableConfig::new(columns()));

    for id in [5, 3, 99] {
        let events = table
            .dispatch(TableData::new(&nodes, &[]), Interaction::ToggleExpand(NodeId::from(id)))
            .unwrap();
        assert!(events.is_empty(), "toggle of {id} should be ignored");
    }
}
