use nestable::prelude::*;

fn ids(values: &[i64]) -> Vec<NodeId> {
    values.iter().map(|&v| NodeId::from(v)).collect()
}

fn node_ids(nodes: &[Node]) -> Vec<NodeId> {
    nodes.iter().map(|n| n.id.clone()).collect()
}

fn under(id: i64) -> ListOwner {
    ListOwner::Node(NodeId::from(id))
}

/// `[1 [2 [3], 4], 5]` with 1 and 2 expanded.
fn model() -> TableModel {
    let mut model = TableModel::new(vec![
        Node::new(1, "A")
            .child(Node::new(2, "B").child(Node::new(3, "C")))
            .child(Node::new(4, "D")),
        Node::new(5, "E"),
    ]);
    model.expanded_row_keys = ids(&[1, 2]);
    model
}

fn table() -> NestTable {
    NestTable::new(TableConfig::new(vec![ColumnSpec::new("name", "Name")]))
}

fn start(list: ListOwner, index: usize) -> Interaction {
    Interaction::DragStart {
        list,
        index,
        target: None,
    }
}

/// Run a whole gesture, applying every event, and return the drop's events.
fn drag(
    table: &mut NestTable,
    model: &mut TableModel,
    from: (ListOwner, usize),
    to: (ListOwner, usize),
) -> Vec<TableEvent> {
    let events = table.dispatch(model.data(), start(from.0, from.1)).unwrap();
    model.apply_all(&events);
    let events = table
        .dispatch(model.data(), Interaction::DragOver { list: to.0, index: to.1 })
        .unwrap();
    model.apply_all(&events);
    let events = table.dispatch(model.data(), Interaction::Drop).unwrap();
    model.apply_all(&events);
    events
}

// ============================================================================
// Same list
// ============================================================================

#[test]
fn test_reorder_root() {
    let mut model = model();
    let mut table = table();

    let events = drag(&mut table, &mut model, (ListOwner::Root, 0), (ListOwner::Root, 1));

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], TableEvent::UpdateModelValue(_)));
    assert!(matches!(events[1], TableEvent::End(_)));
    assert_eq!(node_ids(&model.nodes), ids(&[5, 1]));
    assert_eq!(node_ids(model.nodes[1].children()), ids(&[2, 4]));
    assert!(!table.is_dragging());
}

#[test]
fn test_reorder_nested_keeps_siblings() {
    let mut model = model();
    let mut table = table();

    drag(&mut table, &mut model, (under(1), 1), (under(1), 0));

    assert_eq!(node_ids(model.nodes[0].children()), ids(&[4, 2]));
    assert_eq!(node_ids(model.nodes[0].children()[1].children()), ids(&[3]));
    assert_eq!(model.nodes[1].id, NodeId::from(5));
}

#[test]
fn test_drop_in_place_emits_only_end() {
    let model = model();
    let before = model.nodes.clone();
    let mut table = table();

    table.dispatch(model.data(), start(ListOwner::Root, 1)).unwrap();
    let events = table.dispatch(model.data(), Interaction::Drop).unwrap();

    assert_eq!(events.len(), 1);
    let TableEvent::End(end) = &events[0] else {
        panic!("expected end, got {:?}", events[0]);
    };
    assert!(end.is_noop());
    assert_eq!(model.nodes, before);
}

// ============================================================================
// Across levels
// ============================================================================

#[test]
fn test_move_into_nested_list() {
    let mut model = model();
    let mut table = table();

    let events = drag(&mut table, &mut model, (ListOwner::Root, 1), (under(1), 1));

    assert_eq!(events.len(), 3);
    let TableEvent::UpdateModelValue(after_removal) = &events[0] else {
        panic!("expected removal first");
    };
    assert_eq!(node_ids(after_removal), ids(&[1]));
    assert!(matches!(events[1], TableEvent::UpdateModelValue(_)));
    let TableEvent::End(end) = &events[2] else {
        panic!("expected end last");
    };
    assert_eq!(end.item, NodeId::from(5));
    assert_eq!(end.from, ListOwner::Root);
    assert_eq!(end.to, under(1));
    assert_eq!((end.old_index, end.new_index), (1, 1));
    assert_eq!(end.group, "g1");

    assert_eq!(node_ids(&model.nodes), ids(&[1]));
    assert_eq!(node_ids(model.nodes[0].children()), ids(&[2, 5, 4]));
}

#[test]
fn test_move_out_to_root_leaves_empty_parent() {
    let mut model = model();
    let mut table = table();

    // Dropping after the last root row is allowed when coming from elsewhere.
    drag(&mut table, &mut model, (under(2), 0), (ListOwner::Root, 2));

    assert_eq!(node_ids(&model.nodes), ids(&[1, 5, 3]));
    let parent = &model.nodes[0].children()[0];
    assert_eq!(parent.id, NodeId::from(2));
    assert!(!parent.has_children());

    let view = table.render(model.data());
    assert!(view.body.find_row(&NodeId::from(2)).unwrap().children.is_none());
}

#[test]
fn test_drop_into_own_subtree_is_rejected() {
    let model = model();
    let mut table = table();

    table.dispatch(model.data(), start(ListOwner::Root, 0)).unwrap();
    let err = table
        .dispatch(model.data(), Interaction::DragOver { list: under(2), index: 0 })
        .unwrap_err();
    assert!(matches!(err, TableError::DropIntoSelf(id) if id == NodeId::from(1)));

    // The drag survives the rejected hover and can still be cancelled.
    assert!(table.is_dragging());
    let events = table.dispatch(model.data(), Interaction::DragCancel).unwrap();
    assert!(matches!(&events[..], [TableEvent::End(end)] if end.is_noop()));
    assert_eq!(model.nodes, self::model().nodes);
}

#[test]
fn test_hidden_and_unknown_lists() {
    let mut model = model();
    model.expanded_row_keys = ids(&[1]);
    let mut table = table();

    table.dispatch(model.data(), start(ListOwner::Root, 1)).unwrap();

    let collapsed = table
        .dispatch(model.data(), Interaction::DragOver { list: under(2), index: 0 })
        .unwrap_err();
    assert!(matches!(collapsed, TableError::ListNotRendered(_)));

    let leaf = table
        .dispatch(model.data(), Interaction::DragOver { list: under(4), index: 0 })
        .unwrap_err();
    assert!(matches!(leaf, TableError::ListNotRendered(_)));

    let unknown = table
        .dispatch(model.data(), Interaction::DragOver { list: under(99), index: 0 })
        .unwrap_err();
    assert!(matches!(unknown, TableError::UnknownList(_)));
}

#[test]
fn test_hover_index_bounds() {
    let mut model = model();
    let mut table = table();

    table.dispatch(model.data(), start(ListOwner::Root, 0)).unwrap();
    let err = table
        .dispatch(model.data(), Interaction::DragOver { list: ListOwner::Root, index: 2 })
        .unwrap_err();
    assert!(matches!(err, TableError::IndexOutOfRange { index: 2, len: 2, .. }));

    table.dispatch(model.data(), Interaction::DragCancel).unwrap();
    table.dispatch(model.data(), start(under(2), 0)).unwrap();
    let events = table
        .dispatch(model.data(), Interaction::DragOver { list: ListOwner::Root, index: 2 })
        .unwrap();
    model.apply_all(&events);
    assert!(matches!(&events[..], [TableEvent::Move(m)] if m.new_index == 2));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_lifecycle_payloads() {
    let model = model();
    let mut table = table();

    let events = table.dispatch(model.data(), start(under(2), 0)).unwrap();
    let [TableEvent::Start(started)] = &events[..] else {
        panic!("expected start, got {events:?}");
    };
    assert_eq!(started.item, NodeId::from(3));
    assert_eq!(started.from, under(2));
    assert_eq!(table.active_drag(), Some(started));

    let events = table
        .dispatch(model.data(), Interaction::DragOver { list: under(1), index: 2 })
        .unwrap();
    let [TableEvent::Move(moved)] = &events[..] else {
        panic!("expected move, got {events:?}");
    };
    assert_eq!(moved.from, under(2));
    assert_eq!(moved.to, under(1));
    assert_eq!(moved.new_index, 2);
}

#[test]
fn test_lifecycle_misuse() {
    let model = model();
    let mut table = table();

    let err = table.dispatch(model.data(), Interaction::Drop).unwrap_err();
    assert!(matches!(err, TableError::NoActiveDrag));

    let err = table
        .dispatch(model.data(), Interaction::DragOver { list: ListOwner::Root, index: 0 })
        .unwrap_err();
    assert!(matches!(err, TableError::NoActiveDrag));

    table.dispatch(model.data(), start(ListOwner::Root, 0)).unwrap();
    let err = table.dispatch(model.data(), start(ListOwner::Root, 1)).unwrap_err();
    assert!(matches!(err, TableError::DragInProgress));

    let cancelled = table.dispatch(model.data(), Interaction::DragCancel).unwrap();
    assert_eq!(cancelled.len(), 1);
}

#[test]
fn test_rejected_drop_keeps_drag_for_cancel() {
    let mut model = model();
    let before = model.nodes.clone();
    let mut table = table();

    table.dispatch(model.data(), start(under(2), 0)).unwrap();
    table
        .dispatch(model.data(), Interaction::DragOver { list: ListOwner::Root, index: 2 })
        .unwrap();

    // The source list collapses mid-drag.
    model.expanded_row_keys = ids(&[1]);
    let err = table.dispatch(model.data(), Interaction::Drop).unwrap_err();
    assert!(matches!(err, TableError::ListNotRendered(ref id) if *id == NodeId::from(2)));
    assert!(table.is_dragging());
    assert_eq!(table.active_drag().map(|d| d.new_index), Some(2));

    let events = table.dispatch(model.data(), Interaction::DragCancel).unwrap();
    let [TableEvent::End(end)] = &events[..] else {
        panic!("expected end, got {events:?}");
    };
    assert!(end.is_noop());
    assert_eq!(end.item, NodeId::from(3));
    assert!(!table.is_dragging());
    model.apply_all(&events);
    assert_eq!(model.nodes, before);
}

#[test]
fn test_drop_succeeds_once_list_is_shown_again() {
    let mut model = model();
    let mut table = table();

    table.dispatch(model.data(), start(under(2), 0)).unwrap();
    table
        .dispatch(model.data(), Interaction::DragOver { list: ListOwner::Root, index: 2 })
        .unwrap();

    model.expanded_row_keys = ids(&[1]);
    assert!(table.dispatch(model.data(), Interaction::Drop).is_err());

    model.expanded_row_keys = ids(&[1, 2]);
    let events = table.dispatch(model.data(), Interaction::Drop).unwrap();
    model.apply_all(&events);
    assert_eq!(events.len(), 3);
    assert_eq!(node_ids(&model.nodes), ids(&[1, 5, 3]));
    assert!(!table.is_dragging());
}

#[test]
fn test_start_out_of_range() {
    let model = model();
    let mut table = table();

    let err = table.dispatch(model.data(), start(ListOwner::Root, 7)).unwrap_err();
    assert!(matches!(err, TableError::IndexOutOfRange { index: 7, .. }));
    assert!(!table.is_dragging());
}

#[test]
fn test_handle_restricts_drag_start() {
    let model = model();
    let mut table = NestTable::new(
        TableConfig::new(vec![ColumnSpec::new("name", "Name")]).handle(".grip"),
    );

    let view = table.render(model.data());
    assert_eq!(view.body.handle.as_deref(), Some(".grip"));

    let events = table
        .dispatch(
            model.data(),
            Interaction::DragStart {
                list: ListOwner::Root,
                index: 0,
                target: Some(".cell".to_string()),
            },
        )
        .unwrap();
    assert!(events.is_empty());
    assert!(!table.is_dragging());

    let events = table
        .dispatch(
            model.data(),
            Interaction::DragStart {
                list: ListOwner::Root,
                index: 0,
                target: Some(".grip".to_string()),
            },
        )
        .unwrap();
    assert!(matches!(&events[..], [TableEvent::Start(_)]));
}
