use super::*;
use shared::models::FixtureKind;
use std::cell::RefCell;
use std::rc::Rc;

fn create_test_store() -> LayoutStore {
    LayoutStore::new(EditorConfig::with_canvas(800.0, 600.0))
}

fn add_at(store: &mut LayoutStore, x: f64, y: f64) -> FloorTable {
    store.add_table(TableCreate::at(x, y))
}

// ========================================================================
// add_table
// ========================================================================

#[test]
fn test_add_table_defaults() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());

    assert_eq!(table.label, "T1");
    assert_eq!(table.capacity, 4);
    assert_eq!((table.w, table.h), (60.0, 60.0));
    assert_eq!((table.x, table.y), (0.0, 0.0));
    assert_eq!(table.shape, TableShape::Square);
    assert_eq!(table.status, TableStatus::Available);
    assert!(!table.is_merge_product());
    assert_eq!(store.table_count(), 1);
}

#[test]
fn test_add_table_sequential_labels() {
    let mut store = create_test_store();
    for _ in 0..5 {
        store.add_table(TableCreate::default());
    }
    let labels: Vec<_> = store.tables().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["T1", "T2", "T3", "T4", "T5"]);
}

#[test]
fn test_add_table_position_not_snapped() {
    let mut store = create_test_store();
    let table = add_at(&mut store, 33.0, 27.0);
    assert_eq!((table.x, table.y), (33.0, 27.0));
}

#[test]
fn test_add_rect_table_default_size() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default().with_shape(TableShape::Rect));
    assert_eq!((table.w, table.h), (120.0, 60.0));

    let sized = store.add_table(
        TableCreate::default()
            .with_shape(TableShape::Round)
            .with_size(80.0, 80.0),
    );
    assert_eq!((sized.w, sized.h), (80.0, 80.0));
}

#[test]
fn test_add_table_explicit_label_keeps_counting() {
    let mut store = create_test_store();
    store.add_table(TableCreate {
        label: Some("Bar 1".into()),
        ..Default::default()
    });
    let second = store.add_table(TableCreate::default());
    assert_eq!(second.label, "T2");
}

// ========================================================================
// move / nudge / resize
// ========================================================================

#[test]
fn test_move_table_snaps_to_grid() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());

    let moved = store.move_table(&table.id, 33.0, 27.0).unwrap();
    assert_eq!((moved.x, moved.y), (32.0, 24.0));
    assert_eq!(store.table(&table.id).unwrap().x, 32.0);
}

#[test]
fn test_move_table_unknown_id_is_noop() {
    let mut store = create_test_store();
    store.add_table(TableCreate::default());
    assert!(store.move_table("missing", 10.0, 10.0).is_none());
    assert_eq!(store.undo_len(), 1);
}

#[test]
fn test_move_table_allows_overlap() {
    let mut store = create_test_store();
    let a = add_at(&mut store, 0.0, 0.0);
    let b = add_at(&mut store, 200.0, 0.0);
    let moved = store.move_table(&b.id, a.x + 8.0, a.y).unwrap();
    assert_eq!(moved.x, 8.0);
}

#[test]
fn test_move_table_clamps_to_canvas_on_grid() {
    let mut store = LayoutStore::new(EditorConfig::with_canvas(1000.0, 500.0));
    let table = store.add_table(TableCreate::default());

    let moved = store.move_table(&table.id, 5000.0, -40.0).unwrap();
    // 1000 - 60 = 940 is off-grid, nearest aligned inside is 936
    assert_eq!((moved.x, moved.y), (936.0, 0.0));
}

#[test]
fn test_move_to_same_position_records_nothing() {
    let mut store = create_test_store();
    let table = add_at(&mut store, 16.0, 16.0);
    let undo_len = store.undo_len();

    store.move_table(&table.id, 17.0, 15.0).unwrap();
    assert_eq!(store.undo_len(), undo_len);
}

#[test]
fn test_resize_enforces_minimum() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());

    let small = store.resize_table(&table.id, 20.0, 20.0).unwrap();
    assert_eq!((small.w, small.h), (40.0, 40.0));

    let large = store.resize_table(&table.id, 80.0, 80.0).unwrap();
    assert_eq!((large.w, large.h), (80.0, 80.0));

    let mixed = store.resize_table(&table.id, 100.0, 10.0).unwrap();
    assert_eq!((mixed.w, mixed.h), (100.0, 40.0));
}

#[test]
fn test_resize_does_not_snap() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    let resized = store.resize_table(&table.id, 61.0, 75.0).unwrap();
    assert_eq!((resized.w, resized.h), (61.0, 75.0));
}

#[test]
fn test_nudge_left_at_origin_stays() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());

    let nudged = store.nudge_table(&table.id, Direction::Left).unwrap();
    assert_eq!(nudged.x, 0.0);
    let nudged = store.nudge_table(&table.id, Direction::Up).unwrap();
    assert_eq!(nudged.y, 0.0);
}

#[test]
fn test_nudge_right_steps_one_grid_unit() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());

    for step in 1..=5 {
        let nudged = store.nudge_table(&table.id, Direction::Right).unwrap();
        assert_eq!(nudged.x, 8.0 * step as f64);
    }
    let nudged = store.nudge_table(&table.id, Direction::Down).unwrap();
    assert_eq!((nudged.x, nudged.y), (40.0, 8.0));
}

#[test]
fn test_nudge_from_off_grid_aligns_then_steps() {
    let mut store = create_test_store();
    let table = add_at(&mut store, 3.0, 0.0);

    let nudged = store.nudge_table(&table.id, Direction::Right).unwrap();
    assert_eq!(nudged.x, 8.0);
    let nudged = store.nudge_table(&table.id, Direction::Right).unwrap();
    assert_eq!(nudged.x, 16.0);
    let nudged = store.nudge_table(&table.id, Direction::Left).unwrap();
    assert_eq!(nudged.x, 8.0);
}

#[test]
fn test_nudge_stops_at_far_edge() {
    let mut store = create_test_store();
    // 800 - 60 = 740, last aligned position is 736
    let table = add_at(&mut store, 736.0, 0.0);

    let nudged = store.nudge_table(&table.id, Direction::Right).unwrap();
    assert_eq!(nudged.x, 736.0);
}

// ========================================================================
// update / rotate / delete
// ========================================================================

#[test]
fn test_update_table_shallow_merge() {
    let mut store = create_test_store();
    let zone = store.add_zone(ZoneCreate::new("Patio", "#3a7"));
    let table = store.add_table(TableCreate::default());

    let updated = store
        .update_table(
            &table.id,
            TableUpdate {
                label: Some("Window".into()),
                capacity: Some(6),
                zone: Some(Some(zone.id.clone())),
                status: Some(TableStatus::Occupied),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.label, "Window");
    assert_eq!(updated.capacity, 6);
    assert_eq!(updated.zone.as_deref(), Some(zone.id.as_str()));
    assert_eq!(updated.status, TableStatus::Occupied);
    assert_eq!(updated.shape, TableShape::Square);
    assert_eq!((updated.x, updated.w), (table.x, table.w));

    let cleared = store
        .update_table(
            &table.id,
            TableUpdate {
                zone: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(cleared.zone.is_none());
}

#[test]
fn test_update_table_accepts_invalid_capacity() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    let updated = store
        .update_table(
            &table.id,
            TableUpdate {
                capacity: Some(0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.capacity, 0);
}

#[test]
fn test_rotate_normalises_angle() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    assert_eq!(store.rotate_table(&table.id, 450.0).unwrap().rotation, Some(90.0));
    assert_eq!(store.rotate_table(&table.id, -90.0).unwrap().rotation, Some(270.0));
}

#[test]
fn test_delete_table_keeps_labels() {
    let mut store = create_test_store();
    let t1 = store.add_table(TableCreate::default());
    store.add_table(TableCreate::default());
    store.add_table(TableCreate::default());

    let removed = store.delete_table(&t1.id).unwrap();
    assert_eq!(removed.label, "T1");

    let labels: Vec<_> = store.tables().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["T2", "T3"]);
    assert!(store.delete_table(&t1.id).is_none());
}

#[test]
fn test_delete_clears_selection() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    store.select_table(Some(&table.id));
    store.toggle_table_selection(&table.id);

    store.delete_table(&table.id);
    assert!(store.selected_table().is_none());
    assert!(store.multi_selection().is_empty());
}

// ========================================================================
// Zones / visibility
// ========================================================================

#[test]
fn test_hidden_zone_filters_visible_tables() {
    let mut store = create_test_store();
    let zone = store.add_zone(ZoneCreate::new("Terrace", "#f80"));
    let inside = store.add_table(TableCreate::at(0.0, 0.0).in_zone(zone.id.clone()));
    let outside = add_at(&mut store, 100.0, 0.0);

    assert_eq!(store.visible_tables().len(), 2);

    assert_eq!(store.toggle_zone_visibility(&zone.id), Some(false));
    let visible: Vec<_> = store.visible_tables().iter().map(|t| t.id.clone()).collect();
    assert_eq!(visible, vec![outside.id.clone()]);
    assert!(store.table(&inside.id).is_some());
    assert_eq!(store.table_count(), 2);

    assert_eq!(store.toggle_zone_visibility(&zone.id), Some(true));
    assert_eq!(store.visible_tables().len(), 2);
}

#[test]
fn test_toggle_unknown_zone_is_noop() {
    let mut store = create_test_store();
    assert_eq!(store.toggle_zone_visibility("nope"), None);
    assert!(!store.can_undo());
}

#[test]
fn test_zone_created_hidden() {
    let mut store = create_test_store();
    let zone = store.add_zone(ZoneCreate {
        name: "Private".into(),
        color: "#000".into(),
        is_visible: Some(false),
    });
    store.add_table(TableCreate::default().in_zone(zone.id));
    assert!(store.visible_tables().is_empty());
}

#[test]
fn test_remove_zone_clears_references() {
    let mut store = create_test_store();
    let zone = store.add_zone(ZoneCreate::new("Hall", "#123"));
    let table = store.add_table(TableCreate::default().in_zone(zone.id.clone()));

    let removed = store.remove_zone(&zone.id).unwrap();
    assert_eq!(removed.name, "Hall");
    assert!(store.table(&table.id).unwrap().zone.is_none());
    assert_eq!(store.visible_tables().len(), 1);

    assert_eq!(
        store.remove_zone(&zone.id),
        Err(LayoutError::ZoneNotFound(zone.id.clone()))
    );
}

// ========================================================================
// Fixtures
// ========================================================================

#[test]
fn test_fixture_lifecycle() {
    let mut store = create_test_store();
    let bar = store.add_fixture(FixtureCreate {
        kind: FixtureKind::Bar,
        x: 0.0,
        y: 400.0,
        w: 300.0,
        h: 40.0,
    });

    let moved = store.move_fixture(&bar.id, 13.0, 405.0).unwrap();
    assert_eq!((moved.x, moved.y), (16.0, 408.0));

    let removed = store.remove_fixture(&bar.id).unwrap();
    assert_eq!(removed.kind, FixtureKind::Bar);
    assert_eq!(store.fixtures().count(), 0);
    assert!(matches!(
        store.move_fixture(&bar.id, 0.0, 0.0),
        Err(LayoutError::FixtureNotFound(_))
    ));
}

// ========================================================================
// Selection / hit test
// ========================================================================

#[test]
fn test_select_table() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());

    store.select_table(Some(&table.id));
    assert_eq!(store.selected_table(), Some(table.id.as_str()));

    store.select_table(Some("unknown"));
    assert!(store.selected_table().is_none());

    store.select_table(Some(&table.id));
    store.select_table(None);
    assert!(store.selected_table().is_none());
}

#[test]
fn test_toggle_table_selection() {
    let mut store = create_test_store();
    let a = store.add_table(TableCreate::default());
    let b = add_at(&mut store, 60.0, 0.0);

    assert!(store.toggle_table_selection(&a.id));
    assert!(store.toggle_table_selection(&b.id));
    assert_eq!(store.multi_selection(), [a.id.clone(), b.id.clone()]);

    assert!(!store.toggle_table_selection(&a.id));
    assert_eq!(store.multi_selection(), [b.id.clone()]);

    assert!(!store.toggle_table_selection("ghost"));
    store.clear_selection();
    assert!(store.multi_selection().is_empty());
}

#[test]
fn test_selection_is_not_undoable() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    let undo_len = store.undo_len();
    store.select_table(Some(&table.id));
    store.toggle_table_selection(&table.id);
    assert_eq!(store.undo_len(), undo_len);
}

#[test]
fn test_table_at_prefers_topmost() {
    let mut store = create_test_store();
    add_at(&mut store, 0.0, 0.0);
    let top = add_at(&mut store, 30.0, 30.0);

    assert_eq!(store.table_at(40.0, 40.0).unwrap().id, top.id);
    assert_eq!(store.table_at(5.0, 5.0).unwrap().label, "T1");
    assert!(store.table_at(500.0, 500.0).is_none());
}

// ========================================================================
// Undo / Redo
// ========================================================================

#[test]
fn test_undo_add_then_redo() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());

    assert!(store.undo());
    assert_eq!(store.table_count(), 0);
    assert!(store.can_redo());

    assert!(store.redo());
    assert_eq!(store.table_count(), 1);
    assert_eq!(store.table(&table.id).unwrap().label, "T1");
}

#[test]
fn test_undo_restores_previous_geometry() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    store.move_table(&table.id, 80.0, 80.0);
    store.resize_table(&table.id, 100.0, 100.0);

    store.undo();
    let t = store.table(&table.id).unwrap();
    assert_eq!((t.x, t.y, t.w, t.h), (80.0, 80.0, 60.0, 60.0));

    store.undo();
    let t = store.table(&table.id).unwrap();
    assert_eq!((t.x, t.y), (0.0, 0.0));
}

#[test]
fn test_history_bounded_to_depth() {
    let mut store = create_test_store();
    for _ in 0..25 {
        store.add_table(TableCreate::default());
    }

    let mut undone = 0;
    while store.undo() {
        undone += 1;
    }
    assert_eq!(undone, 20);
    assert_eq!(store.table_count(), 5);
}

#[test]
fn test_new_mutation_clears_redo() {
    let mut store = create_test_store();
    store.add_table(TableCreate::default());
    store.undo();
    assert!(store.can_redo());

    store.add_table(TableCreate::default());
    assert!(!store.can_redo());
    assert!(!store.redo());
}

#[test]
fn test_undo_on_empty_history() {
    let mut store = create_test_store();
    assert!(!store.can_undo());
    assert!(!store.undo());
}

#[test]
fn test_undo_prunes_dangling_selection() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    store.select_table(Some(&table.id));
    store.toggle_table_selection(&table.id);

    store.undo();
    assert!(store.selected_table().is_none());
    assert!(store.multi_selection().is_empty());
}

#[test]
fn test_history_does_not_alias_live_state() {
    let mut store = create_test_store();
    let table = store.add_table(TableCreate::default());
    store.move_table(&table.id, 200.0, 200.0);
    store.update_table(
        &table.id,
        TableUpdate {
            label: Some("Changed".into()),
            ..Default::default()
        },
    );

    store.undo();
    assert_eq!(store.table(&table.id).unwrap().label, "T1");
    assert_eq!(store.table(&table.id).unwrap().x, 200.0);
}

// ========================================================================
// Subscriptions
// ========================================================================

#[test]
fn test_subscribe_receives_events() {
    let mut store = create_test_store();
    let events: Rc<RefCell<Vec<LayoutEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    let sub = store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    let table = store.add_table(TableCreate::default());
    store.move_table(&table.id, 16.0, 16.0);
    store.undo();

    {
        let seen = events.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], LayoutEvent::TableAdded { id: table.id.clone() });
        assert_eq!(
            seen[1],
            LayoutEvent::TableMoved {
                id: table.id.clone(),
                x: 16.0,
                y: 16.0
            }
        );
        assert_eq!(seen[2], LayoutEvent::Undone);
    }

    assert!(store.unsubscribe(sub));
    assert!(!store.unsubscribe(sub));
    store.add_table(TableCreate::default());
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn test_noop_emits_nothing() {
    let mut store = create_test_store();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    store.subscribe(move |_| *sink.borrow_mut() += 1);

    store.move_table("missing", 0.0, 0.0);
    store.resize_table("missing", 50.0, 50.0);
    store.toggle_zone_visibility("missing");
    assert_eq!(*count.borrow(), 0);
}
