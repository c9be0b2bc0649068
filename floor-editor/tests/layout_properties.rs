//! 布局编辑端到端属性测试
//!
//! 只通过公共 API 驱动 LayoutStore，覆盖标签、吸附、并台/拆台往返、
//! 撤销深度等跨模块行为。

use floor_editor::{Direction, EditorConfig, LayoutStore, ValidationCode};
use shared::models::{FloorTable, TableCreate, TableShape, TableUpdate, ZoneCreate};

fn snapshot(store: &LayoutStore) -> Vec<FloorTable> {
    store.tables().cloned().collect()
}

#[test]
fn sequential_adds_are_labelled_in_order() {
    let mut store = LayoutStore::default();
    for _ in 0..12 {
        store.add_table(TableCreate::default());
    }
    for (i, table) in store.tables().enumerate() {
        assert_eq!(table.label, format!("T{}", i + 1));
    }
}

#[test]
fn move_snaps_to_nearest_grid_point() {
    let mut store = LayoutStore::default();
    let t = store.add_table(TableCreate::default());
    let moved = store.move_table(&t.id, 33.0, 27.0).unwrap();
    assert_eq!((moved.x, moved.y), (32.0, 24.0));
}

#[test]
fn resize_enforces_minimum_only() {
    let mut store = LayoutStore::default();
    let t = store.add_table(TableCreate::default());

    let small = store.resize_table(&t.id, 20.0, 20.0).unwrap();
    assert_eq!((small.w, small.h), (40.0, 40.0));

    let large = store.resize_table(&t.id, 80.0, 80.0).unwrap();
    assert_eq!((large.w, large.h), (80.0, 80.0));
}

#[test]
fn overlapping_round_tables_are_reported() {
    let mut store = LayoutStore::default();
    let a = store.add_table(TableCreate::at(0.0, 0.0).with_shape(TableShape::Round));
    let b = store.add_table(TableCreate::at(30.0, 30.0).with_shape(TableShape::Round));

    let report = store.validate_layout();
    assert!(report.has(ValidationCode::TablesOverlap));
    let ids: Vec<_> = report.overlapping_tables.iter().map(|t| &t.id).collect();
    assert_eq!(ids, [&a.id, &b.id]);
}

#[test]
fn merge_and_split_round_trip() {
    let mut store = LayoutStore::default();
    let a = store.add_table(TableCreate::at(0.0, 0.0));
    let b = store.add_table(TableCreate::at(60.0, 0.0));
    let before = snapshot(&store);

    assert!(store.can_merge_tables(&[&a.id, &b.id]));
    let merged = store.merge_tables(&[&a.id, &b.id]).unwrap();
    assert_eq!(merged.label, "T1+T2");
    assert_eq!(merged.capacity, 8);
    assert_eq!((merged.w, merged.h), (120.0, 60.0));
    assert_eq!(store.table_count(), 1);

    let restored = store.split_table(&merged.id).unwrap();
    assert_eq!(restored[0].id, a.id);
    assert_eq!((restored[0].x, restored[0].y), (0.0, 0.0));
    assert_eq!(restored[1].id, b.id);
    assert_eq!((restored[1].x, restored[1].y), (60.0, 0.0));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn undo_and_redo_single_add() {
    let mut store = LayoutStore::default();
    store.add_table(TableCreate::default());

    assert!(store.undo());
    assert_eq!(store.table_count(), 0);
    assert!(store.redo());
    assert_eq!(store.table_count(), 1);
}

#[test]
fn history_keeps_twenty_steps() {
    let mut store = LayoutStore::new(EditorConfig::default());
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
fn nudge_clamps_and_steps_by_grid() {
    let mut store = LayoutStore::default();
    let t = store.add_table(TableCreate::at(0.0, 0.0));

    let left = store.nudge_table(&t.id, Direction::Left).unwrap();
    assert_eq!(left.x, 0.0);

    for step in 1..=5 {
        let right = store.nudge_table(&t.id, Direction::Right).unwrap();
        assert_eq!(right.x, 8.0 * step as f64);
    }
}

#[test]
fn hidden_zone_filters_visible_tables_only() {
    let mut store = LayoutStore::default();
    let zone = store.add_zone(ZoneCreate::new("Terrace", "#ffcc00"));
    store.add_table(TableCreate::at(0.0, 0.0).in_zone(&zone.id));
    store.add_table(TableCreate::at(100.0, 0.0).in_zone(&zone.id));
    let free = store.add_table(TableCreate::at(200.0, 0.0));

    assert_eq!(store.toggle_zone_visibility(&zone.id), Some(false));
    let visible: Vec<_> = store.visible_tables().into_iter().map(|t| &t.id).collect();
    assert_eq!(visible, [&free.id]);
    assert_eq!(store.table_count(), 3);
}

#[test]
fn duplicate_labels_are_reported() {
    let mut store = LayoutStore::default();
    let a = store.add_table(TableCreate::at(0.0, 0.0));
    store.add_table(TableCreate::at(100.0, 0.0));
    store.update_table(
        &a.id,
        TableUpdate {
            label: Some("T2".into()),
            ..Default::default()
        },
    );
    assert!(store.validate_layout().has(ValidationCode::DuplicateTableId));
}
