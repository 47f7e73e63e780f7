//! Integration tests for property tables
//!
//! Tests column declaration, defaults, backfill, typed writes, and
//! row enumeration through the store facade.

use vitrine_foundation::{Error, Value, ValueKind, Vec3};
use vitrine_store::Store;

// =============================================================================
// Column Declaration
// =============================================================================

#[test]
fn columns_keep_declaration_order() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    store.add_column(table, "charge", ValueKind::Int, 0).unwrap();
    store.add_column(table, "pos", ValueKind::Vec3, Vec3::default()).unwrap();

    let tracks = store.table_by_name("Tracks_V4").unwrap();
    let names: Vec<_> = tracks.columns().map(|c| c.name().to_owned()).collect();
    assert_eq!(names, ["pt", "charge", "pos"]);
}

#[test]
fn redeclaring_a_column_returns_the_same_handle() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    let first = store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    let second = store.add_column(table, "pt", ValueKind::Double, -1.0).unwrap();

    assert_eq!(first, second);

    // The first default wins; the redeclaration's default is ignored.
    let tracks = store.table_by_name("Tracks_V4").unwrap();
    let info = tracks.columns().next().unwrap();
    assert_eq!(info.default(), &Value::Double(0.0));
}

#[test]
fn redeclaring_with_a_different_kind_is_a_schema_conflict() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();

    let result = store.add_column(table, "pt", ValueKind::Int, 0);
    match result {
        Err(Error::SchemaConflict {
            table,
            column,
            existing,
            requested,
        }) => {
            assert_eq!(table, "Tracks_V4");
            assert_eq!(column, "pt");
            assert_eq!(existing, ValueKind::Double);
            assert_eq!(requested, ValueKind::Int);
        }
        other => panic!("expected SchemaConflict, got {other:?}"),
    }
}

#[test]
fn default_must_match_the_declared_kind() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");

    let result = store.add_column(table, "pt", ValueKind::Double, 1i64);
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}

// =============================================================================
// Defaults and Backfill
// =============================================================================

#[test]
fn late_columns_backfill_existing_rows() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    let first = store.create_row(table).unwrap();
    let second = store.create_row(table).unwrap();

    let pt = store.add_column(table, "pt", ValueKind::Double, -1.0).unwrap();

    assert_eq!(store.get(first, pt).unwrap(), Value::Double(-1.0));
    assert_eq!(store.get(second, pt).unwrap(), Value::Double(-1.0));
}

#[test]
fn unwritten_cells_read_the_default() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    let pt = store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    let written = store.create_row(table).unwrap();
    let untouched = store.create_row(table).unwrap();

    store.set(written, pt, 12.5).unwrap();

    assert_eq!(store.get(written, pt).unwrap(), Value::Double(12.5));
    assert_eq!(store.get(untouched, pt).unwrap(), Value::Double(0.0));
}

// =============================================================================
// Typed Writes
// =============================================================================

#[test]
fn writes_are_checked_against_the_column_kind() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    let charge = store.add_column(table, "charge", ValueKind::Int, 0).unwrap();
    let row = store.create_row(table).unwrap();

    let result = store.set(row, charge, 1.5);
    match result {
        Err(Error::TypeMismatch {
            column,
            expected,
            actual,
        }) => {
            assert_eq!(column, "charge");
            assert_eq!(expected, ValueKind::Int);
            assert_eq!(actual, ValueKind::Double);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }

    // The failed write leaves the cell untouched.
    assert_eq!(store.get(row, charge).unwrap(), Value::Int(0));
}

#[test]
fn overwrites_keep_the_latest_value() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    let pt = store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    let row = store.create_row(table).unwrap();

    store.set(row, pt, 1.0).unwrap();
    store.set(row, pt, 2.0).unwrap();

    assert_eq!(store.get(row, pt).unwrap(), Value::Double(2.0));
}

// =============================================================================
// Enumeration
// =============================================================================

#[test]
fn rows_enumerate_in_creation_order_with_full_cells() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    let pt = store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    let charge = store.add_column(table, "charge", ValueKind::Int, 0).unwrap();

    for i in 0..3 {
        let row = store.create_row(table).unwrap();
        store.set(row, pt, f64::from(i) * 10.0).unwrap();
        if i == 1 {
            store.set(row, charge, -1).unwrap();
        }
    }

    let tracks = store.table_by_name("Tracks_V4").unwrap();
    let rows: Vec<Vec<(String, Value)>> = tracks
        .rows()
        .map(|row| row.values().map(|(n, v)| (n.to_owned(), v)).collect())
        .collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], ("pt".to_owned(), Value::Double(0.0)));
    assert_eq!(rows[1][0], ("pt".to_owned(), Value::Double(10.0)));
    assert_eq!(rows[1][1], ("charge".to_owned(), Value::Int(-1)));
    // Unwritten cells still appear, carrying the default.
    assert_eq!(rows[2][1], ("charge".to_owned(), Value::Int(0)));
}

#[test]
fn enumeration_is_restartable() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    store.create_row(table).unwrap();
    store.create_row(table).unwrap();

    let tracks = store.table_by_name("Tracks_V4").unwrap();
    assert_eq!(tracks.rows().count(), 2);
    assert_eq!(tracks.rows().count(), 2);
}
