//! Integration tests for the store lifecycle
//!
//! Tests get-or-create semantics, reset, and handle invalidation across
//! resets and across stores.

use vitrine_foundation::{Error, ValueKind};
use vitrine_store::Store;

// =============================================================================
// Get-Or-Create
// =============================================================================

#[test]
fn same_name_returns_the_same_table() {
    let mut store = Store::new();
    let first = store.table("Tracks_V4");
    let second = store.table("Tracks_V4");

    assert_eq!(first, second);
    assert_eq!(store.tables().count(), 1);
}

#[test]
fn columns_accumulate_across_callers() {
    // Two producers declaring overlapping shapes on a shared table.
    let mut store = Store::new();

    let table = store.table("Products_V1");
    let a = store.add_column(table, "Product", ValueKind::Str, "").unwrap();

    let table_again = store.table("Products_V1");
    let b = store.add_column(table_again, "Product", ValueKind::Str, "").unwrap();

    assert_eq!(a, b);
    assert_eq!(store.table_by_name("Products_V1").unwrap().column_count(), 1);
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn reset_clears_every_registry() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    store.create_row(table).unwrap();
    store.association("TrackExtras_V1");
    store.association_group("SuperClusterRecHitFractions_V1");

    store.reset();

    assert_eq!(store.tables().count(), 0);
    assert_eq!(store.associations().count(), 0);
    assert_eq!(store.association_groups().count(), 0);
}

#[test]
fn reset_bumps_the_epoch() {
    let mut store = Store::new();
    assert_eq!(store.epoch(), 0);
    store.reset();
    store.reset();
    assert_eq!(store.epoch(), 2);
}

#[test]
fn handles_from_before_reset_are_stale() {
    let mut store = Store::new();
    let table = store.table("Tracks_V4");
    let pt = store.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    let row = store.create_row(table).unwrap();

    store.reset();
    // Recreate a table in the same slot under the same name.
    let fresh = store.table("Tracks_V4");
    store.add_column(fresh, "pt", ValueKind::Double, 0.0).unwrap();
    store.create_row(fresh).unwrap();

    assert!(matches!(store.get(row, pt), Err(Error::StaleHandle { .. })));
    assert!(matches!(
        store.set(row, pt, 1.0),
        Err(Error::StaleHandle { .. })
    ));
    assert!(matches!(
        store.create_row(table),
        Err(Error::StaleHandle { .. })
    ));
}

#[test]
fn names_recreated_after_reset_get_fresh_handles() {
    let mut store = Store::new();
    let before = store.table("Tracks_V4");
    store.reset();
    let after = store.table("Tracks_V4");

    assert_ne!(before, after);
}

// =============================================================================
// Cross-Store Isolation
// =============================================================================

#[test]
fn handles_do_not_cross_stores() {
    let mut one = Store::new();
    let mut two = Store::new();

    let table = one.table("Tracks_V4");
    let pt = one.add_column(table, "pt", ValueKind::Double, 0.0).unwrap();
    let row = one.create_row(table).unwrap();

    // The second store has its own table of the same name.
    let other = two.table("Tracks_V4");
    two.add_column(other, "pt", ValueKind::Double, 0.0).unwrap();
    two.create_row(other).unwrap();

    assert!(matches!(two.get(row, pt), Err(Error::HandleMismatch { .. })));
    assert!(matches!(
        two.create_row(table),
        Err(Error::HandleMismatch { .. })
    ));
}

#[test]
fn stores_have_distinct_stamps() {
    let one = Store::new();
    let two = Store::new();
    assert_ne!(one.stamp(), two.stamp());
}
