//! Integration tests for associations
//!
//! Tests pairwise associations and parent-grouped associations through
//! the store facade.

use vitrine_foundation::Error;
use vitrine_store::Store;

// =============================================================================
// Pairwise Associations
// =============================================================================

#[test]
fn pairs_keep_append_order_and_multiplicity() {
    let mut store = Store::new();
    let tracks = store.table("Tracks_V4");
    let extras = store.table("Extras_V1");
    let t0 = store.create_row(tracks).unwrap();
    let t1 = store.create_row(tracks).unwrap();
    let e0 = store.create_row(extras).unwrap();

    let assoc = store.association("TrackExtras_V1");
    store.associate(assoc, t1, e0).unwrap();
    store.associate(assoc, t0, e0).unwrap();
    store.associate(assoc, t1, e0).unwrap();

    let table = store.association_by_name("TrackExtras_V1").unwrap();
    let pairs: Vec<_> = table.iter().collect();
    assert_eq!(pairs, [(t1, e0), (t0, e0), (t1, e0)]);
}

#[test]
fn targets_of_filters_by_left_handle() {
    let mut store = Store::new();
    let tracks = store.table("Tracks_V4");
    let extras = store.table("Extras_V1");
    let t0 = store.create_row(tracks).unwrap();
    let t1 = store.create_row(tracks).unwrap();
    let e0 = store.create_row(extras).unwrap();
    let e1 = store.create_row(extras).unwrap();

    let assoc = store.association("TrackExtras_V1");
    store.associate(assoc, t0, e0).unwrap();
    store.associate(assoc, t1, e1).unwrap();
    store.associate(assoc, t0, e1).unwrap();

    let table = store.association_by_name("TrackExtras_V1").unwrap();
    let targets: Vec<_> = table.targets_of(t0).collect();
    assert_eq!(targets, [e0, e1]);
}

#[test]
fn association_rejects_rows_that_do_not_exist() {
    let mut store = Store::new();
    let tracks = store.table("Tracks_V4");
    let extras = store.table("Extras_V1");
    let t0 = store.create_row(tracks).unwrap();
    let assoc = store.association("TrackExtras_V1");

    // No row has been created in Extras_V1.
    let forged = vitrine_foundation::RowHandle::new(extras, 0);
    let result = store.associate(assoc, t0, forged);
    assert!(matches!(result, Err(Error::HandleMismatch { .. })));
}

// =============================================================================
// Grouped Associations
// =============================================================================

#[test]
fn groups_form_in_first_seen_parent_order() {
    let mut store = Store::new();
    let clusters = store.table("SuperClusters_V1");
    let hits = store.table("RecHitFractions_V1");
    let c0 = store.create_row(clusters).unwrap();
    let c1 = store.create_row(clusters).unwrap();
    let h: Vec<_> = (0..4).map(|_| store.create_row(hits).unwrap()).collect();

    let group = store.association_group("SuperClusterRecHitFractions_V1");
    // Interleave parents; grouping must not reorder children.
    store.associate_child(group, c1, h[0]).unwrap();
    store.associate_child(group, c0, h[1]).unwrap();
    store.associate_child(group, c1, h[2]).unwrap();
    store.associate_child(group, c0, h[3]).unwrap();

    let table = store
        .association_group_by_name("SuperClusterRecHitFractions_V1")
        .unwrap();
    assert_eq!(table.group_count(), 2);

    let groups: Vec<_> = table.iter().collect();
    assert_eq!(groups[0].0, c1);
    assert_eq!(groups[0].1, [h[0], h[2]]);
    assert_eq!(groups[1].0, c0);
    assert_eq!(groups[1].1, [h[1], h[3]]);
}

#[test]
fn children_of_unknown_parent_is_none() {
    let mut store = Store::new();
    let clusters = store.table("SuperClusters_V1");
    let c0 = store.create_row(clusters).unwrap();
    store.association_group("SuperClusterRecHitFractions_V1");

    let table = store
        .association_group_by_name("SuperClusterRecHitFractions_V1")
        .unwrap();
    assert_eq!(table.children_of(c0), None);
}

// =============================================================================
// Namespaces
// =============================================================================

#[test]
fn tables_associations_and_groups_may_share_a_name() {
    let mut store = Store::new();
    store.table("Shared");
    store.association("Shared");
    store.association_group("Shared");

    assert!(store.table_by_name("Shared").is_some());
    assert!(store.association_by_name("Shared").is_some());
    assert!(store.association_group_by_name("Shared").is_some());
}

#[test]
fn registration_order_is_preserved() {
    let mut store = Store::new();
    store.association("B");
    store.association("A");
    store.association("B");

    let names: Vec<_> = store.associations().map(|a| a.name().to_owned()).collect();
    assert_eq!(names, ["B", "A"]);
}
