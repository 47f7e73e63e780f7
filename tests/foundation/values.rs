//! Integration tests for values and value kinds
//!
//! Tests the value variants, kind checking, conversions, and display.

use vitrine_foundation::{Value, ValueKind, Vec3};

// =============================================================================
// Kinds
// =============================================================================

#[test]
fn every_variant_reports_its_kind() {
    assert_eq!(Value::from(3i64).kind(), ValueKind::Int);
    assert_eq!(Value::from(2.5).kind(), ValueKind::Double);
    assert_eq!(Value::from(true).kind(), ValueKind::Bool);
    assert_eq!(Value::from("hybrid").kind(), ValueKind::Str);
    assert_eq!(Value::from(Vec3::new(1.0, 2.0, 3.0)).kind(), ValueKind::Vec3);
}

#[test]
fn kinds_accept_only_themselves() {
    for kind in [
        ValueKind::Int,
        ValueKind::Double,
        ValueKind::Bool,
        ValueKind::Str,
        ValueKind::Vec3,
    ] {
        assert!(kind.accepts(kind));
    }
    // No numeric promotion: an int is not a double.
    assert!(!ValueKind::Double.accepts(ValueKind::Int));
    assert!(!ValueKind::Int.accepts(ValueKind::Double));
}

// =============================================================================
// Extractors
// =============================================================================

#[test]
fn extractors_return_none_across_kinds() {
    let value = Value::from(7i64);
    assert_eq!(value.as_int(), Some(7));
    assert_eq!(value.as_double(), None);
    assert_eq!(value.as_bool(), None);
    assert_eq!(value.as_str(), None);
    assert_eq!(value.as_vec3(), None);
}

#[test]
fn string_values_share_storage_cheaply() {
    let value = Value::from("generalTracks");
    let copy = value.clone();
    assert_eq!(value.as_str(), copy.as_str());
}

// =============================================================================
// Vectors
// =============================================================================

#[test]
fn vec3_length_and_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert_eq!(v.length(), 5.0);
    assert_eq!(v.normalized(), Vec3::new(0.6, 0.8, 0.0));
}

#[test]
fn zero_vector_normalizes_to_itself() {
    assert_eq!(Vec3::default().normalized(), Vec3::default());
}

#[test]
fn vec3_from_array() {
    let v: Vec3 = [1.0, -2.0, 3.5].into();
    assert_eq!(v, Vec3::new(1.0, -2.0, 3.5));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_formats() {
    assert_eq!(format!("{}", Value::from(3i64)), "3");
    assert_eq!(format!("{}", Value::from(Vec3::new(1.0, 2.0, 3.0))), "(1, 2, 3)");
    assert_eq!(format!("{}", ValueKind::Str), "string");
    assert_eq!(format!("{}", ValueKind::Vec3), "vec3");
}
