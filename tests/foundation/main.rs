//! Integration tests for Layer 0: Foundation
//!
//! Tests for values, value kinds, and handle types.

mod values;
