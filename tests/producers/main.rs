//! Integration tests for Layer 2: Producers
//!
//! End-to-end tests driving events through producers into the store.
