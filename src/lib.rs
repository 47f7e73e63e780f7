//! Vitrine - Per-event record store for physics event display
//!
//! This crate re-exports all layers of the Vitrine system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: vitrine_producers   — Producer contract, event input, mappers
//! Layer 1: vitrine_store       — Store, property tables, associations
//! Layer 0: vitrine_foundation  — Core types (Value, handles, Error)
//! ```

pub use vitrine_foundation as foundation;
pub use vitrine_producers as producers;
pub use vitrine_store as store;
