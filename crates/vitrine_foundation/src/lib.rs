//! Core types for the Vitrine record store.
//!
//! This crate provides:
//! - [`Value`] - The tagged value type for all table cells
//! - [`ValueKind`] - Column type tags checked at the storage boundary
//! - [`RowHandle`], [`ColumnHandle`], [`TableId`] - Epoch-scoped handles
//! - [`Error`] - Error taxonomy for schema and handle contract violations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod handle;
mod types;
mod value;

pub use error::{Error, Result};
pub use handle::{AssociationId, ColumnHandle, GroupId, RowHandle, StoreStamp, TableId};
pub use types::ValueKind;
pub use value::{Value, Vec3};
