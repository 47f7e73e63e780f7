//! Per-event record storage for Vitrine.
//!
//! This crate provides:
//! - [`PropertyTable`] - Named tables of typed, defaulted columns
//! - [`AssociationTable`] - Ordered pairwise row associations
//! - [`AssociationGroupTable`] - One-to-many row groupings
//! - [`Store`] - The per-event registry owning all of the above

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod association;
mod store;
mod table;

pub use association::{AssociationGroupTable, AssociationTable};
pub use store::Store;
pub use table::{ColumnInfo, PropertyTable, RowView};
