//! Epoch-scoped handles into a store.
//!
//! Every handle carries the identity of the store instance and the epoch
//! (reset cycle) that issued it. A handle is valid exactly between the
//! issuing store's creation (or last reset) and its next reset; use after
//! that is rejected rather than silently honored.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies one store instance during one event lifetime.
///
/// The store id is unique within the process; the epoch increments on
/// every reset. Together they let stale and foreign handles be told apart.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoreStamp {
    /// Process-unique store instance id.
    pub store: u64,
    /// Reset cycle counter of the issuing store.
    pub epoch: u32,
}

impl StoreStamp {
    /// Creates a stamp from a store id and epoch.
    #[must_use]
    pub const fn new(store: u64, epoch: u32) -> Self {
        Self { store, epoch }
    }
}

impl fmt::Debug for StoreStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreStamp(s{}e{})", self.store, self.epoch)
    }
}

/// Identifies one property table within a store's current epoch.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableId {
    /// Stamp of the issuing store.
    pub stamp: StoreStamp,
    /// Index of the table within the store's registry.
    pub index: u32,
}

impl TableId {
    /// Creates a table id.
    #[must_use]
    pub const fn new(stamp: StoreStamp, index: u32) -> Self {
        Self { stamp, index }
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TableId(s{}e{}t{})",
            self.stamp.store, self.stamp.epoch, self.index
        )
    }
}

/// Identifies one (table, column) pair.
///
/// Returned by `add_column`; lets a producer write fields without
/// re-resolving the column by name for every row.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnHandle {
    /// The owning table.
    pub table: TableId,
    /// Column position in declaration order.
    pub column: u32,
}

impl ColumnHandle {
    /// Creates a column handle.
    #[must_use]
    pub const fn new(table: TableId, column: u32) -> Self {
        Self { table, column }
    }
}

impl fmt::Debug for ColumnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ColumnHandle(s{}e{}t{}c{})",
            self.table.stamp.store, self.table.stamp.epoch, self.table.index, self.column
        )
    }
}

/// Identifies one row within one property table.
///
/// A row handle from table A must never be used to index table B; doing so
/// is a contract violation, not a tolerated access.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowHandle {
    /// The owning table.
    pub table: TableId,
    /// Row position in creation order.
    pub row: u64,
}

impl RowHandle {
    /// Creates a row handle.
    #[must_use]
    pub const fn new(table: TableId, row: u64) -> Self {
        Self { table, row }
    }
}

impl fmt::Debug for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RowHandle(s{}e{}t{}r{})",
            self.table.stamp.store, self.table.stamp.epoch, self.table.index, self.row
        )
    }
}

/// Identifies one pairwise association table.
///
/// Associations live in their own name namespace; an association and a
/// property table may share a textual name without conflict.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssociationId {
    /// Stamp of the issuing store.
    pub stamp: StoreStamp,
    /// Index of the association table within the store's registry.
    pub index: u32,
}

impl AssociationId {
    /// Creates an association id.
    #[must_use]
    pub const fn new(stamp: StoreStamp, index: u32) -> Self {
        Self { stamp, index }
    }
}

impl fmt::Debug for AssociationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AssociationId(s{}e{}a{})",
            self.stamp.store, self.stamp.epoch, self.index
        )
    }
}

/// Identifies one group association table (one-to-many).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupId {
    /// Stamp of the issuing store.
    pub stamp: StoreStamp,
    /// Index of the group table within the store's registry.
    pub index: u32,
}

impl GroupId {
    /// Creates a group id.
    #[must_use]
    pub const fn new(stamp: StoreStamp, index: u32) -> Self {
        Self { stamp, index }
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GroupId(s{}e{}g{})",
            self.stamp.store, self.stamp.epoch, self.index
        )
    }
}
