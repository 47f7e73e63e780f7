//! The per-event store: named tables, associations, and the reset
//! lifecycle.
//!
//! One `Store` instance lives for one event. All producers for the event
//! share it through `&mut` access, which makes the single-writer-at-a-time
//! invariant a compile-time property rather than a locking discipline.
//! `reset()` clears everything and bumps the epoch, invalidating every
//! handle issued so far.

// Allow usize/u32 index casts - registries are far below u32::MAX entries
#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use vitrine_foundation::{
    AssociationId, ColumnHandle, Error, GroupId, Result, RowHandle, StoreStamp, TableId, Value,
    ValueKind,
};

use crate::association::{AssociationGroupTable, AssociationTable};
use crate::table::PropertyTable;

/// Process-wide counter so handles from two store instances can never be
/// confused for one another.
static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(0);

/// The per-event registry owning all named property tables, pairwise
/// associations, and group associations.
///
/// The three kinds of table live in separate name namespaces: an
/// association and a property table may share a textual name without
/// conflict. Within one epoch a name always resolves to the same table
/// instance, regardless of which producer asks first.
#[derive(Debug)]
pub struct Store {
    stamp: StoreStamp,
    tables: Vec<PropertyTable>,
    table_names: HashMap<Arc<str>, u32>,
    associations: Vec<AssociationTable>,
    association_names: HashMap<Arc<str>, u32>,
    groups: Vec<AssociationGroupTable>,
    group_names: HashMap<Arc<str>, u32>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store at epoch 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stamp: StoreStamp::new(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed), 0),
            tables: Vec::new(),
            table_names: HashMap::new(),
            associations: Vec::new(),
            association_names: HashMap::new(),
            groups: Vec::new(),
            group_names: HashMap::new(),
        }
    }

    /// Returns the stamp identifying this store's current lifetime.
    #[must_use]
    pub fn stamp(&self) -> StoreStamp {
        self.stamp
    }

    /// Returns the current epoch (reset count).
    #[must_use]
    pub fn epoch(&self) -> u32 {
        self.stamp.epoch
    }

    // --- Get-or-create lookups ---

    /// Returns the property table registered under `name`, creating an
    /// empty one if absent. Never fails.
    pub fn table(&mut self, name: &str) -> TableId {
        if let Some(&index) = self.table_names.get(name) {
            return TableId::new(self.stamp, index);
        }
        let index = self.tables.len() as u32;
        let id = TableId::new(self.stamp, index);
        let name: Arc<str> = name.into();
        self.table_names.insert(Arc::clone(&name), index);
        self.tables.push(PropertyTable::new(id, name));
        id
    }

    /// Returns the pairwise association registered under `name`, creating
    /// an empty one if absent. Never fails.
    pub fn association(&mut self, name: &str) -> AssociationId {
        if let Some(&index) = self.association_names.get(name) {
            return AssociationId::new(self.stamp, index);
        }
        let index = self.associations.len() as u32;
        let id = AssociationId::new(self.stamp, index);
        let name: Arc<str> = name.into();
        self.association_names.insert(Arc::clone(&name), index);
        self.associations.push(AssociationTable::new(id, name));
        id
    }

    /// Returns the group association registered under `name`, creating an
    /// empty one if absent. Never fails.
    pub fn association_group(&mut self, name: &str) -> GroupId {
        if let Some(&index) = self.group_names.get(name) {
            return GroupId::new(self.stamp, index);
        }
        let index = self.groups.len() as u32;
        let id = GroupId::new(self.stamp, index);
        let name: Arc<str> = name.into();
        self.group_names.insert(Arc::clone(&name), index);
        self.groups.push(AssociationGroupTable::new(id, name));
        id
    }

    // --- Mutation by handle ---

    /// Declares a column on a table. See [`PropertyTable::add_column`].
    ///
    /// # Errors
    ///
    /// Handle errors for `table`, plus the schema errors of
    /// [`PropertyTable::add_column`].
    pub fn add_column(
        &mut self,
        table: TableId,
        name: &str,
        kind: ValueKind,
        default: impl Into<Value>,
    ) -> Result<ColumnHandle> {
        self.table_mut(table)?.add_column(name, kind, default)
    }

    /// Appends a row to a table. See [`PropertyTable::create_row`].
    ///
    /// # Errors
    ///
    /// Handle errors for `table`.
    pub fn create_row(&mut self, table: TableId) -> Result<RowHandle> {
        Ok(self.table_mut(table)?.create_row())
    }

    /// Sets one cell. See [`PropertyTable::set`].
    ///
    /// # Errors
    ///
    /// Handle errors for either handle, `TypeMismatch` for a wrong-kind
    /// value.
    pub fn set(
        &mut self,
        row: RowHandle,
        column: ColumnHandle,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.table_mut(column.table)?.set(row, column, value)
    }

    /// Reads one cell. See [`PropertyTable::get`].
    ///
    /// # Errors
    ///
    /// Handle errors for either handle.
    pub fn get(&self, row: RowHandle, column: ColumnHandle) -> Result<Value> {
        self.table_ref(column.table)?.get(row, column)
    }

    /// Returns a table's row count.
    ///
    /// # Errors
    ///
    /// Handle errors for `table`.
    pub fn row_count(&self, table: TableId) -> Result<u64> {
        Ok(self.table_ref(table)?.row_count())
    }

    /// Records a pairwise association between two rows.
    ///
    /// Both rows must be current rows of tables owned by this store; the
    /// two tables may be the same or different. Duplicate pairs are kept.
    ///
    /// # Errors
    ///
    /// `HandleMismatch` / `StaleHandle` if the association or either row
    /// does not belong to this store's current lifetime.
    pub fn associate(
        &mut self,
        association: AssociationId,
        left: RowHandle,
        right: RowHandle,
    ) -> Result<()> {
        self.check_stamp(association.stamp, &association)?;
        self.validate_row(left)?;
        self.validate_row(right)?;
        let table = self
            .associations
            .get_mut(association.index as usize)
            .ok_or_else(|| {
                Error::handle_mismatch(format!("{association:?} is not registered in this store"))
            })?;
        table.push(left, right);
        Ok(())
    }

    /// Appends `child` to `parent`'s group, starting the group if the
    /// parent has not been seen yet.
    ///
    /// # Errors
    ///
    /// Same handle checks as [`Store::associate`].
    pub fn associate_child(
        &mut self,
        group: GroupId,
        parent: RowHandle,
        child: RowHandle,
    ) -> Result<()> {
        self.check_stamp(group.stamp, &group)?;
        self.validate_row(parent)?;
        self.validate_row(child)?;
        let table = self.groups.get_mut(group.index as usize).ok_or_else(|| {
            Error::handle_mismatch(format!("{group:?} is not registered in this store"))
        })?;
        table.append(parent, child);
        Ok(())
    }

    /// Discards all tables, associations, and handles issued so far.
    ///
    /// Called once per event boundary. Every previously issued handle is
    /// invalid afterwards: using one is rejected, never silently honored.
    pub fn reset(&mut self) {
        self.stamp.epoch += 1;
        self.tables.clear();
        self.table_names.clear();
        self.associations.clear();
        self.association_names.clear();
        self.groups.clear();
        self.group_names.clear();
    }

    // --- Read path for the renderer ---

    /// Iterates property tables in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &PropertyTable> {
        self.tables.iter()
    }

    /// Looks up a property table by name without creating it.
    #[must_use]
    pub fn table_by_name(&self, name: &str) -> Option<&PropertyTable> {
        self.table_names
            .get(name)
            .map(|&index| &self.tables[index as usize])
    }

    /// Iterates pairwise associations in registration order.
    pub fn associations(&self) -> impl Iterator<Item = &AssociationTable> {
        self.associations.iter()
    }

    /// Looks up a pairwise association by name without creating it.
    #[must_use]
    pub fn association_by_name(&self, name: &str) -> Option<&AssociationTable> {
        self.association_names
            .get(name)
            .map(|&index| &self.associations[index as usize])
    }

    /// Iterates group associations in registration order.
    pub fn association_groups(&self) -> impl Iterator<Item = &AssociationGroupTable> {
        self.groups.iter()
    }

    /// Looks up a group association by name without creating it.
    #[must_use]
    pub fn association_group_by_name(&self, name: &str) -> Option<&AssociationGroupTable> {
        self.group_names
            .get(name)
            .map(|&index| &self.groups[index as usize])
    }

    // --- Private helpers ---

    fn table_mut(&mut self, id: TableId) -> Result<&mut PropertyTable> {
        self.check_stamp(id.stamp, &id)?;
        self.tables.get_mut(id.index as usize).ok_or_else(|| {
            Error::handle_mismatch(format!("{id:?} is not registered in this store"))
        })
    }

    fn table_ref(&self, id: TableId) -> Result<&PropertyTable> {
        self.check_stamp(id.stamp, &id)?;
        self.tables.get(id.index as usize).ok_or_else(|| {
            Error::handle_mismatch(format!("{id:?} is not registered in this store"))
        })
    }

    /// Checks that a row handle names a current row of a table owned by
    /// this store.
    fn validate_row(&self, row: RowHandle) -> Result<()> {
        let table = self.table_ref(row.table)?;
        if row.row >= table.row_count() {
            return Err(Error::handle_mismatch(format!(
                "{row:?} is out of range for table {} ({} rows)",
                table.name(),
                table.row_count()
            )));
        }
        Ok(())
    }

    fn check_stamp(&self, stamp: StoreStamp, handle: &dyn fmt::Debug) -> Result<()> {
        if stamp == self.stamp {
            return Ok(());
        }
        if stamp.store == self.stamp.store {
            // Same store, earlier epoch: issued before a reset.
            return Err(Error::stale_handle(format!(
                "{handle:?} was issued before this store's last reset (epoch {})",
                self.stamp.epoch
            )));
        }
        Err(Error::handle_mismatch(format!(
            "{handle:?} was issued by a different store"
        )))
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use serde::ser::SerializeStruct;
    use serde::{Serialize, Serializer};

    use super::Store;

    impl Serialize for Store {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            // Registration order throughout; the renderer walks this as
            // the complete event payload.
            let mut state = serializer.serialize_struct("Store", 3)?;
            state.serialize_field("tables", &self.tables)?;
            state.serialize_field("associations", &self.associations)?;
            state.serialize_field("groups", &self.groups)?;
            state.end()
        }
    }
}
