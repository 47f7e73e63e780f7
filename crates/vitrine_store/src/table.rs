//! Property tables: ordered typed columns with defaults, growable rows.
//!
//! Rows store only non-default overrides, keyed per column. The effective
//! value of a cell is override-or-default, computed at read time, which
//! makes `add_column` O(1) regardless of how many rows already exist and
//! gives retroactive defaults for free.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vitrine_foundation::{ColumnHandle, Error, Result, RowHandle, TableId, Value, ValueKind};

/// One declared column: name, kind tag, default, and sparse overrides.
#[derive(Clone, Debug)]
struct Column {
    name: Arc<str>,
    kind: ValueKind,
    default: Value,
    /// Row index -> explicitly written value.
    overrides: HashMap<u64, Value>,
}

/// A single named table: an ordered set of typed columns, each with a
/// default value, and a growable sequence of rows.
///
/// Column names are unique within the table. Declaring an existing column
/// again with the same kind is a no-op returning the existing handle, so
/// independent producers can share one table without coordinating order.
/// Rows are never reordered or deleted within an event.
#[derive(Clone, Debug)]
pub struct PropertyTable {
    id: TableId,
    name: Arc<str>,
    columns: Vec<Column>,
    names: HashMap<Arc<str>, u32>,
    rows: u64,
}

impl PropertyTable {
    /// Creates an empty table owned by the store that minted `id`.
    pub(crate) fn new(id: TableId, name: Arc<str>) -> Self {
        Self {
            id,
            name,
            columns: Vec::new(),
            names: HashMap::new(),
            rows: 0,
        }
    }

    /// Returns the table's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the table's id.
    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Declares a column, returning a handle for field access.
    ///
    /// Idempotent for an identical (name, kind) pair: the existing handle
    /// is returned and no row value changes. The default offered on a
    /// redeclaration is ignored; the first declaration wins.
    ///
    /// # Errors
    ///
    /// - [`Error::SchemaConflict`] if the name exists with a different kind.
    /// - [`Error::TypeMismatch`] if `default` is not of kind `kind`.
    pub fn add_column(
        &mut self,
        name: &str,
        kind: ValueKind,
        default: impl Into<Value>,
    ) -> Result<ColumnHandle> {
        let default = default.into();
        if !kind.accepts(default.kind()) {
            return Err(Error::type_mismatch(name, kind, default.kind()));
        }

        if let Some(&index) = self.names.get(name) {
            let existing = &self.columns[index as usize];
            if existing.kind == kind {
                return Ok(ColumnHandle::new(self.id, index));
            }
            return Err(Error::schema_conflict(
                self.name.as_ref(),
                name,
                existing.kind,
                kind,
            ));
        }

        let index = self.columns.len() as u32;
        let name: Arc<str> = name.into();
        self.names.insert(Arc::clone(&name), index);
        self.columns.push(Column {
            name,
            kind,
            default,
            overrides: HashMap::new(),
        });
        Ok(ColumnHandle::new(self.id, index))
    }

    /// Appends one row, initialized to every column's default.
    ///
    /// O(1): no cell is materialized until overwritten.
    pub fn create_row(&mut self) -> RowHandle {
        let handle = RowHandle::new(self.id, self.rows);
        self.rows += 1;
        handle
    }

    /// Sets one cell.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] if `value` is not of the column's kind.
    /// - [`Error::HandleMismatch`] / [`Error::StaleHandle`] if either
    ///   handle was not issued by this table in its current lifetime.
    pub fn set(&mut self, row: RowHandle, column: ColumnHandle, value: impl Into<Value>) -> Result<()> {
        self.check_row(row)?;
        self.check_column(column)?;

        let value = value.into();
        let col = &mut self.columns[column.column as usize];
        if !col.kind.accepts(value.kind()) {
            return Err(Error::type_mismatch(col.name.as_ref(), col.kind, value.kind()));
        }
        col.overrides.insert(row.row, value);
        Ok(())
    }

    /// Reads one cell: the last written value, or the column default.
    ///
    /// # Errors
    ///
    /// Same handle checks as [`PropertyTable::set`].
    pub fn get(&self, row: RowHandle, column: ColumnHandle) -> Result<Value> {
        self.check_row(row)?;
        self.check_column(column)?;

        let col = &self.columns[column.column as usize];
        Ok(col
            .overrides
            .get(&row.row)
            .cloned()
            .unwrap_or_else(|| col.default.clone()))
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn row_count(&self) -> u64 {
        self.rows
    }

    /// Returns the number of declared columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterates column descriptors in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = ColumnInfo<'_>> + '_ {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, col)| ColumnInfo {
                handle: ColumnHandle::new(self.id, index as u32),
                column: col,
            })
    }

    /// Iterates rows in creation order.
    ///
    /// The iterator is restartable: calling `rows()` again begins a fresh
    /// pass. This is the read path the renderer uses after all producers
    /// for an event have finished.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        (0..self.rows).map(move |row| RowView { table: self, row })
    }

    /// Checks that a row handle belongs to this table and is in range.
    fn check_row(&self, row: RowHandle) -> Result<()> {
        self.check_owner(row.table, &row)?;
        if row.row >= self.rows {
            return Err(Error::handle_mismatch(format!(
                "{row:?} is out of range for table {} ({} rows)",
                self.name, self.rows
            )));
        }
        Ok(())
    }

    /// Checks that a column handle belongs to this table and is in range.
    fn check_column(&self, column: ColumnHandle) -> Result<()> {
        self.check_owner(column.table, &column)?;
        if column.column as usize >= self.columns.len() {
            return Err(Error::handle_mismatch(format!(
                "{column:?} is out of range for table {} ({} columns)",
                self.name,
                self.columns.len()
            )));
        }
        Ok(())
    }

    fn check_owner(&self, table: TableId, handle: &dyn fmt::Debug) -> Result<()> {
        if table == self.id {
            return Ok(());
        }
        if table.stamp.store == self.id.stamp.store
            && table.index == self.id.index
            && table.stamp.epoch != self.id.stamp.epoch
        {
            return Err(Error::stale_handle(format!(
                "{handle:?} was issued before the last reset of table {}",
                self.name
            )));
        }
        Err(Error::handle_mismatch(format!(
            "{handle:?} does not belong to table {}",
            self.name
        )))
    }
}

/// A column descriptor exposed to the renderer.
#[derive(Clone, Copy)]
pub struct ColumnInfo<'a> {
    handle: ColumnHandle,
    column: &'a Column,
}

impl ColumnInfo<'_> {
    /// The column's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.column.name
    }

    /// The column's declared kind.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.column.kind
    }

    /// The column's default value.
    #[must_use]
    pub fn default(&self) -> &Value {
        &self.column.default
    }

    /// The handle for field access through this column.
    #[must_use]
    pub fn handle(&self) -> ColumnHandle {
        self.handle
    }
}

impl fmt::Debug for ColumnInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ColumnInfo({}: {} = {:?})",
            self.column.name, self.column.kind, self.column.default
        )
    }
}

/// One row of a table, exposing all column values in declaration order.
#[derive(Clone, Copy)]
pub struct RowView<'a> {
    table: &'a PropertyTable,
    row: u64,
}

impl<'a> RowView<'a> {
    /// The handle of this row.
    #[must_use]
    pub fn handle(&self) -> RowHandle {
        RowHandle::new(self.table.id, self.row)
    }

    /// Reads one cell of this row.
    ///
    /// # Errors
    ///
    /// Same handle checks as [`PropertyTable::get`].
    pub fn value(&self, column: ColumnHandle) -> Result<Value> {
        self.table.get(self.handle(), column)
    }

    /// Iterates `(column name, effective value)` in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&'a str, Value)> + '_ {
        let row = self.row;
        self.table.columns.iter().map(move |col| {
            let value = col
                .overrides
                .get(&row)
                .cloned()
                .unwrap_or_else(|| col.default.clone());
            (&*col.name, value)
        })
    }
}

impl fmt::Debug for RowView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.values() {
            map.entry(&name, &value);
        }
        map.finish()
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use serde::ser::{SerializeSeq, SerializeStruct};
    use serde::{Serialize, Serializer};

    use super::PropertyTable;

    struct Columns<'a>(&'a PropertyTable);

    impl Serialize for Columns<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.0.column_count()))?;
            for col in self.0.columns() {
                seq.serialize_element(&(col.name(), col.kind(), col.default()))?;
            }
            seq.end()
        }
    }

    struct Rows<'a>(&'a PropertyTable);

    impl Serialize for Rows<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.0.row_count() as usize))?;
            for row in self.0.rows() {
                let values: Vec<_> = row.values().map(|(_, value)| value).collect();
                seq.serialize_element(&values)?;
            }
            seq.end()
        }
    }

    impl Serialize for PropertyTable {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            // Columns in declaration order, then row-major values;
            // exactly what the renderer walks.
            let mut state = serializer.serialize_struct("PropertyTable", 3)?;
            state.serialize_field("name", self.name())?;
            state.serialize_field("columns", &Columns(self))?;
            state.serialize_field("rows", &Rows(self))?;
            state.end()
        }
    }
}
