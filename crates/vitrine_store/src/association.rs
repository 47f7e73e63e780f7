//! Associations between rows: pairwise relations and one-to-many groups.
//!
//! Both kinds preserve insertion order, because downstream rendering of a
//! parent's children depends on the order the producer associated them.
//! Handle validation happens in the owning `Store`; these tables only
//! record pairs the store has already vetted.

use std::collections::HashMap;
use std::sync::Arc;

use vitrine_foundation::{AssociationId, GroupId, RowHandle};

/// A named binary relation between rows of two (possibly identical)
/// property tables.
///
/// This is a multiset: duplicate identical pairs are permitted, since
/// repeated producer passes may legitimately re-link the same logical
/// relationship.
#[derive(Clone, Debug)]
pub struct AssociationTable {
    id: AssociationId,
    name: Arc<str>,
    pairs: Vec<(RowHandle, RowHandle)>,
}

impl AssociationTable {
    /// Creates an empty association table.
    pub(crate) fn new(id: AssociationId, name: Arc<str>) -> Self {
        Self {
            id,
            name,
            pairs: Vec::new(),
        }
    }

    /// Returns the association's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the association's id.
    #[must_use]
    pub fn id(&self) -> AssociationId {
        self.id
    }

    /// Records a pair. Called by the store after handle validation.
    pub(crate) fn push(&mut self, left: RowHandle, right: RowHandle) {
        self.pairs.push((left, right));
    }

    /// Returns the number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs in association order.
    #[must_use]
    pub fn pairs(&self) -> &[(RowHandle, RowHandle)] {
        &self.pairs
    }

    /// Iterates pairs in association order. Restartable.
    pub fn iter(&self) -> impl Iterator<Item = (RowHandle, RowHandle)> + '_ {
        self.pairs.iter().copied()
    }

    /// Iterates the right-hand rows associated with `left`, in
    /// association order.
    pub fn targets_of(&self, left: RowHandle) -> impl Iterator<Item = RowHandle> + '_ {
        self.pairs
            .iter()
            .filter(move |(l, _)| *l == left)
            .map(|(_, r)| *r)
    }
}

/// One parent row and its ordered children.
#[derive(Clone, Debug)]
struct Group {
    parent: RowHandle,
    children: Vec<RowHandle>,
}

/// A named one-to-many relation: each parent row owns an ordered list of
/// child rows.
///
/// Semantically equivalent to N pairwise associations sharing one parent,
/// but recorded as one logical group so a consumer can iterate "all
/// children of this parent" without a scan. Appending a child under a
/// parent that has not been seen yet implicitly starts a new group.
/// Groups enumerate in first-seen parent order.
#[derive(Clone, Debug)]
pub struct AssociationGroupTable {
    id: GroupId,
    name: Arc<str>,
    groups: Vec<Group>,
    /// Parent row -> position in `groups`.
    index: HashMap<RowHandle, usize>,
}

impl AssociationGroupTable {
    /// Creates an empty group table.
    pub(crate) fn new(id: GroupId, name: Arc<str>) -> Self {
        Self {
            id,
            name,
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the group table's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the group table's id.
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Appends a child under a parent. Called by the store after handle
    /// validation.
    pub(crate) fn append(&mut self, parent: RowHandle, child: RowHandle) {
        let slot = *self.index.entry(parent).or_insert_with(|| {
            self.groups.push(Group {
                parent,
                children: Vec::new(),
            });
            self.groups.len() - 1
        });
        self.groups[slot].children.push(child);
    }

    /// Returns the number of groups (distinct parents seen).
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no parent has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The children of `parent` in association order, if the parent has
    /// been seen.
    #[must_use]
    pub fn children_of(&self, parent: RowHandle) -> Option<&[RowHandle]> {
        self.index
            .get(&parent)
            .map(|&slot| self.groups[slot].children.as_slice())
    }

    /// Iterates `(parent, children)` in first-seen parent order.
    /// Restartable.
    pub fn iter(&self) -> impl Iterator<Item = (RowHandle, &[RowHandle])> + '_ {
        self.groups
            .iter()
            .map(|g| (g.parent, g.children.as_slice()))
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use serde::ser::{SerializeSeq, SerializeStruct};
    use serde::{Serialize, Serializer};

    use super::{AssociationGroupTable, AssociationTable};

    impl Serialize for AssociationTable {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("AssociationTable", 2)?;
            state.serialize_field("name", self.name())?;
            state.serialize_field("pairs", self.pairs())?;
            state.end()
        }
    }

    struct Groups<'a>(&'a AssociationGroupTable);

    impl Serialize for Groups<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.0.group_count()))?;
            for (parent, children) in self.0.iter() {
                seq.serialize_element(&(parent, children))?;
            }
            seq.end()
        }
    }

    impl Serialize for AssociationGroupTable {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("AssociationGroupTable", 2)?;
            state.serialize_field("name", self.name())?;
            state.serialize_field("groups", &Groups(self))?;
            state.end()
        }
    }
}
