use crate::{
    model::{FieldDescriptor, normalize_name},
    policy::DropReason,
    value::Value,
};
use std::collections::{BTreeMap, btree_map::Entry};

///
/// ChangeRecord
/// One recorded field assignment, not yet coerced.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRecord {
    pub descriptor: &'static FieldDescriptor,
    pub raw: Value,
}

impl ChangeRecord {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.descriptor.name
    }
}

///
/// RecordOutcome
///
/// What `record_change` did with one assignment.
/// `Unknown` and `Dropped` are not errors.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordOutcome {
    Recorded,
    Replaced,
    Unknown,
    Dropped(DropReason),
}

impl RecordOutcome {
    /// Returns true when the change set now holds the value.
    #[must_use]
    pub const fn is_kept(self) -> bool {
        matches!(self, Self::Recorded | Self::Replaced)
    }
}

///
/// ChangeSet
///
/// Recorded assignments keyed by normalized field name.
/// Never holds two records for the same field.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    records: BTreeMap<String, ChangeRecord>,
}

impl ChangeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Insert a record unless its field is already present.
    ///
    /// Returns the rejected record on conflict.
    pub(crate) fn insert_new(&mut self, record: ChangeRecord) -> Result<(), ChangeRecord> {
        match self.records.entry(record.descriptor.normalized_name()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
            Entry::Occupied(_) => Err(record),
        }
    }

    /// Insert or replace a record; returns true when a record was replaced.
    pub(crate) fn upsert(&mut self, record: ChangeRecord) -> bool {
        self.records
            .insert(record.descriptor.normalized_name(), record)
            .is_some()
    }

    /// Case-insensitive record lookup.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ChangeRecord> {
        self.records.get(&normalize_name(field))
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Drop a recorded change; returns the removed record.
    pub fn remove(&mut self, field: &str) -> Option<ChangeRecord> {
        self.records.remove(&normalize_name(field))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.values()
    }

    /// Declared names of the recorded fields.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.records.values().map(ChangeRecord::field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeRecord;
    type IntoIter = std::collections::btree_map::Values<'a, String, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}
