//! Form state aggregation
//!
//! A `FormState` is an immutable snapshot of every field's current value and
//! validity plus the derived overall validity. Field inputs validate their
//! own raw text and report `FieldUpdate` messages; applying one produces the
//! next snapshot and is the sole mutation entry point.

use super::field::{FieldId, FieldUpdate, FieldValue};
use std::collections::HashMap;

/// Immutable snapshot of a whole form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: HashMap<FieldId, FieldValue>,
    validities: HashMap<FieldId, bool>,
    form_is_valid: bool,
}

impl FormState {
    /// Build a seeded state from `(id, value, is_valid)` triples
    pub fn new<I, F, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (F, V, bool)>,
        F: Into<FieldId>,
        V: Into<FieldValue>,
    {
        let mut values = HashMap::new();
        let mut validities = HashMap::new();
        for (id, value, is_valid) in fields {
            let id = id.into();
            values.insert(id.clone(), value.into());
            validities.insert(id, is_valid);
        }
        let form_is_valid = validities.values().all(|valid| *valid);
        Self {
            values,
            validities,
            form_is_valid,
        }
    }

    /// Apply one field update, producing the next snapshot
    ///
    /// The updated field's value and validity are inserted (a never-seen id
    /// simply becomes a new tracked field), every other field is carried
    /// over unchanged, and the overall validity is recomputed as the AND
    /// over the full validity mapping. Total and pure: there is no failure
    /// case and `self` is never mutated.
    pub fn apply(&self, update: FieldUpdate) -> Self {
        let mut values = self.values.clone();
        let mut validities = self.validities.clone();
        values.insert(update.id.clone(), update.value);
        validities.insert(update.id, update.is_valid);
        // One false entry anywhere invalidates the whole form, so the AND
        // walks every key instead of patching the previous flag.
        let form_is_valid = validities.values().all(|valid| *valid);
        Self {
            values,
            validities,
            form_is_valid,
        }
    }

    /// Overall form validity: the AND of every field's validity
    pub fn is_valid(&self) -> bool {
        self.form_is_valid
    }

    /// Current value of a field
    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    /// Current validity of a field
    pub fn field_is_valid(&self, id: &str) -> Option<bool> {
        self.validities.get(id).copied()
    }

    /// All current values keyed by field id
    pub fn values(&self) -> &HashMap<FieldId, FieldValue> {
        &self.values
    }

    /// Ids of every tracked field
    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> + '_ {
        self.values.keys()
    }

    /// Number of tracked fields
    pub fn field_count(&self) -> usize {
        self.values.len()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(std::iter::empty::<(FieldId, FieldValue, bool)>())
    }
}
