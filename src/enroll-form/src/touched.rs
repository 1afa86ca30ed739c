//! Record of which fields the user has interacted with.
//!
//! Touched state only gates error display. It never feeds back into
//! validation, and between resets it only grows: there is deliberately no way
//! to un-touch a single field.

use std::collections::BTreeSet;

use crate::values::FieldId;

/// Set of fields the user has edited or blurred past.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchedSet {
    fields: BTreeSet<FieldId>,
}

impl TouchedSet {
    /// An empty set. No field starts out touched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interaction with `field`.
    pub fn mark(&mut self, field: FieldId) {
        self.fields.insert(field);
    }

    /// Record an interaction with every field.
    ///
    /// A submit attempt counts as touching the whole form, so that errors on
    /// fields the user never reached become visible.
    pub fn mark_all(&mut self) {
        self.fields.extend(FieldId::ALL);
    }

    /// Returns true if `field` has been interacted with since the last reset.
    pub fn is_touched(&self, field: FieldId) -> bool {
        self.fields.contains(&field)
    }

    /// Forget all interactions.
    pub fn reset(&mut self) {
        self.fields.clear();
    }

    /// Number of touched fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field has been touched.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let touched = TouchedSet::new();
        assert!(touched.is_empty());
        assert!(!touched.is_touched(FieldId::FullName));
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut touched = TouchedSet::new();
        touched.mark(FieldId::Dependents);
        touched.mark(FieldId::Dependents);
        assert!(touched.is_touched(FieldId::Dependents));
        assert_eq!(touched.len(), 1);
    }

    #[test]
    fn test_mark_all_covers_every_field() {
        let mut touched = TouchedSet::new();
        touched.mark_all();
        for field in FieldId::ALL {
            assert!(touched.is_touched(field));
        }
        assert_eq!(touched.len(), FieldId::ALL.len());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut touched = TouchedSet::new();
        touched.mark_all();
        touched.reset();
        assert!(touched.is_empty());
        assert!(!touched.is_touched(FieldId::AcceptedTermsAndConditions));
    }
}
