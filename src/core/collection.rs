// src/core/collection.rs
//! Copy-on-write editing of the ordered lists inside a resume
//!
//! The free functions work on plain slices addressed by position. `Collection`
//! pairs every value with an `ItemId` assigned on insertion, so a caller that
//! captured an id keeps pointing at the same entry after earlier entries are
//! removed.

use std::fmt;
use uuid::Uuid;

use crate::types::FieldSet;

/// New sequence with `blank` at the end
pub fn append<T: Clone>(collection: &[T], blank: T) -> Vec<T> {
    let mut next = Vec::with_capacity(collection.len() + 1);
    next.extend_from_slice(collection);
    next.push(blank);
    next
}

/// New sequence where only `field` of the item at `index` is replaced.
///
/// # Panics
/// If `index` is out of range. Callers derive indices from the current
/// sequence, so this is a bug on their side.
pub fn update_at<T>(collection: &[T], index: usize, field: T::Field, value: String) -> Vec<T>
where
    T: Clone + FieldSet,
{
    assert!(
        index < collection.len(),
        "update_at index {} out of range (len {})",
        index,
        collection.len()
    );

    let mut next = collection.to_vec();
    next[index].set_field(field, value);
    next
}

/// New sequence without the item at `index`; later items shift down by one.
///
/// # Panics
/// If `index` is out of range.
pub fn remove_at<T: Clone>(collection: &[T], index: usize) -> Vec<T> {
    assert!(
        index < collection.len(),
        "remove_at index {} out of range (len {})",
        index,
        collection.len()
    );

    collection
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Stable identity of one entry, never serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordered values with a parallel list of ids. Both vectors always have the
/// same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    ids: Vec<ItemId>,
    values: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T: Clone> Collection<T> {
    /// Wrap values coming from the wire, each one gets a fresh id
    pub fn from_values(values: Vec<T>) -> Self {
        let ids = values.iter().map(|_| ItemId::new()).collect();
        Self { ids, values }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.ids.get(index).copied()
    }

    /// Current position of an entry, `None` once it has been removed
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    pub fn get_by_id(&self, id: ItemId) -> Option<&T> {
        self.position(id).map(|index| &self.values[index])
    }

    /// Copy with `blank` appended under an id chosen by the caller
    pub fn appended_with_id(&self, id: ItemId, blank: T) -> Self {
        Self {
            ids: append(&self.ids, id),
            values: append(&self.values, blank),
        }
    }

    /// Copy without the entry `id`, or `None` if it is already gone
    pub fn removed(&self, id: ItemId) -> Option<Self> {
        let index = self.position(id)?;
        Some(Self {
            ids: remove_at(&self.ids, index),
            values: remove_at(&self.values, index),
        })
    }
}

impl<T: Clone + FieldSet> Collection<T> {
    /// Copy with one field of entry `id` replaced, or `None` if it is gone
    pub fn updated(&self, id: ItemId, field: T::Field, value: String) -> Option<Self> {
        let index = self.position(id)?;
        Some(Self {
            ids: self.ids.clone(),
            values: update_at(&self.values, index, field, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExperienceField, ExperienceItem, SkillText};

    fn job(company: &str) -> ExperienceItem {
        ExperienceItem {
            company: company.to_string(),
            role: "Engineer".to_string(),
            start_date: "2021-03".to_string(),
            end_date: "2023-07".to_string(),
            description: format!("Worked at {}", company),
        }
    }

    #[test]
    fn test_append_then_remove_last_is_identity() {
        let jobs = vec![job("Acme"), job("Globex")];
        let grown = append(&jobs, ExperienceItem::default());
        assert_eq!(grown.len(), 3);
        assert_eq!(remove_at(&grown, jobs.len()), jobs);
    }

    #[test]
    fn test_append_to_empty() {
        let skills = append(&[], "Rust".to_string());
        assert_eq!(skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_update_at_changes_one_field_of_one_item() {
        let jobs = vec![job("Acme"), job("Globex"), job("Initech")];
        let edited = update_at(&jobs, 1, ExperienceField::Role, "Manager".to_string());

        assert_eq!(edited[0], jobs[0]);
        assert_eq!(edited[2], jobs[2]);
        assert_eq!(edited[1].role, "Manager");

        let mut expected = jobs[1].clone();
        expected.role = "Manager".to_string();
        assert_eq!(edited[1], expected);
        // source is untouched
        assert_eq!(jobs[1].role, "Engineer");
    }

    #[test]
    fn test_update_skill() {
        let skills = vec!["Go".to_string(), "SQL".to_string()];
        let edited = update_at(&skills, 0, SkillText, "Rust".to_string());
        assert_eq!(edited, vec!["Rust".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_remove_at_shifts_later_items_down() {
        let jobs = vec![job("A"), job("B"), job("C"), job("D")];
        let remaining = remove_at(&jobs, 1);

        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0], jobs[0]);
        assert_eq!(remaining[1], jobs[2]);
        assert_eq!(remaining[2], jobs[3]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_update_at_out_of_range_panics() {
        update_at(&[job("A")], 1, ExperienceField::Company, "B".to_string());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_remove_at_out_of_range_panics() {
        remove_at::<String>(&[], 0);
    }

    #[test]
    fn test_ids_follow_entries_across_removal() {
        let collection = Collection::from_values(vec![job("A"), job("B"), job("C")]);
        let id_of_c = collection.id_at(2).unwrap();

        let shrunk = collection.removed(collection.id_at(0).unwrap()).unwrap();
        assert_eq!(shrunk.position(id_of_c), Some(1));
        assert_eq!(shrunk.get_by_id(id_of_c).unwrap().company, "C");
        // the original snapshot still sees its own layout
        assert_eq!(collection.position(id_of_c), Some(2));
    }

    #[test]
    fn test_removed_entry_cannot_be_updated() {
        let collection = Collection::from_values(vec![job("A"), job("B")]);
        let id_of_b = collection.id_at(1).unwrap();
        let shrunk = collection.removed(id_of_b).unwrap();

        assert!(shrunk
            .updated(id_of_b, ExperienceField::Description, "late".to_string())
            .is_none());
        assert!(shrunk.removed(id_of_b).is_none());
        assert_eq!(shrunk.values(), &[job("A")]);
    }

    #[test]
    fn test_appended_with_id_keeps_ids_parallel() {
        let first = ItemId::new();
        let collection = Collection::<String>::default().appended_with_id(first, String::new());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.id_at(0), Some(first));

        let second = ItemId::default();
        let collection = collection.appended_with_id(second, "SQL".to_string());
        assert_ne!(first, second);
        assert_eq!(collection.ids(), &[first, second]);
        assert_eq!(collection.position(second), Some(1));
    }
}
