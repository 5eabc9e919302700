//! Ordered Entity List
//!
//! Insertion-ordered list keyed by `RecordId`. List order is display order.

use serde::Serialize;
use crate::domain::{Entity, RecordId};

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntityList<T: Entity> {
    entries: Vec<T>,
}

impl<T: Entity> EntityList<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    /// Append at the tail
    pub fn push(&mut self, entity: T) {
        self.entries.push(entity);
    }

    /// Remove an entity by ID
    pub fn remove(&mut self, id: &RecordId) -> Option<T> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: &RecordId) -> Option<&mut T> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.entries.iter().map(Entity::id)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Entity> Default for EntityList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InventoryItem;

    fn list() -> EntityList<InventoryItem> {
        EntityList::new(vec![
            InventoryItem::new(RecordId::from("1"), "A"),
            InventoryItem::new(RecordId::from("2"), "B"),
        ])
    }

    #[test]
    fn test_push_appends_at_tail() {
        let mut items = list();
        items.push(InventoryItem::new(RecordId::from("3"), "C"));
        let names: Vec<_> = items.as_slice().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut items = list();
        items.push(InventoryItem::new(RecordId::from("3"), "C"));

        let removed = items.remove(&RecordId::from("2")).unwrap();
        assert_eq!(removed.name, "B");

        let ids: Vec<_> = items.ids().map(RecordId::as_str).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut items = list();
        assert!(items.remove(&RecordId::from("9")).is_none());
        assert_eq!(items.len(), 2);
    }
}
