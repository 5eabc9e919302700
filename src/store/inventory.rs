//! Inventory Store
//!
//! Owns the inventory list, the "new item name" draft and the visibility of
//! the add-item dialog. Invalid names and unknown ids are ignored.

use serde::Serialize;
use tokio::sync::watch;

use super::change::ChangeFeed;
use super::entity_list::EntityList;
use crate::domain::{IdGenerator, InventoryItem, RecordId};

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySnapshot {
    pub items: Vec<InventoryItem>,
    pub draft_name: String,
    pub add_dialog_open: bool,
    pub version: u64,
}

#[derive(Debug)]
pub struct InventoryStore {
    items: EntityList<InventoryItem>,
    ids: IdGenerator,
    draft_name: String,
    add_dialog_open: bool,
    changes: ChangeFeed,
}

impl InventoryStore {
    pub fn new(seed: Vec<InventoryItem>) -> Self {
        let items = EntityList::new(seed);
        let ids = IdGenerator::after(items.ids());
        Self {
            items,
            ids,
            draft_name: String::new(),
            add_dialog_open: false,
            changes: ChangeFeed::new(),
        }
    }

    /// Add a new item with zero quantity
    ///
    /// Blank names are ignored; otherwise the name is kept as typed. On
    /// success the draft is cleared and the add-item dialog closes.
    pub fn add_item(&mut self, name: &str) -> Option<RecordId> {
        if name.trim().is_empty() {
            log::debug!("Ignoring add_item with blank name");
            return None;
        }

        let id = self.ids.next_id();
        self.items.push(InventoryItem::new(id.clone(), name));
        self.draft_name.clear();
        self.add_dialog_open = false;
        self.changes.bump();

        log::info!("Added inventory item {} ({})", id, name);
        Some(id)
    }

    /// Add an item named by the current draft
    pub fn submit_draft(&mut self) -> Option<RecordId> {
        let name = self.draft_name.clone();
        self.add_item(&name)
    }

    /// Remove an item by ID, returns whether anything was removed
    pub fn remove_item(&mut self, id: &RecordId) -> bool {
        match self.items.remove(id) {
            Some(item) => {
                self.changes.bump();
                log::info!("Removed inventory item {} ({})", id, item.name);
                true
            }
            None => {
                log::debug!("remove_item: no item {}", id);
                false
            }
        }
    }

    /// Change an item's quantity by `delta`, never going below zero
    ///
    /// Returns the new quantity, or `None` if the item does not exist.
    pub fn adjust_quantity(&mut self, id: &RecordId, delta: i64) -> Option<u32> {
        let Some(item) = self.items.get_mut(id) else {
            log::debug!("adjust_quantity: no item {}", id);
            return None;
        };

        let before = item.quantity;
        let after = item.adjust(delta);
        if after != before {
            self.changes.bump();
        }
        Some(after)
    }

    pub fn increment(&mut self, id: &RecordId) -> Option<u32> {
        self.adjust_quantity(id, 1)
    }

    pub fn decrement(&mut self, id: &RecordId) -> Option<u32> {
        self.adjust_quantity(id, -1)
    }

    pub fn set_draft_name(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.draft_name {
            self.draft_name = text;
            self.changes.bump();
        }
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn open_add_dialog(&mut self) {
        if !self.add_dialog_open {
            self.add_dialog_open = true;
            self.changes.bump();
        }
    }

    /// Close without adding; the draft is kept
    pub fn close_add_dialog(&mut self) {
        if self.add_dialog_open {
            self.add_dialog_open = false;
            self.changes.bump();
        }
    }

    pub fn is_add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    pub fn items(&self) -> &[InventoryItem] {
        self.items.as_slice()
    }

    pub fn get(&self, id: &RecordId) -> Option<&InventoryItem> {
        self.items.get(id)
    }

    pub fn version(&self) -> u64 {
        self.changes.version()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.items.as_slice().to_vec(),
            draft_name: self.draft_name.clone(),
            add_dialog_open: self.add_dialog_open,
            version: self.version(),
        }
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedData;

    fn seeded() -> InventoryStore {
        InventoryStore::new(SeedData::default().inventory)
    }

    fn id(s: &str) -> RecordId {
        RecordId::from(s)
    }

    #[test]
    fn test_add_item_appends_with_zero_quantity() {
        let mut store = seeded();

        let new_id = store.add_item("Widget C").unwrap();

        assert_eq!(store.items().len(), 3);
        let last = store.items().last().unwrap();
        assert_eq!(last.id, new_id);
        assert_eq!(last.name, "Widget C");
        assert_eq!(last.quantity, 0);
    }

    #[test]
    fn test_add_item_ignores_blank_names() {
        let mut store = seeded();
        let version = store.version();

        assert!(store.add_item("").is_none());
        assert!(store.add_item("   \t").is_none());

        assert_eq!(store.items().len(), 2);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_add_count_matches_non_blank_calls() {
        let mut store = InventoryStore::default();
        let names = ["a", " ", "b", "", "c", "\n"];

        for name in names {
            store.add_item(name);
        }

        let expected = names.iter().filter(|n| !n.trim().is_empty()).count();
        assert_eq!(store.items().len(), expected);
    }

    #[test]
    fn test_new_ids_follow_seed_and_are_not_reused() {
        let mut store = seeded();

        let first = store.add_item("Widget C").unwrap();
        assert_eq!(first.as_str(), "3");

        store.remove_item(&first);
        let second = store.add_item("Widget D").unwrap();
        assert_eq!(second.as_str(), "4");
    }

    #[test]
    fn test_add_item_keeps_name_as_typed() {
        let mut store = seeded();

        store.add_item(" Widget C ").unwrap();

        assert_eq!(store.items().last().unwrap().name, " Widget C ");
    }

    #[test]
    fn test_same_draft_does_not_bump_version() {
        let mut store = seeded();
        store.set_draft_name("Gizmo");
        let version = store.version();

        store.set_draft_name("Gizmo");
        assert_eq!(store.version(), version);

        store.set_draft_name("Gizmos");
        assert_eq!(store.version(), version + 1);
    }

    #[test]
    fn test_max_seed_id_is_not_reused() {
        let max = RecordId::new(u64::MAX.to_string());
        let mut store = InventoryStore::new(vec![InventoryItem::with_quantity(max.clone(), "Max", 1)]);

        let new_id = store.add_item("New").unwrap();

        assert_ne!(new_id, max);
        assert_eq!(new_id.as_str(), "1");
        assert_eq!(store.get(&max).unwrap().name, "Max");
        assert_eq!(store.items().len(), 2);
    }

    #[test]
    fn test_submit_draft_clears_draft_and_closes_dialog() {
        let mut store = seeded();
        store.open_add_dialog();
        store.set_draft_name("Gizmo");

        let new_id = store.submit_draft();

        assert!(new_id.is_some());
        assert_eq!(store.draft_name(), "");
        assert!(!store.is_add_dialog_open());
        assert_eq!(store.items().last().unwrap().name, "Gizmo");
    }

    #[test]
    fn test_submit_blank_draft_keeps_dialog_open() {
        let mut store = seeded();
        store.open_add_dialog();
        store.set_draft_name("  ");

        assert!(store.submit_draft().is_none());
        assert!(store.is_add_dialog_open());
        assert_eq!(store.draft_name(), "  ");
    }

    #[test]
    fn test_close_dialog_keeps_draft() {
        let mut store = seeded();
        store.open_add_dialog();
        store.set_draft_name("Half typed");
        store.close_add_dialog();

        assert!(!store.is_add_dialog_open());
        assert_eq!(store.draft_name(), "Half typed");
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut store = seeded();

        assert!(store.remove_item(&id("1")));
        let after_first = store.snapshot();
        assert!(!store.remove_item(&id("1")));

        assert_eq!(store.snapshot(), after_first);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].name, "Widget B");
    }

    #[test]
    fn test_adjust_quantity_clamps_to_zero() {
        let mut store = seeded();

        assert_eq!(store.adjust_quantity(&id("1"), -10), Some(0));
        assert_eq!(store.get(&id("1")).unwrap().quantity, 0);
    }

    #[test]
    fn test_adjust_quantity_never_negative() {
        let mut store = seeded();
        let steps = [
            (-1, 1),
            (-100, 0),
            (7, 7),
            (-3, 4),
            (i64::MIN, 0),
            (2, 2),
            (-2, 0),
            (-1, 0),
        ];

        for (delta, expected) in steps {
            assert_eq!(store.adjust_quantity(&id("2"), delta), Some(expected));
            assert_eq!(store.get(&id("2")).unwrap().quantity, expected);
        }
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut store = seeded();

        assert_eq!(store.increment(&id("2")), Some(3));
        assert_eq!(store.decrement(&id("2")), Some(2));
    }

    #[test]
    fn test_adjust_unknown_item_is_noop() {
        let mut store = seeded();
        let before = store.snapshot();

        assert_eq!(store.adjust_quantity(&id("42"), 5), None);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_clamped_decrement_does_not_bump_version() {
        let mut store = seeded();
        store.adjust_quantity(&id("1"), -5);
        let version = store.version();

        store.decrement(&id("1"));

        assert_eq!(store.version(), version);
    }
}
