//! App Configuration
//!
//! Fixed strings, the reminder interval and the launch seed data.
//! Nothing here is read from files or the environment.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, Entity, InventoryItem, MemoEntry, RecordId};

/// Time between reminder notifications
pub const REMINDER_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub const REMINDER_TITLE: &str = "Memo Reminder";
pub const REMINDER_BODY: &str = "You have active memos!";

pub const REMINDER_ON_LABEL: &str = "Turn On Reminders";
pub const REMINDER_OFF_LABEL: &str = "Turn Off Reminders";

pub const DELETE_MEMO_TITLE: &str = "Delete Memo";

/// Log file name used by the shell
pub const APP_NAME: &str = "StockMemo";

/// Lists loaded at launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub memos: Vec<MemoEntry>,
}

impl SeedData {
    /// Empty lists
    pub fn empty() -> Self {
        Self {
            inventory: Vec::new(),
            memos: Vec::new(),
        }
    }

    /// Parse seed data handed in by a host shell
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let seed: Self =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidInput(e.to_string()))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Blank names and duplicate ids would break list invariants
    pub fn validate(&self) -> DomainResult<()> {
        let mut seen = HashSet::new();
        for item in &self.inventory {
            if item.name.trim().is_empty() {
                return Err(DomainError::InvalidInput(format!("item {} has no name", item.id)));
            }
            if !seen.insert(&item.id) {
                return Err(DomainError::InvalidInput(format!("duplicate item id {}", item.id)));
            }
        }

        seen.clear();
        for memo in &self.memos {
            if memo.text().trim().is_empty() {
                return Err(DomainError::InvalidInput(format!("memo {} has no text", memo.id())));
            }
            if !seen.insert(memo.id()) {
                return Err(DomainError::InvalidInput(format!("duplicate memo id {}", memo.id())));
            }
        }
        Ok(())
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            inventory: vec![
                InventoryItem::with_quantity(RecordId::from("1"), "Widget A", 5),
                InventoryItem::with_quantity(RecordId::from("2"), "Widget B", 2),
            ],
            memos: vec![
                MemoEntry::new(RecordId::from("1"), "Call supplier for more screws"),
                MemoEntry::new(RecordId::from("2"), "Clean storage shelves"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed() {
        let seed = SeedData::default();
        assert_eq!(seed.inventory.len(), 2);
        assert_eq!(seed.inventory[0].name, "Widget A");
        assert_eq!(seed.inventory[0].quantity, 5);
        assert_eq!(seed.memos[1].text(), "Clean storage shelves");
    }

    #[test]
    fn test_seed_from_json() {
        let seed = SeedData::from_json(
            r#"{"inventory":[{"id":"a","name":"Nails","quantity":40}]}"#,
        )
        .unwrap();
        assert_eq!(seed.inventory[0].id.as_str(), "a");
        assert!(seed.memos.is_empty());
    }

    #[test]
    fn test_seed_rejects_duplicate_ids() {
        let err = SeedData::from_json(
            r#"{"memos":[{"id":"1","text":"a"},{"id":"1","text":"b"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate memo id 1"));
    }

    #[test]
    fn test_seed_from_bad_json() {
        let err = SeedData::from_json("{not json").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
