//! Inventory Item Entity
//!
//! A named stock line with a non-negative quantity.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, RecordId};

/// A stocked item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier
    pub id: RecordId,
    /// Display name, never blank
    pub name: String,
    /// Units on hand
    pub quantity: u32,
}

impl InventoryItem {
    /// Create a new item with zero quantity
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self::with_quantity(id, name, 0)
    }

    pub fn with_quantity(id: RecordId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
        }
    }

    /// Apply a signed change, clamping at zero (and at `u32::MAX`)
    pub fn adjust(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.quantity).saturating_add(delta).clamp(0, i64::from(u32::MAX));
        self.quantity = next as u32;
        self.quantity
    }
}

impl Entity for InventoryItem {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = InventoryItem::new(RecordId::from("1"), "Widget A");
        assert_eq!(item.id().as_str(), "1");
        assert_eq!(item.name, "Widget A");
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn test_adjust_clamps_at_zero() {
        let mut item = InventoryItem::with_quantity(RecordId::from("1"), "Widget A", 5);
        assert_eq!(item.adjust(-10), 0);
        assert_eq!(item.adjust(-1), 0);
        assert_eq!(item.adjust(3), 3);
    }

    #[test]
    fn test_adjust_saturates_at_max() {
        let mut item = InventoryItem::with_quantity(RecordId::from("1"), "Bolts", u32::MAX - 1);
        assert_eq!(item.adjust(i64::MAX), u32::MAX);
        assert_eq!(item.adjust(i64::MIN), 0);
    }
}
