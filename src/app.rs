//! Application State
//!
//! Owns the three independent stores and routes intents to them.

use serde::Serialize;

use crate::config::SeedData;
use crate::intent::Intent;
use crate::reminder::{ReminderController, ReminderState};
use crate::store::{InventorySnapshot, InventoryStore, MemoSnapshot, MemoStore};

/// Everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSnapshot {
    pub inventory: InventorySnapshot,
    pub memos: MemoSnapshot,
    pub reminder: ReminderState,
}

impl AppSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Application state shared with the presentation layer
pub struct AppState {
    pub inventory: InventoryStore,
    pub memos: MemoStore,
    pub reminder: ReminderController,
}

impl AppState {
    pub fn new(seed: SeedData, reminder: ReminderController) -> Self {
        Self {
            inventory: InventoryStore::new(seed.inventory),
            memos: MemoStore::new(seed.memos),
            reminder,
        }
    }

    /// Default seed lists
    pub fn seeded(reminder: ReminderController) -> Self {
        Self::new(SeedData::default(), reminder)
    }

    /// Apply one intent to the store that owns it
    pub fn apply(&mut self, intent: Intent) {
        log::debug!("Applying {:?}", intent);
        match intent {
            Intent::AddItem { name } => {
                self.inventory.add_item(&name);
            }
            Intent::RemoveItem { id } => {
                self.inventory.remove_item(&id);
            }
            Intent::AdjustQuantity { id, delta } => {
                self.inventory.adjust_quantity(&id, delta);
            }
            Intent::SetItemDraft { text } => self.inventory.set_draft_name(text),
            Intent::SubmitItemDraft => {
                self.inventory.submit_draft();
            }
            Intent::OpenAddItemDialog => self.inventory.open_add_dialog(),
            Intent::CloseAddItemDialog => self.inventory.close_add_dialog(),
            Intent::AddMemo { text } => {
                self.memos.add_memo(&text);
            }
            Intent::SetMemoDraft { text } => self.memos.set_draft_text(text),
            Intent::SubmitMemoDraft => {
                self.memos.submit_draft();
            }
            Intent::RequestMemoDelete { id, text } => {
                self.memos.request_delete(id, text);
            }
            Intent::ConfirmMemoDelete { id } => {
                self.memos.confirm_delete(&id);
            }
            Intent::CancelMemoDelete => self.memos.cancel_delete(),
            Intent::SetReminder { enabled } => self.reminder.set_enabled(enabled),
            Intent::ToggleReminder => {
                self.reminder.toggle();
            }
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            inventory: self.inventory.snapshot(),
            memos: self.memos.snapshot(),
            reminder: self.reminder.snapshot(),
        }
    }
}
