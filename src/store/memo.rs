//! Memo Store
//!
//! Owns the memo list, the "new memo" draft and the pending delete
//! confirmation. Deleting a memo is two steps: `request_delete` opens a
//! confirmation, `confirm_delete` with the same id performs it.

use serde::Serialize;
use tokio::sync::watch;

use super::change::ChangeFeed;
use super::entity_list::EntityList;
use crate::config::DELETE_MEMO_TITLE;
use crate::domain::{IdGenerator, MemoEntry, RecordId};

/// Memo awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingDelete {
    pub id: RecordId,
    pub text: String,
}

impl PendingDelete {
    pub fn title(&self) -> &'static str {
        DELETE_MEMO_TITLE
    }

    /// Confirmation prompt shown to the user
    pub fn message(&self) -> String {
        format!("Are you sure you want to delete:\n\"{}\"?", self.text)
    }
}

/// Delete confirmation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteState {
    Idle,
    PendingConfirmation,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoSnapshot {
    pub memos: Vec<MemoEntry>,
    pub draft_text: String,
    pub pending_delete: Option<PendingDelete>,
    pub version: u64,
}

#[derive(Debug)]
pub struct MemoStore {
    memos: EntityList<MemoEntry>,
    ids: IdGenerator,
    draft_text: String,
    pending: Option<PendingDelete>,
    changes: ChangeFeed,
}

impl MemoStore {
    pub fn new(seed: Vec<MemoEntry>) -> Self {
        let memos = EntityList::new(seed);
        let ids = IdGenerator::after(memos.ids());
        Self {
            memos,
            ids,
            draft_text: String::new(),
            pending: None,
            changes: ChangeFeed::new(),
        }
    }

    /// Append a memo as typed; blank text is ignored. Clears the draft on
    /// success.
    pub fn add_memo(&mut self, text: &str) -> Option<RecordId> {
        if text.trim().is_empty() {
            log::debug!("Ignoring add_memo with blank text");
            return None;
        }

        let id = self.ids.next_id();
        self.memos.push(MemoEntry::new(id.clone(), text));
        self.draft_text.clear();
        self.changes.bump();

        log::info!("Added memo {}", id);
        Some(id)
    }

    /// Add a memo from the current draft
    pub fn submit_draft(&mut self) -> Option<RecordId> {
        let text = self.draft_text.clone();
        self.add_memo(&text)
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.draft_text {
            self.draft_text = text;
            self.changes.bump();
        }
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    /// Open a delete confirmation for a memo
    ///
    /// Nothing is removed here. A newer request replaces an older one.
    pub fn request_delete(&mut self, id: RecordId, text: impl Into<String>) -> &PendingDelete {
        log::debug!("Delete requested for memo {}", id);
        let request = PendingDelete {
            id,
            text: text.into(),
        };
        if self.pending.as_ref() != Some(&request) {
            self.changes.bump();
        }
        self.pending.insert(request)
    }

    /// Perform the pending delete
    ///
    /// Only acts when a confirmation is pending for `id`. Returns whether a
    /// memo was removed; a memo that is already gone still closes the
    /// confirmation.
    pub fn confirm_delete(&mut self, id: &RecordId) -> bool {
        match &self.pending {
            Some(pending) if &pending.id == id => {}
            _ => {
                log::debug!("confirm_delete: no pending confirmation for memo {}", id);
                return false;
            }
        }

        self.pending = None;
        let removed = self.memos.remove(id).is_some();
        self.changes.bump();

        if removed {
            log::info!("Deleted memo {}", id);
        } else {
            log::debug!("confirm_delete: memo {} already gone", id);
        }
        removed
    }

    /// Drop the pending confirmation, list unchanged
    pub fn cancel_delete(&mut self) {
        if self.pending.take().is_some() {
            self.changes.bump();
        }
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    pub fn delete_state(&self) -> DeleteState {
        if self.pending.is_some() {
            DeleteState::PendingConfirmation
        } else {
            DeleteState::Idle
        }
    }

    pub fn memos(&self) -> &[MemoEntry] {
        self.memos.as_slice()
    }

    pub fn version(&self) -> u64 {
        self.changes.version()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn snapshot(&self) -> MemoSnapshot {
        MemoSnapshot {
            memos: self.memos.as_slice().to_vec(),
            draft_text: self.draft_text.clone(),
            pending_delete: self.pending.clone(),
            version: self.version(),
        }
    }
}

impl Default for MemoStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
