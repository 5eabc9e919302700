//! Memo Entity
//!
//! Memos are immutable once created; they can only be deleted.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, RecordId};

/// A short free-text note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoEntry {
    id: RecordId,
    text: String,
}

impl MemoEntry {
    pub fn new(id: RecordId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Entity for MemoEntry {
    fn id(&self) -> &RecordId {
        &self.id
    }
}
