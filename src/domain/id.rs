//! Record ID Generation
//!
//! Monotonic counter rendered as decimal text. Never hands out the same id
//! twice in a session, removed ids included.

use std::collections::HashSet;

use super::entity::RecordId;

#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
    /// Numeric ids already in use or handed out
    taken: HashSet<u64>,
}

impl IdGenerator {
    /// Start at 1
    pub fn new() -> Self {
        Self {
            next: 1,
            taken: HashSet::new(),
        }
    }

    /// Start strictly after the largest numeric id in `existing`
    ///
    /// If that id is `u64::MAX` the counter restarts at 1 and skips every
    /// id in `existing`.
    pub fn after<'a>(existing: impl IntoIterator<Item = &'a RecordId>) -> Self {
        let taken: HashSet<u64> = existing
            .into_iter()
            .filter_map(RecordId::as_number)
            .collect();
        let next = taken
            .iter()
            .max()
            .map_or(1, |max| max.checked_add(1).unwrap_or(1));
        Self { next, taken }
    }

    pub fn next_id(&mut self) -> RecordId {
        loop {
            let candidate = self.next;
            self.next = candidate.checked_add(1).unwrap_or(1);
            if candidate != 0 && self.taken.insert(candidate) {
                return RecordId::new(candidate.to_string());
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
