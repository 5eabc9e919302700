//! Store Layer
//!
//! In-memory state holders driven by user intents. Each store owns its list,
//! its draft input and a change feed; stores never touch each other.

mod change;
mod entity_list;
mod inventory;
mod memo;

pub use change::ChangeFeed;
pub use entity_list::EntityList;
pub use inventory::{InventorySnapshot, InventoryStore};
pub use memo::{DeleteState, MemoSnapshot, MemoStore, PendingDelete};
