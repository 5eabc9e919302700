//! Stock Memo Core
//!
//! Layered architecture:
//! - domain: List entities, ids and errors
//! - store: In-memory inventory and memo stores
//! - reminder: Hourly reminder timer and the notifier it calls
//! - app: State shared with the presentation layer, intent routing

pub mod app;
pub mod config;
pub mod domain;
pub mod intent;
pub mod reminder;
pub mod store;


pub use app::{AppSnapshot, AppState};
pub use config::SeedData;
pub use domain::{DomainError, DomainResult, InventoryItem, MemoEntry, RecordId};
pub use intent::Intent;
pub use reminder::{ChannelNotifier, LogNotifier, Notification, Notifier, ReminderController};
pub use store::{DeleteState, InventoryStore, MemoStore, PendingDelete};
