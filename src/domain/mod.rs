//! Domain Layer
//!
//! Contains the list entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod id;
mod inventory_item;
mod memo;

pub use entity::{Entity, RecordId, DomainError, DomainResult};
pub use id::IdGenerator;
pub use inventory_item::InventoryItem;
pub use memo::MemoEntry;
