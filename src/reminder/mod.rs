//! Reminder Layer
//!
//! Hourly memo reminder and the notification service it calls into.

mod controller;
mod notifier;

pub use controller::{ReminderController, ReminderState};
pub use notifier::{ChannelNotifier, LogNotifier, Notification, Notifier};
