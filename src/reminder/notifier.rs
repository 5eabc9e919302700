//! Notification Service Interface
//!
//! The platform notification service is external. The reminder hands it a
//! [`Notification`] and forgets about it: no acknowledgement, no retry.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::config::{REMINDER_BODY, REMINDER_TITLE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// The hourly memo reminder
    pub fn memo_reminder() -> Self {
        Self::new(REMINDER_TITLE, REMINDER_BODY)
    }
}

/// Sink for notification requests
///
/// `emit` must not block; implementations that talk to a slow service should
/// hand the work off.
pub trait Notifier: Send + Sync {
    fn emit(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn emit(&self, notification: Notification) {
        log::info!("Notification: {} - {}", notification.title, notification.body);
    }
}

/// Forwards notifications to a presentation layer over a channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }

    /// Notifier plus the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn emit(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            log::warn!("Notification dropped: receiver closed");
        }
    }
}
