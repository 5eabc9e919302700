//! Change Feed
//!
//! Version counter published on a `watch` channel. Bumped once per actual
//! mutation so the presentation layer knows when to re-render.

use tokio::sync::watch;

#[derive(Debug)]
pub struct ChangeFeed {
    tx: watch::Sender<u64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn bump(&self) {
        self.tx.send_modify(|version| *version += 1);
    }

    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_without_subscribers() {
        let feed = ChangeFeed::new();
        feed.bump();
        feed.bump();
        assert_eq!(feed.version(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_sees_bump() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.bump();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
    }
}
