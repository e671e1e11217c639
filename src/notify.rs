//! Outbound notifications for notable drops.

use crate::items::types::Rarity;
use std::sync::Mutex;

/// Receives a call for every drop at or above the session's notify threshold.
pub trait Notifier: Send + Sync {
    fn notify_drop(&self, rarity: Rarity, item_name: &str);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_drop(&self, _rarity: Rarity, _item_name: &str) {}
}

/// Keeps every notification in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<(Rarity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<(Rarity, String)> {
        match self.received.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify_drop(&self, rarity: Rarity, item_name: &str) {
        let mut guard = match self.received.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((rarity, item_name.to_string()));
    }
}
