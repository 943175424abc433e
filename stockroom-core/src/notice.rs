use std::time::{Duration, Instant};

pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

pub const ITEM_ADDED: &str = "Item added!";
pub const ITEM_UPDATED: &str = "Item updated!";
pub const ITEM_DELETED: &str = "Item deleted successfully!";

/// A transient confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub shown_at: Instant,
}

/// Queue of notices that remove themselves after a fixed lifetime.
#[derive(Debug)]
pub struct Notices {
    ttl: Duration,
    live: Vec<Notice>,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            live: Vec::new(),
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.push_at(text, Instant::now());
    }

    pub fn push_at(&mut self, text: impl Into<String>, now: Instant) {
        self.live.push(Notice {
            text: text.into(),
            shown_at: now,
        });
    }

    /// Drops every notice older than the lifetime.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.live
            .retain(|n| now.saturating_duration_since(n.shown_at) < ttl);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.live.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.live.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
