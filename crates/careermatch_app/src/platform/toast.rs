use std::collections::VecDeque;
use std::time::{Duration, Instant};

use careermatch_core::Notification;

/// Most toasts kept on screen at once; older ones are dropped first.
const MAX_VISIBLE: usize = 3;

/// Transient notifications that dismiss themselves after `lifetime`.
#[derive(Debug)]
pub struct Toaster {
    lifetime: Duration,
    active: VecDeque<(Notification, Instant)>,
    dirty: bool,
}

impl Toaster {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            active: VecDeque::new(),
            dirty: false,
        }
    }

    pub fn push(&mut self, notification: Notification, now: Instant) {
        if self.active.len() == MAX_VISIBLE {
            self.active.pop_front();
        }
        self.active.push_back((notification, now + self.lifetime));
        self.dirty = true;
    }

    /// Drops expired toasts; returns whether anything was dismissed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.active.len();
        self.active.retain(|(_, deadline)| *deadline > now);
        let dismissed = self.active.len() != before;
        self.dirty |= dismissed;
        dismissed
    }

    /// Returns whether the visible set changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.active.iter().map(|(n, _)| n.clone()).collect()
    }
}
