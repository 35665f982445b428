use std::collections::VecDeque;

use crate::session::TabSnapshot;

/// Bounded LIFO of recently closed tabs. Oldest entries fall off the end.
#[derive(Debug, Clone)]
pub struct ClosedTabRing {
    capacity: usize,
    entries: VecDeque<TabSnapshot>,
}

impl ClosedTabRing {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shrinking drops the oldest records.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.entries.truncate(self.capacity);
    }

    pub fn push(&mut self, snapshot: TabSnapshot) {
        self.entries.push_front(snapshot);
        self.entries.truncate(self.capacity);
    }

    pub fn pop(&mut self) -> Option<TabSnapshot> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
