use serde::{Deserialize, Serialize};

/// Ordered list of visited targets plus a cursor.
///
/// Never empty: it is created with a first entry and only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: usize,
}

impl NavigationHistory {
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            entries: vec![first.into()],
            index: 0,
        }
    }

    /// Rebuild from saved parts, clamping the index into range.
    /// Returns `None` when `entries` is empty.
    pub fn from_parts(entries: Vec<String>, index: usize) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let index = index.min(entries.len() - 1);
        Some(Self { entries, index })
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Record a visit. A target equal to the current entry is ignored;
    /// anything after the cursor is dropped before pushing.
    pub fn push(&mut self, target: impl Into<String>) -> bool {
        let target = target.into();
        if target == self.current() {
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(target);
        self.index += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}
