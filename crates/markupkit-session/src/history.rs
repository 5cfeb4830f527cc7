//! Bounded linear undo/redo over combined annotation and style state.
//!
//! Entry 0 is always the oldest surviving state. The current index points at
//! the entry that matches what is live; committing after an undo drops every
//! entry above the index before pushing.

use markupkit_annotate::Annotation;
use markupkit_core::constants::DEFAULT_HISTORY_CAPACITY;
use markupkit_style::DesignConfig;

/// Deep copy of both state halves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    pub annotations: Vec<Annotation>,
    pub design: DesignConfig,
}

impl HistorySnapshot {
    pub fn new(annotations: Vec<Annotation>, design: DesignConfig) -> Self {
        Self {
            annotations,
            design,
        }
    }

    /// Clones the given state into a snapshot.
    pub fn capture(annotations: &[Annotation], design: &DesignConfig) -> Self {
        Self::new(annotations.to_vec(), design.clone())
    }
}

/// Snapshot stack with a current index.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<HistorySnapshot>,
    index: usize,
    capacity: usize,
}

impl HistoryManager {
    /// Creates a history holding only `base`, with the default capacity.
    pub fn new(base: HistorySnapshot) -> Self {
        Self::with_capacity(base, DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a history holding only `base`. Capacity is at least 1.
    pub fn with_capacity(base: HistorySnapshot, capacity: usize) -> Self {
        Self {
            entries: vec![base],
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Records a new state, discarding any redo tail.
    pub fn commit(&mut self, snapshot: HistorySnapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        // Limit stack size
        while self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
        tracing::debug!("History commit {}/{}", self.index + 1, self.entries.len());
    }

    /// Steps back. Returns the state to restore, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Steps forward. Returns the state to restore, or `None` at the top.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The entry matching the live state.
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.entries.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry and starts over from `base`.
    pub fn clear(&mut self, base: HistorySnapshot) {
        self.entries.clear();
        self.entries.push(base);
        self.index = 0;
    }
}
