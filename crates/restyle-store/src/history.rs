//! Bounded undo history.

use std::collections::VecDeque;

/// Capacity used by the editor when none is configured.
pub const DEFAULT_CAPACITY: usize = 20;

/// A bounded stack of snapshots.
///
/// Pushing past capacity discards the oldest entry, so the history never grows
/// without limit. A capacity of zero is treated as one.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> History<T> {
    /// Creates an empty history; a zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a snapshot, evicting the oldest one when full.
    pub fn push(&mut self, snapshot: T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of snapshots before the oldest is evicted.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_is_lifo() {
        let mut history = History::new(3);
        history.push(1);
        history.push(2);
        assert_eq!(history.pop(), Some(2));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), None);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut history = History::new(DEFAULT_CAPACITY);
        for i in 0..25 {
            history.push(i);
        }
        assert_eq!(history.len(), 20);

        let mut popped = Vec::new();
        while let Some(i) = history.pop() {
            popped.push(i);
        }
        assert_eq!(popped, (5..25).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = History::new(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.pop(), Some("b"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history: History<u8> = History::default();
        history.push(1);
        history.clear();
        assert!(!history.can_undo());
    }
}
