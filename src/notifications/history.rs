// SPDX-License-Identifier: MPL-2.0
//! Bounded log of toast messages dropped under overflow.
//!
//! When the queue evicts a toast to stay within its visible cap, the
//! evicted message is recorded here instead of being discarded outright,
//! so an overflow-inspection affordance can surface it later. The log is
//! memory-bounded: once at capacity, recording a new entry silently drops
//! the oldest one.

use std::collections::VecDeque;

/// A bounded, most-recent-first message log.
#[derive(Debug, Clone)]
pub struct OverflowHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl OverflowHistory {
    /// Creates an empty history with the given capacity (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a dropped message at the front, evicting the oldest entry
    /// if the history is at capacity.
    pub fn record(&mut self, message: String) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(message);
    }

    /// Returns the entries, most recently dropped first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Returns the most recently dropped message, if any.
    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been dropped (or the log was cleared).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of retained entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empties the history.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_most_recent_first() {
        let mut history = OverflowHistory::new(10);
        history.record("first".into());
        history.record("second".into());
        history.record("third".into());

        let entries: Vec<_> = history.iter().collect();
        assert_eq!(entries, vec!["third", "second", "first"]);
        assert_eq!(history.most_recent(), Some("third"));
    }

    #[test]
    fn capacity_evicts_the_oldest_entry() {
        let mut history = OverflowHistory::new(3);
        for i in 0..5 {
            history.record(format!("msg-{i}"));
        }

        assert_eq!(history.len(), 3);
        let entries: Vec<_> = history.iter().collect();
        assert_eq!(entries, vec!["msg-4", "msg-3", "msg-2"]);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut history = OverflowHistory::new(0);
        history.record("only".into());
        history.record("newer".into());
        assert_eq!(history.len(), 1);
        assert_eq!(history.most_recent(), Some("newer"));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut history = OverflowHistory::new(10);
        history.record("dropped".into());
        assert!(!history.is_empty());

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.most_recent(), None);
    }
}
