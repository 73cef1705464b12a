//! Bounded history of full ledger snapshots.

use std::collections::VecDeque;

use billy_domain::Entry;

pub const DEFAULT_UNDO_LIMIT: usize = 50;

/// Most-recent-last stack of backing-order copies. The oldest snapshot is
/// evicted once more than `limit` are held.
#[derive(Debug, Clone)]
pub struct UndoStack {
    snapshots: VecDeque<Vec<Entry>>,
    limit: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl UndoStack {
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, snapshot: Vec<Entry>) {
        self.snapshots.push_back(snapshot);
        self.trim();
    }

    pub fn pop(&mut self) -> Option<Vec<Entry>> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.trim();
    }

    fn trim(&mut self) {
        while self.snapshots.len() > self.limit {
            self.snapshots.pop_front();
        }
    }
}
