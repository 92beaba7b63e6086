//! Snapshot-based undo/redo over serialized scene text.
//!
//! Each history entry is a full scene document produced by the string
//! serializer — coarse but simple, and safe against partial-edit states.
//! The undo stack is a bounded [`VecDeque`] (oldest entries dropped from
//! the front); pushing a new snapshot clears the redo stack, the standard
//! editor behavior.

use std::collections::VecDeque;

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 64;

pub struct SnapshotHistory {
    undo_stack: VecDeque<String>,
    redo_stack: Vec<String>,
    max_undo: usize,
}

impl SnapshotHistory {
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo,
        }
    }

    /// Records the scene state as it was *before* an edit.
    pub fn push(&mut self, snapshot: String) {
        self.redo_stack.clear();
        if self.undo_stack.len() >= self.max_undo {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(snapshot);
    }

    /// Steps back: stores `current` for redo and returns the snapshot to
    /// restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: String) -> Option<String> {
        let snapshot = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Steps forward again after an undo.
    pub fn redo(&mut self, current: String) -> Option<String> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drops all history (used when a new scene is opened).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}
