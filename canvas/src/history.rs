//! Undo/redo over full snapshots of the entity sequence.
//!
//! Drawings are small, so each history entry is a clone of the whole ordered
//! sequence rather than a diff. Entity ids survive the round trip unchanged.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::HISTORY_LIMIT;
use crate::entity::Entity;

/// A snapshot of the document's entity sequence.
pub type Snapshot = Vec<Entity>;

/// Bounded past/future snapshot stacks.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl History {
    /// History that keeps at most `limit` undo steps. A limit of zero
    /// disables undo entirely.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { past: VecDeque::new(), future: Vec::new(), limit }
    }

    /// Record the sequence as it was before a mutation. Clears redo.
    pub fn push(&mut self, previous: Snapshot) {
        self.future.clear();
        self.push_past(previous);
    }

    /// Step back: returns the sequence to restore, saving `current` for redo.
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "undo");
        Some(previous)
    }

    /// Step forward: the inverse of [`History::undo`].
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.push_past(current);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "redo");
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}
