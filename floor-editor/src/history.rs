//! Command History (撤销/重做)
//!
//! Bounded snapshot history. Each mutation records the state it is about to
//! replace; `undo` swaps the current state for the most recent record and
//! parks the current one on the redo stack. Snapshots are opaque to the
//! history, the store decides what goes into them.

use std::collections::VecDeque;

/// Undo/redo stack pair with a fixed undo depth
#[derive(Debug, Clone)]
pub struct CommandHistory<S> {
    undo_stack: VecDeque<S>,
    redo_stack: Vec<S>,
    depth: usize,
}

impl<S> CommandHistory<S> {
    pub fn new(depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(depth.min(64)),
            redo_stack: Vec::new(),
            depth,
        }
    }

    /// Record the pre-mutation state. Clears the redo stack and evicts the
    /// oldest entry once the depth is exceeded.
    pub fn record(&mut self, before: S) {
        self.redo_stack.clear();
        self.push_undo(before);
    }

    /// Pop the most recent snapshot. `current` is only evaluated when there
    /// is something to undo; its value goes onto the redo stack.
    pub fn undo(&mut self, current: impl FnOnce() -> S) -> Option<S> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current());
        Some(previous)
    }

    /// Mirror of [`undo`](Self::undo)
    pub fn redo(&mut self, current: impl FnOnce() -> S) -> Option<S> {
        let next = self.redo_stack.pop()?;
        self.push_undo(current());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: S) {
        if self.depth == 0 {
            return;
        }
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.depth {
            self.undo_stack.pop_front();
        }
    }
}
