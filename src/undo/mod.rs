//! Snapshot-based undo/redo history
//!
//! Each undoable edit stores a full copy of the editable state taken just
//! before it ran. Undo swaps the current state for the newest snapshot and
//! parks the current one on the redo stack; redo mirrors it.

use std::collections::VecDeque;

/// Default maximum number of undo steps kept
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Undo and redo stacks of state snapshots
#[derive(Clone, Debug)]
pub struct History<S> {
    undo_stack: VecDeque<S>,
    redo_stack: Vec<S>,
    /// Maximum number of snapshots on either stack
    max_depth: usize,
    /// Set while a snapshot is being written back into the live state
    applying: bool,
    /// Nesting depth of open edit steps; only the outermost records
    depth: usize,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl<S> History<S> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            applying: false,
            depth: 0,
        }
    }

    /// Whether an edit starting now should record a snapshot
    pub fn is_recording(&self) -> bool {
        !self.applying && self.depth == 0
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    /// Open an edit step. Steps nest; inner ones fold into the outer.
    pub fn enter_step(&mut self) {
        self.depth += 1;
    }

    pub fn exit_step(&mut self) {
        debug_assert!(self.depth > 0, "exit_step without enter_step");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Push the pre-edit snapshot. A fresh edit invalidates the redo stack.
    pub fn record(&mut self, before: S) {
        if self.applying {
            return;
        }
        self.redo_stack.clear();
        push_bounded(&mut self.undo_stack, before, self.max_depth);
    }

    /// Swap `current` for the newest undo snapshot.
    ///
    /// Returns `None` (and leaves the stacks untouched) when there is nothing to undo.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        if self.redo_stack.len() > self.max_depth {
            self.redo_stack.remove(0);
        }
        Some(previous)
    }

    /// Swap `current` for the newest redo snapshot
    pub fn redo(&mut self, current: S) -> Option<S> {
        let next = self.redo_stack.pop()?;
        push_bounded(&mut self.undo_stack, current, self.max_depth);
        Some(next)
    }

    /// Raise the applying-history flag while a snapshot is written back
    pub fn begin_applying(&mut self) {
        self.applying = true;
    }

    pub fn end_applying(&mut self) {
        self.applying = false;
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

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded<S>(stack: &mut VecDeque<S>, snapshot: S, max_depth: usize) {
    stack.push_back(snapshot);
    while stack.len() > max_depth {
        stack.pop_front();
    }
}
