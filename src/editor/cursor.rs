//! Caret and selection positions
//!
//! Positions are boundaries between melody events: `0` is before the first
//! event and `events.len()` is after the last one.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Selection state (anchor + focus). The caret sits on the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started
    pub anchor: usize,
    /// Moving end of the selection
    pub focus: usize,
}

impl Selection {
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    /// `None` when anchor and focus coincide
    pub fn non_empty(anchor: usize, focus: usize) -> Option<Self> {
        (anchor != focus).then_some(Self { anchor, focus })
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.focus)
    }

    /// Selected event indices, ordered
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Clamp both ends to `0..=len`
    pub fn clamped(&self, len: usize) -> Self {
        Self { anchor: self.anchor.min(len), focus: self.focus.min(len) }
    }
}
