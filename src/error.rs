//! Error types for edit operations

use thiserror::Error;
use crate::models::chords::RegionId;
use crate::models::time::{Tick, TimeSignature};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Chord interval with `end <= start`
    #[error("Invalid chord range: start {start} must be before end {end}")]
    InvalidRange { start: Tick, end: Tick },

    /// Chord interval intersecting an existing region
    #[error("Chord range {start}..{end} overlaps an existing chord")]
    Overlap { start: Tick, end: Tick },

    /// Bar is already covered by chords
    #[error("No free space for a chord in measure {measure}")]
    NoGap { measure: usize },

    #[error("Chord region {0:?} not found")]
    UnknownRegion(RegionId),

    /// Meter whose beat is not a quarter, or with no beats
    #[error("Unsupported time signature {0}")]
    InvalidTimeSignature(TimeSignature),
}

pub type Result<T> = std::result::Result<T, EditError>;
