//! Chord track data
//!
//! Chord text is kept exactly as typed. Parsing into root/quality happens on
//! the read side (voicing, highlighting), never in the stored model.

use serde::{Deserialize, Serialize};
use super::time::Tick;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RegionId(pub u64);

/// A chord symbol spanning `[start, end)`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordRegion {
    pub id: RegionId,
    pub start: Tick,
    pub end: Tick,
    pub text: String,
}

impl ChordRegion {
    pub fn new(id: RegionId, start: Tick, end: Tick, text: impl Into<String>) -> Self {
        Self { id, start, end, text: text.into() }
    }

    pub fn width(&self) -> Tick {
        self.end.saturating_sub(self.start)
    }

    pub fn overlaps(&self, start: Tick, end: Tick) -> bool {
        self.start < end && self.end > start
    }

    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick < self.end
    }
}

/// Regions sorted by start, never overlapping (touching is fine)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChordTrack {
    pub regions: Vec<ChordRegion>,
}

impl ChordTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: RegionId) -> Option<&ChordRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RegionId) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }

    /// End of the last region, or 0
    pub fn end_tick(&self) -> Tick {
        self.regions.last().map_or(0, |r| r.end)
    }

    /// Sorted, non-empty and non-overlapping
    pub fn is_well_formed(&self) -> bool {
        self.regions.iter().all(|r| r.end > r.start)
            && self.regions.windows(2).all(|pair| pair[0].end <= pair[1].start)
    }

    /// Checked after every mutation in debug builds
    pub(crate) fn debug_check(&self) {
        debug_assert!(
            self.is_well_formed(),
            "chord track invariant broken: {:?}",
            self.regions
                .iter()
                .map(|r| (r.start, r.end))
                .collect::<Vec<_>>()
        );
    }
}
