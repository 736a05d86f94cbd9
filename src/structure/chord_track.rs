//! Chord track queries and mutations
//!
//! Every mutator keeps the track sorted by start tick with no overlaps.
//! Tracks are small (a few regions per bar), so linear scans are used throughout.

use crate::error::{EditError, Result};
use crate::models::chords::{ChordRegion, ChordTrack, RegionId};
use crate::models::time::Tick;

/// A free interval `[start, end)` on the chord track
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Gap {
    pub start: Tick,
    pub end: Tick,
}

impl Gap {
    pub fn width(&self) -> Tick {
        self.end - self.start
    }

    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick < self.end
    }
}

/// Regions intersecting the bar `[bar_start, bar_end)`
pub fn find_regions_in_measure(track: &ChordTrack, bar_start: Tick, bar_end: Tick) -> Vec<&ChordRegion> {
    track
        .regions
        .iter()
        .filter(|r| r.overlaps(bar_start, bar_end))
        .collect()
}

/// Region covering `tick`, if any
pub fn region_at(track: &ChordTrack, tick: Tick) -> Option<&ChordRegion> {
    track.regions.iter().find(|r| r.contains(tick))
}

/// Free intervals inside `[bar_start, bar_end)`, left to right
pub fn gaps_in_measure(track: &ChordTrack, bar_start: Tick, bar_end: Tick) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut cursor = bar_start;

    for region in &track.regions {
        if region.end <= bar_start {
            continue;
        }
        if region.start >= bar_end {
            break;
        }
        if region.start > cursor {
            gaps.push(Gap { start: cursor, end: region.start });
        }
        cursor = cursor.max(region.end);
    }

    if cursor < bar_end {
        gaps.push(Gap { start: cursor, end: bar_end });
    }

    gaps
}

/// Where a new chord can go in the bar.
///
/// With `click_tick`, the gap containing it; otherwise the widest gap (the
/// leftmost one on equal width). `None` means the bar is fully covered.
pub fn find_insertion_gap(
    track: &ChordTrack,
    bar_start: Tick,
    bar_end: Tick,
    click_tick: Option<Tick>,
) -> Option<Gap> {
    let gaps = gaps_in_measure(track, bar_start, bar_end);
    match click_tick {
        Some(tick) => gaps.into_iter().find(|g| g.contains(tick)),
        None => gaps
            .into_iter()
            .fold(None, |best: Option<Gap>, gap| match best {
                Some(b) if b.width() >= gap.width() => Some(b),
                _ => Some(gap),
            }),
    }
}

/// Check that `[start, end)` is a non-empty free interval
pub fn validate_insert(track: &ChordTrack, start: Tick, end: Tick) -> Result<()> {
    if end <= start {
        return Err(EditError::InvalidRange { start, end });
    }
    if track.regions.iter().any(|r| r.overlaps(start, end)) {
        return Err(EditError::Overlap { start, end });
    }
    Ok(())
}

/// Check a whole stored track: every region non-empty, starts ascending, no overlaps
pub fn validate_track(track: &ChordTrack) -> Result<()> {
    let mut previous_end: Tick = 0;
    for (index, region) in track.regions.iter().enumerate() {
        if region.end <= region.start {
            return Err(EditError::InvalidRange { start: region.start, end: region.end });
        }
        if index > 0 && region.start < previous_end {
            return Err(EditError::Overlap { start: region.start, end: region.end });
        }
        previous_end = region.end;
    }
    Ok(())
}

/// Insert a region, keeping start order.
///
/// Fails with `InvalidRange` for `end <= start` and with `Overlap` when the
/// interval intersects an existing region; the track is unchanged on failure.
pub fn insert_chord_region(
    track: &mut ChordTrack,
    id: RegionId,
    start: Tick,
    end: Tick,
    text: impl Into<String>,
) -> Result<()> {
    validate_insert(track, start, end)?;

    let index = track
        .regions
        .iter()
        .position(|r| r.start > start)
        .unwrap_or(track.regions.len());
    track.regions.insert(index, ChordRegion::new(id, start, end, text));

    track.debug_check();
    Ok(())
}

/// Clamp a proposed `[new_start, new_end)` for the region at `index` against its neighbours.
///
/// Returns `None` when nothing of positive width survives.
fn clamp_at(track: &ChordTrack, index: usize, new_start: Tick, new_end: Tick) -> Option<(Tick, Tick)> {
    let start = match index.checked_sub(1).and_then(|i| track.regions.get(i)) {
        Some(prev) => new_start.max(prev.end),
        None => new_start,
    };
    let end = match track.regions.get(index + 1) {
        Some(next) => new_end.min(next.start),
        None => new_end,
    };
    (end > start).then_some((start, end))
}

/// Clamp a resize against the neighbouring regions without applying it.
///
/// Used for live preview while a region edge is dragged; the result is what
/// [`resize_chord_region`] would commit for the same input.
pub fn clamp_resize_to_neighbors(
    track: &ChordTrack,
    id: RegionId,
    new_start: Tick,
    new_end: Tick,
) -> Option<(Tick, Tick)> {
    let index = track.position(id)?;
    clamp_at(track, index, new_start, new_end)
}

/// Resize a region, clamped to its neighbours.
///
/// Returns the committed bounds, or `None` (track unchanged) if the region is
/// unknown or the clamped range is empty.
pub fn resize_chord_region(
    track: &mut ChordTrack,
    id: RegionId,
    new_start: Tick,
    new_end: Tick,
) -> Option<(Tick, Tick)> {
    let index = track.position(id)?;
    let (start, end) = clamp_at(track, index, new_start, new_end)?;
    let region = &mut track.regions[index];
    region.start = start;
    region.end = end;

    track.debug_check();
    Some((start, end))
}

/// Replace a region's text
pub fn update_chord_text(track: &mut ChordTrack, id: RegionId, text: impl Into<String>) -> Result<()> {
    let region = track
        .regions
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(EditError::UnknownRegion(id))?;
    region.text = text.into();
    Ok(())
}

/// Remove a region
pub fn delete_chord_region(track: &mut ChordTrack, id: RegionId) -> Result<ChordRegion> {
    let index = track.position(id).ok_or(EditError::UnknownRegion(id))?;
    Ok(track.regions.remove(index))
}
