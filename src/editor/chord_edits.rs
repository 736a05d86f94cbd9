//! Chord track edits on the document
//!
//! Thin wrappers around `structure::chord_track` that add ids, undo steps and
//! bar-relative lookups.

use crate::editor::document::Document;
use crate::error::{EditError, Result};
use crate::models::chords::{ChordRegion, RegionId};
use crate::models::time::Tick;
use crate::structure::chord_track::{
    self, clamp_resize_to_neighbors, find_insertion_gap, find_regions_in_measure, validate_insert, Gap,
};

impl Document {
    /// Regions overlapping bar `bar`
    pub fn chords_in_measure(&self, bar: usize) -> Vec<ChordRegion> {
        let (start, end) = self.bar_bounds(bar);
        find_regions_in_measure(&self.chords, start, end).into_iter().cloned().collect()
    }

    /// Free space for a new chord in bar `bar`; see [`find_insertion_gap`]
    pub fn chord_gap_in_measure(&self, bar: usize, click_tick: Option<Tick>) -> Option<Gap> {
        let (start, end) = self.bar_bounds(bar);
        find_insertion_gap(&self.chords, start, end, click_tick)
    }

    fn bar_bounds(&self, bar: usize) -> (Tick, Tick) {
        let start = self.measure_start_tick(bar);
        (start, start + self.bar_capacity_ticks())
    }

    /// Add a chord over `[start, end)`
    pub fn insert_chord(&mut self, start: Tick, end: Tick, text: &str) -> Result<RegionId> {
        if let Err(err) = validate_insert(&self.chords, start, end) {
            log::warn!("insert_chord rejected: {}", err);
            return Err(err);
        }
        self.try_undo_step(|doc| {
            let id = RegionId(doc.allocate_id());
            chord_track::insert_chord_region(&mut doc.chords, id, start, end, text)?;
            log::debug!("insert chord {:?} '{}' {}..{}", id, text, start, end);
            Ok(id)
        })
    }

    /// Add a chord filling the gap at `click_tick` (or the widest gap) in bar `bar`
    pub fn insert_chord_in_measure(&mut self, bar: usize, click_tick: Option<Tick>, text: &str) -> Result<RegionId> {
        let gap = self
            .chord_gap_in_measure(bar, click_tick)
            .ok_or(EditError::NoGap { measure: bar })?;
        self.insert_chord(gap.start, gap.end, text)
    }

    /// Bounds a resize would commit, without changing anything (drag preview)
    pub fn preview_chord_resize(&self, id: RegionId, new_start: Tick, new_end: Tick) -> Option<(Tick, Tick)> {
        clamp_resize_to_neighbors(&self.chords, id, new_start, new_end)
    }

    /// Commit a resize, clamped to the neighbouring chords
    pub fn resize_chord(&mut self, id: RegionId, new_start: Tick, new_end: Tick) -> Option<(Tick, Tick)> {
        let current = self.chords.get(id).map(|r| (r.start, r.end))?;
        if self.preview_chord_resize(id, new_start, new_end)? == current {
            return Some(current);
        }
        self.with_undo_step(|doc| chord_track::resize_chord_region(&mut doc.chords, id, new_start, new_end))
    }

    pub fn update_chord_text(&mut self, id: RegionId, text: &str) -> Result<()> {
        let region = self.chords.get(id).ok_or(EditError::UnknownRegion(id))?;
        if region.text == text {
            return Ok(());
        }
        self.try_undo_step(|doc| chord_track::update_chord_text(&mut doc.chords, id, text))
    }

    pub fn delete_chord(&mut self, id: RegionId) -> Result<ChordRegion> {
        self.try_undo_step(|doc| chord_track::delete_chord_region(&mut doc.chords, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut doc = Document::new();
        let id = doc.insert_chord(0, 192, "C").unwrap();
        let found = doc.chords_in_measure(0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert!(doc.chords_in_measure(1).is_empty());
        assert_eq!(doc.undo_count(), 1);
    }

    #[test]
    fn test_rejected_insert_records_nothing() {
        let mut doc = Document::new();
        assert_eq!(doc.insert_chord(96, 96, "C"), Err(EditError::InvalidRange { start: 96, end: 96 }));
        doc.insert_chord(0, 192, "C").unwrap();
        assert_eq!(doc.insert_chord(96, 288, "F"), Err(EditError::Overlap { start: 96, end: 288 }));
        assert_eq!(doc.undo_count(), 1);
        assert_eq!(doc.chords().len(), 1);
    }

    #[test]
    fn test_insert_in_measure_fills_widest_gap() {
        let mut doc = Document::new();
        doc.insert_chord(0, 96, "C").unwrap();
        let id = doc.insert_chord_in_measure(0, None, "G7").unwrap();
        assert_eq!(doc.chords().get(id).map(|r| (r.start, r.end)), Some((96, 384)));
        assert_eq!(doc.insert_chord_in_measure(0, None, "F"), Err(EditError::NoGap { measure: 0 }));
    }

    #[test]
    fn test_chord_extends_document() {
        let mut doc = Document::new();
        doc.insert_chord(384, 768, "Am").unwrap();
        assert_eq!(doc.bar_count(), 2);
    }

    #[test]
    fn test_resize_clamps_to_neighbor() {
        let mut doc = Document::new();
        let left = doc.insert_chord(0, 96, "C").unwrap();
        doc.insert_chord(192, 384, "F").unwrap();

        assert_eq!(doc.preview_chord_resize(left, 0, 300), Some((0, 192)));
        assert_eq!(doc.undo_count(), 2);
        assert_eq!(doc.resize_chord(left, 0, 300), Some((0, 192)));
        assert_eq!(doc.undo_count(), 3);
        // same target again is a no-op
        assert_eq!(doc.resize_chord(left, 0, 300), Some((0, 192)));
        assert_eq!(doc.undo_count(), 3);
    }

    #[test]
    fn test_text_and_delete() {
        let mut doc = Document::new();
        let id = doc.insert_chord(0, 384, "C").unwrap();
        doc.update_chord_text(id, "Cmaj7").unwrap();
        assert_eq!(doc.chords().get(id).map(|r| r.text.as_str()), Some("Cmaj7"));

        let removed = doc.delete_chord(id).unwrap();
        assert_eq!(removed.text, "Cmaj7");
        assert_eq!(doc.delete_chord(id), Err(EditError::UnknownRegion(id)));
        assert_eq!(doc.update_chord_text(id, "D"), Err(EditError::UnknownRegion(id)));

        assert!(doc.undo());
        assert_eq!(doc.chords().get(id).map(|r| r.text.as_str()), Some("Cmaj7"));
        assert!(doc.undo());
        assert_eq!(doc.chords().get(id).map(|r| r.text.as_str()), Some("C"));
    }
}
