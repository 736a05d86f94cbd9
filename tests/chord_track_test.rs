//! Chord track scenarios on the pure interval functions

use leadsheet_wasm::models::{ChordRegion, ChordTrack, RegionId};
use leadsheet_wasm::structure::{
    clamp_resize_to_neighbors, delete_chord_region, find_insertion_gap, find_regions_in_measure,
    insert_chord_region, resize_chord_region, update_chord_text, Gap,
};
use leadsheet_wasm::EditError;

const BAR: u32 = 384;

#[test]
fn test_fully_covered_bar_has_no_gap() {
    let track = ChordTrack { regions: vec![ChordRegion::new(RegionId(1), 0, BAR, "C")] };
    assert_eq!(find_insertion_gap(&track, 0, BAR, None), None);
    assert_eq!(find_insertion_gap(&track, 0, BAR, Some(100)), None);
    assert_eq!(find_insertion_gap(&track, BAR, 2 * BAR, None), Some(Gap { start: BAR, end: 2 * BAR }));
}

#[test]
fn test_resize_past_neighbor_clamps_to_its_start() {
    let mut track = ChordTrack::new();
    insert_chord_region(&mut track, RegionId(1), 0, 96, "C").unwrap();
    insert_chord_region(&mut track, RegionId(2), 192, 384, "F").unwrap();

    assert_eq!(resize_chord_region(&mut track, RegionId(1), 0, 300), Some((0, 192)));
    assert_eq!(track.regions[0].end, track.regions[1].start);

    // idempotent under clamping
    let once = track.clone();
    resize_chord_region(&mut track, RegionId(1), 0, 300);
    assert_eq!(track, once);
}

#[test]
fn test_resize_that_clamps_to_nothing_is_rejected() {
    let mut track = ChordTrack::new();
    insert_chord_region(&mut track, RegionId(1), 0, 192, "C").unwrap();
    insert_chord_region(&mut track, RegionId(2), 192, 384, "F").unwrap();
    assert_eq!(clamp_resize_to_neighbors(&track, RegionId(2), 0, 150), None);
    assert_eq!(resize_chord_region(&mut track, RegionId(2), 0, 150), None);
    assert_eq!(track.regions[1].start, 192);
}

#[test]
fn test_insert_keeps_order_and_rejects_bad_ranges() {
    let mut track = ChordTrack::new();
    insert_chord_region(&mut track, RegionId(1), 192, 384, "G").unwrap();
    insert_chord_region(&mut track, RegionId(2), 0, 96, "C").unwrap();
    insert_chord_region(&mut track, RegionId(3), 96, 192, "Am").unwrap();
    let starts: Vec<u32> = track.regions.iter().map(|r| r.start).collect();
    assert_eq!(starts, vec![0, 96, 192]);

    assert_eq!(
        insert_chord_region(&mut track, RegionId(4), 500, 400, "D"),
        Err(EditError::InvalidRange { start: 500, end: 400 })
    );
    assert_eq!(track.len(), 3);
}

#[test]
fn test_measure_lookup_uses_overlap() {
    let mut track = ChordTrack::new();
    insert_chord_region(&mut track, RegionId(1), 288, 480, "E7").unwrap();
    assert_eq!(find_regions_in_measure(&track, 0, BAR).len(), 1);
    assert_eq!(find_regions_in_measure(&track, BAR, 2 * BAR).len(), 1);
    assert!(find_regions_in_measure(&track, 2 * BAR, 3 * BAR).is_empty());
    // the spill-over shrinks the next bar's gap
    assert_eq!(find_insertion_gap(&track, BAR, 2 * BAR, None), Some(Gap { start: 480, end: 768 }));
}

#[test]
fn test_text_update_and_delete() {
    let mut track = ChordTrack::new();
    insert_chord_region(&mut track, RegionId(7), 0, 96, "C").unwrap();
    update_chord_text(&mut track, RegionId(7), "C6/9").unwrap();
    assert_eq!(track.regions[0].text, "C6/9");
    assert_eq!(delete_chord_region(&mut track, RegionId(7)).map(|r| r.id), Ok(RegionId(7)));
    assert!(track.is_empty());
    assert_eq!(
        update_chord_text(&mut track, RegionId(7), "D"),
        Err(EditError::UnknownRegion(RegionId(7)))
    );
}
