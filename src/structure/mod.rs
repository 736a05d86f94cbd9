//! Musical Structure
//!
//! Stateless views and transforms over the document's data: the melody's
//! measure partition and the chord track's interval operations. Nothing here
//! holds state; callers pass in the current events or track.
//!
//! ## Modules
//!
//! - `measures`: Bar partitioning of the melody with fill/overflow status
//! - `chord_track`: Gap finding, lookup and non-overlapping chord mutations

pub mod measures;
pub mod chord_track;

// Re-exports for convenience
pub use measures::{partition_measures, measure_index_at, Measure, MeasureStatus};
pub use chord_track::{
    clamp_resize_to_neighbors, delete_chord_region, find_insertion_gap, find_regions_in_measure,
    insert_chord_region, resize_chord_region, update_chord_text, validate_insert, validate_track, Gap,
};
