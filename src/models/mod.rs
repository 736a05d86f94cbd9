//! Models module for the lead sheet editor
//!
//! Plain data types shared by every layer: ticks and durations, pitches,
//! melody events, the chord track, key signatures and the persisted content.

pub mod time;
pub mod pitch;
pub mod events;
pub mod chords;
pub mod key_signature;
pub mod content;

// Re-export commonly used types
pub use time::{
    bar_capacity_ticks, duration_to_ticks, seconds_per_tick, ticks_to_duration, Duration,
    NoteValue, Tick, TimeSignature, TICKS_PER_QUARTER,
};
pub use pitch::{Accidental, Letter, Pitch};
pub use events::{EventId, MelodyEvent};
pub use chords::{ChordRegion, ChordTrack, RegionId};
pub use key_signature::{KeySignature, Mode};
pub use content::DocumentContent;
