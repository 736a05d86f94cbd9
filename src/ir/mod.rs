//! Playback Intermediate Representation (IR)
//!
//! Flattened, tie-merged, absolute-tick instructions for the audio scheduler
//! and the MIDI writer:
//!
//! ```text
//! Document (events + chord track)
//!     ↓
//! build_playback_ir (tie merge, caret filter, chord voicing)
//!     ↓
//! PlaybackIr { melodyEvents, chordEvents, endTick }
//!     ↓
//! audio scheduler (host) / renderers::midi
//! ```
//!
//! # Modules
//!
//! - **types**: IR type definitions
//! - **builder**: Melody/chord to IR conversion
//! - **voicing**: Chord text to MIDI notes

pub mod types;
pub mod builder;
pub mod voicing;

pub use types::{ChordInstruction, MelodyInstruction, PlaybackIr};
pub use builder::build_playback_ir;
pub use voicing::{voice_chord_symbol, ChordVoicer, SymbolVoicer};
