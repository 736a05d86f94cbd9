//! Renderers module for the lead sheet editor
//!
//! Export of the playback IR into output formats. Notation drawing is done
//! by the host from `Document::view`.

pub mod midi;

pub use midi::{export_midi, write_smf, MidiExportError};
