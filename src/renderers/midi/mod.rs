//! Standard MIDI File export
//!
//! Writes a playback IR (see `crate::ir`) as a format 1 SMF with a conductor
//! track, a melody track and a chord track.
//!
//! # Usage
//! ```rust,ignore
//! use leadsheet_wasm::renderers::midi::export_midi;
//!
//! let bytes = export_midi(&document, &SymbolVoicer, 120.0)?;
//! ```

pub mod defaults;
mod writer;

pub use defaults::{DEFAULT_TEMPO_BPM, MELODY_VELOCITY, CHORD_VELOCITY, MELODY_PROGRAM, CHORD_PROGRAM};
pub use writer::write_smf;

use thiserror::Error;
use crate::editor::Document;
use crate::ir::{build_playback_ir, ChordVoicer};

#[derive(Debug, Error)]
pub enum MidiExportError {
    #[error("invalid tempo: {0} bpm")]
    InvalidTempo(f64),
    #[error("time signature {0} cannot be written to MIDI")]
    UnsupportedTimeSignature(String),
    #[error("MIDI key out of range: {0}")]
    KeyOutOfRange(u8),
    #[error("midi write error: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, MidiExportError>;

/// Render the whole document (from tick 0, ignoring the caret) to SMF bytes
pub fn export_midi(document: &Document, voicer: &dyn ChordVoicer, bpm: f64) -> Result<Vec<u8>> {
    let ir = build_playback_ir(
        document.events(),
        0,
        document.document_end_tick(),
        document.chords(),
        voicer,
    );
    let mut out = Vec::new();
    write_smf(&ir, document.time_signature(), bpm, &mut out)?;
    log::info!("exported MIDI: {} bytes", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SymbolVoicer;
    use crate::models::pitch::{Accidental, Letter};
    use crate::models::time::Duration;

    #[test]
    fn test_export_ignores_caret() {
        let mut doc = Document::new();
        doc.insert_note(Letter::C, Accidental::None, Duration::quarter());
        doc.insert_chord(0, 384, "C").unwrap();
        let at_end = export_midi(&doc, &SymbolVoicer, DEFAULT_TEMPO_BPM).unwrap();
        doc.set_caret(0);
        let at_start = export_midi(&doc, &SymbolVoicer, DEFAULT_TEMPO_BPM).unwrap();
        assert_eq!(at_end, at_start);
    }
}
