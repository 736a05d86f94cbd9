//! Interchange codec boundary
//!
//! The shape an external notation codec (MusicXML or similar) reads and
//! writes, with export from and validating import into the document model.
//!
//! ## Modules
//!
//! - `types`: `InterchangeDocument` and its parts
//! - `export`: Document content -> interchange (lossless)
//! - `import`: Interchange -> document content, rejecting what cannot be represented

pub mod types;
mod export;
mod import;

pub use types::{InterchangeChord, InterchangeDocument, InterchangeEvent, InterchangeTimeSignature, MELODY_VOICE};
pub use export::export_content;
pub use import::{import_interchange, import_interchange_json};

use thiserror::Error;
use crate::editor::Document;
use crate::error::EditError;
use crate::models::time::Tick;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported time signature {beats}/{beat_type} (only 3/4 and 4/4)")]
    UnsupportedTimeSignature { beats: u8, beat_type: u8 },
    #[error("voice {voice} found; only a single melody voice is supported")]
    PolyphonicVoice { voice: u8 },
    #[error("events overlap at tick {tick}")]
    OverlappingEvents { tick: Tick },
    #[error("duration of {ticks} ticks has no note value")]
    UnrepresentableDuration { ticks: Tick },
    #[error("invalid chord range {start}..{end}")]
    InvalidChordRange { start: Tick, end: Tick },
    #[error("chord at tick {start} overlaps the previous chord")]
    OverlappingChords { start: Tick },
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Edit(#[from] EditError),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// Export the document's current content
pub fn export_interchange(document: &Document) -> InterchangeDocument {
    export_content(&document.content())
}

/// Replace the document's content with an imported one.
///
/// On error the document is left untouched.
pub fn load_interchange(document: &mut Document, source: &InterchangeDocument) -> Result<()> {
    let content = import_interchange(source)?;
    document.load_content(content)?;
    Ok(())
}
