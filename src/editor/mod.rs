//! Document editing
//!
//! ## Modules
//!
//! - `document`: The `Document` aggregate, navigation, derived views and undo plumbing
//! - `edits`: Undoable melody edits
//! - `chord_edits`: Undoable chord track edits
//! - `cursor`: Caret/selection positions
//! - `ties`: Tie validity cleanup
//! - `config`: Runtime editor configuration

pub mod config;
pub mod cursor;
pub mod document;
pub mod ties;

mod chord_edits;
mod edits;

pub use config::{EditorConfig, DEFAULT_OCTAVE};
pub use cursor::Selection;
pub use document::{Document, DocumentSnapshot, DocumentView};
pub use ties::{cleanup_ties, ties_are_valid};
