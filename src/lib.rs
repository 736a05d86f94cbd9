//! Lead Sheet Editor WASM Module
//!
//! Core of an in-browser lead-sheet editor: a monophonic melody with a chord
//! track, measure partitioning, snapshot undo/redo, and a playback IR for the
//! audio scheduler. Rendering, audio and file I/O are the host's job.

pub mod models;
pub mod structure;
pub mod state;
pub mod undo;
pub mod editor;
pub mod ir;
pub mod renderers;
pub mod interchange;
pub mod error;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use editor::{Document, EditorConfig, Selection};
pub use error::EditError;
pub use ir::{build_playback_ir, ChordVoicer, PlaybackIr, SymbolVoicer};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Lead sheet editor WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        wasm_warn!("logger already initialized");
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
