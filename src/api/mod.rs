//! Lead Sheet Editor WASM API
//!
//! The JavaScript-facing surface. Domain logic lives in the rest of the
//! crate; this layer parses arguments, calls in and serialises results.
//!
//! # Module Structure
//!
//! - `helpers`: Console logging, (de)serialisation and argument parsing
//! - `editor`: The `Editor` class wrapping one `Document`
//! - `music`: Stateless tick/duration/voicing helpers

pub mod helpers;
pub mod editor;
pub mod music;

pub use editor::{Editor, EditorSubscription};
pub use music::*;
