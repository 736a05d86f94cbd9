//! Editor configuration
//!
//! Every field has a default; the host may override any subset from a JS
//! object (`camelCase` keys).

use serde::{Deserialize, Serialize};
use crate::models::key_signature::KeySignature;
use crate::models::time::TimeSignature;
use crate::undo::DEFAULT_MAX_DEPTH;

/// Octave of the first note typed into an empty document (C4 = middle C)
pub const DEFAULT_OCTAVE: i8 = 4;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo steps kept before the oldest is evicted
    pub max_history_depth: usize,
    pub default_octave: i8,
    /// Meter of a new document
    pub time_signature: TimeSignature,
    /// Key of a new document
    pub key_signature: KeySignature,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history_depth: DEFAULT_MAX_DEPTH,
            default_octave: DEFAULT_OCTAVE,
            time_signature: TimeSignature::common(),
            key_signature: KeySignature::default(),
        }
    }
}
