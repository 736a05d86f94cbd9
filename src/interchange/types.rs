//! Codec-facing document shape
//!
//! Times are absolute ticks and durations raw tick counts, the way notation
//! file formats store them. Nothing here is guaranteed to be representable in
//! the editor; `import` checks that.

use serde::{Deserialize, Serialize};
use crate::models::pitch::Pitch;
use crate::models::time::Tick;

/// The only voice the editor can hold
pub const MELODY_VOICE: u8 = 1;

fn default_voice() -> u8 {
    MELODY_VOICE
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeTimeSignature {
    pub beats: u8,
    pub beat_type: u8,
}

/// A note (`pitch` set) or rest (`pitch` absent)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeEvent {
    pub tick: Tick,
    pub duration_ticks: Tick,
    #[serde(default = "default_voice")]
    pub voice: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Pitch>,
    #[serde(default)]
    pub tie_to_next: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InterchangeChord {
    pub start: Tick,
    pub end: Tick,
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeDocument {
    pub time_signature: InterchangeTimeSignature,
    /// Key name as in "Bb", "F#m" or "c minor"
    pub key: String,
    #[serde(default)]
    pub explicit_end_tick: Option<Tick>,
    #[serde(default)]
    pub events: Vec<InterchangeEvent>,
    #[serde(default)]
    pub chords: Vec<InterchangeChord>,
}

impl InterchangeDocument {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
