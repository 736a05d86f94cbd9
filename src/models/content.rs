//! Persisted document content
//!
//! What the storage layer saves: musical content only. Caret, selection and
//! undo history are transient editor state and are not part of it.

use serde::{Deserialize, Serialize};
use super::chords::ChordTrack;
use super::events::MelodyEvent;
use super::key_signature::KeySignature;
use super::time::{Tick, TimeSignature};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    #[serde(default)]
    pub time_signature: TimeSignature,
    #[serde(default)]
    pub key_signature: KeySignature,
    #[serde(default)]
    pub explicit_end_tick: Option<Tick>,
    #[serde(default)]
    pub events: Vec<MelodyEvent>,
    #[serde(default)]
    pub chords: ChordTrack,
}

impl DocumentContent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chords::{ChordRegion, RegionId};
    use crate::models::events::EventId;
    use crate::models::pitch::{Letter, Pitch};
    use crate::models::time::Duration;

    #[test]
    fn test_json_round_trip() {
        let content = DocumentContent {
            time_signature: TimeSignature::three_four(),
            key_signature: KeySignature::major(-1),
            explicit_end_tick: Some(576),
            events: vec![
                MelodyEvent::note(EventId(1), Duration::quarter(), Pitch::natural(Letter::F, 4)),
                MelodyEvent::rest(EventId(2), Duration::quarter()),
            ],
            chords: ChordTrack {
                regions: vec![ChordRegion::new(RegionId(3), 0, 288, "F")],
            },
        };

        let json = content.to_json().unwrap();
        assert_eq!(DocumentContent::from_json(&json).unwrap(), content);
    }

    #[test]
    fn test_missing_fields_default() {
        let content = DocumentContent::from_json("{}").unwrap();
        assert_eq!(content.time_signature, TimeSignature::common());
        assert!(content.events.is_empty());
        assert!(content.chords.is_empty());
    }
}
