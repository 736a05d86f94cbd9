//! Playback instruction types
//!
//! Serialised with `camelCase` keys for the browser audio scheduler.

use serde::{Deserialize, Serialize};
use crate::models::time::Tick;

/// One sounding melody instruction. Tied runs are already merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MelodyInstruction {
    #[serde(rename_all = "camelCase")]
    Note {
        start_tick: Tick,
        duration_ticks: Tick,
        midi: u8,
    },
}

impl MelodyInstruction {
    pub fn note(start_tick: Tick, duration_ticks: Tick, midi: u8) -> Self {
        MelodyInstruction::Note { start_tick, duration_ticks, midi }
    }

    pub fn start_tick(&self) -> Tick {
        match self {
            MelodyInstruction::Note { start_tick, .. } => *start_tick,
        }
    }

    pub fn duration_ticks(&self) -> Tick {
        match self {
            MelodyInstruction::Note { duration_ticks, .. } => *duration_ticks,
        }
    }

    pub fn end_tick(&self) -> Tick {
        self.start_tick() + self.duration_ticks()
    }
}

/// A chord sounding over `[start_tick, start_tick + duration_ticks)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordInstruction {
    pub start_tick: Tick,
    pub duration_ticks: Tick,
    pub midi_notes: Vec<u8>,
}

impl ChordInstruction {
    pub fn end_tick(&self) -> Tick {
        self.start_tick + self.duration_ticks
    }
}

/// Everything the scheduler needs to play from the caret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackIr {
    pub melody_events: Vec<MelodyInstruction>,
    pub chord_events: Vec<ChordInstruction>,
    pub end_tick: Tick,
}

impl PlaybackIr {
    pub fn is_empty(&self) -> bool {
        self.melody_events.is_empty() && self.chord_events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melody_instruction_json_shape() {
        let json = serde_json::to_value(MelodyInstruction::note(0, 192, 60)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "note", "startTick": 0, "durationTicks": 192, "midi": 60})
        );
    }

    #[test]
    fn test_ir_json_keys() {
        let ir = PlaybackIr {
            melody_events: vec![],
            chord_events: vec![ChordInstruction { start_tick: 96, duration_ticks: 96, midi_notes: vec![48, 52, 55] }],
            end_tick: 384,
        };
        let json = serde_json::to_value(&ir).unwrap();
        assert_eq!(json["endTick"], 384);
        assert_eq!(json["chordEvents"][0]["midiNotes"], serde_json::json!([48, 52, 55]));
        assert_eq!(ir.chord_events[0].end_tick(), 192);
    }
}
