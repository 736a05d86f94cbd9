//! Melody events
//!
//! The melody is a flat, ordered list of notes and rests. Start ticks are not
//! stored; they are the running sum of the preceding durations.

use serde::{Deserialize, Serialize};
use super::pitch::Pitch;
use super::time::{Duration, Tick};

/// Stable identity of a melody event
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EventId(pub u64);

/// A single note or rest
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MelodyEvent {
    #[serde(rename_all = "camelCase")]
    Note {
        id: EventId,
        duration: Duration,
        pitch: Pitch,
        #[serde(default)]
        tie_to_next: bool,
    },
    Rest {
        id: EventId,
        duration: Duration,
    },
}

impl MelodyEvent {
    pub fn note(id: EventId, duration: Duration, pitch: Pitch) -> Self {
        MelodyEvent::Note { id, duration, pitch, tie_to_next: false }
    }

    pub fn rest(id: EventId, duration: Duration) -> Self {
        MelodyEvent::Rest { id, duration }
    }

    pub fn id(&self) -> EventId {
        match self {
            MelodyEvent::Note { id, .. } | MelodyEvent::Rest { id, .. } => *id,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            MelodyEvent::Note { duration, .. } | MelodyEvent::Rest { duration, .. } => *duration,
        }
    }

    pub fn ticks(&self) -> Tick {
        self.duration().ticks()
    }

    pub fn is_note(&self) -> bool {
        matches!(self, MelodyEvent::Note { .. })
    }

    pub fn pitch(&self) -> Option<&Pitch> {
        match self {
            MelodyEvent::Note { pitch, .. } => Some(pitch),
            MelodyEvent::Rest { .. } => None,
        }
    }

    pub fn pitch_mut(&mut self) -> Option<&mut Pitch> {
        match self {
            MelodyEvent::Note { pitch, .. } => Some(pitch),
            MelodyEvent::Rest { .. } => None,
        }
    }

    pub fn is_tied_to_next(&self) -> bool {
        matches!(self, MelodyEvent::Note { tie_to_next: true, .. })
    }

    /// Set the tie flag; ignored for rests
    pub fn set_tie_to_next(&mut self, tied: bool) {
        if let MelodyEvent::Note { tie_to_next, .. } = self {
            *tie_to_next = tied;
        }
    }
}

/// Start tick of the event at `index` (or the end tick when `index == events.len()`)
pub fn start_tick_of(events: &[MelodyEvent], index: usize) -> Tick {
    events.iter().take(index).map(MelodyEvent::ticks).sum()
}

/// Tick just past the last event
pub fn total_ticks(events: &[MelodyEvent]) -> Tick {
    events.iter().map(MelodyEvent::ticks).sum()
}

/// Start tick of every event, in one pass
pub fn start_ticks(events: &[MelodyEvent]) -> Vec<Tick> {
    let mut tick = 0;
    events
        .iter()
        .map(|event| {
            let start = tick;
            tick += event.ticks();
            start
        })
        .collect()
}

/// Index of the nearest note strictly left of `boundary`, skipping rests
pub fn note_left_of(events: &[MelodyEvent], boundary: usize) -> Option<usize> {
    let end = boundary.min(events.len());
    (0..end).rev().find(|&i| events[i].is_note())
}

/// Index of the nearest note at or right of `boundary`, skipping rests
pub fn note_right_of(events: &[MelodyEvent], boundary: usize) -> Option<usize> {
    (boundary..events.len()).find(|&i| events[i].is_note())
}
