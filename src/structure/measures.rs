//! Measure partitioning
//!
//! Splits the flat melody into bars. Bar capacity is a soft limit: an event
//! that does not fit closes the current bar as `Over` and opens the next one,
//! so the renderer can flag it instead of the editor rejecting the input.

use serde::{Deserialize, Serialize};
use crate::models::events::MelodyEvent;
use crate::models::time::{bar_capacity_ticks, Tick, TimeSignature};

/// Fill status of a bar
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeasureStatus {
    Ok,
    Under,
    Over,
}

/// One bar of the melody, covering events `[start_event_idx, end_event_idx)`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub index: usize,
    pub start_event_idx: usize,
    pub end_event_idx: usize,
    pub filled_ticks: Tick,
    pub capacity_ticks: Tick,
    pub status: MeasureStatus,
}

impl Measure {
    pub fn event_count(&self) -> usize {
        self.end_event_idx - self.start_event_idx
    }

    pub fn contains_event(&self, index: usize) -> bool {
        self.start_event_idx <= index && index < self.end_event_idx
    }
}

fn status_for(filled: Tick, capacity: Tick) -> MeasureStatus {
    match filled.cmp(&capacity) {
        std::cmp::Ordering::Less => MeasureStatus::Under,
        std::cmp::Ordering::Equal => MeasureStatus::Ok,
        std::cmp::Ordering::Greater => MeasureStatus::Over,
    }
}

/// Partition `events` into measures.
///
/// Always returns at least one measure; an empty melody yields a single empty
/// `Under` bar.
pub fn partition_measures(events: &[MelodyEvent], time_signature: TimeSignature) -> Vec<Measure> {
    let capacity = bar_capacity_ticks(time_signature);
    let mut measures = Vec::new();
    let mut start = 0;
    let mut filled: Tick = 0;

    let close = |measures: &mut Vec<Measure>, start: usize, end: usize, filled: Tick, status| {
        measures.push(Measure {
            index: measures.len(),
            start_event_idx: start,
            end_event_idx: end,
            filled_ticks: filled,
            capacity_ticks: capacity,
            status,
        });
    };

    for (i, event) in events.iter().enumerate() {
        let ticks = event.ticks();

        if filled > 0 && filled + ticks > capacity {
            close(&mut measures, start, i, filled, MeasureStatus::Over);
            start = i;
            filled = 0;
        }

        filled += ticks;

        if filled >= capacity {
            close(&mut measures, start, i + 1, filled, status_for(filled, capacity));
            start = i + 1;
            filled = 0;
        }
    }

    if start < events.len() || measures.is_empty() {
        close(&mut measures, start, events.len(), filled, status_for(filled, capacity));
    }

    measures
}

/// Index of the measure holding the caret boundary `caret`.
///
/// A caret sitting exactly on a bar line belongs to the bar it opens; past the
/// last event it belongs to the last bar.
pub fn measure_index_at(measures: &[Measure], caret: usize) -> usize {
    measures
        .iter()
        .position(|m| caret < m.end_event_idx)
        .unwrap_or(measures.len().saturating_sub(1))
}
