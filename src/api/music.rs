//! Stateless music helpers for the host
//!
//! Tick arithmetic and chord voicing that the renderer and audio scheduler
//! need without going through an `Editor`.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, js_error, parse_duration, serialize};
use crate::ir::voice_chord_symbol;
use crate::models::events::MelodyEvent;
use crate::models::time::{self, TimeSignature};
use crate::structure::partition_measures;

#[wasm_bindgen(js_name = durationToTicks)]
pub fn duration_to_ticks(note_value: u8, dots: u8) -> Result<u32, JsValue> {
    let duration = parse_duration(note_value, dots).map_err(|e| js_error("durationToTicks", e))?;
    Ok(time::duration_to_ticks(duration))
}

/// `{base, dots}` for an exact tick length, or `null`
#[wasm_bindgen(js_name = ticksToDuration)]
pub fn ticks_to_duration(ticks: u32) -> Result<JsValue, JsValue> {
    serialize(&time::ticks_to_duration(ticks), "Failed to serialize duration")
}

#[wasm_bindgen(js_name = barCapacityTicks)]
pub fn bar_capacity_ticks(beats_per_bar: u8) -> u32 {
    time::bar_capacity_ticks(TimeSignature::new(beats_per_bar))
}

#[wasm_bindgen(js_name = secondsPerTick)]
pub fn seconds_per_tick(bpm: f64) -> f64 {
    time::seconds_per_tick(bpm)
}

#[wasm_bindgen(js_name = snapTick)]
pub fn snap_tick(tick: u32, grid: u32) -> u32 {
    time::snap_tick(tick, grid)
}

/// MIDI notes for a chord symbol (empty if unparsable)
#[wasm_bindgen(js_name = voiceChordSymbol)]
pub fn voice_chord(text: &str) -> Vec<u8> {
    voice_chord_symbol(text)
}

/// Measure partition of an arbitrary event list
#[wasm_bindgen(js_name = partitionMeasures)]
pub fn partition(events: JsValue, beats_per_bar: u8) -> Result<JsValue, JsValue> {
    let events: Vec<MelodyEvent> = deserialize(events, "Invalid events")?;
    let measures = partition_measures(&events, TimeSignature::new(beats_per_bar));
    serialize(&measures, "Failed to serialize measures")
}
