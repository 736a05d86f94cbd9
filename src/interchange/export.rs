use crate::interchange::types::*;
use crate::models::content::DocumentContent;
use crate::models::events::start_ticks;

/// Convert stored content to the codec shape. Always succeeds.
pub fn export_content(content: &DocumentContent) -> InterchangeDocument {
    let events = start_ticks(&content.events)
        .into_iter()
        .zip(&content.events)
        .map(|(tick, event)| InterchangeEvent {
            tick,
            duration_ticks: event.ticks(),
            voice: MELODY_VOICE,
            pitch: event.pitch().copied(),
            tie_to_next: event.is_tied_to_next(),
        })
        .collect();

    let chords = content
        .chords
        .regions
        .iter()
        .map(|r| InterchangeChord { start: r.start, end: r.end, text: r.text.clone() })
        .collect();

    InterchangeDocument {
        time_signature: InterchangeTimeSignature {
            beats: content.time_signature.beats_per_bar,
            beat_type: content.time_signature.beat_type,
        },
        key: content.key_signature.to_string(),
        explicit_end_tick: content.explicit_end_tick,
        events,
        chords,
    }
}
