//! Validating import
//!
//! Every accepted document must be exactly representable in the editor.
//! Anything else is rejected with the first problem found; nothing is
//! approximated or dropped.

use crate::editor::ties::cleanup_ties;
use crate::interchange::types::*;
use crate::interchange::{ImportError, Result};
use crate::models::chords::{ChordRegion, ChordTrack, RegionId};
use crate::models::content::DocumentContent;
use crate::models::events::{EventId, MelodyEvent};
use crate::models::key_signature::KeySignature;
use crate::models::time::{ticks_to_duration, Duration, NoteValue, Tick, TimeSignature};

pub fn import_interchange(source: &InterchangeDocument) -> Result<DocumentContent> {
    let time_signature = import_time_signature(source.time_signature)?;
    let key_signature: KeySignature = source
        .key
        .parse()
        .map_err(|_| ImportError::UnknownKey(source.key.clone()))?;

    let mut next_id = 1u64;
    let events = import_events(&source.events, &mut next_id)?;
    let chords = import_chords(&source.chords, &mut next_id)?;

    log::info!(
        "imported {} events, {} chords in {} {}",
        events.len(),
        chords.len(),
        time_signature,
        key_signature
    );

    Ok(DocumentContent {
        time_signature,
        key_signature,
        explicit_end_tick: source.explicit_end_tick,
        events,
        chords,
    })
}

/// Parse and import a JSON-encoded interchange document
pub fn import_interchange_json(json: &str) -> Result<DocumentContent> {
    let source = InterchangeDocument::from_json(json)?;
    import_interchange(&source)
}

fn import_time_signature(ts: InterchangeTimeSignature) -> Result<TimeSignature> {
    let time_signature = TimeSignature { beats_per_bar: ts.beats, beat_type: ts.beat_type };
    if !time_signature.is_supported() {
        return Err(ImportError::UnsupportedTimeSignature { beats: ts.beats, beat_type: ts.beat_type });
    }
    Ok(time_signature)
}

fn import_events(source: &[InterchangeEvent], next_id: &mut u64) -> Result<Vec<MelodyEvent>> {
    if let Some(other) = source.iter().find(|e| e.voice != MELODY_VOICE) {
        return Err(ImportError::PolyphonicVoice { voice: other.voice });
    }

    let mut ordered: Vec<&InterchangeEvent> = source.iter().collect();
    ordered.sort_by_key(|e| e.tick);

    let mut events = Vec::with_capacity(ordered.len());
    let mut cursor: Tick = 0;

    for event in ordered {
        if event.tick < cursor {
            return Err(ImportError::OverlappingEvents { tick: event.tick });
        }
        for duration in fill_gap(event.tick - cursor)? {
            events.push(MelodyEvent::rest(allocate(next_id), duration));
        }

        let duration = ticks_to_duration(event.duration_ticks)
            .ok_or(ImportError::UnrepresentableDuration { ticks: event.duration_ticks })?;
        let id = allocate(next_id);
        events.push(match event.pitch {
            Some(pitch) => MelodyEvent::Note { id, duration, pitch, tie_to_next: event.tie_to_next },
            None => MelodyEvent::rest(id, duration),
        });
        cursor = event.tick + event.duration_ticks;
    }

    let cleared = cleanup_ties(&mut events);
    if cleared > 0 {
        log::warn!("import: dropped {} tie(s) without a matching next note", cleared);
    }
    Ok(events)
}

/// Rests covering `ticks` of silence, largest values first
fn fill_gap(mut ticks: Tick) -> Result<Vec<Duration>> {
    let gap = ticks;
    let mut rests = Vec::new();
    for value in NoteValue::ALL {
        while ticks >= value.ticks() {
            rests.push(Duration::plain(value));
            ticks -= value.ticks();
        }
    }
    if ticks != 0 {
        return Err(ImportError::UnrepresentableDuration { ticks: gap });
    }
    Ok(rests)
}

fn import_chords(source: &[InterchangeChord], next_id: &mut u64) -> Result<ChordTrack> {
    let mut ordered: Vec<&InterchangeChord> = source.iter().collect();
    ordered.sort_by_key(|c| c.start);

    let mut track = ChordTrack::new();
    let mut previous_end: Tick = 0;
    for chord in ordered {
        if chord.end <= chord.start {
            return Err(ImportError::InvalidChordRange { start: chord.start, end: chord.end });
        }
        if chord.start < previous_end {
            return Err(ImportError::OverlappingChords { start: chord.start });
        }
        let id = RegionId(*next_id);
        *next_id += 1;
        track.regions.push(ChordRegion::new(id, chord.start, chord.end, chord.text.clone()));
        previous_end = chord.end;
    }
    Ok(track)
}

fn allocate(next_id: &mut u64) -> EventId {
    let id = EventId(*next_id);
    *next_id += 1;
    id
}
