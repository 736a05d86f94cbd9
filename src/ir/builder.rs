//! Document -> playback IR
//!
//! Walks the melody once, accumulating absolute ticks. Runs of tied notes on
//! the same pitch become one instruction; this is the only place ties turn
//! into sounding length. Both tracks keep only instructions starting at or
//! after the caret.

use crate::ir::types::{ChordInstruction, MelodyInstruction, PlaybackIr};
use crate::ir::voicing::ChordVoicer;
use crate::models::chords::ChordTrack;
use crate::models::events::MelodyEvent;
use crate::models::time::Tick;

/// Build playback instructions from `caret_tick` onwards.
///
/// `end_tick` of the result is `document_end_tick`, or later if an
/// instruction runs past it.
pub fn build_playback_ir(
    events: &[MelodyEvent],
    caret_tick: Tick,
    document_end_tick: Tick,
    chords: &ChordTrack,
    voicer: &dyn ChordVoicer,
) -> PlaybackIr {
    let melody_events = melody_instructions(events, caret_tick);
    let chord_events = chord_instructions(chords, caret_tick, voicer);

    let end_tick = melody_events
        .iter()
        .map(MelodyInstruction::end_tick)
        .chain(chord_events.iter().map(ChordInstruction::end_tick))
        .fold(document_end_tick, Tick::max);

    log::debug!(
        "playback IR from tick {}: {} melody, {} chord instructions",
        caret_tick,
        melody_events.len(),
        chord_events.len()
    );

    PlaybackIr { melody_events, chord_events, end_tick }
}

fn melody_instructions(events: &[MelodyEvent], caret_tick: Tick) -> Vec<MelodyInstruction> {
    let mut out = Vec::new();
    let mut tick: Tick = 0;
    let mut i = 0;

    while i < events.len() {
        let start = tick;
        let Some(pitch) = events[i].pitch() else {
            tick += events[i].ticks();
            i += 1;
            continue;
        };
        let midi = pitch.midi();

        // Greedy merge of the tied run starting here
        let mut duration = events[i].ticks();
        let mut last = i;
        while events[last].is_tied_to_next() {
            match events.get(last + 1) {
                Some(next) if next.pitch().map(|p| p.midi()) == Some(midi) => {
                    last += 1;
                    duration += next.ticks();
                }
                _ => break,
            }
        }

        if start >= caret_tick {
            match u8::try_from(midi) {
                Ok(midi) if midi <= 127 => out.push(MelodyInstruction::note(start, duration, midi)),
                _ => log::warn!("skipping note outside the MIDI range: {}", midi),
            }
        }

        tick = start + duration;
        i = last + 1;
    }

    out
}

fn chord_instructions(chords: &ChordTrack, caret_tick: Tick, voicer: &dyn ChordVoicer) -> Vec<ChordInstruction> {
    chords
        .regions
        .iter()
        .filter(|region| region.start >= caret_tick)
        .filter_map(|region| {
            let midi_notes = voicer.voice(&region.text);
            if midi_notes.is_empty() {
                log::debug!("no voicing for chord '{}'; skipped", region.text);
                return None;
            }
            Some(ChordInstruction {
                start_tick: region.start,
                duration_ticks: region.width(),
                midi_notes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::voicing::SymbolVoicer;
    use crate::models::chords::{ChordRegion, RegionId};
    use crate::models::events::EventId;
    use crate::models::pitch::{Letter, Pitch};
    use crate::models::time::Duration;

    fn note(id: u64, letter: Letter, tied: bool) -> MelodyEvent {
        MelodyEvent::Note {
            id: EventId(id),
            duration: Duration::quarter(),
            pitch: Pitch::natural(letter, 4),
            tie_to_next: tied,
        }
    }

    fn rest(id: u64) -> MelodyEvent {
        MelodyEvent::rest(EventId(id), Duration::quarter())
    }

    fn chords(spans: &[(Tick, Tick, &str)]) -> ChordTrack {
        ChordTrack {
            regions: spans
                .iter()
                .enumerate()
                .map(|(i, &(s, e, t))| ChordRegion::new(RegionId(100 + i as u64), s, e, t))
                .collect(),
        }
    }

    #[test]
    fn test_tied_quarters_merge() {
        let events = vec![note(1, Letter::C, true), note(2, Letter::C, false)];
        let ir = build_playback_ir(&events, 0, 384, &ChordTrack::new(), &SymbolVoicer);
        assert_eq!(ir.melody_events, vec![MelodyInstruction::note(0, 192, 60)]);
        assert_eq!(ir.end_tick, 384);
    }

    #[test]
    fn test_rests_advance_time() {
        let events = vec![note(1, Letter::C, false), rest(2), note(3, Letter::E, false)];
        let ir = build_playback_ir(&events, 0, 384, &ChordTrack::new(), &SymbolVoicer);
        assert_eq!(
            ir.melody_events,
            vec![MelodyInstruction::note(0, 96, 60), MelodyInstruction::note(192, 96, 64)]
        );
    }

    #[test]
    fn test_tie_chain_of_three() {
        let events = vec![
            note(1, Letter::G, true),
            note(2, Letter::G, true),
            note(3, Letter::G, false),
            note(4, Letter::A, false),
        ];
        let ir = build_playback_ir(&events, 0, 384, &ChordTrack::new(), &SymbolVoicer);
        assert_eq!(
            ir.melody_events,
            vec![MelodyInstruction::note(0, 288, 67), MelodyInstruction::note(288, 96, 69)]
        );
    }

    #[test]
    fn test_caret_filter_applies_to_both_tracks() {
        let events = vec![note(1, Letter::C, false), note(2, Letter::D, false), note(3, Letter::E, false)];
        let track = chords(&[(0, 96, "C"), (96, 384, "G7")]);
        let ir = build_playback_ir(&events, 96, 384, &track, &SymbolVoicer);

        assert_eq!(
            ir.melody_events,
            vec![MelodyInstruction::note(96, 96, 62), MelodyInstruction::note(192, 96, 64)]
        );
        assert_eq!(ir.chord_events.len(), 1);
        assert_eq!(ir.chord_events[0].start_tick, 96);
        assert_eq!(ir.chord_events[0].duration_ticks, 288);
        assert_eq!(ir.chord_events[0].midi_notes, vec![55, 59, 62, 65]);
    }

    #[test]
    fn test_merged_run_starting_before_caret_is_dropped() {
        let events = vec![note(1, Letter::C, true), note(2, Letter::C, false), note(3, Letter::D, false)];
        let ir = build_playback_ir(&events, 96, 384, &ChordTrack::new(), &SymbolVoicer);
        assert_eq!(ir.melody_events, vec![MelodyInstruction::note(192, 96, 62)]);
    }

    #[test]
    fn test_unvoiced_chords_are_skipped() {
        let track = chords(&[(0, 192, "N.C."), (192, 384, "F")]);
        let ir = build_playback_ir(&[], 0, 384, &track, &SymbolVoicer);
        assert_eq!(ir.chord_events.len(), 1);
        assert_eq!(ir.chord_events[0].midi_notes, vec![53, 57, 60]);
    }

    #[test]
    fn test_custom_voicer_and_end_tick() {
        let track = chords(&[(384, 960, "X")]);
        let voicer = |_: &str| vec![36u8];
        let ir = build_playback_ir(&[], 0, 768, &track, &voicer);
        assert_eq!(ir.chord_events[0].midi_notes, vec![36]);
        assert_eq!(ir.end_tick, 960);
    }
}
