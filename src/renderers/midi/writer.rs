use crate::ir::{ChordInstruction, MelodyInstruction, PlaybackIr};
use crate::models::time::{TimeSignature, TICKS_PER_QUARTER};
use crate::renderers::midi::defaults::*;
use crate::renderers::midi::{MidiExportError, Result};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

const MELODY_TRACK_NAME: &[u8] = b"Melody";
const CHORD_TRACK_NAME: &[u8] = b"Chords";

/// Write a playback IR as a Standard MIDI File (format 1).
///
/// Track 0 carries tempo and meter, track 1 the melody, track 2 the chords.
/// Tick resolution is the document's own (96 per quarter), so no rescaling.
pub fn write_smf(ir: &PlaybackIr, time_signature: TimeSignature, bpm: f64, out: &mut Vec<u8>) -> Result<()> {
    if !(bpm.is_finite() && bpm > 0.0) {
        return Err(MidiExportError::InvalidTempo(bpm));
    }

    let tracks = vec![
        build_conductor_track(time_signature, bpm, ir.end_tick)?,
        build_melody_track(&ir.melody_events)?,
        build_chord_track(&ir.chord_events)?,
    ];

    let header = Header {
        format: Format::Parallel,
        timing: Timing::Metrical((TICKS_PER_QUARTER as u16).into()),
    };

    let smf = Smf { header, tracks };

    smf.write(out)
        .map_err(|e| MidiExportError::Write(format!("Failed to write MIDI: {}", e)))?;

    Ok(())
}

/// Absolute-tick event; converted to a delta when the track is finished
struct Timed<'a> {
    tick: u32,
    kind: TrackEventKind<'a>,
}

fn build_conductor_track<'a>(time_signature: TimeSignature, bpm: f64, end_tick: u32) -> Result<Track<'a>> {
    // Denominator as a power of two (4 -> 2, 8 -> 3)
    let beat_type = time_signature.beat_type.max(1);
    if !beat_type.is_power_of_two() {
        return Err(MidiExportError::UnsupportedTimeSignature(time_signature.to_string()));
    }
    let denominator_power = beat_type.trailing_zeros() as u8;

    let events = vec![
        Timed {
            tick: 0,
            kind: TrackEventKind::Meta(MetaMessage::Tempo(tempo_micros(bpm).into())),
        },
        Timed {
            tick: 0,
            kind: TrackEventKind::Meta(MetaMessage::TimeSignature(
                time_signature.beats_per_bar,
                denominator_power,
                24, // MIDI clocks per metronome click
                8,  // 32nd notes per quarter note
            )),
        },
    ];

    Ok(finish_track(events, end_tick))
}

fn build_melody_track<'a>(notes: &[MelodyInstruction]) -> Result<Track<'a>> {
    let mut events = track_preamble(MELODY_TRACK_NAME, MELODY_CHANNEL, MELODY_PROGRAM);
    for note in notes {
        let MelodyInstruction::Note { start_tick, duration_ticks, midi } = *note;
        push_note(&mut events, MELODY_CHANNEL, midi, MELODY_VELOCITY, start_tick, duration_ticks)?;
    }
    Ok(finish_track(events, 0))
}

fn build_chord_track<'a>(chords: &[ChordInstruction]) -> Result<Track<'a>> {
    let mut events = track_preamble(CHORD_TRACK_NAME, CHORD_CHANNEL, CHORD_PROGRAM);
    for chord in chords {
        for &key in &chord.midi_notes {
            push_note(&mut events, CHORD_CHANNEL, key, CHORD_VELOCITY, chord.start_tick, chord.duration_ticks)?;
        }
    }
    Ok(finish_track(events, 0))
}

fn track_preamble<'a>(name: &'a [u8], channel: u8, program: u8) -> Vec<Timed<'a>> {
    vec![
        Timed { tick: 0, kind: TrackEventKind::Meta(MetaMessage::TrackName(name)) },
        Timed {
            tick: 0,
            kind: TrackEventKind::Midi {
                channel: channel.into(),
                message: MidiMessage::ProgramChange { program: program.into() },
            },
        },
    ]
}

fn push_note(events: &mut Vec<Timed<'_>>, channel: u8, key: u8, vel: u8, start: u32, duration: u32) -> Result<()> {
    if key > 127 {
        return Err(MidiExportError::KeyOutOfRange(key));
    }
    events.push(Timed {
        tick: start,
        kind: TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::NoteOn { key: key.into(), vel: vel.into() },
        },
    });
    events.push(Timed {
        tick: start + duration,
        kind: TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::NoteOff { key: key.into(), vel: 0.into() },
        },
    });
    Ok(())
}

/// Sort by tick, convert to deltas and close the track at `end_tick` (or the last event)
fn finish_track(mut events: Vec<Timed<'_>>, end_tick: u32) -> Track<'_> {
    // Stable sort: a note-off pushed before a note-on at the same tick stays first
    events.sort_by_key(|e| e.tick);

    let mut track = Vec::with_capacity(events.len() + 1);
    let mut prev_tick = 0u32;
    for event in events {
        track.push(TrackEvent { delta: (event.tick - prev_tick).into(), kind: event.kind });
        prev_tick = event.tick;
    }

    track.push(TrackEvent {
        delta: end_tick.saturating_sub(prev_tick).into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    track
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ir() -> PlaybackIr {
        PlaybackIr {
            melody_events: vec![MelodyInstruction::note(0, 192, 60), MelodyInstruction::note(192, 96, 62)],
            chord_events: vec![ChordInstruction { start_tick: 0, duration_ticks: 384, midi_notes: vec![48, 52, 55] }],
            end_tick: 384,
        }
    }

    #[test]
    fn test_write_header() {
        let mut out = Vec::new();
        write_smf(&sample_ir(), TimeSignature::common(), DEFAULT_TEMPO_BPM, &mut out).unwrap();

        assert_eq!(&out[0..4], b"MThd");
        // Format 1
        assert_eq!(&out[8..10], &[0x00, 0x01]);
        // Conductor + melody + chords
        assert_eq!(&out[10..12], &[0x00, 0x03]);
        // 96 ticks per quarter
        assert_eq!(&out[12..14], &[0x00, 0x60]);
    }

    #[test]
    fn test_written_file_parses_back() {
        let mut out = Vec::new();
        write_smf(&sample_ir(), TimeSignature::three_four(), 90.0, &mut out).unwrap();
        let smf = Smf::parse(&out).unwrap();
        assert_eq!(smf.tracks.len(), 3);

        let note_ons = |track: &Track<'_>| {
            track
                .iter()
                .filter(|e| matches!(e.kind, TrackEventKind::Midi { message: MidiMessage::NoteOn { .. }, .. }))
                .count()
        };
        assert_eq!(note_ons(&smf.tracks[1]), 2);
        assert_eq!(note_ons(&smf.tracks[2]), 3);

        let has_three_four = smf.tracks[0]
            .iter()
            .any(|e| matches!(e.kind, TrackEventKind::Meta(MetaMessage::TimeSignature(3, 2, _, _))));
        assert!(has_three_four);
    }

    #[test]
    fn test_delta_times() {
        let track = finish_track(
            vec![
                Timed { tick: 200, kind: TrackEventKind::Meta(MetaMessage::Marker(b"b")) },
                Timed { tick: 100, kind: TrackEventKind::Meta(MetaMessage::Marker(b"a")) },
            ],
            384,
        );
        let deltas: Vec<u32> = track.iter().map(|e| e.delta.as_int()).collect();
        assert_eq!(deltas, vec![100, 100, 184]);
    }

    #[test]
    fn test_rejects_bad_tempo() {
        let mut out = Vec::new();
        let err = write_smf(&sample_ir(), TimeSignature::common(), 0.0, &mut out).unwrap_err();
        assert!(matches!(err, MidiExportError::InvalidTempo(_)));
        assert!(out.is_empty());
    }
}
