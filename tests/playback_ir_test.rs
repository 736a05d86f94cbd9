//! Playback IR built from edited documents

use leadsheet_wasm::editor::Document;
use leadsheet_wasm::ir::{build_playback_ir, MelodyInstruction, SymbolVoicer};
use leadsheet_wasm::models::{Accidental, Duration, Letter, NoteValue};

#[test]
fn test_two_tied_quarters_play_as_one_note() {
    let mut doc = Document::new();
    doc.insert_note(Letter::C, Accidental::None, Duration::quarter());
    doc.insert_note(Letter::C, Accidental::None, Duration::quarter());
    doc.set_caret(1);
    assert!(doc.toggle_tie_across_caret());
    doc.set_caret(0);

    let ir = doc.playback_ir(&SymbolVoicer);
    assert_eq!(ir.melody_events, vec![MelodyInstruction::note(0, 192, 60)]);

    let json = serde_json::to_value(&ir.melody_events).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"kind": "note", "startTick": 0, "durationTicks": 192, "midi": 60}])
    );
}

#[test]
fn test_extend_produces_one_sounding_note() {
    let mut doc = Document::new();
    doc.insert_note(Letter::G, Accidental::None, Duration::quarter());
    doc.extend_left_note_by_duration(Duration::plain(NoteValue::Half));
    doc.set_caret(0);

    let ir = doc.playback_ir(&SymbolVoicer);
    assert_eq!(ir.melody_events, vec![MelodyInstruction::note(0, 288, 67)]);
}

#[test]
fn test_play_from_caret() {
    let mut doc = Document::new();
    for letter in [Letter::C, Letter::D, Letter::E, Letter::F] {
        doc.insert_note(letter, Accidental::None, Duration::quarter());
    }
    doc.insert_chord(0, 192, "C").unwrap();
    doc.insert_chord(192, 384, "G").unwrap();
    doc.set_caret(2);

    let ir = doc.playback_ir(&SymbolVoicer);
    let starts: Vec<u32> = ir.melody_events.iter().map(MelodyInstruction::start_tick).collect();
    assert_eq!(starts, vec![192, 288]);
    assert_eq!(ir.chord_events.len(), 1);
    assert_eq!(ir.chord_events[0].start_tick, 192);
    assert_eq!(ir.chord_events[0].midi_notes, vec![55, 59, 62]);
    assert_eq!(ir.end_tick, 384);
}

#[test]
fn test_end_tick_covers_added_measures() {
    let mut doc = Document::new();
    doc.insert_note(Letter::C, Accidental::None, Duration::quarter());
    doc.add_measure();
    let ir = build_playback_ir(doc.events(), 0, doc.document_end_tick(), doc.chords(), &SymbolVoicer);
    assert_eq!(ir.end_tick, 768);
}

#[test]
fn test_custom_voicer() {
    let mut doc = Document::new();
    doc.insert_chord(0, 384, "anything").unwrap();
    let voicer = |text: &str| -> Vec<u8> { if text == "anything" { vec![40, 47] } else { vec![] } };
    let ir = doc.playback_ir(&voicer);
    assert_eq!(ir.chord_events[0].midi_notes, vec![40, 47]);
}
