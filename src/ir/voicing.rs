//! Chord symbol voicing
//!
//! Turns chord text (C, Am7, F#dim, G7/B, ...) into MIDI notes for
//! accompaniment. Chords are voiced from the C3 octave (MIDI 48-59); a slash
//! bass goes one octave lower.

use crate::models::pitch::{Accidental, Letter};

/// MIDI number of C3, the root octave for chord voicings
const ROOT_OCTAVE_BASE: i32 = 48;
/// MIDI number of C2, the octave for slash basses
const BASS_OCTAVE_BASE: i32 = 36;

/// Maps chord text to the MIDI notes it should sound.
///
/// An empty result means "nothing to play"; the region is skipped.
pub trait ChordVoicer {
    fn voice(&self, text: &str) -> Vec<u8>;
}

impl<F> ChordVoicer for F
where
    F: Fn(&str) -> Vec<u8>,
{
    fn voice(&self, text: &str) -> Vec<u8> {
        self(text)
    }
}

/// The built-in voicer, backed by [`voice_chord_symbol`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolVoicer;

impl ChordVoicer for SymbolVoicer {
    fn voice(&self, text: &str) -> Vec<u8> {
        voice_chord_symbol(text)
    }
}

/// Leading note name of a chord symbol: chroma and the unparsed rest
fn parse_root(symbol: &str) -> Option<(i32, &str)> {
    let mut chars = symbol.chars();
    let letter = chars.next().filter(char::is_ascii_uppercase).and_then(Letter::from_char)?;
    let rest = chars.as_str();

    let (accidental, rest) = match rest.chars().next() {
        Some(c @ ('#' | 'b' | '♯' | '♭')) => {
            let accidental = Accidental::parse(c.encode_utf8(&mut [0; 4])).unwrap_or_default();
            (accidental, &rest[c.len_utf8()..])
        }
        _ => (Accidental::None, rest),
    };

    Some((letter.chroma() + accidental.semitone_offset(), rest))
}

/// Semitone intervals above the root for a quality suffix.
///
/// Unknown suffixes fall back to a major triad.
fn quality_intervals(quality: &str) -> &'static [i32] {
    match quality {
        // Major triads
        "" | "maj" | "M" => &[0, 4, 7],

        // Minor triads
        "m" | "min" | "-" => &[0, 3, 7],

        // Sevenths
        "7" => &[0, 4, 7, 10],
        "maj7" | "M7" | "Δ" | "Δ7" => &[0, 4, 7, 11],
        "m7" | "min7" | "-7" => &[0, 3, 7, 10],
        "mMaj7" | "m(maj7)" => &[0, 3, 7, 11],
        "m7b5" | "ø" | "ø7" => &[0, 3, 6, 10],
        "dim7" | "°7" => &[0, 3, 6, 9],

        // Diminished / augmented
        "dim" | "°" => &[0, 3, 6],
        "aug" | "+" => &[0, 4, 8],

        // Suspended
        "sus4" | "sus" => &[0, 5, 7],
        "sus2" => &[0, 2, 7],
        "7sus4" => &[0, 5, 7, 10],

        // Sixths
        "6" => &[0, 4, 7, 9],
        "m6" => &[0, 3, 7, 9],

        // Extended
        "add9" => &[0, 4, 7, 14],
        "9" => &[0, 4, 7, 10, 14],
        "maj9" | "M9" => &[0, 4, 7, 11, 14],
        "m9" | "min9" => &[0, 3, 7, 10, 14],

        _ => &[0, 4, 7],
    }
}

/// Voice a chord symbol.
///
/// Returns an empty vector when the text has no recognisable root.
pub fn voice_chord_symbol(text: &str) -> Vec<u8> {
    let symbol = text.trim();
    let (chord, bass) = match symbol.split_once('/') {
        Some((chord, bass)) => (chord, Some(bass.trim())),
        None => (symbol, None),
    };

    let Some((root_chroma, quality)) = parse_root(chord.trim()) else {
        return vec![];
    };
    let root = ROOT_OCTAVE_BASE + root_chroma;

    let mut notes: Vec<i32> = quality_intervals(quality.trim()).iter().map(|i| root + i).collect();

    // Slash bass: "/B" only; anything unparsable after the slash is ignored
    if let Some((bass_chroma, "")) = bass.and_then(parse_root) {
        notes.insert(0, BASS_OCTAVE_BASE + bass_chroma.rem_euclid(12));
    }

    notes.into_iter().filter_map(|n| u8::try_from(n).ok()).collect()
}
