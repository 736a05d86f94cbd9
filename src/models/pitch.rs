//! Pitch representation and MIDI conversion
//!
//! Pitches are spelled (letter + accidental + octave) so the renderer can draw
//! exactly what was typed; the MIDI number is derived on demand.

use serde::{Deserialize, Serialize};

/// Natural note letter
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Semitones above C
    pub fn chroma(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Parse a letter name (case-insensitive)
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// Accidental attached to a written note
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    None,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn symbol(&self) -> &'static str {
        match self {
            Accidental::None => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    pub fn semitone_offset(&self) -> i32 {
        match self {
            Accidental::None => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    /// Parse an accidental symbol ("", "#", "b", or their names)
    pub fn parse(symbol: &str) -> Option<Accidental> {
        match symbol {
            "" | "none" | "natural" => Some(Accidental::None),
            "#" | "♯" | "sharp" => Some(Accidental::Sharp),
            "b" | "♭" | "flat" => Some(Accidental::Flat),
            _ => None,
        }
    }

    /// none → sharp → flat → none
    pub fn cycled(self) -> Accidental {
        match self {
            Accidental::None => Accidental::Sharp,
            Accidental::Sharp => Accidental::Flat,
            Accidental::Flat => Accidental::None,
        }
    }
}

/// A spelled pitch. Octave 4 holds middle C (MIDI 60).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub letter: Letter,
    #[serde(default)]
    pub accidental: Accidental,
    pub octave: i8,
}

const SHARP_SPELLING: [(Letter, Accidental); 12] = [
    (Letter::C, Accidental::None),
    (Letter::C, Accidental::Sharp),
    (Letter::D, Accidental::None),
    (Letter::D, Accidental::Sharp),
    (Letter::E, Accidental::None),
    (Letter::F, Accidental::None),
    (Letter::F, Accidental::Sharp),
    (Letter::G, Accidental::None),
    (Letter::G, Accidental::Sharp),
    (Letter::A, Accidental::None),
    (Letter::A, Accidental::Sharp),
    (Letter::B, Accidental::None),
];

const FLAT_SPELLING: [(Letter, Accidental); 12] = [
    (Letter::C, Accidental::None),
    (Letter::D, Accidental::Flat),
    (Letter::D, Accidental::None),
    (Letter::E, Accidental::Flat),
    (Letter::E, Accidental::None),
    (Letter::F, Accidental::None),
    (Letter::G, Accidental::Flat),
    (Letter::G, Accidental::None),
    (Letter::A, Accidental::Flat),
    (Letter::A, Accidental::None),
    (Letter::B, Accidental::Flat),
    (Letter::B, Accidental::None),
];

impl Pitch {
    pub fn new(letter: Letter, accidental: Accidental, octave: i8) -> Self {
        Self { letter, accidental, octave }
    }

    pub fn natural(letter: Letter, octave: i8) -> Self {
        Self::new(letter, Accidental::None, octave)
    }

    /// MIDI note number: letter chroma + accidental + octave offset (C4 = 60)
    pub fn midi(&self) -> i32 {
        (i32::from(self.octave) + 1) * 12 + self.letter.chroma() + self.accidental.semitone_offset()
    }

    /// Two pitches can be tied iff they sound the same
    pub fn is_tie_compatible(&self, other: &Pitch) -> bool {
        self.midi() == other.midi()
    }

    /// Spell a MIDI number, preferring sharps or flats for black keys
    pub fn from_midi(midi: i32, prefer_flats: bool) -> Pitch {
        let chroma = midi.rem_euclid(12) as usize;
        let octave = (midi.div_euclid(12) - 1) as i8;
        let (letter, accidental) = if prefer_flats {
            FLAT_SPELLING[chroma]
        } else {
            SHARP_SPELLING[chroma]
        };
        Pitch { letter, accidental, octave }
    }

    /// Move by `semitones`, respelling with sharps upward and flats downward
    pub fn transposed(&self, semitones: i32) -> Pitch {
        if semitones == 0 {
            return *self;
        }
        Pitch::from_midi(self.midi() + semitones, semitones < 0)
    }

    pub fn with_accidental(&self, accidental: Accidental) -> Pitch {
        Pitch { accidental, ..*self }
    }

    /// Scientific pitch notation, e.g. "C#4"
    pub fn notation(&self) -> String {
        format!("{}{}{}", self.letter.as_char(), self.accidental.symbol(), self.octave)
    }
}

/// Octave for a newly typed note.
///
/// Without a preceding note the default octave is used. Otherwise the
/// candidates are the preceding note's octave, one above and one below; the
/// one closest in MIDI distance wins, ties going to that order.
pub fn choose_octave(
    letter: Letter,
    accidental: Accidental,
    previous: Option<&Pitch>,
    default_octave: i8,
) -> i8 {
    let Some(previous) = previous else {
        return default_octave;
    };
    let target = previous.midi();
    let base = previous.octave;
    [base, base.saturating_add(1), base.saturating_sub(1)]
        .into_iter()
        .min_by_key(|&octave| (Pitch::new(letter, accidental, octave).midi() - target).abs())
        .unwrap_or(default_octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midi_numbers() {
        assert_eq!(Pitch::natural(Letter::C, 4).midi(), 60);
        assert_eq!(Pitch::natural(Letter::A, 4).midi(), 69);
        assert_eq!(Pitch::new(Letter::C, Accidental::Sharp, 4).midi(), 61);
        assert_eq!(Pitch::new(Letter::C, Accidental::Flat, 4).midi(), 59);
        assert_eq!(Pitch::natural(Letter::B, 3).midi(), 59);
    }

    #[test]
    fn test_enharmonic_tie_compatibility() {
        let c_sharp = Pitch::new(Letter::C, Accidental::Sharp, 4);
        let d_flat = Pitch::new(Letter::D, Accidental::Flat, 4);
        assert!(c_sharp.is_tie_compatible(&d_flat));
        assert!(!c_sharp.is_tie_compatible(&Pitch::natural(Letter::D, 4)));
    }

    #[test]
    fn test_transpose_spelling() {
        let c4 = Pitch::natural(Letter::C, 4);
        assert_eq!(c4.transposed(1), Pitch::new(Letter::C, Accidental::Sharp, 4));
        assert_eq!(c4.transposed(-1), Pitch::natural(Letter::B, 3));
        assert_eq!(c4.transposed(-2), Pitch::new(Letter::B, Accidental::Flat, 3));
        assert_eq!(c4.transposed(12), Pitch::natural(Letter::C, 5));
        assert_eq!(c4.transposed(0), c4);
    }

    #[test]
    fn test_accidental_cycle() {
        assert_eq!(Accidental::None.cycled(), Accidental::Sharp);
        assert_eq!(Accidental::Sharp.cycled(), Accidental::Flat);
        assert_eq!(Accidental::Flat.cycled(), Accidental::None);
    }

    #[test]
    fn test_choose_octave_defaults_without_previous() {
        assert_eq!(choose_octave(Letter::G, Accidental::None, None, 4), 4);
    }

    #[test]
    fn test_choose_octave_picks_nearest() {
        // B3 -> C: C4 (1 semitone) beats C3 (11)
        let b3 = Pitch::natural(Letter::B, 3);
        assert_eq!(choose_octave(Letter::C, Accidental::None, Some(&b3), 4), 4);

        // C4 -> B: B3 (1 semitone) beats B4 (11)
        let c4 = Pitch::natural(Letter::C, 4);
        assert_eq!(choose_octave(Letter::B, Accidental::None, Some(&c4), 4), 3);

        // C4 -> G: G3 (5 semitones) beats G4 (7)
        assert_eq!(choose_octave(Letter::G, Accidental::None, Some(&c4), 4), 3);
        // C4 -> F: F4 (5) beats F3 (7)
        assert_eq!(choose_octave(Letter::F, Accidental::None, Some(&c4), 4), 4);
    }

    #[test]
    fn test_choose_octave_tie_prefers_same_octave() {
        // C4 -> F#: F#4 and F#3 are both 6 semitones away
        let c4 = Pitch::natural(Letter::C, 4);
        assert_eq!(choose_octave(Letter::F, Accidental::Sharp, Some(&c4), 2), 4);
    }

    #[test]
    fn test_parse_accidental() {
        assert_eq!(Accidental::parse("#"), Some(Accidental::Sharp));
        assert_eq!(Accidental::parse("b"), Some(Accidental::Flat));
        assert_eq!(Accidental::parse(""), Some(Accidental::None));
        assert_eq!(Accidental::parse("x"), None);
        assert_eq!(Letter::from_char('g'), Some(Letter::G));
        assert_eq!(Letter::from_char('h'), None);
    }
}
