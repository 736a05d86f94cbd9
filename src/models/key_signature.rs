//! Key signatures as circle-of-fifths positions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// Key signature: `fifths` sharps (positive) or flats (negative), -7..=7
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeySignature {
    pub fifths: i8,
    #[serde(default)]
    pub mode: Mode,
}

const MAJOR_TONICS: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];

const MINOR_TONICS: [&str; 15] = [
    "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#",
];

impl KeySignature {
    pub fn major(fifths: i8) -> Self {
        Self { fifths: fifths.clamp(-7, 7), mode: Mode::Major }
    }

    pub fn minor(fifths: i8) -> Self {
        Self { fifths: fifths.clamp(-7, 7), mode: Mode::Minor }
    }

    /// Tonic name, e.g. "Bb" or "F#"
    pub fn tonic(&self) -> &'static str {
        let index = (self.fifths.clamp(-7, 7) + 7) as usize;
        match self.mode {
            Mode::Major => MAJOR_TONICS[index],
            Mode::Minor => MINOR_TONICS[index],
        }
    }

    /// Whether a pitch class (0 = C) belongs to the key's diatonic collection
    pub fn is_diatonic(&self, chroma: i32) -> bool {
        let chroma = chroma.rem_euclid(12);
        let first = i32::from(self.fifths) - 1;
        (first..first + 7).any(|k| (k * 7).rem_euclid(12) == chroma)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Major => write!(f, "{}", self.tonic()),
            Mode::Minor => write!(f, "{}m", self.tonic()),
        }
    }
}

impl FromStr for KeySignature {
    type Err = String;

    /// Accepts "C", "Bb", "F#", "Am", "C#m", or "<tonic> major|minor"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        let (tonic, mode) = if let Some(t) = lower.strip_suffix(" minor") {
            (t.trim().to_string(), Mode::Minor)
        } else if let Some(t) = lower.strip_suffix(" major") {
            (t.trim().to_string(), Mode::Major)
        } else if let Some(t) = lower.strip_suffix('m') {
            (t.to_string(), Mode::Minor)
        } else {
            (lower.clone(), Mode::Major)
        };

        let table = match mode {
            Mode::Major => &MAJOR_TONICS,
            Mode::Minor => &MINOR_TONICS,
        };
        table
            .iter()
            .position(|name| name.to_lowercase() == tonic)
            .map(|index| KeySignature { fifths: index as i8 - 7, mode })
            .ok_or_else(|| format!("Unknown key: '{}'", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major_and_minor() {
        assert_eq!("C".parse::<KeySignature>().unwrap(), KeySignature::major(0));
        assert_eq!("Bb".parse::<KeySignature>().unwrap(), KeySignature::major(-2));
        assert_eq!("F# major".parse::<KeySignature>().unwrap(), KeySignature::major(6));
        assert_eq!("Am".parse::<KeySignature>().unwrap(), KeySignature::minor(0));
        assert_eq!("c minor".parse::<KeySignature>().unwrap(), KeySignature::minor(-3));
        assert!("H".parse::<KeySignature>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for fifths in -7..=7 {
            for key in [KeySignature::major(fifths), KeySignature::minor(fifths)] {
                assert_eq!(key.to_string().parse::<KeySignature>().unwrap(), key);
            }
        }
    }

    #[test]
    fn test_diatonic_collection() {
        let c = KeySignature::major(0);
        let white_keys = [0, 2, 4, 5, 7, 9, 11];
        for chroma in 0..12 {
            assert_eq!(c.is_diatonic(chroma), white_keys.contains(&chroma), "chroma {}", chroma);
        }

        let d = KeySignature::major(2);
        assert!(d.is_diatonic(6)); // F#
        assert!(d.is_diatonic(1)); // C#
        assert!(!d.is_diatonic(5)); // F
    }
}
