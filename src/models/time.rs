//! Tick arithmetic for durations and bars
//!
//! Every position and length in the timeline is an integer number of ticks.
//! A quarter note is [`TICKS_PER_QUARTER`] ticks; the beat unit is always a quarter.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Atomic integer time unit
pub type Tick = u32;

/// Ticks in one quarter note
pub const TICKS_PER_QUARTER: Tick = 96;

/// Largest dot count a duration may carry
pub const MAX_DOTS: u8 = 2;

/// Base note value, serialized as its denominator (1 = whole, 16 = sixteenth)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum NoteValue {
    Whole = 1,
    Half = 2,
    Quarter = 4,
    Eighth = 8,
    Sixteenth = 16,
}

impl NoteValue {
    pub const ALL: [NoteValue; 5] = [
        NoteValue::Whole,
        NoteValue::Half,
        NoteValue::Quarter,
        NoteValue::Eighth,
        NoteValue::Sixteenth,
    ];

    /// Undotted length in ticks
    pub fn ticks(self) -> Tick {
        match self {
            NoteValue::Whole => TICKS_PER_QUARTER * 4,
            NoteValue::Half => TICKS_PER_QUARTER * 2,
            NoteValue::Quarter => TICKS_PER_QUARTER,
            NoteValue::Eighth => TICKS_PER_QUARTER / 2,
            NoteValue::Sixteenth => TICKS_PER_QUARTER / 4,
        }
    }

    /// Parse from a denominator (1, 2, 4, 8, 16)
    pub fn from_denominator(denominator: u8) -> Option<NoteValue> {
        match denominator {
            1 => Some(NoteValue::Whole),
            2 => Some(NoteValue::Half),
            4 => Some(NoteValue::Quarter),
            8 => Some(NoteValue::Eighth),
            16 => Some(NoteValue::Sixteenth),
            _ => None,
        }
    }

    pub fn denominator(self) -> u8 {
        self as u8
    }
}

/// A base note value plus zero, one or two augmentation dots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDuration")]
pub struct Duration {
    pub base: NoteValue,
    pub dots: u8,
}

/// Unchecked wire form of [`Duration`]
#[derive(Deserialize)]
struct RawDuration {
    base: NoteValue,
    dots: u8,
}

impl TryFrom<RawDuration> for Duration {
    type Error = String;

    fn try_from(raw: RawDuration) -> Result<Self, Self::Error> {
        if raw.dots > MAX_DOTS {
            return Err(format!("duration has {} dots (at most {})", raw.dots, MAX_DOTS));
        }
        Ok(Duration { base: raw.base, dots: raw.dots })
    }
}

impl Duration {
    pub fn new(base: NoteValue, dots: u8) -> Self {
        debug_assert!(dots <= MAX_DOTS, "at most {} dots are supported", MAX_DOTS);
        Self { base, dots }
    }

    pub fn plain(base: NoteValue) -> Self {
        Self { base, dots: 0 }
    }

    pub fn quarter() -> Self {
        Self::plain(NoteValue::Quarter)
    }

    pub fn ticks(&self) -> Tick {
        duration_to_ticks(*self)
    }
}

/// Exact tick length of a duration.
///
/// `base * (2 - 2^-dots)` computed as `base * (2^(dots+1) - 1) / 2^dots`; every
/// supported base divides evenly by four so nothing is lost to rounding.
pub fn duration_to_ticks(duration: Duration) -> Tick {
    debug_assert!(duration.dots <= MAX_DOTS, "unsupported dot count {}", duration.dots);
    let base = duration.base.ticks();
    let scale = 1 << duration.dots.min(MAX_DOTS);
    base * (2 * scale - 1) / scale
}

/// Inverse of [`duration_to_ticks`] over the fifteen supported combinations
pub fn ticks_to_duration(ticks: Tick) -> Option<Duration> {
    NoteValue::ALL.iter().find_map(|&base| {
        (0..=MAX_DOTS)
            .map(|dots| Duration { base, dots })
            .find(|d| duration_to_ticks(*d) == ticks)
    })
}

/// Meter of the document. The beat unit is always a quarter note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTimeSignature")]
pub struct TimeSignature {
    pub beats_per_bar: u8,
    pub beat_type: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeSignature {
    beats_per_bar: u8,
    beat_type: u8,
}

impl TryFrom<RawTimeSignature> for TimeSignature {
    type Error = String;

    fn try_from(raw: RawTimeSignature) -> Result<Self, Self::Error> {
        let time_signature = TimeSignature { beats_per_bar: raw.beats_per_bar, beat_type: raw.beat_type };
        if !time_signature.is_valid() {
            return Err(format!("unsupported time signature {} (beat must be a quarter)", time_signature));
        }
        Ok(time_signature)
    }
}

impl TimeSignature {
    pub fn new(beats_per_bar: u8) -> Self {
        Self { beats_per_bar: beats_per_bar.max(1), beat_type: 4 }
    }

    pub fn common() -> Self {
        Self::new(4)
    }

    pub fn three_four() -> Self {
        Self::new(3)
    }

    /// At least one beat, and the beat is a quarter
    pub fn is_valid(&self) -> bool {
        self.beats_per_bar > 0 && self.beat_type == 4
    }

    /// Meters that survive a round trip through the interchange format
    pub fn is_supported(&self) -> bool {
        self.beat_type == 4 && matches!(self.beats_per_bar, 3 | 4)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::common()
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.beats_per_bar, self.beat_type)
    }
}

/// Tick capacity of one bar
pub fn bar_capacity_ticks(time_signature: TimeSignature) -> Tick {
    Tick::from(time_signature.beats_per_bar) * TICKS_PER_QUARTER
}

/// Wall-clock length of one tick at the given tempo (quarter-note beats per minute)
pub fn seconds_per_tick(bpm: f64) -> f64 {
    60.0 / (bpm * f64::from(TICKS_PER_QUARTER))
}

/// Round `tick` up to the next multiple of `grid` (no-op on a zero grid)
pub fn round_up_to(tick: Tick, grid: Tick) -> Tick {
    if grid == 0 {
        return tick;
    }
    tick.div_ceil(grid) * grid
}

/// Snap `tick` to the nearest multiple of `grid`, halfway rounding down
pub fn snap_tick(tick: Tick, grid: Tick) -> Tick {
    if grid == 0 {
        return tick;
    }
    let below = tick / grid * grid;
    if tick - below > grid / 2 {
        below + grid
    } else {
        below
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_durations() {
        assert_eq!(duration_to_ticks(Duration::plain(NoteValue::Whole)), 384);
        assert_eq!(duration_to_ticks(Duration::plain(NoteValue::Half)), 192);
        assert_eq!(duration_to_ticks(Duration::quarter()), 96);
        assert_eq!(duration_to_ticks(Duration::plain(NoteValue::Eighth)), 48);
        assert_eq!(duration_to_ticks(Duration::plain(NoteValue::Sixteenth)), 24);
    }

    #[test]
    fn test_dotted_durations() {
        assert_eq!(duration_to_ticks(Duration::new(NoteValue::Whole, 1)), 576);
        assert_eq!(duration_to_ticks(Duration::new(NoteValue::Whole, 2)), 672);
        assert_eq!(duration_to_ticks(Duration::new(NoteValue::Quarter, 1)), 144);
        assert_eq!(duration_to_ticks(Duration::new(NoteValue::Quarter, 2)), 168);
        assert_eq!(duration_to_ticks(Duration::new(NoteValue::Sixteenth, 2)), 42);
    }

    #[test]
    fn test_ticks_to_duration_is_exact_inverse() {
        for base in NoteValue::ALL {
            for dots in 0..=MAX_DOTS {
                let duration = Duration::new(base, dots);
                assert_eq!(ticks_to_duration(duration_to_ticks(duration)), Some(duration));
            }
        }
    }

    #[test]
    fn test_ticks_to_duration_rejects_odd_lengths() {
        assert_eq!(ticks_to_duration(0), None);
        assert_eq!(ticks_to_duration(100), None);
        assert_eq!(ticks_to_duration(32), None); // eighth triplet
    }

    #[test]
    fn test_bar_capacity() {
        assert_eq!(bar_capacity_ticks(TimeSignature::common()), 384);
        assert_eq!(bar_capacity_ticks(TimeSignature::three_four()), 288);
    }

    #[test]
    fn test_seconds_per_tick() {
        // 120 bpm: a quarter lasts half a second
        let per_quarter = seconds_per_tick(120.0) * f64::from(TICKS_PER_QUARTER);
        assert!((per_quarter - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_snap_and_round() {
        assert_eq!(round_up_to(0, 384), 0);
        assert_eq!(round_up_to(1, 384), 384);
        assert_eq!(round_up_to(384, 384), 384);
        assert_eq!(snap_tick(47, 96), 0);
        assert_eq!(snap_tick(48, 96), 0);
        assert_eq!(snap_tick(49, 96), 96);
    }

    #[test]
    fn test_note_value_serializes_as_denominator() {
        let json = serde_json::to_string(&Duration::new(NoteValue::Eighth, 1)).unwrap();
        assert_eq!(json, r#"{"base":8,"dots":1}"#);
    }

    #[test]
    fn test_deserialize_rejects_extra_dots() {
        let parsed: Duration = serde_json::from_str(r#"{"base":4,"dots":2}"#).unwrap();
        assert_eq!(parsed.ticks(), 168);
        assert!(serde_json::from_str::<Duration>(r#"{"base":4,"dots":3}"#).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unsupported_meters() {
        let parsed: TimeSignature = serde_json::from_str(r#"{"beatsPerBar":5,"beatType":4}"#).unwrap();
        assert_eq!(bar_capacity_ticks(parsed), 480);
        assert!(serde_json::from_str::<TimeSignature>(r#"{"beatsPerBar":0,"beatType":4}"#).is_err());
        assert!(serde_json::from_str::<TimeSignature>(r#"{"beatsPerBar":6,"beatType":8}"#).is_err());
    }
}
