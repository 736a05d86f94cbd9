//! Default values for MIDI export
//!
//! Tempo, velocities and the channel/program layout of the two playback parts.

/// Default tempo in beats per minute
pub const DEFAULT_TEMPO_BPM: f64 = 120.0;

/// Velocity of melody notes (1-127)
pub const MELODY_VELOCITY: u8 = 80;

/// Velocity of chord notes; kept under the melody
pub const CHORD_VELOCITY: u8 = 56;

/// General MIDI program for the melody (0 = Acoustic Grand Piano)
pub const MELODY_PROGRAM: u8 = 0;

/// General MIDI program for the chords (4 = Electric Piano 1)
pub const CHORD_PROGRAM: u8 = 4;

pub const MELODY_CHANNEL: u8 = 0;
pub const CHORD_CHANNEL: u8 = 1;

/// Microseconds per quarter note at `bpm`, clamped to what a tempo meta event holds
pub fn tempo_micros(bpm: f64) -> u32 {
    const MAX_TEMPO: f64 = 0x00FF_FFFF as f64;
    (60_000_000.0 / bpm).round().clamp(1.0, MAX_TEMPO) as u32
}
