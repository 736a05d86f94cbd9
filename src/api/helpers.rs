//! Shared helpers for WASM API operations
//!
//! Console logging, JS (de)serialisation with error mapping, and parsing of
//! the primitive arguments the host passes (note letters, accidentals,
//! durations).

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

use crate::models::chords::RegionId;
use crate::models::pitch::{Accidental, Letter};
use crate::models::time::{Duration, NoteValue, MAX_DOTS};

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(error_context, e))
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize + ?Sized>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| js_error(error_context, e))
}

/// Log `err` and turn it into a JS string error
pub fn js_error(context: &str, err: impl Display) -> JsValue {
    let msg = format!("{}: {}", context, err);
    log_error(&msg);
    JsValue::from_str(&msg)
}

// ============================================================================
// Argument Parsing
// ============================================================================

/// Note letter from its name ("C" .. "B", either case)
pub fn parse_letter(name: &str) -> Result<Letter, String> {
    let mut chars = name.trim().chars();
    match (chars.next().and_then(Letter::from_char), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(format!("Invalid note letter: '{}' (must be A-G)", name)),
    }
}

/// Accidental from a symbol or name ("", "#", "b", "sharp", "natural", ...)
pub fn parse_accidental(symbol: &str) -> Result<Accidental, String> {
    Accidental::parse(symbol.trim()).ok_or_else(|| format!("Invalid accidental: '{}'", symbol))
}

/// Duration from a note-value denominator (1, 2, 4, 8, 16) and dot count
pub fn parse_duration(denominator: u8, dots: u8) -> Result<Duration, String> {
    let base = NoteValue::from_denominator(denominator)
        .ok_or_else(|| format!("Invalid note value: 1/{} (must be 1, 2, 4, 8 or 16)", denominator))?;
    if dots > MAX_DOTS {
        return Err(format!("Invalid dot count: {} (at most {})", dots, MAX_DOTS));
    }
    Ok(Duration::new(base, dots))
}

/// Largest integer a JS number holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Region id from a JS number; must be a non-negative safe integer
pub fn parse_region_id(id: f64) -> Result<RegionId, String> {
    if !id.is_finite() || id < 0.0 || id.fract() != 0.0 || id > MAX_SAFE_INTEGER {
        return Err(format!("Invalid chord region id: {}", id));
    }
    Ok(RegionId(id as u64))
}
