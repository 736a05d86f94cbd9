//! The `Editor` handle exported to JavaScript
//!
//! One instance per open document; the host constructs it and passes it to
//! whatever needs it. Methods are thin: argument parsing, a call into
//! `Document`, and (de)serialisation of the result.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{
    deserialize, js_error, parse_accidental, parse_duration, parse_letter, parse_region_id, serialize,
};
use crate::editor::{Document, EditorConfig};
use crate::interchange::{export_interchange, load_interchange, InterchangeDocument};
use crate::ir::{ChordVoicer, SymbolVoicer};
use crate::models::chords::RegionId;
use crate::models::content::DocumentContent;
use crate::models::key_signature::KeySignature;
use crate::models::time::TimeSignature;
use crate::renderers::midi::export_midi;
use crate::state::Subscription;
use crate::{wasm_info, wasm_warn};

#[wasm_bindgen]
pub struct Editor {
    document: Document,
}

/// Handle for a `subscribe` registration
#[wasm_bindgen]
pub struct EditorSubscription {
    inner: Option<Subscription>,
}

#[wasm_bindgen]
impl EditorSubscription {
    pub fn unsubscribe(&mut self) {
        if let Some(subscription) = self.inner.take() {
            subscription.unsubscribe();
        }
    }
}

/// Chord voicer backed by a JS function `(text) => number[]`
struct JsVoicer<'a>(&'a js_sys::Function);

impl ChordVoicer for JsVoicer<'_> {
    fn voice(&self, text: &str) -> Vec<u8> {
        let result = match self.0.call1(&JsValue::NULL, &JsValue::from_str(text)) {
            Ok(result) => result,
            Err(_) => {
                wasm_warn!("chord voicer threw for '{}'", text);
                return vec![];
            }
        };
        serde_wasm_bindgen::from_value(result).unwrap_or_default()
    }
}

fn region_id(id: f64, context: &str) -> Result<RegionId, JsValue> {
    parse_region_id(id).map_err(|e| js_error(context, e))
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        Editor { document: Document::new() }
    }

    /// Create an editor from a partial `EditorConfig` object
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<Editor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            deserialize(config, "Invalid editor config")?
        };
        wasm_info!("editor created ({} history steps)", config.max_history_depth);
        Ok(Editor { document: Document::with_config(config) })
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Renderer snapshot: events, measures, meter, key, caret, selection, chords
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> Result<JsValue, JsValue> {
        serialize(&self.document.view(), "Failed to serialize view")
    }

    #[wasm_bindgen(js_name = getMeasures)]
    pub fn get_measures(&self) -> Result<JsValue, JsValue> {
        serialize(&self.document.measures(), "Failed to serialize measures")
    }

    pub fn caret(&self) -> usize {
        self.document.caret()
    }

    #[wasm_bindgen(js_name = caretTick)]
    pub fn caret_tick(&self) -> u32 {
        self.document.caret_tick()
    }

    #[wasm_bindgen(js_name = eventStartTick)]
    pub fn event_start_tick(&self, index: usize) -> u32 {
        self.document.event_start_tick(index)
    }

    #[wasm_bindgen(js_name = documentEndTick)]
    pub fn document_end_tick(&self) -> u32 {
        self.document.document_end_tick()
    }

    #[wasm_bindgen(js_name = measureStartTick)]
    pub fn measure_start_tick(&self, bar: usize) -> u32 {
        self.document.measure_start_tick(bar)
    }

    #[wasm_bindgen(js_name = tickToBar)]
    pub fn tick_to_bar(&self, tick: u32) -> usize {
        self.document.tick_to_bar(tick)
    }

    pub fn revision(&self) -> f64 {
        self.document.revision() as f64
    }

    /// Call `callback(revision)` after every change; returns a handle to stop
    pub fn subscribe(&self, callback: js_sys::Function) -> EditorSubscription {
        let subscription = self.document.subscribe(move |revision| {
            if callback.call1(&JsValue::NULL, &JsValue::from_f64(*revision as f64)).is_err() {
                wasm_warn!("subscriber threw on revision {}", revision);
            }
        });
        EditorSubscription { inner: Some(subscription) }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = setCaret)]
    pub fn set_caret(&mut self, index: usize) {
        self.document.set_caret(index);
    }

    #[wasm_bindgen(js_name = moveCaretLeft)]
    pub fn move_caret_left(&mut self, extend_selection: bool) {
        self.document.move_caret_left(extend_selection);
    }

    #[wasm_bindgen(js_name = moveCaretRight)]
    pub fn move_caret_right(&mut self, extend_selection: bool) {
        self.document.move_caret_right(extend_selection);
    }

    #[wasm_bindgen(js_name = selectSingleEvent)]
    pub fn select_single_event(&mut self, index: usize) {
        self.document.select_single_event(index);
    }

    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, anchor: usize, focus: usize) {
        self.document.set_selection(anchor, focus);
    }

    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&mut self) {
        self.document.select_all();
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.document.clear_selection();
    }

    // ------------------------------------------------------------------
    // Melody edits
    // ------------------------------------------------------------------

    /// Insert a note: `letter` "A"-"G", `accidental` "", "#" or "b",
    /// `note_value` 1/2/4/8/16, `dots` 0-2
    #[wasm_bindgen(js_name = insertNote)]
    pub fn insert_note(&mut self, letter: &str, accidental: &str, note_value: u8, dots: u8) -> Result<bool, JsValue> {
        let letter = parse_letter(letter).map_err(|e| js_error("insertNote", e))?;
        let accidental = parse_accidental(accidental).map_err(|e| js_error("insertNote", e))?;
        let duration = parse_duration(note_value, dots).map_err(|e| js_error("insertNote", e))?;
        Ok(self.document.insert_note(letter, accidental, duration))
    }

    #[wasm_bindgen(js_name = insertRest)]
    pub fn insert_rest(&mut self, note_value: u8, dots: u8) -> Result<bool, JsValue> {
        let duration = parse_duration(note_value, dots).map_err(|e| js_error("insertRest", e))?;
        Ok(self.document.insert_rest(duration))
    }

    #[wasm_bindgen(js_name = deleteBackward)]
    pub fn delete_backward(&mut self) -> bool {
        self.document.delete_backward()
    }

    #[wasm_bindgen(js_name = deleteForward)]
    pub fn delete_forward(&mut self) -> bool {
        self.document.delete_forward()
    }

    #[wasm_bindgen(js_name = setTimeSignature)]
    pub fn set_time_signature(&mut self, beats_per_bar: u8) -> bool {
        self.document.set_time_signature(TimeSignature::new(beats_per_bar))
    }

    /// Set the key from a name such as "Eb", "F#m" or "d minor"
    #[wasm_bindgen(js_name = setKeySignature)]
    pub fn set_key_signature(&mut self, name: &str) -> Result<bool, JsValue> {
        let key: KeySignature = name.parse().map_err(|e| js_error("setKeySignature", e))?;
        Ok(self.document.set_key_signature(key))
    }

    #[wasm_bindgen(js_name = transposeSelectionOrLeftNote)]
    pub fn transpose_selection_or_left_note(&mut self, semitones: i32) -> bool {
        self.document.transpose_selection_or_left_note(semitones)
    }

    #[wasm_bindgen(js_name = naturalizeSelectionOrLeftNote)]
    pub fn naturalize_selection_or_left_note(&mut self) -> bool {
        self.document.naturalize_selection_or_left_note()
    }

    #[wasm_bindgen(js_name = toggleAccidentalSelectionOrLeftNote)]
    pub fn toggle_accidental_selection_or_left_note(&mut self) -> bool {
        self.document.toggle_accidental_selection_or_left_note()
    }

    #[wasm_bindgen(js_name = toggleTieAcrossCaret)]
    pub fn toggle_tie_across_caret(&mut self) -> bool {
        self.document.toggle_tie_across_caret()
    }

    #[wasm_bindgen(js_name = extendLeftNoteByDuration)]
    pub fn extend_left_note_by_duration(&mut self, note_value: u8, dots: u8) -> Result<bool, JsValue> {
        let duration = parse_duration(note_value, dots).map_err(|e| js_error("extendLeftNoteByDuration", e))?;
        Ok(self.document.extend_left_note_by_duration(duration))
    }

    #[wasm_bindgen(js_name = addMeasure)]
    pub fn add_measure(&mut self) -> bool {
        self.document.add_measure()
    }

    #[wasm_bindgen(js_name = removeLastMeasure)]
    pub fn remove_last_measure(&mut self) -> bool {
        self.document.remove_last_measure()
    }

    // ------------------------------------------------------------------
    // Chord track
    // ------------------------------------------------------------------

    /// Returns the new region's id
    #[wasm_bindgen(js_name = insertChord)]
    pub fn insert_chord(&mut self, start: u32, end: u32, text: &str) -> Result<f64, JsValue> {
        self.document
            .insert_chord(start, end, text)
            .map(|id| id.0 as f64)
            .map_err(|e| js_error("insertChord", e))
    }

    #[wasm_bindgen(js_name = insertChordInMeasure)]
    pub fn insert_chord_in_measure(&mut self, bar: usize, click_tick: Option<u32>, text: &str) -> Result<f64, JsValue> {
        self.document
            .insert_chord_in_measure(bar, click_tick, text)
            .map(|id| id.0 as f64)
            .map_err(|e| js_error("insertChordInMeasure", e))
    }

    /// `[start, end]` a resize would commit, or `null`
    #[wasm_bindgen(js_name = previewChordResize)]
    pub fn preview_chord_resize(&self, id: f64, new_start: u32, new_end: u32) -> Result<JsValue, JsValue> {
        let bounds = self.document.preview_chord_resize(region_id(id, "previewChordResize")?, new_start, new_end);
        serialize(&bounds, "Failed to serialize resize preview")
    }

    #[wasm_bindgen(js_name = resizeChord)]
    pub fn resize_chord(&mut self, id: f64, new_start: u32, new_end: u32) -> Result<JsValue, JsValue> {
        let bounds = self.document.resize_chord(region_id(id, "resizeChord")?, new_start, new_end);
        serialize(&bounds, "Failed to serialize resize result")
    }

    #[wasm_bindgen(js_name = updateChordText)]
    pub fn update_chord_text(&mut self, id: f64, text: &str) -> Result<(), JsValue> {
        self.document
            .update_chord_text(region_id(id, "updateChordText")?, text)
            .map_err(|e| js_error("updateChordText", e))
    }

    #[wasm_bindgen(js_name = deleteChord)]
    pub fn delete_chord(&mut self, id: f64) -> Result<(), JsValue> {
        self.document
            .delete_chord(region_id(id, "deleteChord")?)
            .map(|_| ())
            .map_err(|e| js_error("deleteChord", e))
    }

    #[wasm_bindgen(js_name = chordsInMeasure)]
    pub fn chords_in_measure(&self, bar: usize) -> Result<JsValue, JsValue> {
        serialize(&self.document.chords_in_measure(bar), "Failed to serialize chords")
    }

    /// `{start, end}` of the free space for a chord, or `null` if the bar is full
    #[wasm_bindgen(js_name = chordGapInMeasure)]
    pub fn chord_gap_in_measure(&self, bar: usize, click_tick: Option<u32>) -> Result<JsValue, JsValue> {
        serialize(&self.document.chord_gap_in_measure(bar, click_tick), "Failed to serialize gap")
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.document.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.document.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) {
        self.document.clear_history();
    }

    // ------------------------------------------------------------------
    // Playback and export
    // ------------------------------------------------------------------

    /// Playback IR from the caret, voiced with the built-in chord voicer
    #[wasm_bindgen(js_name = playbackIr)]
    pub fn playback_ir(&self) -> Result<JsValue, JsValue> {
        serialize(&self.document.playback_ir(&SymbolVoicer), "Failed to serialize playback IR")
    }

    /// Playback IR with chords voiced by `voicer(text) => number[]`
    #[wasm_bindgen(js_name = playbackIrWithVoicer)]
    pub fn playback_ir_with_voicer(&self, voicer: &js_sys::Function) -> Result<JsValue, JsValue> {
        serialize(&self.document.playback_ir(&JsVoicer(voicer)), "Failed to serialize playback IR")
    }

    /// Standard MIDI File bytes for the whole document
    #[wasm_bindgen(js_name = exportMidi)]
    pub fn export_midi(&self, bpm: f64) -> Result<Vec<u8>, JsValue> {
        export_midi(&self.document, &SymbolVoicer, bpm).map_err(|e| js_error("exportMidi", e))
    }

    #[wasm_bindgen(js_name = exportInterchange)]
    pub fn export_interchange(&self) -> Result<JsValue, JsValue> {
        serialize(&export_interchange(&self.document), "Failed to serialize interchange document")
    }

    /// Replace the document with an imported one; the current one is kept on failure
    #[wasm_bindgen(js_name = importInterchange)]
    pub fn import_interchange(&mut self, source: JsValue) -> Result<(), JsValue> {
        let source: InterchangeDocument = deserialize(source, "Invalid interchange document")?;
        load_interchange(&mut self.document, &source).map_err(|e| js_error("importInterchange", e))
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.document.content().to_json().map_err(|e| js_error("toJson", e))
    }

    /// Replace the document from saved JSON; clears undo history
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        let content = DocumentContent::from_json(json).map_err(|e| js_error("loadJson", e))?;
        self.document.load_content(content).map_err(|e| js_error("loadJson", e))
    }
}
