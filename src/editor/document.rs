//! The editable document
//!
//! `Document` owns the melody, the chord track, the meters and the caret. It
//! is the only writer of that state: renderers, the playback builder and the
//! codecs read through `&Document` or take copies. Content edits live in
//! `edits.rs` and `chord_edits.rs`; this file holds state, navigation,
//! derived views and the undo plumbing.

use serde::Serialize;
use std::ops::Range;

use crate::editor::config::EditorConfig;
use crate::editor::cursor::Selection;
use crate::editor::ties::cleanup_ties;
use crate::error::{EditError, Result};
use crate::ir::{build_playback_ir, ChordVoicer, PlaybackIr};
use crate::models::chords::ChordTrack;
use crate::models::content::DocumentContent;
use crate::models::events::{self, MelodyEvent};
use crate::models::key_signature::KeySignature;
use crate::models::time::{bar_capacity_ticks, round_up_to, Tick, TimeSignature};
use crate::state::{StateCell, Subscription};
use crate::structure::chord_track::validate_track;
use crate::structure::measures::{partition_measures, Measure};
use crate::undo::History;

/// Everything an undo step restores
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSnapshot {
    pub events: Vec<MelodyEvent>,
    pub chords: ChordTrack,
    pub time_signature: TimeSignature,
    pub key_signature: KeySignature,
    pub explicit_end_tick: Option<Tick>,
    pub caret: usize,
    pub selection: Option<Selection>,
}

/// Read-only view handed to the notation renderer
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub events: Vec<MelodyEvent>,
    pub measures: Vec<Measure>,
    pub time_signature: TimeSignature,
    pub key_signature: KeySignature,
    pub caret: usize,
    pub selection: Option<Selection>,
    pub chords: ChordTrack,
    pub caret_tick: Tick,
    pub end_tick: Tick,
    pub bar_capacity_ticks: Tick,
}

pub struct Document {
    pub(crate) events: Vec<MelodyEvent>,
    pub(crate) chords: ChordTrack,
    pub(crate) time_signature: TimeSignature,
    pub(crate) key_signature: KeySignature,
    /// Length requested by the user beyond the content (whole bars added)
    pub(crate) explicit_end_tick: Option<Tick>,
    pub(crate) caret: usize,
    pub(crate) selection: Option<Selection>,
    pub(crate) config: EditorConfig,
    history: History<DocumentSnapshot>,
    next_id: u64,
    /// Bumped after every state change; subscribers redraw on it
    revision: StateCell<u64>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("events", &self.events.len())
            .field("chords", &self.chords.len())
            .field("time_signature", &self.time_signature)
            .field("caret", &self.caret)
            .field("selection", &self.selection)
            .field("revision", &self.revision.get())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            events: Vec::new(),
            chords: ChordTrack::new(),
            time_signature: config.time_signature,
            key_signature: config.key_signature,
            explicit_end_tick: None,
            caret: 0,
            selection: None,
            history: History::new(config.max_history_depth),
            next_id: 1,
            revision: StateCell::new(0),
            config,
        }
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    pub fn events(&self) -> &[MelodyEvent] {
        &self.events
    }

    pub fn chords(&self) -> &ChordTrack {
        &self.chords
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn key_signature(&self) -> KeySignature {
        self.key_signature
    }

    pub fn explicit_end_tick(&self) -> Option<Tick> {
        self.explicit_end_tick
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Selected event indices, if a non-empty selection exists
    pub fn selected_range(&self) -> Option<Range<usize>> {
        self.selection
            .filter(|s| !s.is_collapsed())
            .map(|s| s.clamped(self.events.len()).range())
    }

    pub fn measures(&self) -> Vec<Measure> {
        partition_measures(&self.events, self.time_signature)
    }

    pub fn bar_capacity_ticks(&self) -> Tick {
        bar_capacity_ticks(self.time_signature)
    }

    pub fn event_start_tick(&self, index: usize) -> Tick {
        events::start_tick_of(&self.events, index)
    }

    pub fn caret_tick(&self) -> Tick {
        self.event_start_tick(self.caret)
    }

    /// End of the last melody event
    pub fn melody_end_tick(&self) -> Tick {
        events::total_ticks(&self.events)
    }

    /// Length of the document: content or requested length, whichever is
    /// longer, rounded up to a whole bar and never shorter than one bar
    pub fn document_end_tick(&self) -> Tick {
        let capacity = self.bar_capacity_ticks();
        let content = self.content_end_tick();
        let requested = self.explicit_end_tick.unwrap_or(0);
        round_up_to(content.max(requested), capacity).max(capacity)
    }

    /// End of melody or chords, whichever is later
    pub fn content_end_tick(&self) -> Tick {
        self.melody_end_tick().max(self.chords.end_tick())
    }

    pub fn bar_count(&self) -> usize {
        (self.document_end_tick() / self.bar_capacity_ticks()) as usize
    }

    pub fn measure_start_tick(&self, bar: usize) -> Tick {
        bar as Tick * self.bar_capacity_ticks()
    }

    /// Bar index containing `tick`
    pub fn tick_to_bar(&self, tick: Tick) -> usize {
        (tick / self.bar_capacity_ticks()) as usize
    }

    pub fn view(&self) -> DocumentView {
        DocumentView {
            events: self.events.clone(),
            measures: self.measures(),
            time_signature: self.time_signature,
            key_signature: self.key_signature,
            caret: self.caret,
            selection: self.selection,
            chords: self.chords.clone(),
            caret_tick: self.caret_tick(),
            end_tick: self.document_end_tick(),
            bar_capacity_ticks: self.bar_capacity_ticks(),
        }
    }

    /// Playback instructions from the caret onwards
    pub fn playback_ir(&self, voicer: &dyn ChordVoicer) -> PlaybackIr {
        build_playback_ir(
            &self.events,
            self.caret_tick(),
            self.document_end_tick(),
            &self.chords,
            voicer,
        )
    }

    /// Listen for state changes; the listener receives the new revision
    pub fn subscribe(&self, listener: impl Fn(&u64) + 'static) -> Subscription {
        self.revision.subscribe(listener)
    }

    // ------------------------------------------------------------------
    // Navigation (never recorded in history)
    // ------------------------------------------------------------------

    /// Move the caret, clamped to `0..=len`; clears the selection
    pub fn set_caret(&mut self, index: usize) {
        self.caret = index.min(self.events.len());
        self.selection = None;
        self.touch();
    }

    pub fn move_caret_left(&mut self, extend_selection: bool) {
        if extend_selection {
            let anchor = self.selection.map_or(self.caret, |s| s.anchor);
            self.caret = self.caret.saturating_sub(1);
            self.selection = Selection::non_empty(anchor, self.caret);
        } else if let Some(range) = self.selected_range() {
            self.caret = range.start;
            self.selection = None;
        } else {
            self.caret = self.caret.saturating_sub(1);
        }
        self.touch();
    }

    pub fn move_caret_right(&mut self, extend_selection: bool) {
        let len = self.events.len();
        if extend_selection {
            let anchor = self.selection.map_or(self.caret, |s| s.anchor);
            self.caret = (self.caret + 1).min(len);
            self.selection = Selection::non_empty(anchor, self.caret);
        } else if let Some(range) = self.selected_range() {
            self.caret = range.end;
            self.selection = None;
        } else {
            self.caret = (self.caret + 1).min(len);
        }
        self.touch();
    }

    /// Select exactly one event; the caret lands after it
    pub fn select_single_event(&mut self, index: usize) {
        if index >= self.events.len() {
            self.clear_selection();
            return;
        }
        self.selection = Some(Selection::new(index, index + 1));
        self.caret = index + 1;
        self.touch();
    }

    /// Select `anchor..focus` (clamped); the caret moves to the focus
    pub fn set_selection(&mut self, anchor: usize, focus: usize) {
        let len = self.events.len();
        let selection = Selection::new(anchor, focus).clamped(len);
        self.caret = selection.focus;
        self.selection = Selection::non_empty(selection.anchor, selection.focus);
        self.touch();
    }

    pub fn select_all(&mut self) {
        self.set_selection(0, self.events.len());
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.touch();
        }
    }

    // ------------------------------------------------------------------
    // Undo plumbing
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            events: self.events.clone(),
            chords: self.chords.clone(),
            time_signature: self.time_signature,
            key_signature: self.key_signature,
            explicit_end_tick: self.explicit_end_tick,
            caret: self.caret,
            selection: self.selection,
        }
    }

    fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.history.begin_applying();
        self.events = snapshot.events;
        self.chords = snapshot.chords;
        self.time_signature = snapshot.time_signature;
        self.key_signature = snapshot.key_signature;
        self.explicit_end_tick = snapshot.explicit_end_tick;
        self.caret = snapshot.caret.min(self.events.len());
        self.selection = snapshot.selection.map(|s| s.clamped(self.events.len()));
        self.history.end_applying();
        self.touch();
    }

    /// Run one undoable edit.
    ///
    /// `body` returns `None` when it changed nothing; no history entry is made
    /// then. Steps nested inside another step (or run while history is being
    /// applied) fold into the enclosing one.
    pub(crate) fn with_undo_step<T>(&mut self, body: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.run_step(body, Option::is_some)
    }

    /// Like [`Self::with_undo_step`] for edits that report why they failed.
    /// The body must leave the document untouched when it returns `Err`.
    pub(crate) fn try_undo_step<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.run_step(body, Result::is_ok)
    }

    fn run_step<R>(&mut self, body: impl FnOnce(&mut Self) -> R, committed: impl Fn(&R) -> bool) -> R {
        let before = self.history.is_recording().then(|| self.snapshot());

        self.history.enter_step();
        let result = body(self);
        self.history.exit_step();

        if committed(&result) {
            if let Some(before) = before {
                self.history.record(before);
            }
            self.normalize();
            self.touch();
        }
        result
    }

    /// Group several edits into a single undo step
    pub fn transaction<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.history.is_recording().then(|| self.snapshot());

        self.history.enter_step();
        let result = body(self);
        self.history.exit_step();

        if let Some(before) = before {
            if before != self.snapshot() {
                self.history.record(before);
            }
        }
        result
    }

    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                log::debug!("undo ({} left)", self.history.undo_count());
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                log::debug!("redo ({} left)", self.history.redo_count());
                self.restore(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Musical content for storage (no caret, selection or history)
    pub fn content(&self) -> DocumentContent {
        DocumentContent {
            time_signature: self.time_signature,
            key_signature: self.key_signature,
            explicit_end_tick: self.explicit_end_tick,
            events: self.events.clone(),
            chords: self.chords.clone(),
        }
    }

    /// Replace the whole document, bypassing and clearing undo history.
    ///
    /// A chord track with empty or overlapping regions is rejected and the
    /// document is left untouched.
    pub fn load_content(&mut self, content: DocumentContent) -> Result<()> {
        let DocumentContent { time_signature, key_signature, explicit_end_tick, events, mut chords } = content;
        if !time_signature.is_valid() {
            return Err(EditError::InvalidTimeSignature(time_signature));
        }
        chords.regions.sort_by_key(|r| r.start);
        validate_track(&chords)?;

        let max_id = events
            .iter()
            .map(|e| e.id().0)
            .chain(chords.regions.iter().map(|r| r.id.0))
            .max()
            .unwrap_or(0);

        self.history.begin_applying();
        self.events = events;
        self.chords = chords;
        self.time_signature = time_signature;
        self.key_signature = key_signature;
        self.explicit_end_tick = explicit_end_tick;
        self.caret = 0;
        self.selection = None;
        self.next_id = self.next_id.max(max_id + 1);
        self.history.end_applying();
        self.history.clear();

        self.normalize();
        log::info!("loaded document: {} events, {} chords", self.events.len(), self.chords.len());
        self.touch();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Re-establish invariants after an edit
    fn normalize(&mut self) {
        let cleared = cleanup_ties(&mut self.events);
        if cleared > 0 {
            log::debug!("cleared {} stale tie(s)", cleared);
        }
        let len = self.events.len();
        self.caret = self.caret.min(len);
        self.selection = self
            .selection
            .map(|s| s.clamped(len))
            .filter(|s| !s.is_collapsed());
    }

    fn touch(&mut self) {
        let next = self.revision.get() + 1;
        self.revision.set(next);
    }
}
