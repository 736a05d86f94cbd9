//! Undoable melody edits
//!
//! Every method here runs inside one undo step and returns whether anything
//! changed. Edits with nothing to act on are silent no-ops.

use crate::editor::document::Document;
use crate::models::events::{note_left_of, note_right_of, EventId, MelodyEvent};
use crate::models::key_signature::KeySignature;
use crate::models::pitch::{choose_octave, Accidental, Letter, Pitch};
use crate::models::time::{round_up_to, Duration, TimeSignature};

const MIDI_RANGE: std::ops::RangeInclusive<i32> = 0..=127;

impl Document {
    /// Note indices an accidental/transpose edit applies to.
    ///
    /// With a selection: every note inside it. Otherwise the nearest note left
    /// of the caret, if any.
    pub fn target_notes(&self) -> Vec<usize> {
        match self.selected_range() {
            Some(range) => range.filter(|&i| self.events[i].is_note()).collect(),
            None => note_left_of(&self.events, self.caret).into_iter().collect(),
        }
    }

    /// Remove the selected events, caret to the selection start
    fn remove_selection(&mut self) -> bool {
        let Some(range) = self.selected_range() else {
            return false;
        };
        let start = range.start;
        self.events.drain(range);
        self.caret = start;
        self.selection = None;
        true
    }

    fn insert_event(&mut self, event: MelodyEvent) {
        let at = self.caret.min(self.events.len());
        self.events.insert(at, event);
        self.caret = at + 1;
    }

    /// Type a note at the caret (replacing any selection).
    ///
    /// The octave follows the previous note; see [`choose_octave`].
    pub fn insert_note(&mut self, letter: Letter, accidental: Accidental, duration: Duration) -> bool {
        self.with_undo_step(|doc| {
            // The note lands where the selection starts, so the octave
            // reference is whatever note precedes that point.
            let at = doc.selected_range().map_or(doc.caret, |range| range.start);
            let previous = note_left_of(&doc.events, at).and_then(|i| doc.events[i].pitch().copied());
            let octave = choose_octave(letter, accidental, previous.as_ref(), doc.config.default_octave);
            let pitch = Pitch::new(letter, accidental, octave);
            if !MIDI_RANGE.contains(&pitch.midi()) {
                log::warn!("insert_note: {} is outside the MIDI range", pitch.notation());
                return None;
            }

            doc.remove_selection();
            let id = EventId(doc.allocate_id());
            log::debug!("insert_note {} {:?} at {}", pitch.notation(), duration, doc.caret);
            doc.insert_event(MelodyEvent::note(id, duration, pitch));
            Some(())
        })
        .is_some()
    }

    /// Insert a note with an explicit pitch, bypassing octave assignment
    pub fn insert_pitch(&mut self, pitch: Pitch, duration: Duration) -> bool {
        if !MIDI_RANGE.contains(&pitch.midi()) {
            return false;
        }
        self.with_undo_step(|doc| {
            doc.remove_selection();
            let id = EventId(doc.allocate_id());
            doc.insert_event(MelodyEvent::note(id, duration, pitch));
            Some(())
        })
        .is_some()
    }

    pub fn insert_rest(&mut self, duration: Duration) -> bool {
        self.with_undo_step(|doc| {
            doc.remove_selection();
            let id = EventId(doc.allocate_id());
            log::debug!("insert_rest {:?} at {}", duration, doc.caret);
            doc.insert_event(MelodyEvent::rest(id, duration));
            Some(())
        })
        .is_some()
    }

    /// Backspace: delete the selection, or the event left of the caret
    pub fn delete_backward(&mut self) -> bool {
        self.with_undo_step(|doc| {
            if doc.remove_selection() {
                return Some(());
            }
            let index = doc.caret.checked_sub(1)?;
            doc.events.remove(index);
            doc.caret = index;
            Some(())
        })
        .is_some()
    }

    /// Delete: delete the selection, or the event right of the caret
    pub fn delete_forward(&mut self) -> bool {
        self.with_undo_step(|doc| {
            if doc.remove_selection() {
                return Some(());
            }
            if doc.caret >= doc.events.len() {
                return None;
            }
            doc.events.remove(doc.caret);
            Some(())
        })
        .is_some()
    }

    /// Change the meter. Only quarter-note beats are supported.
    pub fn set_time_signature(&mut self, time_signature: TimeSignature) -> bool {
        if !time_signature.is_valid() {
            log::warn!("set_time_signature: unsupported meter {}", time_signature);
            return false;
        }
        self.with_undo_step(|doc| {
            if doc.time_signature == time_signature {
                return None;
            }
            log::debug!("time signature {} -> {}", doc.time_signature, time_signature);
            doc.time_signature = time_signature;
            Some(())
        })
        .is_some()
    }

    pub fn set_key_signature(&mut self, key_signature: KeySignature) -> bool {
        self.with_undo_step(|doc| {
            if doc.key_signature == key_signature {
                return None;
            }
            doc.key_signature = key_signature;
            Some(())
        })
        .is_some()
    }

    /// Apply `change` to every target note's pitch. `None` from `change`
    /// leaves that note alone.
    fn edit_target_pitches(&mut self, change: impl Fn(&Pitch) -> Option<Pitch>) -> bool {
        self.with_undo_step(|doc| {
            let targets = doc.target_notes();
            let mut changed = false;
            for index in targets {
                let Some(pitch) = doc.events[index].pitch_mut() else {
                    continue;
                };
                if let Some(next) = change(pitch) {
                    if next != *pitch {
                        *pitch = next;
                        changed = true;
                    }
                }
            }
            changed.then_some(())
        })
        .is_some()
    }

    /// Move the targets by `semitones`, respelling (sharps up, flats down).
    ///
    /// Notes that would leave the MIDI range are skipped.
    pub fn transpose_selection_or_left_note(&mut self, semitones: i32) -> bool {
        if semitones == 0 {
            return false;
        }
        log::debug!("transpose {:+}", semitones);
        self.edit_target_pitches(|pitch| {
            let moved = pitch.transposed(semitones);
            MIDI_RANGE.contains(&moved.midi()).then_some(moved)
        })
    }

    pub fn naturalize_selection_or_left_note(&mut self) -> bool {
        self.edit_target_pitches(|pitch| Some(pitch.with_accidental(Accidental::None)))
    }

    /// Cycle none -> sharp -> flat -> none on each target
    pub fn toggle_accidental_selection_or_left_note(&mut self) -> bool {
        self.edit_target_pitches(|pitch| {
            let cycled = pitch.with_accidental(pitch.accidental.cycled());
            MIDI_RANGE.contains(&cycled.midi()).then_some(cycled)
        })
    }

    /// Tie or untie the notes on either side of the caret (rests skipped).
    ///
    /// Requires both notes to exist and sound the same pitch.
    pub fn toggle_tie_across_caret(&mut self) -> bool {
        self.with_undo_step(|doc| {
            let left = note_left_of(&doc.events, doc.caret)?;
            let right = note_right_of(&doc.events, doc.caret)?;
            let left_pitch = doc.events[left].pitch()?;
            let right_pitch = doc.events[right].pitch()?;
            if !left_pitch.is_tie_compatible(right_pitch) {
                return None;
            }
            let tied = doc.events[left].is_tied_to_next();
            doc.events[left].set_tie_to_next(!tied);
            Some(())
        })
        .is_some()
    }

    /// Lengthen the note left of the caret by a tied copy of `duration`.
    ///
    /// The copy goes directly after the original and takes over its outgoing
    /// tie; the caret index does not move.
    pub fn extend_left_note_by_duration(&mut self, duration: Duration) -> bool {
        self.with_undo_step(|doc| {
            let left = note_left_of(&doc.events, doc.caret)?;
            let pitch = *doc.events[left].pitch()?;
            let carried_tie = doc.events[left].is_tied_to_next();

            let id = EventId(doc.allocate_id());
            let extension = MelodyEvent::Note { id, duration, pitch, tie_to_next: carried_tie };
            doc.events[left].set_tie_to_next(true);
            doc.events.insert(left + 1, extension);
            log::debug!("extend note {} by {:?}", left, duration);
            Some(())
        })
        .is_some()
    }

    /// Lengthen the document by one empty bar
    pub fn add_measure(&mut self) -> bool {
        self.with_undo_step(|doc| {
            let end = doc.document_end_tick() + doc.bar_capacity_ticks();
            doc.explicit_end_tick = Some(end);
            Some(())
        })
        .is_some()
    }

    /// Drop the last bar if it holds no content. Never shortens below one bar.
    pub fn remove_last_measure(&mut self) -> bool {
        self.with_undo_step(|doc| {
            let bar = doc.bar_capacity_ticks();
            let end = doc.document_end_tick().checked_sub(bar)?;
            let content_end = round_up_to(doc.content_end_tick(), bar);
            if end < bar || end < content_end {
                return None;
            }
            doc.explicit_end_tick = Some(end);
            Some(())
        })
        .is_some()
    }
}
