//! Tie validity
//!
//! A note may stay tied only if the next note (rests skipped) exists and
//! sounds the same pitch. Cleanup is idempotent and runs after every edit.

use crate::models::events::MelodyEvent;

/// Clear every tie that no longer points at a same-pitch note.
///
/// Returns the number of ties removed.
pub fn cleanup_ties(events: &mut [MelodyEvent]) -> usize {
    let mut cleared = 0;
    // Walk right to left so the "next note" is always already known
    let mut next_midi: Option<i32> = None;

    for event in events.iter_mut().rev() {
        let Some(midi) = event.pitch().map(|p| p.midi()) else {
            continue;
        };
        if event.is_tied_to_next() && next_midi != Some(midi) {
            event.set_tie_to_next(false);
            cleared += 1;
        }
        next_midi = Some(midi);
    }

    cleared
}

/// Whether every tie in `events` is valid
pub fn ties_are_valid(events: &[MelodyEvent]) -> bool {
    let mut copy = events.to_vec();
    cleanup_ties(&mut copy) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::EventId;
    use crate::models::pitch::{Accidental, Letter, Pitch};
    use crate::models::time::Duration;

    fn tied(id: u64, pitch: Pitch) -> MelodyEvent {
        MelodyEvent::Note { id: EventId(id), duration: Duration::quarter(), pitch, tie_to_next: true }
    }

    fn rest(id: u64) -> MelodyEvent {
        MelodyEvent::rest(EventId(id), Duration::quarter())
    }

    fn ties(events: &[MelodyEvent]) -> Vec<bool> {
        events.iter().map(MelodyEvent::is_tied_to_next).collect()
    }

    #[test]
    fn test_last_note_loses_tie() {
        let c4 = Pitch::natural(Letter::C, 4);
        let mut events = vec![tied(1, c4), tied(2, c4)];
        assert_eq!(cleanup_ties(&mut events), 1);
        assert_eq!(ties(&events), vec![true, false]);
    }

    #[test]
    fn test_pitch_mismatch_loses_tie() {
        let mut events = vec![tied(1, Pitch::natural(Letter::C, 4)), tied(2, Pitch::natural(Letter::D, 4))];
        cleanup_ties(&mut events);
        assert_eq!(ties(&events), vec![false, false]);
    }

    #[test]
    fn test_enharmonic_tie_survives() {
        let mut events = vec![
            tied(1, Pitch::new(Letter::C, Accidental::Sharp, 4)),
            MelodyEvent::note(EventId(2), Duration::quarter(), Pitch::new(Letter::D, Accidental::Flat, 4)),
        ];
        assert_eq!(cleanup_ties(&mut events), 0);
        assert!(events[0].is_tied_to_next());
    }

    #[test]
    fn test_rests_are_skipped() {
        let c4 = Pitch::natural(Letter::C, 4);
        let mut events = vec![
            tied(1, c4),
            rest(2),
            MelodyEvent::note(EventId(3), Duration::quarter(), c4),
        ];
        assert_eq!(cleanup_ties(&mut events), 0);
        assert!(events[0].is_tied_to_next());

        let mut trailing_rest = vec![tied(1, c4), rest(2)];
        cleanup_ties(&mut trailing_rest);
        assert!(!trailing_rest[0].is_tied_to_next());
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let c4 = Pitch::natural(Letter::C, 4);
        let e4 = Pitch::natural(Letter::E, 4);
        let mut events = vec![tied(1, c4), tied(2, c4), rest(3), tied(4, e4), tied(5, c4), tied(6, c4)];
        cleanup_ties(&mut events);
        let once = events.clone();
        assert_eq!(cleanup_ties(&mut events), 0);
        assert_eq!(events, once);
        assert!(ties_are_valid(&events));
    }
}
