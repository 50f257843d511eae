use std::rc::Rc;
use std::time::Duration;

use itertools::Itertools;
use log::{error, info, warn};

use crate::events::EventEmitter;
use crate::game::achievement_store::AchievementStore;
use crate::model::ProgressionEvent;
use crate::ui::{Cue, DisplayNode, DisplaySurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentOutcome {
    /// Nothing qualified for presentation; the caller may proceed at once.
    Completed,
    /// Cues are up; completion arrives via `tick`.
    Presenting,
    /// A presentation was already in flight; the call was dropped.
    Rejected,
}

#[derive(Debug)]
enum RevealState {
    Idle,
    Presenting {
        remaining: Duration,
        active: Vec<String>,
    },
}

/// Timed one-shot presentation of newly unlocked achievements.
///
/// The reveal latch flips the moment an achievement is accepted for
/// presentation, before any waiting begins, so a re-entry or crash during the
/// display window can never show the same achievement twice.
pub struct RevealSequencer {
    state: RevealState,
    display_duration: Duration,
    display: Option<Rc<dyn DisplaySurface>>,
    event_emitter: EventEmitter<ProgressionEvent>,
}

impl RevealSequencer {
    pub fn new(
        display_duration: Duration,
        display: Option<Rc<dyn DisplaySurface>>,
        event_emitter: EventEmitter<ProgressionEvent>,
    ) -> Self {
        Self {
            state: RevealState::Idle,
            display_duration,
            display,
            event_emitter,
        }
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self.state, RevealState::Presenting { .. })
    }

    /// Present every candidate that is unlocked and not yet revealed.
    ///
    /// Candidates that do not qualify are skipped silently; if none qualify
    /// the sequencer stays idle and reports `Completed` immediately.
    pub fn present(
        &mut self,
        candidate_ids: &[String],
        achievements: &mut AchievementStore,
    ) -> PresentOutcome {
        if self.is_presenting() {
            warn!("[RevealSequencer] present() called while already presenting, ignoring");
            return PresentOutcome::Rejected;
        }

        // latch first; the display window comes after
        let fresh: Vec<String> = candidate_ids
            .iter()
            .filter(|id| achievements.mark_revealed(id))
            .cloned()
            .collect();

        if fresh.is_empty() {
            return PresentOutcome::Completed;
        }

        info!(
            "[RevealSequencer] Revealing {} for {:?}",
            fresh.iter().join(", "),
            self.display_duration
        );
        self.activate_cues(&fresh);
        self.event_emitter
            .emit(&ProgressionEvent::RevealStarted(fresh.clone()));
        self.state = RevealState::Presenting {
            remaining: self.display_duration,
            active: fresh,
        };
        PresentOutcome::Presenting
    }

    /// Advance the display window. Returns true on the tick the presentation
    /// finishes.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let RevealState::Presenting { remaining, active } = &mut self.state else {
            return false;
        };

        *remaining = remaining.saturating_sub(dt);
        if !remaining.is_zero() {
            return false;
        }

        let active = std::mem::take(active);
        self.deactivate_cues(&active);
        self.state = RevealState::Idle;
        self.event_emitter.emit(&ProgressionEvent::RevealEnded);
        true
    }

    /// Abandon any in-flight presentation without emitting completion; used
    /// by the session-level reset.
    pub fn force_idle(&mut self) {
        if let RevealState::Presenting { active, .. } = &self.state {
            let active = active.clone();
            self.deactivate_cues(&active);
        }
        self.state = RevealState::Idle;
    }

    fn activate_cues(&self, ids: &[String]) {
        let Some(display) = &self.display else {
            error!("[RevealSequencer] No display surface supplied, skipping reveal cues");
            return;
        };
        for id in ids {
            display.set_visible(&DisplayNode::AchievementIcon(id.clone()), true);
        }
        display.set_visible(&DisplayNode::AchievementShowcase, true);
        display.play_cue(Cue::AchievementParticles);
        display.play_cue(Cue::AchievementAudio);
    }

    fn deactivate_cues(&self, ids: &[String]) {
        let Some(display) = &self.display else {
            return;
        };
        display.set_visible(&DisplayNode::AchievementShowcase, false);
        for id in ids {
            display.set_visible(&DisplayNode::AchievementIcon(id.clone()), false);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::events::Channel;
    use crate::model::AchievementDefinition;
    use crate::ui::test_support::RecordingDisplay;

    fn unlocked_store(ids: &[&str]) -> AchievementStore {
        let definitions = ids
            .iter()
            .map(|id| {
                let mut definition = AchievementDefinition::new(id, "MazeGame", 0);
                definition.unlocked = true;
                definition
            })
            .collect();
        AchievementStore::new(definitions)
    }

    fn sequencer(
        display: Rc<RecordingDisplay>,
    ) -> (RevealSequencer, Rc<RefCell<Vec<ProgressionEvent>>>) {
        let (emitter, observer) = Channel::<ProgressionEvent>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        // dropping the Unsubscriber keeps the subscription alive
        let _ = observer.subscribe(move |event: &ProgressionEvent| {
            seen_clone.borrow_mut().push(event.clone());
        });
        (
            RevealSequencer::new(Duration::from_secs(4), Some(display), emitter),
            seen,
        )
    }

    #[test]
    fn test_empty_set_completes_immediately() {
        let display = Rc::new(RecordingDisplay::new());
        let (mut sequencer, events) = sequencer(display.clone());
        let mut achievements = unlocked_store(&[]);

        let outcome = sequencer.present(&[], &mut achievements);
        assert_eq!(outcome, PresentOutcome::Completed);
        assert!(!sequencer.is_presenting());
        assert!(display.calls().is_empty());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_presentation_runs_for_display_duration() {
        let display = Rc::new(RecordingDisplay::new());
        let (mut sequencer, _events) = sequencer(display.clone());
        let mut achievements = unlocked_store(&["witch-stick"]);

        let outcome = sequencer.present(&["witch-stick".to_string()], &mut achievements);
        assert_eq!(outcome, PresentOutcome::Presenting);
        assert!(achievements.is_revealed("witch-stick"));
        assert_eq!(display.cue_count(Cue::AchievementAudio), 1);
        assert_eq!(display.cue_count(Cue::AchievementParticles), 1);

        assert!(!sequencer.tick(Duration::from_secs(2)));
        assert!(sequencer.is_presenting());
        assert!(sequencer.tick(Duration::from_secs(2)));
        assert!(!sequencer.is_presenting());
        assert_eq!(
            display.visibility(&DisplayNode::AchievementShowcase),
            Some(false)
        );
    }

    #[test]
    fn test_reveal_happens_at_most_once() {
        let display = Rc::new(RecordingDisplay::new());
        let (mut sequencer, _events) = sequencer(display.clone());
        let mut achievements = unlocked_store(&["crown"]);
        let ids = vec!["crown".to_string()];

        sequencer.present(&ids, &mut achievements);
        while !sequencer.tick(Duration::from_secs(1)) {}

        // a second cycle for the same achievement never re-triggers cues
        display.clear();
        let outcome = sequencer.present(&ids, &mut achievements);
        assert_eq!(outcome, PresentOutcome::Completed);
        assert_eq!(display.cue_count(Cue::AchievementAudio), 0);
    }

    #[test]
    fn test_present_while_presenting_is_rejected() {
        let display = Rc::new(RecordingDisplay::new());
        let (mut sequencer, _events) = sequencer(display);
        let mut achievements = unlocked_store(&["crown", "diamond"]);

        sequencer.present(&["crown".to_string()], &mut achievements);
        let outcome = sequencer.present(&["diamond".to_string()], &mut achievements);
        assert_eq!(outcome, PresentOutcome::Rejected);
        // the rejected candidate keeps its reveal for a later cycle
        assert!(!achievements.is_revealed("diamond"));
    }

    #[test]
    fn test_locked_candidates_are_skipped() {
        let display = Rc::new(RecordingDisplay::new());
        let (mut sequencer, _events) = sequencer(display);
        let mut achievements = AchievementStore::new(vec![AchievementDefinition::new(
            "crown",
            "DefendGame",
            50,
        )]);

        let outcome = sequencer.present(&["crown".to_string()], &mut achievements);
        assert_eq!(outcome, PresentOutcome::Completed);
        assert!(!achievements.is_revealed("crown"));
    }

    #[test]
    fn test_missing_display_still_latches_and_times_out() {
        let (emitter, _observer) = Channel::<ProgressionEvent>::new();
        let mut sequencer = RevealSequencer::new(Duration::from_secs(4), None, emitter);
        let mut achievements = unlocked_store(&["diamond"]);

        let outcome = sequencer.present(&["diamond".to_string()], &mut achievements);
        assert_eq!(outcome, PresentOutcome::Presenting);
        assert!(achievements.is_revealed("diamond"));
        assert!(sequencer.tick(Duration::from_secs(4)));
    }
}
