use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventHandler, EventObserver, Unsubscriber};
use crate::game::achievement_store::AchievementStore;
use crate::game::record_store::RecordStore;
use crate::game::reveal_sequencer::{PresentOutcome, RevealSequencer};
use crate::game::settings::EngineSettings;
use crate::helpers::format_seconds;
use crate::model::{
    ProgressionCommand, ProgressionEvent, StageCatalog, SummaryBranch, SummaryView,
};
use crate::scene::{NameResolver, SceneAdvance};
use crate::ui::{Cue, DisplayNode, DisplaySurface, TextSlot};

/// What the summary screen reads from the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryKind {
    /// Game totals (timed mini-games).
    Totals,
    /// The current stage's score, no time (count-based mini-games).
    StageScoreOnly,
}

#[derive(Debug)]
enum FlowState {
    Idle,
    /// The reveal sequencer owns the clock; the summary follows when it ends.
    Revealing { pending: SummaryKind },
    /// Summary is on screen; input opens after the hold elapses.
    SummaryHold {
        remaining: Duration,
        branch: SummaryBranch,
    },
    WaitingForChoice { branch: SummaryBranch },
}

/// End-of-stage orchestration: record the attempt, recompute achievements,
/// run the reveal once, show the summary, wait for the player's choice.
///
/// Exactly one sequence runs at a time; a `StageComplete` arriving while one
/// is in flight is dropped with a warning. The whole machine advances only on
/// explicit `tick` calls from the host loop, so there is nothing to lock.
pub struct ProgressionCoordinator {
    catalog: Rc<StageCatalog>,
    records: Rc<RefCell<RecordStore>>,
    achievements: Rc<RefCell<AchievementStore>>,
    sequencer: RevealSequencer,
    resolver: Rc<dyn NameResolver>,
    display: Option<Rc<dyn DisplaySurface>>,
    scene: Option<Rc<dyn SceneAdvance>>,
    state: FlowState,
    /// Set once the reveal step has run this session; later summary
    /// re-displays jump straight to the summary. Cleared only by `reset`.
    reveal_shown_this_session: bool,
    summary_hold: Duration,
    event_emitter: EventEmitter<ProgressionEvent>,
    command_subscription: Option<Unsubscriber<ProgressionCommand>>,
}

impl Destroyable for ProgressionCoordinator {
    fn destroy(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl EventHandler<ProgressionCommand> for ProgressionCoordinator {
    fn handle_event(&mut self, command: &ProgressionCommand) {
        match command {
            ProgressionCommand::StageComplete {
                game_id,
                stage_id,
                score,
                time,
            } => self.on_stage_complete(game_id, stage_id, *score, *time),
            ProgressionCommand::ShowScoreSummary => self.show_score_summary(),
            ProgressionCommand::ChooseContinue => self.choose_continue(),
            ProgressionCommand::ChooseRestart => self.choose_restart(),
            ProgressionCommand::Reset => self.reset(),
        }
    }
}

impl ProgressionCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Rc<StageCatalog>,
        records: Rc<RefCell<RecordStore>>,
        achievements: Rc<RefCell<AchievementStore>>,
        resolver: Rc<dyn NameResolver>,
        display: Option<Rc<dyn DisplaySurface>>,
        scene: Option<Rc<dyn SceneAdvance>>,
        command_observer: EventObserver<ProgressionCommand>,
        event_emitter: EventEmitter<ProgressionEvent>,
        settings: &EngineSettings,
    ) -> Rc<RefCell<Self>> {
        let sequencer = RevealSequencer::new(
            settings.reveal_duration(),
            display.clone(),
            event_emitter.clone(),
        );
        let coordinator = Rc::new(RefCell::new(Self {
            catalog,
            records,
            achievements,
            sequencer,
            resolver,
            display,
            scene,
            state: FlowState::Idle,
            reveal_shown_this_session: false,
            summary_hold: settings.summary_hold(),
            event_emitter,
            command_subscription: None,
        }));
        ProgressionCoordinator::wire_subscription(coordinator.clone(), command_observer);
        coordinator
    }

    fn wire_subscription(
        coordinator: Rc<RefCell<Self>>,
        command_observer: EventObserver<ProgressionCommand>,
    ) {
        let handler = coordinator.clone();
        let subscription = command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_event(command);
        });
        coordinator.borrow_mut().command_subscription = Some(subscription);
    }

    /// The single gameplay entry point. Records the attempt, recomputes the
    /// game's achievements and starts the end-of-stage presentation flow.
    pub fn on_stage_complete(
        &mut self,
        game_id: &str,
        stage_id: &str,
        score: u32,
        time: Duration,
    ) {
        if !matches!(self.state, FlowState::Idle) {
            warn!(
                "[Coordinator] Stage completion for {}/{} while a sequence is in flight, ignoring",
                game_id, stage_id
            );
            return;
        }
        info!(
            "[Coordinator] {}/{} complete: score {}, time {}s",
            game_id,
            stage_id,
            score,
            format_seconds(time)
        );

        let outcome = self
            .records
            .borrow_mut()
            .update_stage(game_id, stage_id, score, time);
        if let Some(outcome) = outcome {
            self.event_emitter.emit(&ProgressionEvent::StageRecorded {
                game_id: game_id.to_string(),
                stage_id: stage_id.to_string(),
                score,
                time,
                new_best_score: outcome.new_best_score,
                new_best_time: outcome.new_best_time,
            });
        }

        let newly_unlocked = {
            let records = self.records.borrow();
            self.achievements.borrow_mut().recompute(game_id, &records)
        };
        if !newly_unlocked.is_empty() {
            self.event_emitter
                .emit(&ProgressionEvent::AchievementsUnlocked(newly_unlocked));
        }

        self.begin_end_of_stage(SummaryKind::Totals);
    }

    /// Summary re-display with the current stage's score only. The session
    /// reveal flag makes this skip the reveal step once it has run.
    pub fn show_score_summary(&mut self) {
        if !matches!(self.state, FlowState::Idle) {
            warn!("[Coordinator] Summary requested while a sequence is in flight, ignoring");
            return;
        }
        self.begin_end_of_stage(SummaryKind::StageScoreOnly);
    }

    fn begin_end_of_stage(&mut self, kind: SummaryKind) {
        if !self.reveal_shown_this_session {
            let pending = self
                .achievements
                .borrow()
                .pending_reveals(&self.resolver.current_game_id());
            let outcome = {
                let mut achievements = self.achievements.borrow_mut();
                self.sequencer.present(&pending, &mut achievements)
            };
            match outcome {
                PresentOutcome::Presenting => {
                    self.state = FlowState::Revealing { pending: kind };
                    return;
                }
                PresentOutcome::Completed => {
                    self.reveal_shown_this_session = true;
                }
                PresentOutcome::Rejected => {
                    // unreachable from Idle; fall through to the summary
                }
            }
        } else {
            debug!("[Coordinator] Reveal already shown this session, skipping");
        }
        self.show_summary(kind);
    }

    fn show_summary(&mut self, kind: SummaryKind) {
        let game_id = self.resolver.current_game_id();
        let stage_id = self.resolver.current_stage_id();

        let (score, time) = {
            let records = self.records.borrow();
            match kind {
                SummaryKind::Totals => (
                    records.total_score(&game_id),
                    Some(records.total_time(&game_id)),
                ),
                SummaryKind::StageScoreOnly => (records.stage_score(&game_id, &stage_id), None),
            }
        };

        let branch = if self.catalog.is_final_stage(&game_id, &stage_id) {
            SummaryBranch::Finished
        } else {
            SummaryBranch::Continue
        };

        if let Some(display) = &self.display {
            display.set_text(TextSlot::Score, &format!("Score: {}", score));
            match time {
                Some(time) => display.set_text(
                    TextSlot::Time,
                    &format!("Time: {} seconds", format_seconds(time)),
                ),
                None => display.set_text(TextSlot::Time, ""),
            }
            display.set_visible(
                &DisplayNode::ContinueControls,
                branch == SummaryBranch::Continue,
            );
            display.set_visible(
                &DisplayNode::FinishedControls,
                branch == SummaryBranch::Finished,
            );
            display.set_visible(&DisplayNode::SummaryPanel, true);
            display.play_cue(Cue::StageCompleteAudio);
        } else {
            error!("[Coordinator] No display surface supplied, skipping summary rendering");
        }

        self.event_emitter
            .emit(&ProgressionEvent::SummaryShown(SummaryView {
                game_id,
                score,
                time,
                branch,
            }));

        if self.summary_hold.is_zero() {
            self.open_choice(branch);
        } else {
            self.state = FlowState::SummaryHold {
                remaining: self.summary_hold,
                branch,
            };
        }
    }

    fn open_choice(&mut self, branch: SummaryBranch) {
        self.state = FlowState::WaitingForChoice { branch };
        self.event_emitter
            .emit(&ProgressionEvent::ChoiceRequired(branch));
    }

    /// Advance the reveal window and the summary hold. Call once per host
    /// frame with the elapsed time.
    pub fn tick(&mut self, dt: Duration) {
        match &mut self.state {
            FlowState::Revealing { pending } => {
                let pending = *pending;
                if self.sequencer.tick(dt) {
                    self.reveal_shown_this_session = true;
                    self.show_summary(pending);
                }
            }
            FlowState::SummaryHold { remaining, branch } => {
                *remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    let branch = *branch;
                    self.open_choice(branch);
                }
            }
            FlowState::Idle | FlowState::WaitingForChoice { .. } => {}
        }
    }

    /// Player picked "continue to next stage".
    pub fn choose_continue(&mut self) {
        if !matches!(
            self.state,
            FlowState::WaitingForChoice {
                branch: SummaryBranch::Continue
            }
        ) {
            warn!("[Coordinator] Continue chosen outside the choice window, ignoring");
            return;
        }
        self.hide_summary();
        if let Some(scene) = &self.scene {
            scene.advance_to_next_stage();
        } else {
            error!("[Coordinator] No scene advance supplied, staying on current stage");
        }
        self.state = FlowState::Idle;
        self.event_emitter.emit(&ProgressionEvent::StageAdvanced);
    }

    /// Player picked "restart" after the game's last stage.
    pub fn choose_restart(&mut self) {
        if !matches!(
            self.state,
            FlowState::WaitingForChoice {
                branch: SummaryBranch::Finished
            }
        ) {
            warn!("[Coordinator] Restart chosen outside the choice window, ignoring");
            return;
        }
        self.hide_summary();
        if let Some(scene) = &self.scene {
            scene.restart_from_beginning();
        } else {
            error!("[Coordinator] No scene advance supplied, staying on current stage");
        }
        self.state = FlowState::Idle;
        self.event_emitter.emit(&ProgressionEvent::GameRestarted);
    }

    /// Back to idle with the session reveal flag cleared; part of session
    /// reinitialization.
    pub fn reset(&mut self) {
        self.sequencer.force_idle();
        self.state = FlowState::Idle;
        self.reveal_shown_this_session = false;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, FlowState::Idle)
    }

    pub fn awaiting_choice(&self) -> Option<SummaryBranch> {
        match self.state {
            FlowState::WaitingForChoice { branch } => Some(branch),
            _ => None,
        }
    }

    fn hide_summary(&mut self) {
        if let Some(display) = &self.display {
            display.set_visible(&DisplayNode::SummaryPanel, false);
        }
    }
}
