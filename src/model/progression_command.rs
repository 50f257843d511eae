use std::time::Duration;

/// Commands into the progression coordinator. Gameplay code emits these over
/// the command channel; the coordinator handles them one at a time on the
/// main loop.
#[derive(Debug, Clone)]
pub enum ProgressionCommand {
    /// The single gameplay entry point: a stage finished with this attempt's
    /// score and elapsed time.
    StageComplete {
        game_id: String,
        stage_id: String,
        score: u32,
        time: Duration,
    },
    /// Re-display the summary with the current stage's score only (used by
    /// count-based mini-games that record no meaningful time).
    ShowScoreSummary,
    /// Player picked "continue" on the summary screen.
    ChooseContinue,
    /// Player picked "restart" after finishing a game's last stage.
    ChooseRestart,
    /// Force the coordinator back to idle and clear the session reveal flag.
    Reset,
}
