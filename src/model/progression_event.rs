use std::time::Duration;

/// Which controls the summary screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryBranch {
    /// More stages remain in the current game.
    Continue,
    /// The completed stage was the game's last one.
    Finished,
}

/// What the summary screen shows: the game's running totals after a timed
/// stage, or just the stage score for count-based games (`time: None`).
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub game_id: String,
    pub score: u32,
    pub time: Option<Duration>,
    pub branch: SummaryBranch,
}

/// Notifications out of the progression coordinator; display adapters
/// subscribe to these.
#[derive(Debug, Clone)]
pub enum ProgressionEvent {
    StageRecorded {
        game_id: String,
        stage_id: String,
        score: u32,
        time: Duration,
        new_best_score: bool,
        new_best_time: bool,
    },
    /// Achievements that flipped locked -> unlocked in this recompute.
    AchievementsUnlocked(Vec<String>),
    /// The reveal presentation started for these achievements.
    RevealStarted(Vec<String>),
    RevealEnded,
    SummaryShown(SummaryView),
    /// The summary hold elapsed; the coordinator now waits for the player.
    ChoiceRequired(SummaryBranch),
    StageAdvanced,
    GameRestarted,
}
