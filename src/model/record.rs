use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Score and elapsed time for a single stage: the current attempt's values
/// plus the best-ever values. `best_time: None` means no timed completion has
/// been recorded yet and counts as worse than any real time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage_id: String,
    pub score: u32,
    pub time: Duration,
    pub best_score: u32,
    pub best_time: Option<Duration>,
}

/// What an attempt changed about the best values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub new_best_score: bool,
    pub new_best_time: bool,
}

impl StageRecord {
    pub fn new(stage_id: &str) -> Self {
        Self {
            stage_id: stage_id.to_string(),
            score: 0,
            time: Duration::ZERO,
            best_score: 0,
            best_time: None,
        }
    }

    /// Overwrite the current values with this attempt's results and raise the
    /// bests where beaten. Current values are per-attempt, never accumulated.
    pub fn apply_attempt(&mut self, score: u32, time: Duration) -> AttemptOutcome {
        self.score = score;
        self.time = time;

        let mut outcome = AttemptOutcome::default();
        if score > self.best_score {
            self.best_score = score;
            outcome.new_best_score = true;
        }
        if self.best_time.map(|best| time < best).unwrap_or(true) {
            self.best_time = Some(time);
            outcome.new_best_time = true;
        }
        outcome
    }

    /// Zero the current values only; bests survive.
    pub fn reset_current(&mut self) {
        self.score = 0;
        self.time = Duration::ZERO;
    }
}

/// All stage records of one game plus cached totals. The totals are a cache
/// over the current stage values, refreshed on every mutation; they are never
/// written independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub stages: Vec<StageRecord>,
    pub total_score: u32,
    pub total_time: Duration,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl GameRecord {
    pub fn new(game_id: &str, stage_ids: &[String]) -> Self {
        let mut record = Self {
            game_id: game_id.to_string(),
            stages: stage_ids.iter().map(|s| StageRecord::new(s)).collect(),
            total_score: 0,
            total_time: Duration::ZERO,
            index: HashMap::new(),
        };
        record.rebuild_index();
        record
    }

    /// Must be called after deserialization (the id map is not persisted).
    pub fn rebuild_index(&mut self) {
        self.index = self
            .stages
            .iter()
            .enumerate()
            .map(|(i, stage)| (stage.stage_id.clone(), i))
            .collect();
    }

    pub fn stage(&self, stage_id: &str) -> Option<&StageRecord> {
        self.index.get(stage_id).map(|&i| &self.stages[i])
    }

    pub fn stage_mut(&mut self, stage_id: &str) -> Option<&mut StageRecord> {
        match self.index.get(stage_id) {
            Some(&i) => Some(&mut self.stages[i]),
            None => None,
        }
    }

    pub fn refresh_totals(&mut self) {
        self.total_score = self.stages.iter().map(|s| s.score).sum();
        self.total_time = self.stages.iter().map(|s| s.time).sum();
    }

    /// Sum of best scores; the value achievements are judged against.
    pub fn total_best_score(&self) -> u32 {
        self.stages.iter().map(|s| s.best_score).sum()
    }
}
