use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use log::warn;

use crate::model::{AttemptOutcome, GameRecord, StageCatalog, StageRecord};

/// Per-game, per-stage score/time records for the whole session.
///
/// Writes come from gameplay while the coordinator is idle; reads happen
/// during the paused end-of-stage window. Unknown game or stage ids are a
/// configuration problem, not a runtime error: they log a warning and the
/// operation becomes a no-op (reads return zero).
#[derive(Debug)]
pub struct RecordStore {
    catalog: Rc<StageCatalog>,
    games: HashMap<String, GameRecord>,
}

impl RecordStore {
    /// Build a zeroed store covering every game and stage in the catalog.
    pub fn new(catalog: Rc<StageCatalog>) -> Self {
        let games = catalog
            .games
            .iter()
            .map(|info| {
                (
                    info.game_id.clone(),
                    GameRecord::new(&info.game_id, &info.stage_ids),
                )
            })
            .collect();
        Self { catalog, games }
    }

    /// Zero all current values and bests (new session).
    pub fn init_to_zero(&mut self) {
        for info in &self.catalog.games {
            self.games.insert(
                info.game_id.clone(),
                GameRecord::new(&info.game_id, &info.stage_ids),
            );
        }
    }

    /// Record a completed attempt: overwrite the stage's current score/time,
    /// raise its bests where beaten, refresh the game's cached totals.
    pub fn update_stage(
        &mut self,
        game_id: &str,
        stage_id: &str,
        score: u32,
        time: Duration,
    ) -> Option<AttemptOutcome> {
        let Some(game) = self.games.get_mut(game_id) else {
            warn!("[RecordStore] Game {} not found", game_id);
            return None;
        };
        let Some(stage) = game.stage_mut(stage_id) else {
            warn!("[RecordStore] Stage {} not found in game {}", stage_id, game_id);
            return None;
        };
        let outcome = stage.apply_attempt(score, time);
        game.refresh_totals();
        Some(outcome)
    }

    /// Zero the stage's current score/time; bests are untouched.
    pub fn reset_stage(&mut self, game_id: &str, stage_id: &str) {
        let Some(game) = self.games.get_mut(game_id) else {
            warn!("[RecordStore] Game {} not found", game_id);
            return;
        };
        let Some(stage) = game.stage_mut(stage_id) else {
            warn!("[RecordStore] Stage {} not found in game {}", stage_id, game_id);
            return;
        };
        stage.reset_current();
        game.refresh_totals();
    }

    pub fn total_score(&self, game_id: &str) -> u32 {
        match self.games.get(game_id) {
            Some(game) => game.total_score,
            None => {
                warn!("[RecordStore] Game {} not found", game_id);
                0
            }
        }
    }

    pub fn total_time(&self, game_id: &str) -> Duration {
        match self.games.get(game_id) {
            Some(game) => game.total_time,
            None => {
                warn!("[RecordStore] Game {} not found", game_id);
                Duration::ZERO
            }
        }
    }

    pub fn stage_score(&self, game_id: &str, stage_id: &str) -> u32 {
        self.stage_record(game_id, stage_id)
            .map(|stage| stage.score)
            .unwrap_or(0)
    }

    /// Sum of best scores across the game's stages; what achievement
    /// thresholds are judged against.
    pub fn total_best_score(&self, game_id: &str) -> u32 {
        self.games
            .get(game_id)
            .map(|game| game.total_best_score())
            .unwrap_or(0)
    }

    pub fn stage_record(&self, game_id: &str, stage_id: &str) -> Option<&StageRecord> {
        self.games.get(game_id).and_then(|game| game.stage(stage_id))
    }

    pub fn game_record(&self, game_id: &str) -> Option<&GameRecord> {
        self.games.get(game_id)
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Records in catalog order, for persistence and overview rendering.
    pub fn snapshot(&self) -> Vec<GameRecord> {
        self.catalog
            .games
            .iter()
            .filter_map(|info| self.games.get(&info.game_id).cloned())
            .collect()
    }

    /// Replace state from a snapshot. Games unknown to the catalog are
    /// dropped with a warning; catalog games missing from the snapshot stay
    /// zeroed.
    pub fn restore(&mut self, snapshot: Vec<GameRecord>) {
        self.init_to_zero();
        for mut game in snapshot {
            if self.catalog.game(&game.game_id).is_none() {
                warn!(
                    "[RecordStore] Dropping snapshot game {} not present in catalog",
                    game.game_id
                );
                continue;
            }
            game.rebuild_index();
            game.refresh_totals();
            self.games.insert(game.game_id.clone(), game);
        }
    }
}
