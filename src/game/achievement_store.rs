use log::{debug, info, warn};

use crate::game::record_store::RecordStore;
use crate::model::AchievementDefinition;

/// Achievement unlock state for the session.
///
/// Unlocking is a pure function of a game's summed best score against each
/// definition's threshold; it happens during `recompute`, which gameplay
/// triggers explicitly after every record update so ordering stays
/// deterministic. Revealing is a separate presentation latch consumed by the
/// reveal sequencer.
#[derive(Debug)]
pub struct AchievementStore {
    definitions: Vec<AchievementDefinition>,
}

impl AchievementStore {
    pub fn new(definitions: Vec<AchievementDefinition>) -> Self {
        Self { definitions }
    }

    /// Re-evaluate the game's achievements against its summed best score.
    /// Returns only the ids that flipped locked -> unlocked in this call;
    /// already-unlocked achievements never reappear.
    pub fn recompute(&mut self, game_id: &str, records: &RecordStore) -> Vec<String> {
        let total_best = records.total_best_score(game_id);
        let mut newly_unlocked = Vec::new();

        for definition in self
            .definitions
            .iter_mut()
            .filter(|d| d.game_id == game_id)
        {
            if !definition.unlocked && total_best >= definition.threshold {
                definition.unlocked = true;
                newly_unlocked.push(definition.id.clone());
                info!(
                    "[AchievementStore] {} unlocked for {} (total best {} >= {})",
                    definition.id, game_id, total_best, definition.threshold
                );
            }
        }
        debug!(
            "[AchievementStore] recompute {}: total best {}, {} newly unlocked",
            game_id,
            total_best,
            newly_unlocked.len()
        );
        newly_unlocked
    }

    /// Ids that are unlocked but not yet revealed, i.e. the only state that
    /// triggers the reveal presentation.
    pub fn pending_reveals(&self, game_id: &str) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|d| d.game_id == game_id && d.unlocked && !d.revealed)
            .map(|d| d.id.clone())
            .collect()
    }

    /// Flip the reveal latch. Returns true only on the transition; a second
    /// call for the same id (or a call for a locked id) is a no-op.
    pub fn mark_revealed(&mut self, id: &str) -> bool {
        match self.definitions.iter_mut().find(|d| d.id == id) {
            Some(definition) if definition.unlocked && !definition.revealed => {
                definition.revealed = true;
                true
            }
            Some(_) => false,
            None => {
                warn!("[AchievementStore] Achievement {} not found", id);
                false
            }
        }
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.definitions
            .iter()
            .any(|d| d.id == id && d.unlocked)
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.definitions
            .iter()
            .any(|d| d.id == id && d.revealed)
    }

    /// Clear all unlock and reveal flags (new session).
    pub fn reset_flags(&mut self) {
        for definition in &mut self.definitions {
            definition.unlocked = false;
            definition.revealed = false;
        }
    }

    pub fn definitions(&self) -> &[AchievementDefinition] {
        &self.definitions
    }

    pub fn snapshot(&self) -> Vec<AchievementDefinition> {
        self.definitions.clone()
    }

    pub fn restore(&mut self, snapshot: Vec<AchievementDefinition>) {
        self.definitions = snapshot;
    }
}
