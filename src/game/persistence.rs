use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::achievement_store::AchievementStore;
use crate::game::record_store::RecordStore;
use crate::model::{AchievementDefinition, GameRecord};

/// Everything worth carrying across a process restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub session_id: Uuid,
    /// Unix seconds at save time.
    pub saved_at: i64,
    pub records: Vec<GameRecord>,
    pub achievements: Vec<AchievementDefinition>,
}

impl ProgressSnapshot {
    pub fn capture(
        session_id: Uuid,
        records: &RecordStore,
        achievements: &AchievementStore,
    ) -> Self {
        Self {
            session_id,
            saved_at: Utc::now().timestamp(),
            records: records.snapshot(),
            achievements: achievements.snapshot(),
        }
    }

    pub fn apply(self, records: &mut RecordStore, achievements: &mut AchievementStore) {
        records.restore(self.records);
        achievements.restore(self.achievements);
    }
}

/// Load/save seam for progression state. The engine only needs these two
/// calls; the format behind them is the substrate's business.
pub trait PersistenceSubstrate {
    /// `Ok(None)` means no snapshot exists yet (fresh install).
    fn load(&self) -> std::io::Result<Option<ProgressSnapshot>>;
    fn save(&self, snapshot: &ProgressSnapshot) -> std::io::Result<()>;
}

/// JSON-file substrate under a data directory.
#[derive(Debug)]
pub struct JsonProgressStore {
    data_dir: PathBuf,
}

impl JsonProgressStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Store under the platform's user data dir.
    pub fn default_location() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("questkeeper");
        Self::new(data_dir)
    }

    fn progress_path(&self) -> PathBuf {
        self.data_dir.join("progress.json")
    }
}

impl PersistenceSubstrate for JsonProgressStore {
    fn load(&self) -> std::io::Result<Option<ProgressSnapshot>> {
        let path = self.progress_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<ProgressSnapshot>(&contents) {
            Ok(snapshot) => {
                info!(
                    "[Persistence] Loaded snapshot from session {} saved at {}",
                    snapshot.session_id, snapshot.saved_at
                );
                Ok(Some(snapshot))
            }
            Err(err) => {
                // a corrupt file is not fatal; the session starts fresh
                warn!("[Persistence] Ignoring unreadable snapshot {:?}: {}", path, err);
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let contents = serde_json::to_string_pretty(snapshot)?;
        fs::write(self.progress_path(), contents)
    }
}
