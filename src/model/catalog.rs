use serde::{Deserialize, Serialize};

/// One mini-game and its ordered stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_id: String,
    pub stage_ids: Vec<String>,
    /// Count-based games record no meaningful times (their stage time is
    /// always zero), so overview rows omit the time columns.
    #[serde(default)]
    pub score_only: bool,
}

/// The full roster of games and stages for a session. Hosts ship this as a
/// JSON asset; everything downstream (records, achievements, branch decisions)
/// is scoped by it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageCatalog {
    pub games: Vec<GameInfo>,
}

impl StageCatalog {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn game(&self, game_id: &str) -> Option<&GameInfo> {
        self.games.iter().find(|g| g.game_id == game_id)
    }

    pub fn contains_stage(&self, game_id: &str, stage_id: &str) -> bool {
        self.game(game_id)
            .map(|g| g.stage_ids.iter().any(|s| s == stage_id))
            .unwrap_or(false)
    }

    /// Which game owns this stage. Stage ids are scene names and unique
    /// across the roster.
    pub fn game_of_stage(&self, stage_id: &str) -> Option<&str> {
        self.games
            .iter()
            .find(|g| g.stage_ids.iter().any(|s| s == stage_id))
            .map(|g| g.game_id.as_str())
    }

    pub fn stage_index(&self, game_id: &str, stage_id: &str) -> Option<usize> {
        self.game(game_id)
            .and_then(|g| g.stage_ids.iter().position(|s| s == stage_id))
    }

    /// True when the stage is the last one of its game; drives the
    /// continue-vs-finished branch of the end-of-stage flow.
    pub fn is_final_stage(&self, game_id: &str, stage_id: &str) -> bool {
        match (
            self.stage_index(game_id, stage_id),
            self.game(game_id).map(|g| g.stage_ids.len()),
        ) {
            (Some(index), Some(count)) if count > 0 => index == count - 1,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StageCatalog {
        StageCatalog {
            games: vec![
                GameInfo {
                    game_id: "MazeGame".to_string(),
                    stage_ids: vec!["Maze1".to_string(), "Maze2".to_string()],
                    score_only: false,
                },
                GameInfo {
                    game_id: "DefendGame".to_string(),
                    stage_ids: vec!["Defend1".to_string()],
                    score_only: true,
                },
            ],
        }
    }

    #[test]
    fn test_game_of_stage() {
        let catalog = catalog();
        assert_eq!(catalog.game_of_stage("Maze2"), Some("MazeGame"));
        assert_eq!(catalog.game_of_stage("Defend1"), Some("DefendGame"));
        assert_eq!(catalog.game_of_stage("Bogus"), None);
    }

    #[test]
    fn test_stage_index_and_final_stage() {
        let catalog = catalog();
        assert_eq!(catalog.stage_index("MazeGame", "Maze1"), Some(0));
        assert!(!catalog.is_final_stage("MazeGame", "Maze1"));
        assert!(catalog.is_final_stage("MazeGame", "Maze2"));
        assert!(catalog.is_final_stage("DefendGame", "Defend1"));
        assert!(!catalog.is_final_stage("MazeGame", "Bogus"));
        assert!(!catalog.is_final_stage("Bogus", "Maze1"));
    }

    #[test]
    fn test_from_json_defaults_score_only() {
        let catalog = StageCatalog::from_json(
            r#"{"games":[{"game_id":"ArrangeGame","stage_ids":["Arrange1"]}]}"#,
        )
        .unwrap();
        assert!(!catalog.games[0].score_only);
        assert!(catalog.contains_stage("ArrangeGame", "Arrange1"));
    }
}
