use serde::{Deserialize, Serialize};

/// A threshold achievement scoped to one game.
///
/// `unlocked` flips when the game's summed best score crosses the threshold
/// and is never reset by normal play. `revealed` is the one-shot presentation
/// latch: it flips exactly once per session, the instant the reveal sequence
/// picks the achievement up, and only a full session reinitialization clears
/// it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub game_id: String,
    pub threshold: u32,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub revealed: bool,
}

impl AchievementDefinition {
    pub fn new(id: &str, game_id: &str, threshold: u32) -> Self {
        Self {
            id: id.to_string(),
            game_id: game_id.to_string(),
            threshold,
            unlocked: false,
            revealed: false,
        }
    }

    /// The classic item set: one treasure per game, unlocked at 50 points.
    pub fn default_set() -> Vec<AchievementDefinition> {
        vec![
            AchievementDefinition::new("witch-stick", "MazeGame", 50),
            AchievementDefinition::new("diamond", "ArrangeGame", 50),
            AchievementDefinition::new("crown", "DefendGame", 50),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_is_locked_and_unrevealed() {
        let set = AchievementDefinition::default_set();
        assert_eq!(set.len(), 3);
        assert!(set.iter().all(|a| !a.unlocked && !a.revealed));
    }

    #[test]
    fn test_flags_default_when_absent_from_json() {
        let parsed: AchievementDefinition = serde_json::from_str(
            r#"{"id":"crown","game_id":"DefendGame","threshold":50}"#,
        )
        .unwrap();
        assert!(!parsed.unlocked);
        assert!(!parsed.revealed);
    }
}
