use itertools::Itertools;

use crate::game::record_store::RecordStore;
use crate::helpers::{format_best_time, format_seconds};

/// Render one stats block per game: a header line followed by one line per
/// stage with current and best values. Score-only games omit the time
/// columns (their recorded times are always zero).
pub fn overview_lines(records: &RecordStore) -> Vec<String> {
    let mut lines = Vec::new();

    for info in &records.catalog().games {
        let Some(game) = records.game_record(&info.game_id) else {
            continue;
        };
        lines.push(format!(
            "{} (total score {}, total time {})",
            game.game_id,
            game.total_score,
            format_seconds(game.total_time)
        ));
        for (index, stage) in game.stages.iter().enumerate() {
            let columns = if info.score_only {
                vec![
                    format!("score {}", stage.score),
                    format!("best score {}", stage.best_score),
                ]
            } else {
                vec![
                    format!("score {}", stage.score),
                    format!("best score {}", stage.best_score),
                    format!("time {}", format_seconds(stage.time)),
                    format!("best time {}", format_best_time(stage.best_time)),
                ]
            };
            lines.push(format!("  Stage {}: {}", index + 1, columns.iter().join(", ")));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::model::{GameInfo, StageCatalog};

    fn records() -> RecordStore {
        let catalog = Rc::new(StageCatalog {
            games: vec![
                GameInfo {
                    game_id: "MazeGame".to_string(),
                    stage_ids: vec!["Maze1".to_string()],
                    score_only: false,
                },
                GameInfo {
                    game_id: "DefendGame".to_string(),
                    stage_ids: vec!["Defend1".to_string()],
                    score_only: true,
                },
            ],
        });
        RecordStore::new(catalog)
    }

    #[test]
    fn test_timed_game_shows_all_columns() {
        let mut records = records();
        records.update_stage("MazeGame", "Maze1", 92, Duration::from_secs(45));

        let lines = overview_lines(&records);
        assert_eq!(lines[0], "MazeGame (total score 92, total time 45.00)");
        assert_eq!(
            lines[1],
            "  Stage 1: score 92, best score 92, time 45.00, best time 45.00"
        );
    }

    #[test]
    fn test_score_only_game_omits_times() {
        let mut records = records();
        records.update_stage("DefendGame", "Defend1", 40, Duration::ZERO);

        let lines = overview_lines(&records);
        assert_eq!(lines[3], "  Stage 1: score 40, best score 40");
    }

    #[test]
    fn test_unset_best_time_renders_placeholder() {
        let records = records();
        let lines = overview_lines(&records);
        assert!(lines[1].ends_with("best time --"));
    }
}
