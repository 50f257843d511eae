use std::rc::Rc;
use std::time::{Duration, SystemTime};

use log::info;

use questkeeper::game::overview::overview_lines;
use questkeeper::game::scoring::{CounterScore, TieredTimeScore, TimeScorePolicy};
use questkeeper::game::{EngineSettings, JsonProgressStore, ProgressionSession};
use questkeeper::model::{
    AchievementDefinition, CountdownTimer, GameInfo, ProgressionCommand, StageCatalog,
    StageTimer, SummaryBranch,
};
use questkeeper::scene::{NameResolver, SceneAdvance, StaticResolver};
use questkeeper::ui::ConsoleDisplay;

/// Scene layer stand-in: walks the resolver through the catalog's stage
/// order and logs each transition.
struct DemoScenes {
    catalog: Rc<StageCatalog>,
    resolver: Rc<StaticResolver>,
}

impl SceneAdvance for DemoScenes {
    fn advance_to_next_stage(&self) {
        let game_id = self.resolver.current_game_id();
        let stage_id = self.resolver.current_stage_id();
        if let (Some(game), Some(index)) = (
            self.catalog.game(&game_id),
            self.catalog.stage_index(&game_id, &stage_id),
        ) {
            if let Some(next) = game.stage_ids.get(index + 1) {
                info!("[Scenes] Loading {}/{}", game_id, next);
                self.resolver.set_current(&game_id, next);
            }
        }
    }

    fn restart_from_beginning(&self) {
        if let Some(game) = self.catalog.games.first() {
            if let Some(first) = game.stage_ids.first() {
                info!("[Scenes] Restarting at {}/{}", game.game_id, first);
                self.resolver.set_current(&game.game_id, first);
            }
        }
    }
}

fn run_until_choice(session: &ProgressionSession) -> Option<SummaryBranch> {
    let coordinator = session.coordinator();
    // half-second frames, the reveal window plus the summary hold
    for _ in 0..32 {
        if let Some(branch) = coordinator.borrow().awaiting_choice() {
            return Some(branch);
        }
        coordinator.borrow_mut().tick(Duration::from_millis(500));
    }
    let result = coordinator.borrow().awaiting_choice();
    result
}

fn main() {
    env_logger::init();

    let catalog = Rc::new(StageCatalog {
        games: vec![
            GameInfo {
                game_id: "MazeGame".to_string(),
                stage_ids: vec!["Maze1".to_string(), "Maze2".to_string()],
                score_only: false,
            },
            GameInfo {
                game_id: "ArrangeGame".to_string(),
                stage_ids: vec!["Arrange1".to_string(), "Arrange2".to_string()],
                score_only: false,
            },
            GameInfo {
                game_id: "DefendGame".to_string(),
                stage_ids: vec!["Defend1".to_string()],
                score_only: true,
            },
        ],
    });

    let resolver = Rc::new(StaticResolver::new("MazeGame", "Maze1"));
    let scenes = Rc::new(DemoScenes {
        catalog: catalog.clone(),
        resolver: resolver.clone(),
    });

    let settings = EngineSettings::default();
    let session = ProgressionSession::new(
        catalog,
        AchievementDefinition::default_set(),
        &settings,
        resolver.clone(),
        Some(Rc::new(ConsoleDisplay)),
        Some(scenes),
    );
    let commands = session.commands();

    // a timed maze run; the demo stamps the end 45 seconds ahead instead of
    // waiting a real run out, which scores 92 on the tiered policy
    let timer = StageTimer::start();
    let timer = timer.ended(SystemTime::now() + Duration::from_secs(45));
    let elapsed = timer.elapsed();
    let score = TieredTimeScore.score_for(elapsed);
    commands.emit(&ProgressionCommand::StageComplete {
        game_id: "MazeGame".to_string(),
        stage_id: "Maze1".to_string(),
        score,
        time: elapsed,
    });
    if let Some(SummaryBranch::Continue) = run_until_choice(&session) {
        commands.emit(&ProgressionCommand::ChooseContinue);
    }

    // the slower second stage still finishes the game
    let elapsed = Duration::from_secs(70);
    commands.emit(&ProgressionCommand::StageComplete {
        game_id: "MazeGame".to_string(),
        stage_id: "Maze2".to_string(),
        score: TieredTimeScore.score_for(elapsed),
        time: elapsed,
    });
    if let Some(SummaryBranch::Finished) = run_until_choice(&session) {
        commands.emit(&ProgressionCommand::ChooseRestart);
    }

    // a count-based defend round: 30-second budget, score tallied per action
    resolver.set_current("DefendGame", "Defend1");
    let mut tally = CounterScore::default();
    let mut countdown = CountdownTimer::new(Duration::from_secs(30));
    let mut frame = 0u32;
    while !countdown.tick(Duration::from_secs(1)) {
        frame += 1;
        // every third second a miss, otherwise a catch
        if frame % 3 == 0 {
            tally.subtract();
        } else {
            tally.add();
        }
    }
    finalize_defend_round(&session, tally.current());
    commands.emit(&ProgressionCommand::ShowScoreSummary);
    if let Some(SummaryBranch::Finished) = run_until_choice(&session) {
        commands.emit(&ProgressionCommand::ChooseRestart);
    }

    let substrate = JsonProgressStore::default_location();
    match session.save_to(&substrate) {
        Ok(()) => info!("Progress snapshot saved"),
        Err(err) => info!("Progress snapshot not saved: {}", err),
    }

    for line in overview_lines(&session.records().borrow()) {
        println!("{}", line);
    }
}

/// What a count-based mini-game does at the buzzer: write the tally and
/// refresh achievements before asking for the score-only summary.
fn finalize_defend_round(session: &ProgressionSession, score: u32) {
    let records = session.records();
    records
        .borrow_mut()
        .update_stage("DefendGame", "Defend1", score, Duration::ZERO);
    session
        .achievements()
        .borrow_mut()
        .recompute("DefendGame", &records.borrow());
}
