mod achievement;
mod catalog;
mod progression_command;
mod progression_event;
mod record;
mod stage_timer;

pub use achievement::AchievementDefinition;
pub use catalog::{GameInfo, StageCatalog};
pub use progression_command::ProgressionCommand;
pub use progression_event::{ProgressionEvent, SummaryBranch, SummaryView};
pub use record::{AttemptOutcome, GameRecord, StageRecord};
pub use stage_timer::{CountdownTimer, StageTimer};
