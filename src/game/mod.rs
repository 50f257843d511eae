pub mod achievement_store;
pub mod coordinator;
pub mod overview;
pub mod persistence;
pub mod record_store;
pub mod reveal_sequencer;
pub mod scoring;
pub mod session;
pub mod settings;

pub use achievement_store::AchievementStore;
pub use coordinator::ProgressionCoordinator;
pub use persistence::{JsonProgressStore, PersistenceSubstrate, ProgressSnapshot};
pub use record_store::RecordStore;
pub use reveal_sequencer::{PresentOutcome, RevealSequencer};
pub use session::ProgressionSession;
pub use settings::EngineSettings;
