use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use uuid::Uuid;

use crate::destroyable::Destroyable;
use crate::events::{Channel, EventEmitter, EventObserver};
use crate::game::achievement_store::AchievementStore;
use crate::game::coordinator::ProgressionCoordinator;
use crate::game::persistence::{PersistenceSubstrate, ProgressSnapshot};
use crate::game::record_store::RecordStore;
use crate::game::settings::EngineSettings;
use crate::model::{
    AchievementDefinition, ProgressionCommand, ProgressionEvent, StageCatalog,
};
use crate::scene::{NameResolver, SceneAdvance};
use crate::ui::DisplaySurface;

/// Owns the progression state for one play session: zeroed stores built from
/// the catalog, the command/event channels and the wired coordinator. Lives
/// for the whole process; `reinitialize` is the explicit "new game" teardown.
pub struct ProgressionSession {
    session_id: Uuid,
    records: Rc<RefCell<RecordStore>>,
    achievements: Rc<RefCell<AchievementStore>>,
    coordinator: Rc<RefCell<ProgressionCoordinator>>,
    command_emitter: EventEmitter<ProgressionCommand>,
    event_observer: EventObserver<ProgressionEvent>,
}

impl ProgressionSession {
    pub fn new(
        catalog: Rc<StageCatalog>,
        definitions: Vec<AchievementDefinition>,
        settings: &EngineSettings,
        resolver: Rc<dyn NameResolver>,
        display: Option<Rc<dyn DisplaySurface>>,
        scene: Option<Rc<dyn SceneAdvance>>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        info!("[Session] Starting session {}", session_id);

        let records = Rc::new(RefCell::new(RecordStore::new(catalog.clone())));
        let achievements = Rc::new(RefCell::new(AchievementStore::new(definitions)));

        let (command_emitter, command_observer) = Channel::<ProgressionCommand>::new();
        let (event_emitter, event_observer) = Channel::<ProgressionEvent>::new();

        let coordinator = ProgressionCoordinator::new(
            catalog,
            records.clone(),
            achievements.clone(),
            resolver,
            display,
            scene,
            command_observer,
            event_emitter,
            settings,
        );

        Self {
            session_id,
            records,
            achievements,
            coordinator,
            command_emitter,
            event_observer,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn records(&self) -> Rc<RefCell<RecordStore>> {
        self.records.clone()
    }

    pub fn achievements(&self) -> Rc<RefCell<AchievementStore>> {
        self.achievements.clone()
    }

    pub fn coordinator(&self) -> Rc<RefCell<ProgressionCoordinator>> {
        self.coordinator.clone()
    }

    /// Sending half for gameplay code.
    pub fn commands(&self) -> EventEmitter<ProgressionCommand> {
        self.command_emitter.clone()
    }

    /// Subscribing half for display adapters.
    pub fn events(&self) -> EventObserver<ProgressionEvent> {
        self.event_observer.clone()
    }

    /// Zero all records, clear unlock/reveal flags, return the coordinator to
    /// idle and stamp a fresh session id.
    pub fn reinitialize(&mut self) {
        self.session_id = Uuid::new_v4();
        info!("[Session] Reinitializing as session {}", self.session_id);
        self.records.borrow_mut().init_to_zero();
        self.achievements.borrow_mut().reset_flags();
        self.coordinator.borrow_mut().reset();
    }

    /// Restore records and achievements from the substrate, if it holds a
    /// snapshot. The saved session id is adopted so a later save continues
    /// the same lineage.
    pub fn load_from(&mut self, substrate: &dyn PersistenceSubstrate) -> std::io::Result<bool> {
        match substrate.load()? {
            Some(snapshot) => {
                self.session_id = snapshot.session_id;
                snapshot.apply(
                    &mut self.records.borrow_mut(),
                    &mut self.achievements.borrow_mut(),
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn save_to(&self, substrate: &dyn PersistenceSubstrate) -> std::io::Result<()> {
        let snapshot = ProgressSnapshot::capture(
            self.session_id,
            &self.records.borrow(),
            &self.achievements.borrow(),
        );
        substrate.save(&snapshot)
    }
}

impl Destroyable for ProgressionSession {
    fn destroy(&mut self) {
        self.coordinator.borrow_mut().destroy();
    }
}
