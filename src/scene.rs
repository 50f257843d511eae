use std::cell::RefCell;

/// Where the player currently is. The engine never computes this itself; the
/// host's scene layer owns it and the engine consumes it as an opaque lookup.
pub trait NameResolver {
    fn current_game_id(&self) -> String;
    fn current_stage_id(&self) -> String;
}

/// Scene transitions triggered by the player's summary-screen choice.
pub trait SceneAdvance {
    fn advance_to_next_stage(&self);
    fn restart_from_beginning(&self);
}

/// Interior-mutable resolver the host updates as scenes load.
#[derive(Debug)]
pub struct StaticResolver {
    current: RefCell<(String, String)>,
}

impl StaticResolver {
    pub fn new(game_id: &str, stage_id: &str) -> Self {
        Self {
            current: RefCell::new((game_id.to_string(), stage_id.to_string())),
        }
    }

    pub fn set_current(&self, game_id: &str, stage_id: &str) {
        *self.current.borrow_mut() = (game_id.to_string(), stage_id.to_string());
    }
}

impl NameResolver for StaticResolver {
    fn current_game_id(&self) -> String {
        self.current.borrow().0.clone()
    }

    fn current_stage_id(&self) -> String {
        self.current.borrow().1.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver_tracks_updates() {
        let resolver = StaticResolver::new("MazeGame", "Maze1");
        assert_eq!(resolver.current_game_id(), "MazeGame");
        assert_eq!(resolver.current_stage_id(), "Maze1");

        resolver.set_current("MazeGame", "Maze2");
        assert_eq!(resolver.current_stage_id(), "Maze2");
    }
}
