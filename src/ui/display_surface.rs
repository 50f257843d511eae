use log::info;

/// Text surfaces on the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Score,
    Time,
}

/// Show/hide targets the engine drives. The host maps these onto whatever
/// widgets or scene objects it owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayNode {
    /// The end-of-stage summary panel.
    SummaryPanel,
    /// "Continue to next stage" controls.
    ContinueControls,
    /// "Game finished" controls (restart / next game).
    FinishedControls,
    /// Container framing the achievement reveal.
    AchievementShowcase,
    /// One achievement's icon, by achievement id.
    AchievementIcon(String),
}

/// One-shot audio/particle cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    AchievementAudio,
    AchievementParticles,
    StageCompleteAudio,
}

/// Fire-and-forget presentation seam. The engine never observes a return
/// value; a host that renders nothing is a valid host.
pub trait DisplaySurface {
    fn set_text(&self, slot: TextSlot, text: &str);
    fn set_visible(&self, node: &DisplayNode, visible: bool);
    fn play_cue(&self, cue: Cue);
}

/// Headless display that narrates to the log; used by the demo binary and
/// handy when debugging a host integration.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl DisplaySurface for ConsoleDisplay {
    fn set_text(&self, slot: TextSlot, text: &str) {
        info!("[Display] {:?} = {:?}", slot, text);
    }

    fn set_visible(&self, node: &DisplayNode, visible: bool) {
        info!(
            "[Display] {:?} {}",
            node,
            if visible { "shown" } else { "hidden" }
        );
    }

    fn play_cue(&self, cue: Cue) {
        info!("[Display] cue {:?}", cue);
    }
}
