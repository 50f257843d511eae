use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampSeconds;

/// Wall-clock timer for a stage attempt, with pause accounting and an end
/// latch. Second-level precision is all the scoring needs.
#[serde_as]
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StageTimer {
    #[serde_as(as = "TimestampSeconds")]
    pub started_timestamp: SystemTime,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub paused_timestamp: Option<SystemTime>,
    pub paused_duration: Duration,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub ended_timestamp: Option<SystemTime>,
}

impl Default for StageTimer {
    fn default() -> Self {
        Self {
            started_timestamp: SystemTime::now(),
            paused_timestamp: None,
            paused_duration: Duration::from_secs(0),
            ended_timestamp: None,
        }
    }
}

impl StageTimer {
    /// Start timing now.
    pub fn start() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_timestamp.is_some()
    }

    /// Elapsed play time, excluding accumulated pauses. Frozen once paused
    /// or ended.
    pub fn elapsed(&self) -> Duration {
        let until_time = self
            .paused_timestamp
            .or(self.ended_timestamp)
            .unwrap_or_else(SystemTime::now);

        until_time
            .duration_since(self.started_timestamp)
            .unwrap_or(Duration::default())
            .saturating_sub(self.paused_duration)
    }

    pub fn paused(&self, now: SystemTime) -> StageTimer {
        let mut new_state = self.clone();
        new_state.paused_timestamp = Some(now);
        new_state
    }

    pub fn resumed(&self) -> StageTimer {
        let mut new_state = self.clone();
        if let Some(pause_time) = new_state.paused_timestamp.take() {
            new_state.paused_duration = new_state
                .paused_duration
                .saturating_add(pause_time.elapsed().unwrap_or(Duration::default()));
        }
        new_state
    }

    pub fn ended(&self, now: SystemTime) -> StageTimer {
        let mut new_state = self.clone();
        new_state.ended_timestamp = Some(now);
        new_state
    }
}

/// Fixed time budget counted down by host ticks. `tick` reports expiry
/// exactly once; count-based mini-games end their stage on it.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    remaining: Duration,
    finished: bool,
}

impl CountdownTimer {
    pub fn new(budget: Duration) -> Self {
        Self {
            remaining: budget,
            finished: false,
        }
    }

    /// Advance the countdown. Returns true on the tick that exhausts the
    /// budget and false forever after.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.finished {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.finished = true;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
