use std::time::Duration;

/// Maps a stage's elapsed time to a score. Mini-games that score by
/// completion speed pick one of these; the stores only ever see the final
/// integers.
pub trait TimeScorePolicy {
    fn score_for(&self, elapsed: Duration) -> u32;
}

/// Three-tier completion-speed scoring.
///
/// Under a minute lands in [90,100]; one to three minutes decays 90 down to
/// 75; past three minutes decays 75 down to 65, flooring at five minutes.
/// Exact boundary times take the faster tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredTimeScore;

const FAST_COMPLETION_SECS: f32 = 60.0;
const MEDIUM_COMPLETION_SECS: f32 = 180.0;
const MAX_SCORED_SECS: f32 = 300.0;

const MAX_SCORE: f32 = 100.0;
const HIGH_SCORE: f32 = 90.0;
const MEDIUM_SCORE: f32 = 75.0;
const MIN_SCORE: f32 = 65.0;

// .5 ties round to even, so 92.5 scores 92, not 93
fn round_score(score: f32) -> u32 {
    score.round_ties_even() as u32
}

impl TimeScorePolicy for TieredTimeScore {
    fn score_for(&self, elapsed: Duration) -> u32 {
        let t = elapsed.as_secs_f32();

        let score = if t <= FAST_COMPLETION_SECS {
            HIGH_SCORE + ((FAST_COMPLETION_SECS - t) / FAST_COMPLETION_SECS) * (MAX_SCORE - HIGH_SCORE)
        } else if t <= MEDIUM_COMPLETION_SECS {
            let normalized =
                (t - FAST_COMPLETION_SECS) / (MEDIUM_COMPLETION_SECS - FAST_COMPLETION_SECS);
            MEDIUM_SCORE + (HIGH_SCORE - MEDIUM_SCORE) * (1.0 - normalized)
        } else {
            let normalized = ((t - MEDIUM_COMPLETION_SECS)
                / (MAX_SCORED_SECS - MEDIUM_COMPLETION_SECS))
                .clamp(0.0, 1.0);
            MIN_SCORE + (MEDIUM_SCORE - MIN_SCORE) * (1.0 - normalized)
        };

        round_score(score)
    }
}

/// Linear decay from `max_score` to zero over `max_time`; anything slower
/// scores zero.
#[derive(Debug, Clone, Copy)]
pub struct LinearTimeScore {
    pub max_score: u32,
    pub max_time: Duration,
}

impl Default for LinearTimeScore {
    fn default() -> Self {
        Self {
            max_score: 100,
            max_time: Duration::from_secs(600),
        }
    }
}

impl TimeScorePolicy for LinearTimeScore {
    fn score_for(&self, elapsed: Duration) -> u32 {
        if elapsed > self.max_time {
            return 0;
        }
        let fraction = 1.0 - elapsed.as_secs_f32() / self.max_time.as_secs_f32();
        round_score(self.max_score as f32 * fraction.max(0.0))
    }
}

/// Running tally for count-based mini-games: award points per correct
/// action, deduct per miss, never below zero.
#[derive(Debug, Clone, Copy)]
pub struct CounterScore {
    points_per_correct: u32,
    penalty_per_miss: u32,
    current: u32,
}

impl Default for CounterScore {
    fn default() -> Self {
        Self::new(10, 5)
    }
}

impl CounterScore {
    pub fn new(points_per_correct: u32, penalty_per_miss: u32) -> Self {
        Self {
            points_per_correct,
            penalty_per_miss,
            current: 0,
        }
    }

    pub fn add(&mut self) -> u32 {
        self.current += self.points_per_correct;
        self.current
    }

    pub fn subtract(&mut self) -> u32 {
        self.current = self.current.saturating_sub(self.penalty_per_miss);
        self.current
    }

    pub fn current(&self) -> u32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered(secs: f32) -> u32 {
        TieredTimeScore.score_for(Duration::from_secs_f32(secs))
    }

    #[test]
    fn test_tiered_boundaries() {
        assert_eq!(tiered(0.0), 100);
        // the tiers meet continuously: both sides of the minute mark round to 90
        assert_eq!(tiered(60.0), 90);
        assert_eq!(tiered(60.01), 90);
        assert_eq!(tiered(180.0), 75);
        assert_eq!(tiered(300.0), 65);
        assert_eq!(tiered(400.0), 65); // clamped past five minutes
    }

    #[test]
    fn test_tiered_interior_values() {
        assert_eq!(tiered(30.0), 95);
        assert_eq!(tiered(45.0), 92); // 92.5 ties to even
        assert_eq!(tiered(120.0), 82); // 82.5 ties to even
        assert_eq!(tiered(240.0), 70);
    }

    #[test]
    fn test_tiered_is_monotonically_non_increasing() {
        let mut last = u32::MAX;
        for secs in 0..360 {
            let score = tiered(secs as f32);
            assert!(score <= last, "score rose at t={}", secs);
            last = score;
        }
    }

    #[test]
    fn test_linear_decay_and_cap() {
        let policy = LinearTimeScore {
            max_score: 100,
            max_time: Duration::from_secs(600),
        };
        assert_eq!(policy.score_for(Duration::ZERO), 100);
        assert_eq!(policy.score_for(Duration::from_secs(300)), 50);
        assert_eq!(policy.score_for(Duration::from_secs(600)), 0);
        assert_eq!(policy.score_for(Duration::from_secs(601)), 0);
    }

    #[test]
    fn test_counter_floors_at_zero() {
        let mut score = CounterScore::default();
        assert_eq!(score.add(), 10);
        assert_eq!(score.add(), 20);
        assert_eq!(score.subtract(), 15);
        score.subtract();
        score.subtract();
        score.subtract();
        assert_eq!(score.current(), 0);
        // stays floored
        assert_eq!(score.subtract(), 0);
        assert_eq!(score.add(), 10);
    }
}
