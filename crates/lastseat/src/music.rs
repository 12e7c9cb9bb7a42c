//! Music timing: how long each round's music plays.
//!
//! Timing is a collaborator the arbiter calls into, not part of the
//! synchronization design, so it sits behind a trait. Production runs use
//! [`RandomMusic`]; tests swap in [`FixedMusic`] and a paused clock to make
//! whole games deterministic.

use std::time::Duration;

use rand::Rng;

/// Supplies the duration the music plays before a round's claim window
/// opens.
pub trait MusicSource: Send {
    /// Play time for `round`. Rounds count from 1.
    fn play_time(&mut self, round: u64) -> Duration;
}

/// Uniformly random play time in `min..=max`.
///
/// The default range is the classic parlor pacing of one to three seconds.
#[derive(Debug, Clone)]
pub struct RandomMusic {
    min: Duration,
    max: Duration,
}

impl RandomMusic {
    /// A source drawing uniformly from `min..=max`. Reversed bounds are
    /// swapped rather than rejected.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

impl Default for RandomMusic {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(3))
    }
}

impl MusicSource for RandomMusic {
    fn play_time(&mut self, _round: u64) -> Duration {
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

/// The same play time every round.
#[derive(Debug, Clone, Copy)]
pub struct FixedMusic(pub Duration);

impl MusicSource for FixedMusic {
    fn play_time(&mut self, _round: u64) -> Duration {
        self.0
    }
}
