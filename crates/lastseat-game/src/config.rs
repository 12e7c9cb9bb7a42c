//! Game configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{GameError, PlayerId};

/// Configuration for one simulation run.
///
/// The timing knobs exist for tests and demos; the defaults give a watchable
/// game at human pace. Timing never affects correctness, only which
/// participant ends up standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of participants. At least 2.
    pub players: u32,

    /// How long the arbiter keeps the claim window open before resolving the
    /// round without waiting for stragglers.
    pub claim_window: Duration,

    /// Upper bound on a single participant's wait for a seat.
    pub claim_timeout: Duration,

    /// Per-participant delay between hearing the music stop and going for a
    /// seat, indexed by player id. Missing entries mean no delay.
    pub reactions: Vec<Duration>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 4,
            claim_window: Duration::from_secs(1),
            claim_timeout: Duration::from_millis(500),
            reactions: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Largest roster the simulation accepts.
    pub const MAX_PLAYERS: u32 = 1024;

    /// A config for `players` participants with default timing.
    pub fn with_players(players: u32) -> Self {
        Self { players, ..Self::default() }
    }

    /// Validates and normalizes the config.
    ///
    /// `players` must be in `2..=MAX_PLAYERS`; reaction entries beyond the
    /// roster are dropped.
    pub fn validated(mut self) -> Result<Self, GameError> {
        if self.players < 2 {
            return Err(GameError::InvalidConfig(format!(
                "need at least 2 players, got {}",
                self.players
            )));
        }
        if self.players > Self::MAX_PLAYERS {
            return Err(GameError::InvalidConfig(format!(
                "at most {} players supported, got {}",
                Self::MAX_PLAYERS,
                self.players
            )));
        }
        self.reactions.truncate(self.players as usize);
        Ok(self)
    }

    /// Seat capacity of the first round: one fewer than the players.
    pub fn initial_seats(&self) -> u32 {
        self.players.saturating_sub(1)
    }

    /// The reaction delay for `player`. Zero when not configured.
    pub fn reaction(&self, player: PlayerId) -> Duration {
        self.reactions
            .get(player.index())
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}
