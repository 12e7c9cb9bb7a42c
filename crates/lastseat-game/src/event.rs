//! Events emitted while a game runs.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// A notable moment in a game, in the order it happened.
///
/// The engine pushes these into the channel handed to the builder; consumers
/// render them however they like (the bundled demo prints play-by-play
/// narration). The engine never blocks on the consumer, and a missing or
/// closed consumer is fine.
///
/// Serializes internally tagged, so a log collector sees
/// `{ "type": "SeatClaimed", "round": 2, "player": 1 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new round was announced; the music is playing.
    RoundStarted { round: u64, players: u32, seats: u32 },

    /// The music stopped; the claim window is open.
    MusicStopped { round: u64 },

    /// A participant got a seat.
    SeatClaimed { round: u64, player: PlayerId },

    /// A participant was left standing and is out of the game.
    Eliminated { round: u64, player: PlayerId },

    /// The round resolved with `claimed` of its `seats` seats taken.
    RoundOver { round: u64, claimed: u32, seats: u32 },

    /// The game ended. `winner` is `None` only when the run aborted.
    GameOver { winner: Option<PlayerId> },
}
