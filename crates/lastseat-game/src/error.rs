//! Error types for the game state machine.

use crate::{Phase, PlayerId};

/// Errors produced by the round state machine and the roster.
///
/// `InvalidConfig` is a caller mistake. Everything else coming out of a
/// running engine means two parts of it disagree about the world, which the
/// arbiter treats as fatal (except for the claim-notice cases it can safely
/// discard, like a duplicate claim from a retransmit).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A phase transition the state machine does not allow.
    #[error("invalid phase transition {from} -> {to}")]
    Phase { from: Phase, to: Phase },

    /// An operation ran in a phase it is not allowed in.
    #[error("operation requires phase {expected}, round is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    /// More claims recorded than the round has seats.
    #[error("round {round}: claim {claimed} recorded for {seats} seats")]
    SeatOverflow { round: u64, claimed: u32, seats: u32 },

    /// The same participant claimed twice in one round.
    #[error("{player} already holds a seat in round {round}")]
    DuplicateClaim { player: PlayerId, round: u64 },

    /// Tried to act on a participant who is already out of the game.
    #[error("{0} is already out of the game")]
    AlreadyOut(PlayerId),

    /// A participant id outside the roster.
    #[error("unknown participant {0}")]
    UnknownPlayer(PlayerId),
}
