//! Unified error type for the Lastseat engine.

use lastseat_game::{GameError, PlayerId};

/// Top-level error a game run hands back to its caller.
///
/// Recoverable conditions never show up here: a participant failing to get
/// a seat, a stale claim notice, or a slow consumer are all absorbed inside
/// the round loop. Anything that does reach the caller means the run is
/// over and the terminal broadcast already went out.
#[derive(Debug, thiserror::Error)]
pub enum LastseatError {
    /// A game-state error: bad configuration or a broken round invariant.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A participant task panicked instead of finishing its loop.
    #[error("participant {0} crashed")]
    ParticipantCrashed(PlayerId),
}
