//! Player identity and the roster of contenders.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::GameError;

/// A unique identifier for a participant.
///
/// Ids are dense: a game with `n` players uses `0..n`. That keeps the roster
/// and every per-player table a plain vector indexed by id.
///
/// `#[serde(transparent)]` makes a `PlayerId(3)` serialize as just `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// The id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// One roster entry: a participant and whether they are still in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub active: bool,
}

/// The fixed list of participants.
///
/// Created once at game start. Participants are only ever deactivated, never
/// removed and never reinstated, so `active_count` is monotonically
/// non-increasing over the life of a game.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Participant>,
}

impl Roster {
    /// Creates a roster of `n` active participants with ids `0..n`.
    pub fn new(n: u32) -> Self {
        Self {
            players: (0..n)
                .map(|id| Participant { id: PlayerId(id), active: true })
                .collect(),
        }
    }

    /// Total roster size, eliminated participants included.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of participants still in the game.
    pub fn active_count(&self) -> u32 {
        self.players.iter().filter(|p| p.active).count() as u32
    }

    /// Whether `id` is still in the game. Unknown ids count as out.
    pub fn is_active(&self, id: PlayerId) -> bool {
        self.players.get(id.index()).is_some_and(|p| p.active)
    }

    /// Ids of all participants still in the game, in id order.
    pub fn active_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| p.active).map(|p| p.id)
    }

    /// Marks `id` as eliminated.
    ///
    /// Eliminating an unknown or already-out participant means the caller's
    /// bookkeeping is broken, so both come back as errors rather than no-ops.
    pub fn eliminate(&mut self, id: PlayerId) -> Result<(), GameError> {
        let player = self
            .players
            .get_mut(id.index())
            .ok_or(GameError::UnknownPlayer(id))?;
        if !player.active {
            return Err(GameError::AlreadyOut(id));
        }
        player.active = false;
        Ok(())
    }

    /// The winner, if exactly one participant remains.
    pub fn winner(&self) -> Option<PlayerId> {
        let mut alive = self.players.iter().filter(|p| p.active);
        match (alive.next(), alive.next()) {
            (Some(last), None) => Some(last.id),
            _ => None,
        }
    }

    /// A shareable snapshot of the active flags, indexed by player id.
    pub fn snapshot(&self) -> Arc<[bool]> {
        self.players.iter().map(|p| p.active).collect()
    }
}
