//! The round state owned by the arbiter.

use std::sync::Arc;

use crate::{GameError, Phase, PlayerId, Roster};

/// A self-contained snapshot of the round state.
///
/// This is what gets broadcast to participants. Every view carries the round
/// counter, the phase, and the full roster, so a participant that sleeps
/// through intermediate broadcasts still learns its own fate from whichever
/// view it reads next. Nothing here requires a lock to inspect.
#[derive(Debug, Clone)]
pub struct RoundView {
    /// Round counter. 0 until the first round is announced.
    pub round: u64,
    /// Phase at the time of the snapshot.
    pub phase: Phase,
    /// Seat capacity of the current round.
    pub seats: u32,
    /// The winner. Set only on terminal views of a decided game.
    pub winner: Option<PlayerId>,
    active: Arc<[bool]>,
}

impl RoundView {
    /// Whether `player` is still in the game. Unknown ids count as out.
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.active.get(player.index()).copied().unwrap_or(false)
    }

    /// Number of participants still in the game.
    pub fn active_count(&self) -> u32 {
        self.active.iter().filter(|a| **a).count() as u32
    }

    /// Total roster size.
    pub fn players(&self) -> u32 {
        self.active.len() as u32
    }
}

/// The mutable heart of a game: roster, seat capacity, phase, and the claim
/// sheet of the current round.
///
/// There is exactly one writer (the arbiter); everyone else sees the state
/// through [`RoundView`] snapshots. Every mutation validates the phase
/// machine, so a call sequence that would corrupt a round comes back as a
/// [`GameError`] instead of bad state.
#[derive(Debug)]
pub struct RoundState {
    roster: Roster,
    seats: u32,
    seated: Vec<PlayerId>,
    round: u64,
    phase: Phase,
}

impl RoundState {
    /// State for `players` participants: everyone active, one seat fewer
    /// than there are players, no round announced yet.
    pub fn new(players: u32) -> Self {
        Self {
            roster: Roster::new(players),
            seats: players.saturating_sub(1),
            seated: Vec::new(),
            round: 0,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    /// Seat capacity of the current round.
    pub fn seats(&self) -> u32 {
        self.seats
    }

    /// Claims recorded so far this round.
    pub fn claimed(&self) -> u32 {
        self.seated.len() as u32
    }

    pub fn active_count(&self) -> u32 {
        self.roster.active_count()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.roster.winner()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// How many claims settle the round early: every active participant that
    /// can be seated, capped by the capacity.
    pub fn claim_target(&self) -> u32 {
        self.seats.min(self.roster.active_count())
    }

    /// Whether the game is decided (one participant or fewer left).
    pub fn is_decided(&self) -> bool {
        self.roster.active_count() <= 1
    }

    /// Announces the next round: bumps the counter and clears the claim
    /// sheet. Valid from the initial state and from `RoundOver`; the phase
    /// stays `Idle` (music playing) until [`open_claims`](Self::open_claims).
    pub fn begin_round(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Idle if self.round == 0 => {}
            Phase::RoundOver => self.transition(Phase::Idle)?,
            _ => {
                return Err(GameError::WrongPhase {
                    expected: Phase::RoundOver,
                    actual: self.phase,
                });
            }
        }
        self.round += 1;
        self.seated.clear();
        debug_assert!(
            self.roster.active_count() <= 1 || self.seats == self.roster.active_count() - 1,
            "seat capacity out of step with the roster"
        );
        Ok(())
    }

    /// Opens the claim window.
    pub fn open_claims(&mut self) -> Result<(), GameError> {
        self.transition(Phase::ClaimsOpen)
    }

    /// Records a successful seat claim.
    ///
    /// Claims outside the window, from out-of-game participants, or
    /// duplicated within a round are rejected with the matching error; the
    /// caller decides which of those are discardable. A claim beyond the
    /// seat capacity means the seat pool handed out too many seats and is
    /// never discardable.
    pub fn note_claim(&mut self, player: PlayerId) -> Result<(), GameError> {
        if !self.phase.claims_open() {
            return Err(GameError::WrongPhase {
                expected: Phase::ClaimsOpen,
                actual: self.phase,
            });
        }
        if !self.roster.is_active(player) {
            return Err(if player.index() >= self.roster.len() {
                GameError::UnknownPlayer(player)
            } else {
                GameError::AlreadyOut(player)
            });
        }
        if self.seated.contains(&player) {
            return Err(GameError::DuplicateClaim { player, round: self.round });
        }
        if self.claimed() >= self.seats {
            return Err(GameError::SeatOverflow {
                round: self.round,
                claimed: self.claimed() + 1,
                seats: self.seats,
            });
        }
        self.seated.push(player);
        Ok(())
    }

    /// Shuts the claim window.
    pub fn close_claims(&mut self) -> Result<(), GameError> {
        self.transition(Phase::Resolving)
    }

    /// Commits the elimination for this round and returns who went out.
    ///
    /// While more than one participant is active, anyone left standing at
    /// resolution is a candidate and the lowest id among them goes out.
    /// Never more than one per round, and never a seated participant, so
    /// the capacity stays one below the active count going into the next
    /// round.
    pub fn resolve(&mut self) -> Result<Option<PlayerId>, GameError> {
        if self.phase != Phase::Resolving {
            return Err(GameError::WrongPhase {
                expected: Phase::Resolving,
                actual: self.phase,
            });
        }
        if self.roster.active_count() <= 1 || self.claimed() >= self.roster.active_count() {
            return Ok(None);
        }
        let loser = self.roster.active_ids().find(|id| !self.seated.contains(id));
        debug_assert!(
            loser.is_some(),
            "claims below the active count but nobody left standing"
        );
        match loser {
            Some(id) => {
                self.roster.eliminate(id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Ends the round: flips to `RoundOver` and, when the game continues,
    /// removes one seat for the next round.
    pub fn finish_round(&mut self) -> Result<(), GameError> {
        self.transition(Phase::RoundOver)?;
        if self.roster.active_count() > 1 {
            self.seats = self.seats.saturating_sub(1);
        }
        Ok(())
    }

    /// Ends the game.
    pub fn finish_game(&mut self) -> Result<(), GameError> {
        self.transition(Phase::GameOver)
    }

    /// Forces the terminal phase regardless of the current one.
    ///
    /// Fatal-error path: the final broadcast must still go out so no
    /// participant is left waiting on a game that will never continue.
    pub fn abort(&mut self) {
        self.phase = Phase::GameOver;
    }

    /// A snapshot of the current state.
    pub fn view(&self) -> RoundView {
        RoundView {
            round: self.round,
            phase: self.phase,
            seats: self.seats,
            winner: if self.phase.is_terminal() {
                self.roster.winner()
            } else {
                None
            },
            active: self.roster.snapshot(),
        }
    }

    fn transition(&mut self, to: Phase) -> Result<(), GameError> {
        if !self.phase.can_transition_to(to) {
            return Err(GameError::Phase { from: self.phase, to });
        }
        self.phase = to;
        Ok(())
    }
}
