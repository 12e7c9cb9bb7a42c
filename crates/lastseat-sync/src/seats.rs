//! The seat pool: a bounded, resettable gate on a round's scarce seats.
//!
//! Participants contend on this type directly; everything else in the engine
//! goes through the arbiter. The pool wraps [`tokio::sync::Semaphore`] with
//! one twist: every round gets a fresh semaphore. A reset swaps the semaphore
//! wholesale and closes the previous one, so a claim that straggles in from
//! an earlier round fails fast instead of stealing a seat from the new round.
//! That swap is what makes "at most `seats` successful claims between two
//! consecutive resets" hold without any drain-and-refill bookkeeping.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time;
use tracing::{debug, trace};

use crate::ClaimError;

/// A successfully claimed seat.
///
/// Held for the remainder of the round. Dropping it returns the seat to the
/// semaphore it came from, which past the round boundary is a closed one, so
/// a released seat never leaks into a later round.
#[derive(Debug)]
pub struct SeatClaim {
    round: u64,
    _permit: OwnedSemaphorePermit,
}

impl SeatClaim {
    /// The round this seat belongs to.
    pub fn round(&self) -> u64 {
        self.round
    }
}

/// The live semaphore and the round it was issued for.
#[derive(Debug)]
struct Slot {
    sem: Arc<Semaphore>,
    round: u64,
    seats: u32,
}

/// The bounded pool of seats for the current round.
///
/// Shared as `Arc<SeatPool>` between the arbiter (which resets and closes)
/// and every participant (which claims). The inner mutex is held only for
/// loads and stores, never across an await.
#[derive(Debug)]
pub struct SeatPool {
    slot: Mutex<Slot>,
}

impl SeatPool {
    /// A pool with `seats` seats, stamped as round 0. The first
    /// [`reset`](Self::reset) puts it in service for a real round.
    pub fn new(seats: u32) -> Self {
        Self {
            slot: Mutex::new(Slot {
                sem: Arc::new(Semaphore::new(seats as usize)),
                round: 0,
                seats,
            }),
        }
    }

    /// Round-boundary reset: installs a fresh semaphore holding exactly
    /// `seats` permits for `round`, and closes the previous semaphore so
    /// stale in-flight claims fail instead of racing the new round.
    ///
    /// Only called while the claim window is shut; the phase machine on the
    /// arbiter side guarantees that ordering.
    pub fn reset(&self, round: u64, seats: u32) {
        let mut slot = self.lock();
        let old = std::mem::replace(
            &mut *slot,
            Slot {
                sem: Arc::new(Semaphore::new(seats as usize)),
                round,
                seats,
            },
        );
        old.sem.close();
        debug!(round, seats, "seat pool reset");
    }

    /// Shuts the current claim window. Pending and future claims for this
    /// round fail fast with [`ClaimError::WindowClosed`]; seats already
    /// claimed are unaffected. Also serves as teardown at game end, since
    /// the pool is never reset again after the terminal broadcast.
    pub fn close_window(&self) {
        let slot = self.lock();
        slot.sem.close();
        trace!(round = slot.round, "claim window shut");
    }

    /// Returns `n` seats to the current round, waking blocked claimants.
    ///
    /// Administrative API. The engine itself never restocks seats mid-round;
    /// seats come back only through the per-round reset. Adding more permits
    /// than the round's capacity breaks the claim bound for that round.
    pub fn release(&self, n: u32) {
        let slot = self.lock();
        slot.sem.add_permits(n as usize);
        trace!(round = slot.round, released = n, "seats released");
    }

    /// Claims a seat for `round`, waiting at most `within`.
    ///
    /// Returns [`ClaimError::TimedOut`] when every seat stays taken for the
    /// whole wait, and [`ClaimError::WindowClosed`] when `round` is not the
    /// pool's current round or its window has been shut.
    pub async fn claim(&self, round: u64, within: Duration) -> Result<SeatClaim, ClaimError> {
        let sem = self.semaphore_for(round)?;
        match time::timeout(within, sem.acquire_owned()).await {
            Ok(Ok(permit)) => Ok(SeatClaim { round, _permit: permit }),
            Ok(Err(_)) => Err(ClaimError::WindowClosed(round)),
            Err(_) => Err(ClaimError::TimedOut(within)),
        }
    }

    /// Claims a seat for `round` with no time bound.
    ///
    /// Suspends until a seat frees up. Fails only when the window is closed
    /// out from under the caller by a reset or by game teardown.
    pub async fn claim_blocking(&self, round: u64) -> Result<SeatClaim, ClaimError> {
        let sem = self.semaphore_for(round)?;
        match sem.acquire_owned().await {
            Ok(permit) => Ok(SeatClaim { round, _permit: permit }),
            Err(_) => Err(ClaimError::WindowClosed(round)),
        }
    }

    /// Seats still unclaimed in the current round.
    pub fn seats_left(&self) -> u32 {
        self.lock().sem.available_permits() as u32
    }

    /// Seat capacity of the current round.
    pub fn capacity(&self) -> u32 {
        self.lock().seats
    }

    /// The round the pool is currently serving.
    pub fn round(&self) -> u64 {
        self.lock().round
    }

    fn semaphore_for(&self, round: u64) -> Result<Arc<Semaphore>, ClaimError> {
        let slot = self.lock();
        if slot.round != round {
            return Err(ClaimError::WindowClosed(round));
        }
        Ok(Arc::clone(&slot.sem))
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // Nothing panics while holding this lock, so a poisoned mutex still
        // carries consistent data.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}
