//! Round signalling: the broadcast fabric between arbiter and participants.
//!
//! A single [`tokio::sync::watch`] channel carries [`RoundView`] snapshots.
//! The arbiter is the only publisher; each participant holds a
//! [`RoundWatcher`] and blocks on the phase predicates below. Two properties
//! carry the whole design:
//!
//! - `watch` retains the latest value, so a wakeup can never be lost. A
//!   participant that starts waiting after the broadcast still sees it.
//! - Every view is self-contained (round, phase, full roster, winner), so a
//!   participant that sleeps through an entire round still learns its own
//!   fate from the next view it reads. Missing an intermediate view is
//!   always benign.

use lastseat_game::{Phase, PlayerId, RoundView};
use tokio::sync::watch;
use tracing::trace;

// ---------------------------------------------------------------------------
// Wait outcomes
// ---------------------------------------------------------------------------

/// The outcome of waiting for a claim window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenWait {
    /// The claim window for `round` is open; go contend for a seat.
    Open { round: u64 },
    /// The waiter itself is out of the game.
    Out,
    /// The game is over.
    Over { winner: Option<PlayerId> },
}

/// The outcome of waiting for a round boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverWait {
    /// The round resolved and the waiter is still in the game.
    Next,
    /// The waiter itself is out of the game.
    Out,
    /// The game is over.
    Over { winner: Option<PlayerId> },
}

// ---------------------------------------------------------------------------
// Channel halves
// ---------------------------------------------------------------------------

/// Publisher half. Owned by the arbiter.
#[derive(Debug)]
pub struct RoundSignals {
    tx: watch::Sender<RoundView>,
}

/// Subscriber half. One clone per participant, plus any other observer.
#[derive(Debug, Clone)]
pub struct RoundWatcher {
    rx: watch::Receiver<RoundView>,
}

/// Creates the signal pair, seeded with `initial`.
pub fn channel(initial: RoundView) -> (RoundSignals, RoundWatcher) {
    let (tx, rx) = watch::channel(initial);
    (RoundSignals { tx }, RoundWatcher { rx })
}

impl RoundSignals {
    /// Publishes a view to every watcher.
    ///
    /// Publishing happens in phase order on the arbiter side; that ordering,
    /// not anything in here, is what sequences a round.
    pub fn publish(&self, view: RoundView) {
        trace!(round = view.round, phase = %view.phase, "view published");
        self.tx.send_replace(view);
    }

    /// A fresh watcher for a late observer.
    pub fn subscribe(&self) -> RoundWatcher {
        RoundWatcher { rx: self.tx.subscribe() }
    }
}

impl RoundWatcher {
    /// The latest published view. Never blocks, and keeps answering after
    /// the game ends, since the terminal view is retained forever.
    pub fn latest(&self) -> RoundView {
        self.rx.borrow().clone()
    }

    /// Waits until the claim window of a round newer than `after` opens, the
    /// game ends, or `me` is eliminated, whichever is published first.
    ///
    /// A dropped publisher counts as the game being over, so the wait
    /// resolves even if the arbiter dies without a terminal broadcast.
    pub async fn claims_open(&mut self, me: PlayerId, after: u64) -> OpenWait {
        let result = self
            .rx
            .wait_for(|v| {
                v.phase.is_terminal()
                    || !v.is_active(me)
                    || (v.phase.claims_open() && v.round > after)
            })
            .await;
        match result {
            Ok(view) => {
                if view.phase.is_terminal() {
                    OpenWait::Over { winner: view.winner }
                } else if !view.is_active(me) {
                    OpenWait::Out
                } else {
                    OpenWait::Open { round: view.round }
                }
            }
            Err(_) => OpenWait::Over { winner: None },
        }
    }

    /// Waits until round `round` is resolved, the game ends, or `me` is
    /// eliminated. Any view past `round` counts as resolved, since rounds
    /// only advance through `RoundOver`.
    pub async fn round_over(&mut self, me: PlayerId, round: u64) -> OverWait {
        let result = self
            .rx
            .wait_for(|v| {
                v.phase.is_terminal()
                    || !v.is_active(me)
                    || v.round > round
                    || (v.round == round && v.phase == Phase::RoundOver)
            })
            .await;
        match result {
            Ok(view) => {
                if view.phase.is_terminal() {
                    OverWait::Over { winner: view.winner }
                } else if !view.is_active(me) {
                    OverWait::Out
                } else {
                    OverWait::Next
                }
            }
            Err(_) => OverWait::Over { winner: None },
        }
    }
}
