//! The participant task: one per contender.
//!
//! A participant's whole life is the loop the game forces on it: wait for
//! the music to stop, go for a seat, wait for the verdict, repeat until it
//! wins or goes out. All shared state lives with the arbiter; a participant
//! holds only its watcher, the seat pool, and the claim-notice sender, so
//! nothing a participant does can corrupt a round.

use std::sync::Arc;
use std::time::Duration;

use lastseat_game::PlayerId;
use lastseat_sync::{OpenWait, OverWait, RoundWatcher, SeatPool};
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, trace};

use crate::arbiter::ClaimNotice;

pub(crate) struct ParticipantTask {
    pub(crate) id: PlayerId,
    pub(crate) watcher: RoundWatcher,
    pub(crate) pool: Arc<SeatPool>,
    pub(crate) claims: mpsc::UnboundedSender<ClaimNotice>,
    /// Delay between hearing the music stop and going for a seat.
    pub(crate) reaction: Duration,
    /// Bound on how long to fight for a seat before giving up.
    pub(crate) claim_timeout: Duration,
}

impl ParticipantTask {
    /// Runs the participant until it wins, goes out, or the game ends.
    ///
    /// Always returns: every wait in the loop also resolves on the terminal
    /// broadcast, and the claim wait is both bounded and failed fast by a
    /// window close.
    pub(crate) async fn run(mut self) {
        debug!(player = %self.id, "participant ready");
        let mut last_round = 0;

        loop {
            let round = match self.watcher.claims_open(self.id, last_round).await {
                OpenWait::Open { round } => round,
                OpenWait::Out => {
                    debug!(player = %self.id, "out of the game, leaving");
                    return;
                }
                OpenWait::Over { winner } => {
                    trace!(player = %self.id, ?winner, "game over observed");
                    return;
                }
            };
            last_round = round;

            if !self.reaction.is_zero() {
                time::sleep(self.reaction).await;
            }

            let seat = match self.pool.claim(round, self.claim_timeout).await {
                Ok(seat) => {
                    let _ = self.claims.send(ClaimNotice { player: self.id, round });
                    debug!(player = %self.id, round, "got a seat");
                    Some(seat)
                }
                Err(reason) => {
                    debug!(player = %self.id, round, %reason, "left standing");
                    None
                }
            };

            let verdict = self.watcher.round_over(self.id, round).await;
            // The seat is held until the verdict lands, then returned.
            drop(seat);
            match verdict {
                OverWait::Next => {}
                OverWait::Out => {
                    debug!(player = %self.id, round, "eliminated");
                    return;
                }
                OverWait::Over { winner } => {
                    trace!(player = %self.id, ?winner, "game over observed");
                    return;
                }
            }
        }
    }
}
