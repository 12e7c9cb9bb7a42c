//! The arbiter: the single task that owns round progression.
//!
//! The arbiter is the only writer of [`RoundState`]. It announces each
//! round, decides when the claim window shuts, commits the elimination, and
//! broadcasts every phase change through the signal channel. Participants
//! talk back through exactly one channel: claim notices. Keeping all
//! mutation on one task is what lets the rest of the engine run without a
//! single shared lock around game state.

use std::sync::Arc;
use std::time::Duration;

use lastseat_game::{GameError, GameEvent, PlayerId, RoundState};
use lastseat_sync::{RoundSignals, SeatPool};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::LastseatError;
use crate::game::Outcome;
use crate::music::MusicSource;

/// A participant telling the arbiter it sat down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClaimNotice {
    pub(crate) player: PlayerId,
    pub(crate) round: u64,
}

/// Forwards engine events to the optional consumer.
///
/// Unbounded and fire-and-forget: the engine never blocks on a slow
/// consumer and keeps running when the consumer is gone.
pub(crate) struct EventSender {
    tx: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl EventSender {
    pub(crate) fn new(tx: Option<mpsc::UnboundedSender<GameEvent>>) -> Self {
        Self { tx }
    }

    pub(crate) fn emit(&self, event: GameEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

pub(crate) struct Arbiter {
    state: RoundState,
    pool: Arc<SeatPool>,
    signals: RoundSignals,
    claims: mpsc::UnboundedReceiver<ClaimNotice>,
    events: EventSender,
    music: Box<dyn MusicSource>,
    claim_window: Duration,
}

impl Arbiter {
    pub(crate) fn new(
        state: RoundState,
        pool: Arc<SeatPool>,
        signals: RoundSignals,
        claims: mpsc::UnboundedReceiver<ClaimNotice>,
        events: EventSender,
        music: Box<dyn MusicSource>,
        claim_window: Duration,
    ) -> Self {
        Self {
            state,
            pool,
            signals,
            claims,
            events,
            music,
            claim_window,
        }
    }

    /// Runs rounds until the game is decided.
    ///
    /// On a fatal error the terminal view still goes out and the pool is
    /// closed, so every participant wakes and exits before the error
    /// reaches the caller.
    pub(crate) async fn run(mut self) -> Result<Outcome, LastseatError> {
        let result = self.drive().await;
        if let Err(err) = &result {
            warn!(error = %err, "game aborted");
            self.state.abort();
            self.pool.close_window();
            self.signals.publish(self.state.view());
            self.events.emit(GameEvent::GameOver { winner: None });
        }
        result
    }

    async fn drive(&mut self) -> Result<Outcome, LastseatError> {
        loop {
            self.open_round().await?;
            self.collect_claims().await?;
            if self.resolve_round().await? {
                return Ok(Outcome {
                    winner: self.state.winner(),
                    rounds: self.state.round(),
                });
            }
        }
    }

    /// Idle: announce the round, restock the seats, play the music, then
    /// open the claim window. The pool reset always lands before the
    /// `ClaimsOpen` broadcast, so no participant can act on a window whose
    /// seats are not in place yet.
    async fn open_round(&mut self) -> Result<(), LastseatError> {
        self.state.begin_round()?;
        let round = self.state.round();
        let seats = self.state.seats();
        let players = self.state.active_count();

        self.pool.reset(round, seats);
        self.signals.publish(self.state.view());
        self.events.emit(GameEvent::RoundStarted { round, players, seats });
        info!(round, players, seats, "round started, music playing");

        let play = self.music.play_time(round);
        time::sleep(play).await;

        self.state.open_claims()?;
        self.signals.publish(self.state.view());
        self.events.emit(GameEvent::MusicStopped { round });
        info!(round, "music stopped, claims open");
        Ok(())
    }

    /// ClaimsOpen: take claim notices until every reachable seat is settled
    /// or the window deadline passes, whichever comes first. The deadline
    /// bounds how long a crashed or stalled participant can hold the round
    /// open.
    async fn collect_claims(&mut self) -> Result<(), LastseatError> {
        let deadline = Instant::now() + self.claim_window;
        let target = self.state.claim_target();

        while self.state.claimed() < target {
            tokio::select! {
                notice = self.claims.recv() => match notice {
                    Some(notice) => self.accept_claim(notice)?,
                    None => {
                        warn!("all participants gone before the window closed");
                        break;
                    }
                },
                _ = time::sleep_until(deadline) => {
                    debug!(
                        claimed = self.state.claimed(),
                        target,
                        "claim window expired"
                    );
                    break;
                }
            }
        }
        Ok(())
    }

    fn accept_claim(&mut self, notice: ClaimNotice) -> Result<(), LastseatError> {
        let round = self.state.round();
        if notice.round != round {
            warn!(
                player = %notice.player,
                notice_round = notice.round,
                round,
                "stale claim notice discarded"
            );
            return Ok(());
        }
        match self.state.note_claim(notice.player) {
            Ok(()) => {
                self.events.emit(GameEvent::SeatClaimed { round, player: notice.player });
                info!(
                    round,
                    player = %notice.player,
                    seats_left = self.pool.seats_left(),
                    "seat claimed"
                );
                Ok(())
            }
            Err(
                err @ (GameError::DuplicateClaim { .. }
                | GameError::AlreadyOut(_)
                | GameError::UnknownPlayer(_)),
            ) => {
                warn!(player = %notice.player, round, error = %err, "claim notice discarded");
                Ok(())
            }
            // SeatOverflow or a phase mismatch here means the pool and the
            // state machine disagree. Not recoverable.
            Err(err) => Err(err.into()),
        }
    }

    /// Resolving and the round boundary: shut the window, commit at most
    /// one elimination, shrink the capacity, broadcast. Returns `true`
    /// once the game is decided.
    async fn resolve_round(&mut self) -> Result<bool, LastseatError> {
        let round = self.state.round();
        let seats = self.state.seats();

        // Shut the pool first so no further seat can be won. A claimant
        // holds its permit until the verdict lands, so the sheet is complete
        // exactly when it accounts for every permit handed out; the drain
        // loops until the counts agree, waiting out any task that won a seat
        // but has not sent its notice yet.
        self.pool.close_window();
        loop {
            tokio::task::yield_now().await;
            while let Ok(notice) = self.claims.try_recv() {
                self.accept_claim(notice)?;
            }
            let seated = self.pool.capacity().saturating_sub(self.pool.seats_left());
            if self.state.claimed() >= seated {
                break;
            }
        }
        let claimed = self.state.claimed();
        self.state.close_claims()?;

        if let Some(out) = self.state.resolve()? {
            self.events.emit(GameEvent::Eliminated { round, player: out });
            info!(round, player = %out, "left standing, eliminated");
        } else {
            debug!(round, claimed, "nobody eliminated");
        }

        self.state.finish_round()?;
        self.signals.publish(self.state.view());
        self.events.emit(GameEvent::RoundOver { round, claimed, seats });

        if self.state.is_decided() {
            self.state.finish_game()?;
            self.signals.publish(self.state.view());
            let winner = self.state.winner();
            self.events.emit(GameEvent::GameOver { winner });
            match winner {
                Some(winner) => info!(%winner, rounds = round, "game over"),
                None => info!(rounds = round, "game over with no survivors"),
            }
            return Ok(true);
        }
        Ok(false)
    }
}
