//! Building and running a game.

use std::sync::Arc;
use std::time::Duration;

use lastseat_game::{GameConfig, GameEvent, PlayerId, RoundState};
use lastseat_sync::SeatPool;
use tokio::sync::mpsc;
use tracing::debug;

use crate::LastseatError;
use crate::arbiter::{Arbiter, EventSender};
use crate::music::{MusicSource, RandomMusic};
use crate::participant::ParticipantTask;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The last participant seated, or `None` if the run aborted.
    pub winner: Option<PlayerId>,
    /// Rounds played.
    pub rounds: u64,
}

// ---------------------------------------------------------------------------
// GameBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring a game.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use lastseat::{FixedMusic, Game};
///
/// # async fn demo() -> Result<(), lastseat::LastseatError> {
/// let outcome = Game::builder()
///     .players(4)
///     .music(FixedMusic(Duration::from_millis(100)))
///     .build()?
///     .run()
///     .await?;
/// println!("winner: {:?}", outcome.winner);
/// # Ok(())
/// # }
/// ```
pub struct GameBuilder {
    config: GameConfig,
    music: Box<dyn MusicSource>,
    events: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl GameBuilder {
    /// A builder with default settings: four players, random music.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            music: Box::new(RandomMusic::default()),
            events: None,
        }
    }

    /// Number of participants. At least 2.
    pub fn players(mut self, players: u32) -> Self {
        self.config.players = players;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Bound on how long the arbiter holds the claim window open.
    pub fn claim_window(mut self, window: Duration) -> Self {
        self.config.claim_window = window;
        self
    }

    /// Bound on a single participant's wait for a seat.
    pub fn claim_timeout(mut self, timeout: Duration) -> Self {
        self.config.claim_timeout = timeout;
        self
    }

    /// Per-participant reaction delays, indexed by player id. Missing
    /// entries mean no delay. Simulation knob: a scripted slow player
    /// makes elimination order deterministic.
    pub fn reaction_times(mut self, reactions: Vec<Duration>) -> Self {
        self.config.reactions = reactions;
        self
    }

    /// The music timing source. Defaults to [`RandomMusic`].
    pub fn music(mut self, music: impl MusicSource + 'static) -> Self {
        self.music = Box::new(music);
        self
    }

    /// Where to send [`GameEvent`]s. The engine never blocks on the
    /// receiver; drop it if the narration is not wanted after all.
    pub fn events(mut self, tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Validates the configuration and assembles the game.
    pub fn build(self) -> Result<Game, LastseatError> {
        let config = self.config.validated()?;
        Ok(Game {
            config,
            music: self.music,
            events: self.events,
        })
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// An assembled game, ready to run once.
pub struct Game {
    config: GameConfig,
    music: Box<dyn MusicSource>,
    events: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl Game {
    /// Starts configuring a game.
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// The validated configuration this game will run with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Runs the game to completion.
    ///
    /// Spawns one task per participant, drives the rounds from the calling
    /// task, and joins every participant after the terminal broadcast. The
    /// returned [`Outcome`] is the same answer every later query of the
    /// final state gives.
    pub async fn run(self) -> Result<Outcome, LastseatError> {
        let state = RoundState::new(self.config.players);
        let pool = Arc::new(SeatPool::new(self.config.initial_seats()));
        let (signals, watcher) = lastseat_sync::channel(state.view());
        let (claim_tx, claim_rx) = mpsc::unbounded_channel();

        let mut participants = Vec::with_capacity(self.config.players as usize);
        for id in 0..self.config.players {
            let id = PlayerId(id);
            let task = ParticipantTask {
                id,
                watcher: watcher.clone(),
                pool: Arc::clone(&pool),
                claims: claim_tx.clone(),
                reaction: self.config.reaction(id),
                claim_timeout: self.config.claim_timeout,
            };
            participants.push((id, tokio::spawn(task.run())));
        }
        // The arbiter must see the channel close when the last participant
        // exits, so the spawner keeps no sender of its own.
        drop(claim_tx);
        drop(watcher);

        let arbiter = Arbiter::new(
            state,
            Arc::clone(&pool),
            signals,
            claim_rx,
            EventSender::new(self.events),
            self.music,
            self.config.claim_window,
        );
        let result = arbiter.run().await;

        // Participants were all woken by the terminal broadcast; join them
        // even when the run failed so nothing leaks past this call.
        let mut crashed = None;
        for (id, handle) in participants {
            if handle.await.is_err() {
                debug!(player = %id, "participant task panicked");
                crashed.get_or_insert(id);
            }
        }

        let outcome = result?;
        if let Some(id) = crashed {
            return Err(LastseatError::ParticipantCrashed(id));
        }
        Ok(outcome)
    }
}
