//! # Lastseat
//!
//! A concurrent musical-chairs simulation: `N` participant tasks race for
//! `N - 1` seats every round, an arbiter eliminates whoever is left
//! standing, and the last participant seated wins.
//!
//! The interesting part is the round engine. One arbiter task owns the
//! [`Phase`] state machine and is the only writer of game state. Seats are
//! a [`SeatPool`] built on a per-round semaphore, reset at every round
//! boundary so a late claim can never steal a seat from the next round.
//! Round boundaries reach participants over a latest-value broadcast, which
//! makes lost wakeups structurally impossible and lets any number of tasks
//! sleep through any number of rounds without deadlocking the game.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use lastseat::{FixedMusic, Game};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lastseat::LastseatError> {
//!     let outcome = Game::builder()
//!         .players(4)
//!         .music(FixedMusic(Duration::from_millis(250)))
//!         .build()?
//!         .run()
//!         .await?;
//!     match outcome.winner {
//!         Some(winner) => println!("{winner} takes the last seat after {} rounds", outcome.rounds),
//!         None => println!("the game aborted"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Key types
//!
//! - [`Game`] / [`GameBuilder`] — configure and run a simulation
//! - [`MusicSource`] — timing collaborator ([`RandomMusic`], [`FixedMusic`])
//! - [`GameEvent`] — the play-by-play narration stream
//! - [`Outcome`] — winner and round count

mod arbiter;
mod error;
mod game;
mod music;
mod participant;

pub use error::LastseatError;
pub use game::{Game, GameBuilder, Outcome};
pub use music::{FixedMusic, MusicSource, RandomMusic};

pub use lastseat_game::{
    GameConfig, GameError, GameEvent, Participant, Phase, PlayerId, Roster, RoundView,
};
pub use lastseat_sync::{ClaimError, RoundWatcher, SeatClaim, SeatPool};
