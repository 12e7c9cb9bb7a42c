//! Game vocabulary and round state machine for Lastseat.
//!
//! This crate is the synchronous core of the musical-chairs engine: who is
//! in the game, what phase the round is in, and what the rules say happens
//! next. It owns no tasks and never blocks. Concurrency lives in
//! `lastseat-sync` and the engine crate, both of which drive the types
//! defined here.
//!
//! # Key types
//!
//! - [`RoundState`] — the single-writer state machine the arbiter drives
//! - [`RoundView`] — immutable snapshots broadcast to participants
//! - [`Phase`] — the round lifecycle
//! - [`Roster`] / [`PlayerId`] — who is (still) playing
//! - [`GameConfig`] — roster size and timing knobs
//! - [`GameEvent`] — the narration stream

mod config;
mod error;
mod event;
mod phase;
mod player;
mod state;

pub use config::GameConfig;
pub use error::GameError;
pub use event::GameEvent;
pub use phase::Phase;
pub use player::{Participant, PlayerId, Roster};
pub use state::{RoundState, RoundView};
