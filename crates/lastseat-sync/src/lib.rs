//! Synchronization primitives for the Lastseat engine.
//!
//! Two pieces, deliberately free of game rules:
//!
//! - [`SeatPool`] — the bounded, per-round-resettable gate participants
//!   race on. At most `seats` claims succeed between two resets.
//! - [`RoundSignals`] / [`RoundWatcher`] — the single-writer broadcast
//!   fabric that keeps every task in lockstep across round boundaries
//!   without lost wakeups.
//!
//! The arbiter in the engine crate owns the writer sides; participants get
//! an `Arc<SeatPool>` and a watcher clone and nothing else.

mod error;
mod seats;
mod signal;

pub use error::ClaimError;
pub use seats::{SeatClaim, SeatPool};
pub use signal::{OpenWait, OverWait, RoundSignals, RoundWatcher, channel};
