//! Error types for the synchronization primitives.

use std::time::Duration;

/// Why a seat claim came back empty-handed.
///
/// Neither variant is fatal to the claimant. Going without a seat is a normal
/// round outcome; it just makes the claimant a candidate for elimination.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    /// Every seat stayed taken for the whole bounded wait.
    #[error("no seat became available within {0:?}")]
    TimedOut(Duration),

    /// The claim window for this round is not, or is no longer, open.
    #[error("the claim window for round {0} is closed")]
    WindowClosed(u64),
}
