//! The round lifecycle state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The phase of the current round.
///
/// Transitions are strictly ordered; the only branch is at `RoundOver`,
/// which either loops into the next round or ends the game:
///
/// ```text
/// Idle → ClaimsOpen → Resolving → RoundOver → (Idle | GameOver)
/// ```
///
/// - **Idle**: round announced, music playing. Seats exist but claims are
///   not allowed yet.
/// - **ClaimsOpen**: the music stopped; participants race for seats.
/// - **Resolving**: the claim window is shut; the arbiter decides who goes
///   out.
/// - **RoundOver**: the verdict is committed and broadcast; participants
///   wake and read their fate.
/// - **GameOver**: terminal. Either a winner stands or the run aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    ClaimsOpen,
    Resolving,
    RoundOver,
    GameOver,
}

impl Phase {
    /// Returns `true` if seat claims are allowed right now.
    pub fn claims_open(&self) -> bool {
        matches!(self, Self::ClaimsOpen)
    }

    /// Returns `true` if the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver)
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Idle, Self::ClaimsOpen)
                | (Self::ClaimsOpen, Self::Resolving)
                | (Self::Resolving, Self::RoundOver)
                | (Self::RoundOver, Self::Idle)
                | (Self::RoundOver, Self::GameOver)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::ClaimsOpen => write!(f, "ClaimsOpen"),
            Self::Resolving => write!(f, "Resolving"),
            Self::RoundOver => write!(f, "RoundOver"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_follows_round_order() {
        assert!(Phase::Idle.can_transition_to(Phase::ClaimsOpen));
        assert!(Phase::ClaimsOpen.can_transition_to(Phase::Resolving));
        assert!(Phase::Resolving.can_transition_to(Phase::RoundOver));
    }

    #[test]
    fn test_round_over_branches() {
        assert!(Phase::RoundOver.can_transition_to(Phase::Idle));
        assert!(Phase::RoundOver.can_transition_to(Phase::GameOver));
    }

    #[test]
    fn test_no_skipping_and_no_going_back() {
        assert!(!Phase::Idle.can_transition_to(Phase::Resolving));
        assert!(!Phase::Idle.can_transition_to(Phase::RoundOver));
        assert!(!Phase::ClaimsOpen.can_transition_to(Phase::Idle));
        assert!(!Phase::ClaimsOpen.can_transition_to(Phase::GameOver));
        assert!(!Phase::Resolving.can_transition_to(Phase::ClaimsOpen));
    }

    #[test]
    fn test_game_over_is_terminal() {
        assert!(Phase::GameOver.is_terminal());
        assert!(!Phase::GameOver.can_transition_to(Phase::Idle));
        assert!(!Phase::GameOver.can_transition_to(Phase::ClaimsOpen));
        assert!(!Phase::RoundOver.is_terminal());
    }

    #[test]
    fn test_claims_open_predicate() {
        assert!(Phase::ClaimsOpen.claims_open());
        assert!(!Phase::Idle.claims_open());
        assert!(!Phase::Resolving.claims_open());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::ClaimsOpen.to_string(), "ClaimsOpen");
        assert_eq!(Phase::GameOver.to_string(), "GameOver");
    }
}
