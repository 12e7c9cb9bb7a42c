//! Integration tests for round signalling.
//!
//! Views are produced by driving a real `RoundState`, so every published
//! snapshot is one the arbiter could actually emit.

use std::time::Duration;

use lastseat_game::{Phase, PlayerId, RoundState};
use lastseat_sync::{OpenWait, OverWait, channel};
use tokio::time::sleep;

// =========================================================================
// Helpers
// =========================================================================

/// Drives a fresh state to the claim window of round 1.
fn state_at_claims_open(players: u32) -> RoundState {
    let mut state = RoundState::new(players);
    state.begin_round().unwrap();
    state.open_claims().unwrap();
    state
}

/// Resolves the current round with exactly `seated` having claimed.
fn finish_round(state: &mut RoundState, seated: &[PlayerId]) -> Option<PlayerId> {
    for &player in seated {
        state.note_claim(player).unwrap();
    }
    state.close_claims().unwrap();
    let out = state.resolve().unwrap();
    state.finish_round().unwrap();
    out
}

/// Lets every woken task run to its next suspension point.
async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

// =========================================================================
// Latest-view queries
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_latest_returns_the_seed_view() {
    let (_signals, watcher) = channel(RoundState::new(3).view());
    let view = watcher.latest();
    assert_eq!(view.round, 0);
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.active_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_latest_is_stable_after_game_over() {
    let mut state = state_at_claims_open(2);
    assert_eq!(finish_round(&mut state, &[PlayerId(1)]), Some(PlayerId(0)));
    state.finish_game().unwrap();
    let (_signals, watcher) = channel(state.view());

    // The terminal answer never changes, however often it is asked for.
    for _ in 0..3 {
        let view = watcher.latest();
        assert_eq!(view.phase, Phase::GameOver);
        assert_eq!(view.winner, Some(PlayerId(1)));
    }
}

#[tokio::test(start_paused = true)]
async fn test_late_subscriber_sees_the_current_view() {
    let mut state = state_at_claims_open(3);
    let (signals, _watcher) = channel(RoundState::new(3).view());
    signals.publish(state.view());
    finish_round(&mut state, &[PlayerId(0), PlayerId(1)]);
    signals.publish(state.view());

    let late = signals.subscribe();
    assert_eq!(late.latest().phase, Phase::RoundOver);
}

// =========================================================================
// Waiting for the claim window
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_claims_open_wakes_when_the_window_opens() {
    let mut state = RoundState::new(3);
    let (signals, mut watcher) = channel(state.view());

    let wait = tokio::spawn(async move { watcher.claims_open(PlayerId(0), 0).await });
    settle().await;
    assert!(!wait.is_finished());

    // The round announcement alone must not wake anyone.
    state.begin_round().unwrap();
    signals.publish(state.view());
    settle().await;
    assert!(!wait.is_finished());

    state.open_claims().unwrap();
    signals.publish(state.view());
    assert_eq!(wait.await.unwrap(), OpenWait::Open { round: 1 });
}

#[tokio::test(start_paused = true)]
async fn test_open_published_before_the_wait_still_wakes() {
    let state = state_at_claims_open(3);
    let (_signals, mut watcher) = channel(state.view());

    // The value is retained, so a late waiter cannot miss the signal.
    assert_eq!(
        watcher.claims_open(PlayerId(1), 0).await,
        OpenWait::Open { round: 1 }
    );
}

#[tokio::test(start_paused = true)]
async fn test_claims_open_ignores_rounds_already_seen() {
    let mut state = state_at_claims_open(3);
    let (signals, mut watcher) = channel(state.view());

    // Round 1 is open, but the waiter has already played it.
    let wait = tokio::spawn(async move { watcher.claims_open(PlayerId(0), 1).await });
    settle().await;
    assert!(!wait.is_finished());

    assert_eq!(
        finish_round(&mut state, &[PlayerId(0), PlayerId(1)]),
        Some(PlayerId(2))
    );
    signals.publish(state.view());
    settle().await;
    assert!(!wait.is_finished());

    state.begin_round().unwrap();
    signals.publish(state.view());
    state.open_claims().unwrap();
    signals.publish(state.view());
    assert_eq!(wait.await.unwrap(), OpenWait::Open { round: 2 });
}

#[tokio::test(start_paused = true)]
async fn test_eliminated_waiter_wakes_out() {
    let mut state = state_at_claims_open(3);
    let (signals, mut watcher) = channel(state.view());

    finish_round(&mut state, &[PlayerId(0), PlayerId(1)]);
    signals.publish(state.view());

    assert_eq!(watcher.claims_open(PlayerId(2), 1).await, OpenWait::Out);
}

#[tokio::test(start_paused = true)]
async fn test_sleeper_learns_its_fate_from_a_later_view() {
    let mut state = state_at_claims_open(3);
    let (signals, mut watcher) = channel(state.view());

    // P2 goes out in round 1, but the only view ever published is the
    // round 2 claim window. The roster inside it is enough.
    finish_round(&mut state, &[PlayerId(0), PlayerId(1)]);
    state.begin_round().unwrap();
    state.open_claims().unwrap();
    signals.publish(state.view());

    assert_eq!(watcher.round_over(PlayerId(2), 1).await, OverWait::Out);
    let mut again = watcher.clone();
    assert_eq!(again.claims_open(PlayerId(2), 1).await, OpenWait::Out);
}

// =========================================================================
// Waiting for the round boundary
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_round_over_wakes_survivors_with_next() {
    let mut state = state_at_claims_open(3);
    let (signals, mut watcher) = channel(state.view());

    let wait = tokio::spawn(async move { watcher.round_over(PlayerId(0), 1).await });
    settle().await;
    assert!(!wait.is_finished());

    finish_round(&mut state, &[PlayerId(0), PlayerId(1)]);
    signals.publish(state.view());
    assert_eq!(wait.await.unwrap(), OverWait::Next);
}

#[tokio::test(start_paused = true)]
async fn test_round_over_past_the_round_counts_as_resolved() {
    let mut state = state_at_claims_open(3);
    let (signals, mut watcher) = channel(state.view());

    finish_round(&mut state, &[PlayerId(0), PlayerId(1)]);
    state.begin_round().unwrap();
    signals.publish(state.view());

    // Round 2 is already announced; waiting on round 1 must not hang.
    assert_eq!(watcher.round_over(PlayerId(0), 1).await, OverWait::Next);
}

#[tokio::test(start_paused = true)]
async fn test_terminal_view_reports_the_winner_to_everyone() {
    let mut state = state_at_claims_open(2);
    finish_round(&mut state, &[PlayerId(1)]);
    state.finish_game().unwrap();
    let (_signals, watcher) = channel(state.view());

    let mut winner = watcher.clone();
    assert_eq!(
        winner.round_over(PlayerId(1), 1).await,
        OverWait::Over { winner: Some(PlayerId(1)) }
    );
    // The loser sees the game end, not just its own elimination.
    let mut loser = watcher.clone();
    assert_eq!(
        loser.round_over(PlayerId(0), 1).await,
        OverWait::Over { winner: Some(PlayerId(1)) }
    );
    let mut late = watcher.clone();
    assert_eq!(
        late.claims_open(PlayerId(1), 1).await,
        OpenWait::Over { winner: Some(PlayerId(1)) }
    );
}

#[tokio::test(start_paused = true)]
async fn test_every_watcher_wakes_on_one_publish() {
    let mut state = RoundState::new(3);
    let (signals, watcher) = channel(state.view());

    let mut waits = Vec::new();
    for id in 0..3 {
        let mut w = watcher.clone();
        waits.push(tokio::spawn(async move {
            w.claims_open(PlayerId(id), 0).await
        }));
    }
    settle().await;

    state.begin_round().unwrap();
    state.open_claims().unwrap();
    signals.publish(state.view());

    for wait in waits {
        assert_eq!(wait.await.unwrap(), OpenWait::Open { round: 1 });
    }
}

// =========================================================================
// Publisher loss
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_dropped_publisher_counts_as_game_over() {
    let state = RoundState::new(2);
    let (signals, mut watcher) = channel(state.view());
    drop(signals);

    assert_eq!(
        watcher.claims_open(PlayerId(0), 0).await,
        OpenWait::Over { winner: None }
    );
    assert_eq!(
        watcher.round_over(PlayerId(0), 1).await,
        OverWait::Over { winner: None }
    );
}
