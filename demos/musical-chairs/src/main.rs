//! Musical chairs, narrated.
//!
//! Runs one full game and prints the play-by-play. The player count comes
//! from the first CLI argument (default 4); engine logs show up under
//! `RUST_LOG=info` or lower.

use std::time::Duration;

use lastseat::{Game, GameEvent, RandomMusic};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const DEFAULT_PLAYERS: u32 = 4;

fn player_count() -> u32 {
    std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_PLAYERS)
}

/// The lines to print for one event. Empty when the event needs no
/// narration.
fn narrate(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::RoundStarted { round, players, seats } => vec![
            String::new(),
            format!("--- round {round} ---"),
            format!("{players} players circle {seats} seats, the music is playing..."),
        ],
        GameEvent::MusicStopped { .. } => vec!["the music stops!".into()],
        GameEvent::SeatClaimed { player, .. } => {
            vec![format!("  {player} drops into a seat")]
        }
        GameEvent::Eliminated { player, .. } => {
            vec![format!("  {player} is left standing and leaves the game")]
        }
        GameEvent::RoundOver { claimed, seats, .. } if claimed < seats => {
            vec![format!("  ({} of {seats} seats went unclaimed)", seats - claimed)]
        }
        GameEvent::RoundOver { .. } => Vec::new(),
        GameEvent::GameOver { winner: Some(winner) } => {
            vec![String::new(), format!("{winner} wins the last seat!")]
        }
        GameEvent::GameOver { winner: None } => {
            vec![String::new(), "nobody wins this one.".into()]
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let players = player_count();
    println!(
        "musical chairs: {players} players, {} seats",
        players.saturating_sub(1)
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            for line in narrate(&event) {
                println!("{line}");
            }
        }
    });

    let outcome = Game::builder()
        .players(players)
        .music(RandomMusic::new(
            Duration::from_secs(1),
            Duration::from_secs(3),
        ))
        .events(tx)
        .build()?
        .run()
        .await?;

    let _ = printer.await;
    tracing::debug!(rounds = outcome.rounds, "simulation finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastseat::PlayerId;

    #[test]
    fn test_round_start_narration() {
        let lines = narrate(&GameEvent::RoundStarted { round: 2, players: 3, seats: 2 });
        assert_eq!(lines[1], "--- round 2 ---");
        assert_eq!(lines[2], "3 players circle 2 seats, the music is playing...");
    }

    #[test]
    fn test_round_over_only_speaks_about_empty_seats() {
        assert!(narrate(&GameEvent::RoundOver { round: 1, claimed: 3, seats: 3 }).is_empty());
        let lines = narrate(&GameEvent::RoundOver { round: 1, claimed: 1, seats: 3 });
        assert_eq!(lines, vec!["  (2 of 3 seats went unclaimed)".to_string()]);
    }

    #[test]
    fn test_winner_narration_names_the_player() {
        let lines = narrate(&GameEvent::GameOver { winner: Some(PlayerId(2)) });
        assert_eq!(lines[1], "P2 wins the last seat!");
    }
}
