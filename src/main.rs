//! Pellet Arena Game Server
//!
//! Runs a scripted demonstration round against the authoritative engine.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pellet_arena::{Direction, EngineConfig, GameEngine, GamePhase, StartOptions, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Pellet Arena Server v{}", VERSION);

    demo_round()
}

/// Walk one small round end to end: join, start, eat, battle, leaderboard.
fn demo_round() -> anyhow::Result<()> {
    info!("=== Starting Demo Round ===");

    let config = EngineConfig {
        secret_code: "demo".to_string(),
        ..EngineConfig::default()
    };
    let engine = Arc::new(GameEngine::new(config));

    let names = ["ada", "grace", "alan"];
    let mut tokens = Vec::new();
    for name in names {
        let token = engine
            .join_player(name)
            .with_context(|| format!("{name} could not join"))?;
        info!("{} joined", name);
        tokens.push(token);
    }

    engine
        .start_game(StartOptions {
            rows: 4,
            cols: 4,
            secret_code: "demo".to_string(),
            round_length: None,
        })
        .context("starting the demo round")?;
    info!("Round started: phase {:?}", engine.current_phase());

    // Sweep each player around until the pills run out or the round ends.
    let directions = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];
    'laps: for lap in 0..32 {
        for (token, name) in tokens.iter().zip(&names) {
            if engine.is_game_over() {
                break 'laps;
            }
            let direction = directions[lap % directions.len()];
            match engine.move_player(token, direction) {
                Ok(outcome) if outcome.ate_a_pill => {
                    info!("{} ate a pill at {}", name, outcome.location);
                }
                Ok(_) => {}
                Err(error) => info!("{}: {}", name, error),
            }
        }
        if engine.current_phase() == GamePhase::Battle {
            info!("Battle phase reached on lap {}", lap);
        }
    }

    info!("=== Final Standings ===");
    info!("Phase: {:?}", engine.current_phase());
    for entry in engine.players_by_score_descending() {
        info!("{} {} - Score: {}", entry.id, entry.name, entry.score);
    }
    Ok(())
}
