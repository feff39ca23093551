//! Trail Arena Demo
//!
//! Headless driver for the simulation engine: runs one scripted round and
//! logs the play-by-play. Real front-ends render on their own cadence and
//! feed input events; this binary stands in for them.

use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trail_arena::{Direction, GameEvent, Phase, Session, TICK_RATE, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Trail Arena v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    demo_round()
}

/// Turn 90 degrees counterclockwise on screen.
fn left_of(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Left,
        Direction::Left => Direction::Down,
        Direction::Down => Direction::Right,
        Direction::Right => Direction::Up,
    }
}

/// One row of the final standings report.
#[derive(Serialize)]
struct Standing {
    player: usize,
    score: u32,
    alive: bool,
}

/// Run a four-player round with scripted turns until it resolves.
fn demo_round() -> anyhow::Result<()> {
    info!("=== Starting Demo Round ===");

    let mut session = Session::new(48, 32);
    for _ in 0..4 {
        session.add_player()?;
    }
    session.play(48, 32)?;

    for index in 0..session.player_count() {
        let player = session.player(index).expect("player just added");
        info!(
            "Player {} spawned at ({}, {}) facing {:?}",
            index, player.x, player.y, player.direction
        );
    }

    let mut ticks = 0u32;
    while session.phase() == Phase::Running {
        // Each player turns left on its own cadence.
        for index in 0..session.player_count() {
            let cadence = 7 + 3 * index as u32;
            if ticks % cadence == cadence - 1 {
                if let Some(player) = session.player(index) {
                    session.queue_direction(index, left_of(player.direction));
                }
            }
        }

        let result = session.advance_tick();
        ticks += 1;

        for event in &result.events {
            match *event {
                GameEvent::PlayerEliminated { player, cause } => {
                    info!("Tick {}: player {} eliminated ({:?})", ticks, player, cause);
                }
                GameEvent::RoundOver { survivor } => match survivor {
                    Some(index) => info!("Tick {}: round over, player {} wins", ticks, index),
                    None => info!("Tick {}: round over, no survivors", ticks),
                },
            }
        }

        if ticks >= 10_000 {
            info!("Tick limit reached, forcing game over");
            session.game_over()?;
        }
    }

    info!("=== Final Standings ===");
    let mut standings: Vec<Standing> = (0..session.player_count())
        .filter_map(|index| {
            session.player(index).map(|p| Standing {
                player: index,
                score: p.score,
                alive: p.is_alive(),
            })
        })
        .collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));

    for (rank, standing) in standings.iter().enumerate() {
        info!(
            "#{}: Player {} - Score: {}",
            rank + 1,
            standing.player,
            standing.score
        );
    }
    info!("Standings: {}", serde_json::to_string(&standings)?);

    Ok(())
}
