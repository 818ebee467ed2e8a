//! Lane Rush entry point
//!
//! Headless runner: drives the simulation without a window, stores
//! qualifying runs on the leaderboard and prints it.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use lane_rush::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use lane_rush::{ScoreTable, Settings};

#[derive(Parser)]
#[command(name = "lane-rush")]
#[command(about = "Lane-based arcade driving game (headless simulation)")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "5000")]
    ticks: u64,

    /// RNG seed (defaults to the system clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (JSON)
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Leaderboard file (`name,points` per line)
    #[arg(long, default_value = "records.txt")]
    scores: PathBuf,

    /// Name stored with a qualifying score
    #[arg(long, default_value = "player")]
    name: String,

    /// Let the car steer itself
    #[arg(long)]
    autopilot: bool,

    /// Runs to play; a crash restarts until this many have ended
    #[arg(long, default_value = "1")]
    runs: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Lane Rush (headless) starting...");

    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("failed to load settings from {}", cli.settings.display()))?;
    let mut scores = ScoreTable::load(&cli.scores)
        .with_context(|| format!("failed to load scores from {}", cli.scores.display()))?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::new(settings.fitted_tuning(None), seed)
        .context("invalid traffic configuration")?;
    log::info!("Game initialized with seed: {}", seed);

    let input = TickInput {
        autopilot: cli.autopilot,
        ..Default::default()
    };
    let restart = TickInput {
        restart: true,
        ..input.clone()
    };

    let mut runs_ended = 0;
    for _ in 0..cli.ticks {
        tick(&mut state, &input);

        for event in state.drain_events() {
            let GameEvent::Crashed { points } = event else {
                continue;
            };
            runs_ended += 1;
            println!(
                "Run {} crashed after {} ticks with {} points",
                runs_ended, state.time_ticks, points
            );
            if state.enter_record(&scores) {
                if let Some(rank) = state.submit_record(&cli.name, &mut scores) {
                    println!("New record for {}: rank #{}", cli.name, rank);
                    scores.save(&cli.scores).with_context(|| {
                        format!("failed to save scores to {}", cli.scores.display())
                    })?;
                }
            }
        }

        if state.phase == GamePhase::GameOver {
            if runs_ended >= cli.runs {
                break;
            }
            tick(&mut state, &restart);
        }
    }

    if state.phase == GamePhase::Playing {
        println!(
            "Stopped after {} ticks, still driving with {} points",
            state.time_ticks,
            state.score()
        );
    }

    print_table(&scores);
    Ok(())
}

fn print_table(scores: &ScoreTable) {
    println!();
    println!("Player ratings:");
    if scores.is_empty() {
        println!("  (none yet)");
    }
    for (i, record) in scores.entries.iter().enumerate() {
        println!("{:>3}) {}: {}", i + 1, record.name, record.points);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
