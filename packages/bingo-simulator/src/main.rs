//! Bingo simulator CLI - plays scripted games in memory against the
//! backend's sheet and draw engine.
//!
//! One JSON line per game goes to stdout; logs go to stderr.

mod output;
mod simulator;

use std::sync::Arc;
use std::time::Instant;

use bingo_backend::domain::WildcardPolicy;
use bingo_backend::rng::{RandomPool, DEFAULT_WORKERS};
use clap::{Parser, ValueEnum};
use output::JsonLineWriter;
use simulator::{GameRecord, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bingo-simulator")]
#[command(about = "Play scripted bingo games in memory")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per game
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Base seed for the random workers. Runs are only reproducible with
    /// `--workers 1`, since workers race for requests.
    #[arg(long)]
    seed: Option<u64>,

    /// Wildcard placement policy
    #[arg(long, default_value = "scattered")]
    policy: PolicyArg,

    /// Random pool size
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print a summary after the last game
    #[arg(long)]
    show_output: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Scattered,
    Center,
}

impl From<PolicyArg> for WildcardPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Scattered => WildcardPolicy::Scattered,
            PolicyArg::Center => WildcardPolicy::CenterOnly,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.players == 0 {
        return Err("--players must be at least 1".into());
    }

    let pool = match args.seed {
        Some(seed) => RandomPool::spawn_seeded(args.workers, seed),
        None => RandomPool::spawn(args.workers),
    };
    let simulator = Simulator::new(args.players, args.policy.into());

    if args.show_output {
        info!(
            games = args.games,
            players = args.players,
            policy = %simulator.policy(),
            workers = pool.size(),
            "Starting bingo simulator"
        );
    }

    let mut writer = JsonLineWriter::new(std::io::stdout().lock());
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        match simulator.run_game(pool.as_ref(), game_num).await {
            Ok(record) => {
                if let Err(e) = writer.write(&record) {
                    warn!("Failed to write record for game {}: {}", game_num, e);
                }
                results.push(record);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }
    writer.finish()?;

    shutdown(pool).await;

    if args.show_output {
        print_summary(&results, errors, start.elapsed(), args.games);
    }

    Ok(())
}

async fn shutdown(pool: Arc<RandomPool>) {
    pool.shutdown().await;
    info!("Random pool stopped");
}

fn print_summary(results: &[GameRecord], errors: u32, elapsed: std::time::Duration, total: u32) {
    eprintln!("\n=== Simulation Summary ===");
    eprintln!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        eprintln!("Errors: {}", errors);
    }
    eprintln!("Total time: {:?}", elapsed);

    if results.is_empty() {
        return;
    }

    let draws: Vec<usize> = results.iter().map(|r| r.draws).collect();
    let avg = draws.iter().sum::<usize>() as f64 / draws.len() as f64;
    let min = draws.iter().min().copied().unwrap_or(0);
    let max = draws.iter().max().copied().unwrap_or(0);
    let ties = results.iter().filter(|r| r.tie).count();

    eprintln!("Draws to win: avg={:.1}, min={}, max={}", avg, min, max);
    eprintln!(
        "Tied games: {} ({:.1}%)",
        ties,
        ties as f64 / results.len() as f64 * 100.0
    );
}
