//! N-in-a-row on the console: play against the engine, or let it play itself.

mod game;
mod selfplay;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gomoku_mcts::SearchConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// N-in-a-row game with a Monte Carlo Tree Search opponent.
#[derive(Parser)]
#[command(name = "gomoku")]
#[command(about = "Play N-in-a-row against an MCTS engine")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine from the terminal.
    Play {
        #[command(flatten)]
        engine: EngineArgs,

        /// Random seed for player assignment and search. Random if not given.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the engine play itself and save the games as JSON.
    Selfplay {
        #[command(flatten)]
        engine: EngineArgs,

        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Cap on simulations per move, on top of the time budget.
        #[arg(short, long)]
        simulations: Option<usize>,

        /// Output directory for game files.
        #[arg(short, long, default_value = "data/games")]
        output: PathBuf,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

/// Board and search parameters shared by both modes.
#[derive(Args)]
struct EngineArgs {
    /// Board width.
    #[arg(long, default_value = "8")]
    width: usize,

    /// Board height.
    #[arg(long, default_value = "8")]
    height: usize,

    /// Pieces in a line needed to win.
    #[arg(short, long, default_value = "5")]
    n_in_row: usize,

    /// Seconds the engine may think per move.
    #[arg(short, long, default_value = "5.0")]
    time: f64,

    /// Maximum plies per simulated game.
    #[arg(long, default_value = "1000")]
    max_plies: usize,

    /// UCB1 exploration constant.
    #[arg(long, default_value = "1.96")]
    exploration: f64,
}

impl EngineArgs {
    fn search_config(&self) -> Result<SearchConfig> {
        let budget = Duration::try_from_secs_f64(self.time)
            .with_context(|| format!("invalid time budget: {}", self.time))?;
        let config = SearchConfig::new(
            self.width,
            self.height,
            self.n_in_row,
            budget,
            self.max_plies,
            self.exploration,
        )?;
        Ok(config)
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Run the play command.
fn cmd_play(engine: EngineArgs, seed: Option<u64>) -> Result<()> {
    let config = engine.search_config()?;
    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let stdin = io::stdin();
    game::play_human(config, rng, stdin.lock(), io::stdout())?;
    Ok(())
}

/// Run the selfplay command.
fn cmd_selfplay(
    engine: EngineArgs,
    games: usize,
    simulations: Option<usize>,
    output: PathBuf,
    seed: u64,
) -> Result<()> {
    let mut config = engine.search_config()?;
    if let Some(n) = simulations {
        config = config.with_simulations(n);
    }

    println!(
        "Playing {} games on {}x{} (n={}), {:.1}s per move",
        games,
        config.width,
        config.height,
        config.n_in_row,
        config.time_budget.as_secs_f64()
    );
    if let Some(n) = config.max_simulations {
        println!("Simulation cap: {} per move", n);
    }
    println!("Output directory: {:?}", output);
    println!("Seed: {}", seed);

    let start = Instant::now();
    let records = selfplay::play_games(&config, games, seed)?;
    selfplay::save_records(&output, &records)?;

    let summary = selfplay::Summary::from_records(&records);
    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());
    println!("Games played: {}", summary.games);
    println!("Total moves: {}", summary.total_moves);
    println!("Average game length: {:.1} moves", summary.average_length());
    println!(
        "Outcomes: X wins: {}, O wins: {}, Draws: {}",
        summary.x_wins, summary.o_wins, summary.draws
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play { engine, seed } => cmd_play(engine, seed),
        Commands::Selfplay {
            engine,
            games,
            simulations,
            output,
            seed,
        } => cmd_selfplay(engine, games, simulations, output, seed),
    }
}
