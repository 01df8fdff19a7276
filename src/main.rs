//! Mastermind - CLI
//!
//! Two-phase Mastermind with TUI and console modes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mastermind::{
    commands::{SolveConfig, run_benchmark, run_simple, solve_code},
    core::{Alphabet, GameConfig, Rules},
    interactive::{App, run_tui},
    output::{print_benchmark_result, print_solve_result},
    telemetry,
};

#[derive(Parser)]
#[command(
    name = "mastermind",
    about = "Two-phase Mastermind: crack the computer's code, then let it crack yours",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pegs per code
    #[arg(short, long, global = true, default_value = "4")]
    pins: usize,

    /// Guesses allowed per phase
    #[arg(short, long, global = true, default_value = "9")]
    turns: usize,

    /// Comma-separated peg labels
    #[arg(short, long, global = true, default_value = "A,B,C,D,E,F")]
    alphabet: String,

    /// Seed for reproducible secrets and guesses
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Show secrets and solver internals
    #[arg(long, global = true)]
    debug: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple console mode (no TUI)
    Simple,

    /// Let the computer crack a known code
    Solve {
        /// The code to crack, e.g. ABCD or "A,B,C,D"
        code: String,

        /// Show candidate counts per guess
        #[arg(long)]
        details: bool,
    },

    /// Benchmark the solver against random codes
    Benchmark {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,
    },
}

/// Build a validated configuration from the global flags
fn build_config(cli: &Cli) -> Result<GameConfig> {
    let rules = Rules::new(cli.pins, cli.turns).context("invalid --pins/--turns")?;
    let labels = cli
        .alphabet
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty());
    let alphabet = Alphabet::from_labels(labels).context("invalid --alphabet")?;

    let config = GameConfig::new(rules, alphabet, cli.seed);
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = build_config(&cli)?;
    tracing::debug!(
        pins = config.rules.code_length,
        turns = config.rules.turn_count,
        pegs = config.alphabet.len(),
        search_space = config.search_space(),
        "configuration ready"
    );

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => {
            let app = App::new(config, cli.debug)?;
            run_tui(app)
        }
        Commands::Simple => run_simple(config, cli.debug),
        Commands::Solve { code, details } => run_solve_command(code, details, &config),
        Commands::Benchmark { count } => {
            println!(
                "Running benchmark on {count} random codes ({} searchable)...",
                config.search_space()
            );
            let result = run_benchmark(&config, count, true)?;
            print_benchmark_result(&result);
            Ok(())
        }
    }
}

fn run_solve_command(code: String, details: bool, config: &GameConfig) -> Result<()> {
    let solve = SolveConfig::new(code, config);
    let result = solve_code(solve, config).context("cannot solve that code")?;
    print_solve_result(&result, &config.alphabet, details);
    Ok(())
}
