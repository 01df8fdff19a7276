//! Benchmark command
//!
//! Tests solver performance across many random secrets.

use super::solve::play_out;
use crate::core::{Code, GameConfig, GameError};
use crate::solver::Solver;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_games: usize,
    pub wins: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Guesses needed per won game
    pub distribution: HashMap<usize, usize>,
    pub total_resets: usize,
    pub duration: Duration,
    pub games_per_second: f64,
}

impl BenchmarkResult {
    /// Share of games won, in percent
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total_games as f64 * 100.0
    }
}

/// Let the solver crack `count` random secrets
///
/// Secrets and solver draws all derive from `config.seed`, so seeded runs
/// repeat exactly. With `show_progress` a progress bar tracks the run.
///
/// # Errors
///
/// Returns an error if the configuration cannot produce secrets or a solver.
pub fn run_benchmark(
    config: &GameConfig,
    count: usize,
    show_progress: bool,
) -> Result<BenchmarkResult, GameError> {
    config.validate()?;
    let mut rng = config
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let pb = if show_progress {
        let pb = ProgressBar::new(count as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let mut wins = 0;
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut total_resets = 0;
    let mut distribution: HashMap<usize, usize> = HashMap::new();

    for game in 0..count {
        let secret = Code::random(&config.alphabet, config.rules.code_length, &mut rng)?;
        let mut solver = Solver::new(
            &config.alphabet,
            config.rules.code_length,
            StdRng::from_rng(&mut rng),
        )?;
        let result = play_out(&mut solver, secret, config.rules.turn_count)?;

        let guesses = result.guesses.len();
        total_guesses += guesses;
        min_guesses = min_guesses.min(guesses);
        max_guesses = max_guesses.max(guesses);
        total_resets += result.resets;
        if result.success {
            wins += 1;
            *distribution.entry(guesses).or_insert(0) += 1;
        }

        if game % 10 == 0 {
            let avg = total_guesses as f64 / (game + 1) as f64;
            pb.set_message(format!("Avg: {avg:.2}"));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");
    let duration = start.elapsed();
    tracing::info!(count, wins, ?duration, "benchmark finished");

    Ok(BenchmarkResult {
        total_games: count,
        wins,
        total_guesses,
        average_guesses: if count == 0 {
            0.0
        } else {
            total_guesses as f64 / count as f64
        },
        min_guesses: if count == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        total_resets,
        duration,
        games_per_second: count as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}
