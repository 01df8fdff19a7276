//! Code solving command
//!
//! Lets the solver crack a known secret and records the path it took.

use crate::core::{Code, Feedback, GameConfig, GameError};
use crate::solver::Solver;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// Configuration for solving a code
pub struct SolveConfig {
    pub secret: String,
    pub max_guesses: usize,
}

impl SolveConfig {
    /// Solve `secret` within the turn budget of `config`
    #[must_use]
    pub const fn new(secret: String, config: &GameConfig) -> Self {
        Self {
            secret,
            max_guesses: config.rules.turn_count,
        }
    }
}

/// Result of solving a code
pub struct SolveResult {
    pub success: bool,
    pub guesses: Vec<GuessStep>,
    pub secret: Code,
    pub resets: usize,
}

/// A single guess step in the solution
pub struct GuessStep {
    pub code: Code,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Let the solver crack `solve.secret`, answering with truthful feedback
///
/// # Errors
///
/// Returns an error if the secret does not parse or has the wrong length,
/// or if the configuration cannot build a solver.
pub fn solve_code(solve: SolveConfig, config: &GameConfig) -> Result<SolveResult, GameError> {
    let secret = Code::parse(&solve.secret, &config.alphabet)?;
    if secret.len() != config.rules.code_length {
        return Err(GameError::InvalidCode(format!(
            "a code needs exactly {} pegs, got {}",
            config.rules.code_length,
            secret.len()
        )));
    }

    let rng = config
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut solver = Solver::new(&config.alphabet, config.rules.code_length, rng)?;
    play_out(&mut solver, secret, solve.max_guesses)
}

/// Drive `solver` against `secret` until it wins or `max_guesses` run out
pub(crate) fn play_out<R: Rng>(
    solver: &mut Solver<R>,
    secret: Code,
    max_guesses: usize,
) -> Result<SolveResult, GameError> {
    let mut guesses = Vec::new();

    for _ in 0..max_guesses {
        let candidates_before = solver.pool_size();
        let guess = solver.next_guess();
        let feedback = Feedback::calculate(&secret, &guess);

        if feedback.is_win(secret.len()) {
            guesses.push(GuessStep {
                code: guess,
                feedback,
                candidates_before,
                candidates_after: 1,
            });
            return Ok(SolveResult {
                success: true,
                guesses,
                secret,
                resets: solver.resets(),
            });
        }

        let summary = solver.observe(feedback)?;
        guesses.push(GuessStep {
            code: guess,
            feedback,
            candidates_before: summary.before,
            candidates_after: summary.after,
        });
    }

    Ok(SolveResult {
        success: false,
        guesses,
        secret,
        resets: solver.resets(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Alphabet, Rules};

    fn config(turn_count: usize) -> GameConfig {
        GameConfig::new(
            Rules::new(4, turn_count).unwrap(),
            Alphabet::default(),
            Some(5),
        )
    }

    #[test]
    fn solve_records_history() {
        let config = config(9);
        let result = solve_code(SolveConfig::new("ABCD".to_string(), &config), &config).unwrap();

        assert!(!result.guesses.is_empty());
        assert!(result.guesses.len() <= 9);
        for step in &result.guesses {
            assert!(step.candidates_after <= step.candidates_before);
        }
    }

    #[test]
    fn success_ends_on_the_secret() {
        let config = config(9);
        let result = solve_code(SolveConfig::new("FEED".to_string(), &config), &config).unwrap();

        if result.success {
            let last = result.guesses.last().unwrap();
            assert_eq!(last.code, result.secret);
            assert!(last.feedback.is_win(4));
        }
        assert_eq!(result.resets, 0);
    }

    #[test]
    fn respects_max_guesses() {
        let config = config(5);
        let mut solve = SolveConfig::new("ABCD".to_string(), &config);
        solve.max_guesses = 2;

        let result = solve_code(solve, &config).unwrap();
        assert!(result.guesses.len() <= 2);
    }

    #[test]
    fn rejects_invalid_secret() {
        let config = config(9);
        assert!(matches!(
            solve_code(SolveConfig::new("XYZW".to_string(), &config), &config),
            Err(GameError::InvalidCode(_))
        ));
        assert!(matches!(
            solve_code(SolveConfig::new("ABC".to_string(), &config), &config),
            Err(GameError::InvalidCode(_))
        ));
    }

    #[test]
    fn seeded_runs_repeat() {
        let config = config(9);
        let a = solve_code(SolveConfig::new("CAFE".to_string(), &config), &config).unwrap();
        let b = solve_code(SolveConfig::new("CAFE".to_string(), &config), &config).unwrap();

        let codes = |r: &SolveResult| r.guesses.iter().map(|s| s.code).collect::<Vec<_>>();
        assert_eq!(codes(&a), codes(&b));
    }
}
