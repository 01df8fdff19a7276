//! Main code-breaking solver

use super::pool::{CandidatePool, FilterProgress, FilterSummary};
use crate::core::{Alphabet, Code, Feedback, GameError};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, IteratorRandom};
use rustc_hash::FxHashSet;

/// Deduces a hidden code from feedback alone
///
/// Owns its candidate pool exclusively. Each guess is drawn uniformly at
/// random from the candidates not yet tried; there is no attempt at
/// optimal (minimax) play.
pub struct Solver<R: Rng = StdRng> {
    pool: CandidatePool,
    attempted: FxHashSet<Code>,
    pending: Option<Code>,
    resets: usize,
    rng: R,
}

impl<R: Rng> Solver<R> {
    /// Create a solver over every code of `code_length` pegs
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfig` if the pool cannot be built.
    pub fn new(alphabet: &Alphabet, code_length: usize, rng: R) -> Result<Self, GameError> {
        let pool = CandidatePool::new(alphabet, code_length)?;
        tracing::debug!(candidates = pool.len(), "solver ready");
        Ok(Self {
            pool,
            attempted: FxHashSet::default(),
            pending: None,
            resets: 0,
            rng,
        })
    }

    /// Pick the next guess and mark it attempted
    ///
    /// Draws uniformly from pool members never guessed before. If every
    /// member has been tried the pool is refilled first; if even the full
    /// product has been tried, any code may be repeated.
    ///
    /// The pick becomes the pending guess that the next `observe` call
    /// scores, replacing any earlier unscored pick.
    pub fn next_guess(&mut self) -> Code {
        let guess = match self.pick_untried() {
            Some(code) => code,
            None => {
                tracing::warn!("every candidate has been tried, refilling the pool");
                self.pool.reset();
                self.resets += 1;
                self.pick_untried()
                    .or_else(|| self.pool.members().choose(&mut self.rng).copied())
                    .unwrap_or_else(|| self.pool.members()[0])
            }
        };

        self.attempted.insert(guess);
        self.pending = Some(guess);
        guess
    }

    fn pick_untried(&mut self) -> Option<Code> {
        let attempted = &self.attempted;
        self.pool
            .members()
            .iter()
            .filter(|c| !attempted.contains(c))
            .choose(&mut self.rng)
            .copied()
    }

    /// Narrow the pool with the feedback for the pending guess
    ///
    /// # Errors
    /// Returns `GameError::NoPendingGuess` if no guess is outstanding.
    pub fn observe(&mut self, feedback: Feedback) -> Result<FilterSummary, GameError> {
        self.observe_with_progress(feedback, |_| {})
    }

    /// Like [`Solver::observe`], reporting filter heartbeats to `on_progress`
    ///
    /// # Errors
    /// Returns `GameError::NoPendingGuess` if no guess is outstanding.
    pub fn observe_with_progress<F>(
        &mut self,
        feedback: Feedback,
        on_progress: F,
    ) -> Result<FilterSummary, GameError>
    where
        F: FnMut(FilterProgress),
    {
        let guess = self.pending.take().ok_or(GameError::NoPendingGuess)?;
        let summary = self
            .pool
            .filter(&guess, feedback, &self.attempted, on_progress);
        if summary.reset {
            self.resets += 1;
        }
        Ok(summary)
    }

    /// The guess waiting for feedback, if any
    #[inline]
    #[must_use]
    pub const fn pending_guess(&self) -> Option<Code> {
        self.pending
    }

    /// Read-only view of the candidate pool
    #[inline]
    #[must_use]
    pub const fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Number of candidates left
    #[inline]
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Number of distinct codes guessed so far
    #[inline]
    #[must_use]
    pub fn attempted_count(&self) -> usize {
        self.attempted.len()
    }

    /// Check if a code has already been guessed
    #[inline]
    #[must_use]
    pub fn was_attempted(&self, code: &Code) -> bool {
        self.attempted.contains(code)
    }

    /// How many times the pool was refilled from scratch
    #[inline]
    #[must_use]
    pub const fn resets(&self) -> usize {
        self.resets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn four_colors() -> Alphabet {
        Alphabet::from_labels(["A", "B", "C", "D"]).unwrap()
    }

    fn setup_solver(seed: u64) -> (Alphabet, Solver) {
        let alphabet = four_colors();
        let solver = Solver::new(&alphabet, 4, StdRng::seed_from_u64(seed)).unwrap();
        (alphabet, solver)
    }

    fn code(text: &str, alphabet: &Alphabet) -> Code {
        Code::parse(text, alphabet).unwrap()
    }

    #[test]
    fn starts_with_full_pool() {
        let (_, solver) = setup_solver(1);
        assert_eq!(solver.pool_size(), 256);
        assert_eq!(solver.attempted_count(), 0);
        assert!(solver.pending_guess().is_none());
    }

    #[test]
    fn next_guess_marks_attempted() {
        let (_, mut solver) = setup_solver(2);
        let guess = solver.next_guess();

        assert!(solver.was_attempted(&guess));
        assert_eq!(solver.pending_guess(), Some(guess));
        assert!(solver.pool().contains(&guess));
    }

    #[test]
    fn guesses_never_repeat() {
        let (_, mut solver) = setup_solver(3);
        let mut seen = FxHashSet::default();
        for _ in 0..100 {
            assert!(seen.insert(solver.next_guess()));
        }
    }

    #[test]
    fn observe_without_guess_fails() {
        let (_, mut solver) = setup_solver(4);
        assert_eq!(
            solver.observe(Feedback::ZERO),
            Err(GameError::NoPendingGuess)
        );
    }

    #[test]
    fn observe_consumes_pending_guess() {
        let (alphabet, mut solver) = setup_solver(5);
        let secret = code("ABCD", &alphabet);
        let guess = solver.next_guess();
        solver.observe(Feedback::calculate(&secret, &guess)).unwrap();

        assert!(solver.pending_guess().is_none());
        assert!(solver.observe(Feedback::ZERO).is_err());
    }

    #[test]
    fn sole_candidate_is_picked_next() {
        let (alphabet, mut solver) = setup_solver(6);
        let secret = code("ABCD", &alphabet);

        // Drive the solver until its pool collapses to one candidate
        let mut guess = solver.next_guess();
        while guess != secret {
            let summary = solver.observe(Feedback::calculate(&secret, &guess)).unwrap();
            assert!(!summary.reset);
            if summary.after == 1 {
                assert_eq!(solver.pool().members(), &[secret]);
                assert_eq!(solver.next_guess(), secret);
                return;
            }
            guess = solver.next_guess();
        }
    }

    #[test]
    fn one_turn_leaving_one_candidate_picks_it() {
        let (alphabet, mut solver) = setup_solver(9);
        let guess = code("AABB", &alphabet);
        solver.attempted.insert(guess);
        solver.pending = Some(guess);

        // No position right, every color right: only BBAA fits
        let summary = solver.observe(Feedback::new(0, 4, 4).unwrap()).unwrap();
        assert_eq!(summary.before, 256);
        assert_eq!(summary.after, 1);
        assert_eq!(solver.next_guess(), code("BBAA", &alphabet));
    }

    #[test]
    fn pool_shrinks_and_keeps_secret_under_truthful_feedback() {
        for seed in 0..20 {
            let (alphabet, mut solver) = setup_solver(seed);
            let secret = code("DDAB", &alphabet);
            let mut last = solver.pool_size();

            for _ in 0..10 {
                let guess = solver.next_guess();
                let feedback = Feedback::calculate(&secret, &guess);
                if feedback.is_win(4) {
                    break;
                }
                let summary = solver.observe(feedback).unwrap();
                assert!(!summary.reset);
                assert!(summary.after <= last);
                assert!(solver.pool().contains(&secret));
                last = summary.after;
            }
        }
    }

    #[test]
    fn solves_every_secret_eventually() {
        let alphabet = four_colors();
        for (seed, text) in ["AAAA", "ABCD", "DCBA", "ABAB", "CCDD"].iter().enumerate() {
            let secret = code(text, &alphabet);
            let mut solver = Solver::new(&alphabet, 4, StdRng::seed_from_u64(seed as u64)).unwrap();

            let mut turns = 0;
            loop {
                turns += 1;
                let guess = solver.next_guess();
                let feedback = Feedback::calculate(&secret, &guess);
                if feedback.is_win(4) {
                    break;
                }
                solver.observe(feedback).unwrap();
                assert!(turns < 256, "solver failed to converge on {text}");
            }
        }
    }

    #[test]
    fn contradiction_triggers_reset() {
        let (_, mut solver) = setup_solver(7);
        solver.next_guess();
        let summary = solver.observe(Feedback::new(3, 1, 4).unwrap()).unwrap();

        assert!(summary.reset);
        assert_eq!(solver.pool_size(), 256);
        assert_eq!(solver.resets(), 1);
    }

    #[test]
    fn exhausted_product_still_yields_guesses() {
        let alphabet = Alphabet::from_labels(["A", "B"]).unwrap();
        let mut solver = Solver::new(&alphabet, 2, StdRng::seed_from_u64(8)).unwrap();

        let mut seen = FxHashSet::default();
        for _ in 0..4 {
            seen.insert(solver.next_guess());
        }
        assert_eq!(seen.len(), 4);

        // All four codes tried: the solver refills and repeats rather than failing
        let again = solver.next_guess();
        assert!(seen.contains(&again));
        assert!(solver.resets() >= 1);
    }

    #[test]
    fn seeded_solvers_agree() {
        let (_, mut a) = setup_solver(42);
        let (_, mut b) = setup_solver(42);
        for _ in 0..10 {
            assert_eq!(a.next_guess(), b.next_guess());
        }
    }
}
