//! Candidate pool: every code still consistent with the feedback so far

use crate::core::{Alphabet, Code, Feedback, GameError, MAX_CODE_LENGTH, Peg};
use rustc_hash::FxHashSet;

/// Candidates scanned between two progress heartbeats
pub const HEARTBEAT_INTERVAL: usize = 5000;

/// Heartbeat emitted while a filtering pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterProgress {
    /// Candidates examined so far in this pass
    pub scanned: usize,
    /// Candidates the pass started with
    pub total: usize,
}

/// Outcome of one filtering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    /// Pool size before the pass
    pub before: usize,
    /// Pool size after the pass (after any reset)
    pub after: usize,
    /// The pass emptied the pool and it was refilled with the full product
    pub reset: bool,
}

/// Enumerate every code of `length` pegs over `pegs`
///
/// Recursive Cartesian product: the last free position is fixed to each peg
/// in turn and the remaining prefix is filled recursively. Deterministic,
/// producing `pegs.len() ^ length` codes.
///
/// # Examples
/// ```
/// use mastermind::core::Alphabet;
/// use mastermind::solver::enumerate_codes;
///
/// let alphabet = Alphabet::from_labels(["A", "B", "C", "D"]).unwrap();
/// assert_eq!(enumerate_codes(&alphabet.pegs(), 4).len(), 256);
/// ```
#[must_use]
pub fn enumerate_codes(pegs: &[Peg], length: usize) -> Vec<Code> {
    if pegs.is_empty() || length == 0 || length > MAX_CODE_LENGTH {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(pegs.len().saturating_pow(length as u32));
    let mut scratch = [Peg::EMPTY; MAX_CODE_LENGTH];
    fill(length, pegs, &mut scratch[..length], &mut out);
    out
}

fn fill(remaining: usize, pegs: &[Peg], scratch: &mut [Peg], out: &mut Vec<Code>) {
    if remaining == 0 {
        out.push(Code::from_slice(scratch));
        return;
    }
    for &peg in pegs {
        scratch[remaining - 1] = peg;
        fill(remaining - 1, pegs, scratch, out);
    }
}

/// The set of codes consistent with every feedback observed this phase
///
/// Starts as the full product of the alphabet and only shrinks, except when a
/// pass would leave it empty: then it is refilled with the full product.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    pegs: Vec<Peg>,
    code_length: usize,
    members: Vec<Code>,
}

impl CandidatePool {
    /// Create a pool holding every code over the alphabet
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfig` if the alphabet is empty or the
    /// code length is outside `1..=MAX_CODE_LENGTH`.
    pub fn new(alphabet: &Alphabet, code_length: usize) -> Result<Self, GameError> {
        if alphabet.is_empty() {
            return Err(GameError::InvalidConfig(
                "cannot build a pool over an empty alphabet".to_string(),
            ));
        }
        if code_length == 0 || code_length > MAX_CODE_LENGTH {
            return Err(GameError::InvalidConfig(format!(
                "code length must be between 1 and {MAX_CODE_LENGTH}, got {code_length}"
            )));
        }

        let pegs = alphabet.pegs();
        let members = enumerate_codes(&pegs, code_length);
        Ok(Self {
            pegs,
            code_length,
            members,
        })
    }

    /// Number of candidates left
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if no candidate is left
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Size of the full product, `|alphabet| ^ code_length`
    #[must_use]
    pub fn full_size(&self) -> usize {
        self.pegs.len().saturating_pow(self.code_length as u32)
    }

    /// Pegs per candidate
    #[inline]
    #[must_use]
    pub const fn code_length(&self) -> usize {
        self.code_length
    }

    /// Read-only view of the remaining candidates
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[Code] {
        &self.members
    }

    /// Check if a code is still a candidate
    #[must_use]
    pub fn contains(&self, code: &Code) -> bool {
        self.members.contains(code)
    }

    /// Refill the pool with the full product
    pub fn reset(&mut self) {
        self.members = enumerate_codes(&self.pegs, self.code_length);
    }

    /// Drop every candidate inconsistent with `feedback` for `guess`
    ///
    /// A candidate survives iff `evaluate(guess, candidate) == feedback` and
    /// it is not in `attempted`. `on_progress` is called every
    /// `HEARTBEAT_INTERVAL` scanned candidates. If nothing survives, the pool
    /// is reset to the full product; the returned summary records that.
    pub fn filter<F>(
        &mut self,
        guess: &Code,
        feedback: Feedback,
        attempted: &FxHashSet<Code>,
        mut on_progress: F,
    ) -> FilterSummary
    where
        F: FnMut(FilterProgress),
    {
        let before = self.members.len();
        let mut scanned = 0;

        self.members.retain(|candidate| {
            scanned += 1;
            if scanned % HEARTBEAT_INTERVAL == 0 {
                tracing::trace!(scanned, total = before, "still filtering candidates");
                on_progress(FilterProgress {
                    scanned,
                    total: before,
                });
            }
            Feedback::calculate(guess, candidate) == feedback && !attempted.contains(candidate)
        });

        let reset = self.members.is_empty();
        if reset {
            tracing::warn!(
                %feedback,
                "no candidate fits the feedback so far, starting over from the full pool"
            );
            self.reset();
        }

        let summary = FilterSummary {
            before,
            after: self.members.len(),
            reset,
        };
        tracing::debug!(
            before = summary.before,
            after = summary.after,
            reset,
            "filtered candidate pool"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_colors() -> Alphabet {
        Alphabet::from_labels(["A", "B", "C", "D"]).unwrap()
    }

    fn code(text: &str, alphabet: &Alphabet) -> Code {
        Code::parse(text, alphabet).unwrap()
    }

    #[test]
    fn enumeration_is_exhaustive_and_unique() {
        let alphabet = four_colors();
        let codes = enumerate_codes(&alphabet.pegs(), 4);
        assert_eq!(codes.len(), 256);

        let unique: FxHashSet<Code> = codes.iter().copied().collect();
        assert_eq!(unique.len(), 256);
        assert!(codes.iter().all(|c| c.len() == 4));
    }

    #[test]
    fn enumeration_varies_the_last_position_slowest() {
        let alphabet = Alphabet::from_labels(["A", "B"]).unwrap();
        let codes: Vec<String> = enumerate_codes(&alphabet.pegs(), 2)
            .iter()
            .map(|c| c.display(&alphabet).to_string())
            .collect();
        assert_eq!(codes, ["AA", "BA", "AB", "BB"]);
    }

    #[test]
    fn enumeration_is_restartable() {
        let pegs = Alphabet::default().pegs();
        assert_eq!(enumerate_codes(&pegs, 3), enumerate_codes(&pegs, 3));
    }

    #[test]
    fn enumeration_degenerate_inputs() {
        assert!(enumerate_codes(&[], 4).is_empty());
        assert!(enumerate_codes(&Alphabet::default().pegs(), 0).is_empty());
    }

    #[test]
    fn new_pool_is_full_product() {
        let pool = CandidatePool::new(&Alphabet::default(), 4).unwrap();
        assert_eq!(pool.len(), 1296);
        assert_eq!(pool.full_size(), 1296);
    }

    #[test]
    fn new_pool_rejects_bad_input() {
        assert!(CandidatePool::new(&Alphabet::empty(), 4).is_err());
        assert!(CandidatePool::new(&Alphabet::default(), 0).is_err());
        assert!(CandidatePool::new(&Alphabet::default(), MAX_CODE_LENGTH + 1).is_err());
    }

    #[test]
    fn filter_keeps_the_secret_and_shrinks() {
        let alphabet = four_colors();
        let mut pool = CandidatePool::new(&alphabet, 4).unwrap();
        let secret = code("DCBA", &alphabet);
        let mut attempted = FxHashSet::default();

        let mut last = pool.len();
        for guess in ["AABB", "ABCD", "BCDA"] {
            let guess = code(guess, &alphabet);
            attempted.insert(guess);
            let feedback = Feedback::calculate(&secret, &guess);
            let summary = pool.filter(&guess, feedback, &attempted, |_| {});

            assert!(!summary.reset);
            assert!(summary.after <= last);
            assert!(pool.contains(&secret));
            last = summary.after;
        }
    }

    #[test]
    fn filter_removes_attempted_codes() {
        let alphabet = four_colors();
        let mut pool = CandidatePool::new(&alphabet, 4).unwrap();
        let guess = code("ABCD", &alphabet);
        let other = code("ABDC", &alphabet);
        let attempted: FxHashSet<Code> = [guess, other].into_iter().collect();

        // ABDC is consistent with (2,2) for ABCD but has already been tried
        let feedback = Feedback::new(2, 2, 4).unwrap();
        pool.filter(&guess, feedback, &attempted, |_| {});

        assert!(!pool.contains(&other));
        assert!(pool.members().iter().all(|c| !attempted.contains(c)));
        assert!(
            pool.members()
                .iter()
                .all(|c| Feedback::calculate(&guess, c) == feedback)
        );
    }

    #[test]
    fn contradictory_feedback_resets_the_pool() {
        let alphabet = four_colors();
        let mut pool = CandidatePool::new(&alphabet, 4).unwrap();
        let guess = code("ABCD", &alphabet);
        let attempted: FxHashSet<Code> = std::iter::once(guess).collect();

        // Three exact and one color-only is impossible
        let feedback = Feedback::new(3, 1, 4).unwrap();
        let summary = pool.filter(&guess, feedback, &attempted, |_| {});

        assert!(summary.reset);
        assert_eq!(summary.before, 256);
        assert_eq!(summary.after, 256);
        assert_eq!(pool.len(), pool.full_size());
    }

    #[test]
    fn winning_feedback_for_an_attempted_guess_resets() {
        let alphabet = four_colors();
        let mut pool = CandidatePool::new(&alphabet, 4).unwrap();
        let guess = code("ABCD", &alphabet);
        let attempted: FxHashSet<Code> = std::iter::once(guess).collect();

        let summary = pool.filter(&guess, Feedback::new(4, 0, 4).unwrap(), &attempted, |_| {});
        assert!(summary.reset);
    }

    #[test]
    fn heartbeat_fires_every_interval() {
        let alphabet = Alphabet::default();
        // 6^6 = 46656 candidates → 9 heartbeats
        let mut pool = CandidatePool::new(&alphabet, 6).unwrap();
        let guess = code("AABBCC", &alphabet);
        let attempted = FxHashSet::default();

        let mut beats = Vec::new();
        pool.filter(&guess, Feedback::new(0, 0, 6).unwrap(), &attempted, |p| {
            beats.push(p);
        });

        assert_eq!(beats.len(), 46656 / HEARTBEAT_INTERVAL);
        assert_eq!(beats[0].scanned, HEARTBEAT_INTERVAL);
        assert!(beats.iter().all(|p| p.total == 46656));
    }

    #[test]
    fn small_pass_has_no_heartbeat() {
        let alphabet = four_colors();
        let mut pool = CandidatePool::new(&alphabet, 4).unwrap();
        let guess = code("ABCD", &alphabet);
        let mut beats = 0;
        pool.filter(&guess, Feedback::ZERO, &FxHashSet::default(), |_| beats += 1);
        assert_eq!(beats, 0);
    }
}
