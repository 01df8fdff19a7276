//! Feedback calculation and representation
//!
//! Feedback is the pair of counts reported after a guess:
//! - exact: pegs right in both color and position (black pins)
//! - color only: pegs of a right color in the wrong position (white pins)

use super::code::MAX_CODE_LENGTH;
use super::{Code, GameError, Peg};
use std::fmt;

/// Match report for one guess against one secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    exact: u8,
    color_only: u8,
}

impl Feedback {
    /// No matches at all
    pub const ZERO: Self = Self {
        exact: 0,
        color_only: 0,
    };

    /// Create feedback for a code of `code_length` pegs
    ///
    /// # Errors
    /// Returns `GameError::InvalidFeedback` if `exact + color_only` exceeds
    /// `code_length`.
    pub fn new(exact: usize, color_only: usize, code_length: usize) -> Result<Self, GameError> {
        let total = exact.checked_add(color_only);
        if total.is_none_or(|total| total > code_length) {
            return Err(GameError::InvalidFeedback(format!(
                "{exact} exact + {color_only} color-only exceeds {code_length} pegs"
            )));
        }
        Ok(Self {
            exact: exact as u8,
            color_only: color_only as u8,
        })
    }

    /// Compare a guess against a secret
    ///
    /// Codes of different lengths are not comparable and score `Feedback::ZERO`;
    /// length is expected to be validated before this point.
    ///
    /// # Algorithm
    /// 1. Exact pass: equal pegs in the same position count as exact and are
    ///    overwritten with `Peg::EMPTY` in working copies
    /// 2. Color pass: each remaining guess peg consumes the first equal,
    ///    unconsumed secret peg and counts as color-only
    ///
    /// Each peg is consumed at most once per side, so the result is the
    /// multiset intersection minus the exact matches and does not depend on
    /// scan order or on which argument is the secret.
    ///
    /// # Examples
    /// ```
    /// use mastermind::core::{Alphabet, Code, Feedback};
    ///
    /// let alphabet = Alphabet::default();
    /// let secret = Code::parse("ABCD", &alphabet).unwrap();
    /// let guess = Code::parse("ABDC", &alphabet).unwrap();
    ///
    /// let feedback = Feedback::calculate(&secret, &guess);
    /// assert_eq!(feedback.exact(), 2);
    /// assert_eq!(feedback.color_only(), 2);
    /// ```
    #[must_use]
    pub fn calculate(secret: &Code, guess: &Code) -> Self {
        let len = secret.len();
        if len == 0 || len != guess.len() {
            return Self::ZERO;
        }

        let mut secret_left = [Peg::EMPTY; MAX_CODE_LENGTH];
        let mut guess_left = [Peg::EMPTY; MAX_CODE_LENGTH];
        secret_left[..len].copy_from_slice(secret.pegs());
        guess_left[..len].copy_from_slice(guess.pegs());

        // First pass: exact position matches
        let mut exact = 0u8;
        for i in 0..len {
            if secret_left[i] == guess_left[i] {
                exact += 1;
                secret_left[i] = Peg::EMPTY;
                guess_left[i] = Peg::EMPTY;
            }
        }

        // Second pass: right color, wrong position
        let mut color_only = 0u8;
        for g in guess_left.iter_mut().take(len) {
            if g.is_sentinel() {
                continue;
            }
            if let Some(s) = secret_left[..len].iter_mut().find(|s| **s == *g) {
                color_only += 1;
                *s = Peg::EMPTY;
                *g = Peg::EMPTY;
            }
        }

        Self { exact, color_only }
    }

    /// Pegs right in color and position
    #[inline]
    #[must_use]
    pub const fn exact(self) -> usize {
        self.exact as usize
    }

    /// Pegs of a right color in the wrong position
    #[inline]
    #[must_use]
    pub const fn color_only(self) -> usize {
        self.color_only as usize
    }

    /// Check if this feedback solves a code of `code_length` pegs
    #[inline]
    #[must_use]
    pub const fn is_win(self, code_length: usize) -> bool {
        self.exact as usize >= code_length
    }

    /// Parse feedback from `"exact,color_only"` text, e.g. `"2,1"`
    ///
    /// # Errors
    /// Returns `GameError::InvalidFeedback` on malformed text, negative
    /// numbers, or counts over `code_length`.
    ///
    /// # Examples
    /// ```
    /// use mastermind::core::Feedback;
    ///
    /// let feedback = Feedback::parse("2,1", 4).unwrap();
    /// assert_eq!((feedback.exact(), feedback.color_only()), (2, 1));
    /// assert_eq!(feedback.to_string(), "2,1");
    ///
    /// assert!(Feedback::parse("3,2", 4).is_err());
    /// assert!(Feedback::parse("-1,0", 4).is_err());
    /// ```
    pub fn parse(text: &str, code_length: usize) -> Result<Self, GameError> {
        let format_error =
            || GameError::InvalidFeedback(format!("expected 'exact,color', got '{text}'"));

        let (exact, color_only) = text.trim().split_once(',').ok_or_else(format_error)?;
        let exact: i64 = exact.trim().parse().map_err(|_| format_error())?;
        let color_only: i64 = color_only.trim().parse().map_err(|_| format_error())?;

        if exact < 0 || color_only < 0 {
            return Err(GameError::InvalidFeedback(format!(
                "counts cannot be negative, got {exact},{color_only}"
            )));
        }

        Self::new(exact as usize, color_only as usize, code_length)
    }
}

/// Compare a guess against a secret
///
/// Free-function form of `Feedback::calculate`.
#[inline]
#[must_use]
pub fn evaluate(secret: &Code, guess: &Code) -> Feedback {
    Feedback::calculate(secret, guess)
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.exact, self.color_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Alphabet;
    use crate::solver::enumerate_codes;

    fn code(text: &str) -> Code {
        Code::parse(text, &Alphabet::default()).unwrap()
    }

    fn score(secret: &str, guess: &str) -> (usize, usize) {
        let f = evaluate(&code(secret), &code(guess));
        (f.exact(), f.color_only())
    }

    #[test]
    fn swapped_pair() {
        assert_eq!(score("ABCD", "ABDC"), (2, 2));
    }

    #[test]
    fn all_color_no_position() {
        assert_eq!(score("AABB", "BBAA"), (0, 4));
    }

    #[test]
    fn repeated_secret_peg_counts_once() {
        assert_eq!(score("AAAA", "ABCD"), (1, 0));
    }

    #[test]
    fn exact_match_takes_priority_over_color() {
        // The A in position 0 is exact; the extra A in the guess finds nothing left
        assert_eq!(score("ABCD", "AAEE"), (1, 0));
        // The exact A at position 1 uses the only A; the guess's first A gets nothing
        assert_eq!(score("CABD", "AAEE"), (1, 0));
        assert_eq!(score("BAAD", "AEEA"), (0, 2));
    }

    #[test]
    fn no_matches() {
        assert_eq!(score("AAAA", "BBBB"), (0, 0));
    }

    #[test]
    fn identical_codes_win() {
        for text in ["ABCD", "AAAA", "FEDC", "ABAB"] {
            let c = code(text);
            let f = evaluate(&c, &c);
            assert_eq!((f.exact(), f.color_only()), (4, 0));
            assert!(f.is_win(4));
        }
    }

    fn every_four_color_code() -> Vec<Code> {
        let alphabet = Alphabet::from_labels(["A", "B", "C", "D"]).unwrap();
        enumerate_codes(&alphabet.pegs(), 4)
    }

    #[test]
    fn evaluation_is_symmetric() {
        let codes = every_four_color_code();
        for a in &codes {
            for b in &codes {
                assert_eq!(evaluate(a, b), evaluate(b, a));
            }
        }
    }

    #[test]
    fn totals_never_exceed_length() {
        let codes = every_four_color_code();
        for a in &codes {
            for b in &codes {
                let f = evaluate(a, b);
                assert!(f.exact() + f.color_only() <= 4);
                assert_eq!(f.is_win(4), a == b);
            }
        }
    }

    #[test]
    fn length_mismatch_scores_zero() {
        assert_eq!(evaluate(&code("ABC"), &code("ABCD")), Feedback::ZERO);
        assert_eq!(evaluate(&code("ABCD"), &code("AB")), Feedback::ZERO);
    }

    #[test]
    fn inputs_are_not_modified() {
        let secret = code("ABCD");
        let guess = code("DCBA");
        let before = (secret, guess);
        let _ = evaluate(&secret, &guess);
        assert_eq!((secret, guess), before);
    }

    #[test]
    fn new_validates_total() {
        assert!(Feedback::new(2, 2, 4).is_ok());
        assert!(Feedback::new(4, 0, 4).is_ok());
        assert!(matches!(
            Feedback::new(3, 2, 4),
            Err(GameError::InvalidFeedback(_))
        ));
        assert!(Feedback::new(usize::MAX, 1, 4).is_err());
    }

    #[test]
    fn win_requires_all_exact() {
        assert!(Feedback::new(4, 0, 4).unwrap().is_win(4));
        assert!(!Feedback::new(3, 1, 4).unwrap().is_win(4));
        assert!(!Feedback::ZERO.is_win(4));
    }

    #[test]
    fn parse_valid_and_invalid() {
        assert_eq!(Feedback::parse(" 1 , 2 ", 4).unwrap(), Feedback::new(1, 2, 4).unwrap());
        assert!(Feedback::parse("12", 4).is_err());
        assert!(Feedback::parse("a,b", 4).is_err());
        assert!(Feedback::parse("1,2,3", 4).is_err());
        assert!(Feedback::parse("0,-1", 4).is_err());
        assert!(Feedback::parse("5,0", 4).is_err());
    }
}
