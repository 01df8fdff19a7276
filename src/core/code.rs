//! Code representation
//!
//! A Code is an ordered row of pegs: either a secret or a guess.

use super::{Alphabet, GameError, Peg};
use rand::Rng;
use std::fmt;

/// Longest code the engine can represent
pub const MAX_CODE_LENGTH: usize = 8;

/// An ordered, fixed-length sequence of pegs
///
/// Stored inline so codes are `Copy` and hash cheaply; slots past `len`
/// always hold `Peg::EMPTY`, which keeps the derived equality exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    pegs: [Peg; MAX_CODE_LENGTH],
    len: u8,
}

impl Code {
    /// Create a code from pegs of the given alphabet
    ///
    /// # Errors
    /// Returns `GameError::InvalidCode` if the row is empty, longer than
    /// `MAX_CODE_LENGTH`, or uses a peg the alphabet does not know.
    pub fn new(pegs: &[Peg], alphabet: &Alphabet) -> Result<Self, GameError> {
        if pegs.is_empty() || pegs.len() > MAX_CODE_LENGTH {
            return Err(GameError::InvalidCode(format!(
                "a code needs 1 to {MAX_CODE_LENGTH} pegs, got {}",
                pegs.len()
            )));
        }
        if let Some(bad) = pegs.iter().find(|&&p| !alphabet.contains(p)) {
            return Err(GameError::InvalidCode(format!(
                "peg #{} is not in the alphabet",
                bad.index()
            )));
        }
        Ok(Self::from_slice(pegs))
    }

    /// Build a code without alphabet checks
    ///
    /// Callers guarantee `1..=MAX_CODE_LENGTH` pegs.
    pub(crate) fn from_slice(pegs: &[Peg]) -> Self {
        debug_assert!(!pegs.is_empty() && pegs.len() <= MAX_CODE_LENGTH);
        let mut inline = [Peg::EMPTY; MAX_CODE_LENGTH];
        inline[..pegs.len()].copy_from_slice(pegs);
        Self {
            pegs: inline,
            len: pegs.len() as u8,
        }
    }

    /// Parse a code from text
    ///
    /// Whitespace- or comma-separated input is read as one label per peg.
    /// Otherwise, when every label is a single character, each character is a
    /// peg (`"ABCD"`). Lookups ignore ASCII case.
    ///
    /// # Errors
    /// Returns `GameError::InvalidCode` listing every unknown symbol.
    ///
    /// # Examples
    /// ```
    /// use mastermind::core::{Alphabet, Code};
    ///
    /// let alphabet = Alphabet::default();
    /// let code = Code::parse("abcd", &alphabet).unwrap();
    /// assert_eq!(code.display(&alphabet).to_string(), "ABCD");
    ///
    /// let spaced = Code::parse("A B C D", &alphabet).unwrap();
    /// assert_eq!(code, spaced);
    ///
    /// assert!(Code::parse("ABCZ", &alphabet).is_err());
    /// ```
    pub fn parse(text: &str, alphabet: &Alphabet) -> Result<Self, GameError> {
        let text = text.trim();
        let tokens: Vec<String> = if text.contains(|c: char| c.is_whitespace() || c == ',') {
            text.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        } else if alphabet.is_single_char() {
            text.chars().map(String::from).collect()
        } else {
            vec![text.to_string()]
        };

        if tokens.is_empty() {
            return Err(GameError::InvalidCode("no pegs given".to_string()));
        }

        let mut pegs = Vec::with_capacity(tokens.len());
        let mut unknown = String::new();
        for token in &tokens {
            match alphabet.get(token) {
                Some(peg) => pegs.push(peg),
                None => unknown.push_str(&format!("[{token}]")),
            }
        }

        if !unknown.is_empty() {
            return Err(GameError::InvalidCode(format!("unknown pegs {unknown}")));
        }

        Self::new(&pegs, alphabet)
    }

    /// Draw a random code of `length` pegs
    ///
    /// Every position is drawn independently and uniformly from the alphabet.
    /// Draws come from `Alphabet::pegs`, which never hands out `Peg::EMPTY`,
    /// so the sentinel cannot appear.
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfig` if the alphabet is empty, or
    /// `GameError::InvalidCode` if `length` is out of range.
    pub fn random<R: Rng + ?Sized>(
        alphabet: &Alphabet,
        length: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if alphabet.is_empty() {
            return Err(GameError::InvalidConfig(
                "cannot draw a code from an empty alphabet".to_string(),
            ));
        }
        if length == 0 || length > MAX_CODE_LENGTH {
            return Err(GameError::InvalidCode(format!(
                "a code needs 1 to {MAX_CODE_LENGTH} pegs, got {length}"
            )));
        }

        let choices = alphabet.pegs();
        let mut pegs = [Peg::EMPTY; MAX_CODE_LENGTH];
        for slot in pegs.iter_mut().take(length) {
            *slot = choices[rng.random_range(0..choices.len())];
        }

        Ok(Self::from_slice(&pegs[..length]))
    }

    /// Number of pegs in the code
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false for a constructed code; present for API symmetry
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The pegs of the code in order
    #[inline]
    #[must_use]
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs[..self.len()]
    }

    /// Get the peg at a position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn peg_at(&self, position: usize) -> Peg {
        self.pegs()[position]
    }

    /// Render the code with the alphabet's labels
    #[must_use]
    pub const fn display<'a>(&'a self, alphabet: &'a Alphabet) -> CodeDisplay<'a> {
        CodeDisplay {
            code: self,
            alphabet,
        }
    }
}

/// Borrowed view that prints a code through its alphabet
///
/// Single-character alphabets print compactly (`ABCD`); longer labels are
/// separated by spaces.
pub struct CodeDisplay<'a> {
    code: &'a Code,
    alphabet: &'a Alphabet,
}

impl fmt::Display for CodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.alphabet.is_single_char() { "" } else { " " };
        for (i, &peg) in self.code.pegs().iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            f.write_str(self.alphabet.label(peg))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn code(text: &str) -> Code {
        Code::parse(text, &Alphabet::default()).unwrap()
    }

    #[test]
    fn parse_compact_input() {
        let alphabet = Alphabet::default();
        let c = code("ABCD");
        assert_eq!(c.len(), 4);
        assert_eq!(c.peg_at(0), alphabet.get("A").unwrap());
        assert_eq!(c.peg_at(3), alphabet.get("D").unwrap());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(code("abcd"), code("ABCD"));
        assert_eq!(code("aBcD"), code("ABCD"));
    }

    #[test]
    fn parse_separated_input() {
        assert_eq!(code("A,B,C,D"), code("ABCD"));
        assert_eq!(code("  A B  C D "), code("ABCD"));
    }

    #[test]
    fn parse_multi_char_labels() {
        let alphabet = Alphabet::from_labels(["red", "green", "blue"]).unwrap();
        let c = Code::parse("red blue red", &alphabet).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.display(&alphabet).to_string(), "red blue red");
    }

    #[test]
    fn parse_reports_unknown_pegs() {
        let err = Code::parse("AXBY", &Alphabet::default()).unwrap_err();
        assert_eq!(err, GameError::InvalidCode("unknown pegs [X][Y]".to_string()));
    }

    #[test]
    fn parse_rejects_empty_and_oversized() {
        let alphabet = Alphabet::default();
        assert!(Code::parse("", &alphabet).is_err());
        assert!(Code::parse("ABCDEFABC", &alphabet).is_err());
    }

    #[test]
    fn new_rejects_foreign_pegs() {
        let small = Alphabet::from_labels(["A", "B"]).unwrap();
        let big = Alphabet::default();
        let f = big.get("F").unwrap();

        assert!(Code::new(&[f], &small).is_err());
        assert!(Code::new(&[Peg::EMPTY], &big).is_err());
    }

    #[test]
    fn equality_is_positional() {
        assert_eq!(code("AABB"), code("AABB"));
        assert_ne!(code("AABB"), code("ABAB"));
        assert_ne!(code("AAB"), code("AABB"));
    }

    #[test]
    fn random_code_uses_alphabet_pegs() {
        let alphabet = Alphabet::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let c = Code::random(&alphabet, 5, &mut rng).unwrap();
            assert_eq!(c.len(), 5);
            assert!(c.pegs().iter().all(|&p| alphabet.contains(p)));
            assert!(!c.pegs().contains(&Peg::EMPTY));
        }
    }

    #[test]
    fn random_code_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(Code::random(&Alphabet::empty(), 4, &mut rng).is_err());
        assert!(Code::random(&Alphabet::default(), 0, &mut rng).is_err());
        assert!(Code::random(&Alphabet::default(), MAX_CODE_LENGTH + 1, &mut rng).is_err());
    }

    #[test]
    fn display_round_trips_compact_text() {
        let alphabet = Alphabet::default();
        assert_eq!(code("FEDC").display(&alphabet).to_string(), "FEDC");
    }
}
