//! Peg symbols and the alphabet that registers them
//!
//! A `Peg` is a one-byte handle into an `Alphabet`. The alphabet owns the
//! human-readable labels; pegs themselves are `Copy` and cheap to compare,
//! which keeps codes small enough to enumerate the whole search space.

use super::GameError;
use rustc_hash::FxHashMap;
use std::fmt;

/// A single peg color, identified by its position in the `Alphabet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Peg(u8);

impl Peg {
    /// Reserved "no peg" marker
    ///
    /// Never handed out by an `Alphabet`. The feedback evaluator writes it over
    /// positions it has already matched, and unused slots of a `Code` hold it.
    pub const EMPTY: Self = Self(u8::MAX);

    /// Position of this peg in its alphabet
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the reserved sentinel
    #[inline]
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == u8::MAX
    }
}

/// Most symbols one alphabet can hold (one byte per peg, sentinel reserved)
pub const MAX_PEGS: usize = u8::MAX as usize;

/// Registry of valid peg symbols
///
/// Labels are unique ignoring ASCII case and lookups are case-insensitive,
/// so `"a"` finds the peg registered as `"A"`. The alphabet only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    labels: Vec<Box<str>>,
    lookup: FxHashMap<String, Peg>,
}

impl Alphabet {
    /// Labels of the standard six-color game
    pub const DEFAULT_LABELS: [&'static str; 6] = ["A", "B", "C", "D", "E", "F"];

    /// Create an alphabet with no symbols
    #[must_use]
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    /// Build an alphabet from a list of labels, in order
    ///
    /// # Errors
    /// Returns `GameError::DuplicatePeg` if a label repeats, or
    /// `GameError::InvalidConfig` if a label is malformed.
    ///
    /// # Examples
    /// ```
    /// use mastermind::core::Alphabet;
    ///
    /// let alphabet = Alphabet::from_labels(["red", "green", "blue"]).unwrap();
    /// assert_eq!(alphabet.len(), 3);
    /// assert!(Alphabet::from_labels(["red", "RED"]).is_err());
    /// ```
    pub fn from_labels<I, S>(labels: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut alphabet = Self::empty();
        for label in labels {
            alphabet.register(label.as_ref())?;
        }
        Ok(alphabet)
    }

    /// Register a new peg symbol and return its handle
    ///
    /// # Errors
    /// - `GameError::DuplicatePeg` if the label already exists (ignoring case)
    /// - `GameError::InvalidConfig` if the label is empty, contains whitespace
    ///   or a comma, or the alphabet is full
    pub fn register(&mut self, label: &str) -> Result<Peg, GameError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(GameError::InvalidConfig(
                "peg label cannot be empty".to_string(),
            ));
        }
        if label.chars().any(|c| c.is_whitespace() || c == ',') {
            return Err(GameError::InvalidConfig(format!(
                "peg label '{label}' cannot contain spaces or commas"
            )));
        }

        let key = label.to_ascii_uppercase();
        if self.lookup.contains_key(&key) {
            return Err(GameError::DuplicatePeg(label.to_string()));
        }
        if self.labels.len() >= MAX_PEGS {
            return Err(GameError::InvalidConfig(format!(
                "an alphabet holds at most {MAX_PEGS} pegs"
            )));
        }

        let peg = Peg(self.labels.len() as u8);
        self.labels.push(label.into());
        self.lookup.insert(key, peg);
        Ok(peg)
    }

    /// Number of registered symbols
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if no symbol has been registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All registered pegs in registration order
    #[must_use]
    pub fn pegs(&self) -> Vec<Peg> {
        (0..self.labels.len()).map(|i| Peg(i as u8)).collect()
    }

    /// Find a peg by label (ASCII case-insensitive)
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Peg> {
        self.lookup.get(&label.trim().to_ascii_uppercase()).copied()
    }

    /// Check if a peg belongs to this alphabet (the sentinel never does)
    #[inline]
    #[must_use]
    pub fn contains(&self, peg: Peg) -> bool {
        !peg.is_sentinel() && peg.index() < self.labels.len()
    }

    /// Label of a peg, or `""` for the sentinel and foreign pegs
    #[must_use]
    pub fn label(&self, peg: Peg) -> &str {
        self.labels.get(peg.index()).map_or("", |l| l)
    }

    /// Check if every label is a single character
    ///
    /// Such alphabets accept compact code input like `"ABCD"`.
    #[must_use]
    pub fn is_single_char(&self) -> bool {
        self.labels.iter().all(|l| l.chars().count() == 1)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let mut alphabet = Self::empty();
        for (i, label) in Self::DEFAULT_LABELS.iter().enumerate() {
            let peg = Peg(i as u8);
            alphabet.labels.push((*label).into());
            alphabet.lookup.insert((*label).to_string(), peg);
        }
        alphabet
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.labels {
            write!(f, "[{label}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alphabet_has_six_pegs() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 6);
        assert_eq!(alphabet.label(alphabet.get("A").unwrap()), "A");
        assert_eq!(alphabet.label(alphabet.get("F").unwrap()), "F");
        assert!(alphabet.is_single_char());
    }

    #[test]
    fn default_matches_from_labels() {
        let built = Alphabet::from_labels(Alphabet::DEFAULT_LABELS).unwrap();
        assert_eq!(built, Alphabet::default());
    }

    #[test]
    fn register_assigns_sequential_pegs() {
        let mut alphabet = Alphabet::empty();
        let red = alphabet.register("red").unwrap();
        let blue = alphabet.register("blue").unwrap();

        assert_eq!(red.index(), 0);
        assert_eq!(blue.index(), 1);
        assert_eq!(alphabet.pegs(), vec![red, blue]);
    }

    #[test]
    fn register_rejects_duplicates_ignoring_case() {
        let mut alphabet = Alphabet::default();
        assert_eq!(
            alphabet.register("a"),
            Err(GameError::DuplicatePeg("a".to_string()))
        );
        assert_eq!(alphabet.len(), 6);
    }

    #[test]
    fn register_rejects_malformed_labels() {
        let mut alphabet = Alphabet::empty();
        assert!(matches!(
            alphabet.register(""),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            alphabet.register("dark red"),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            alphabet.register("a,b"),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(alphabet.is_empty());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let alphabet = Alphabet::from_labels(["Red", "Blue"]).unwrap();
        assert_eq!(alphabet.get("red"), alphabet.get("RED"));
        assert_eq!(alphabet.label(alphabet.get("blue").unwrap()), "Blue");
        assert!(alphabet.get("green").is_none());
    }

    #[test]
    fn sentinel_is_never_a_member() {
        let alphabet = Alphabet::default();
        assert!(Peg::EMPTY.is_sentinel());
        assert!(!alphabet.contains(Peg::EMPTY));
        assert_eq!(alphabet.label(Peg::EMPTY), "");
        assert!(alphabet.pegs().iter().all(|p| !p.is_sentinel()));
    }

    #[test]
    fn display_lists_labels() {
        let alphabet = Alphabet::from_labels(["A", "B"]).unwrap();
        assert_eq!(alphabet.to_string(), "[A][B]");
    }
}
