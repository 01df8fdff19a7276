//! Game rules and session configuration

use super::{Alphabet, GameError};

/// Fixed rules of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Pegs per code
    pub code_length: usize,
    /// Guesses allowed per phase before a forced loss
    pub turn_count: usize,
}

impl Rules {
    /// Shortest allowed code
    pub const MIN_CODE_LENGTH: usize = 2;
    /// Longest allowed code
    pub const MAX_CODE_LENGTH: usize = 6;
    /// Smallest allowed turn budget
    pub const MIN_TURN_COUNT: usize = 5;

    /// Create validated rules
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfig` if `code_length` is outside
    /// `2..=6` or `turn_count` is below 5.
    pub fn new(code_length: usize, turn_count: usize) -> Result<Self, GameError> {
        let rules = Self {
            code_length,
            turn_count,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Check the rules are in range
    ///
    /// # Errors
    /// See [`Rules::new`].
    pub fn validate(&self) -> Result<(), GameError> {
        if !(Self::MIN_CODE_LENGTH..=Self::MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(GameError::InvalidConfig(format!(
                "code length must be between {} and {}, got {}",
                Self::MIN_CODE_LENGTH,
                Self::MAX_CODE_LENGTH,
                self.code_length
            )));
        }
        if self.turn_count < Self::MIN_TURN_COUNT {
            return Err(GameError::InvalidConfig(format!(
                "turn count must be at least {}, got {}",
                Self::MIN_TURN_COUNT,
                self.turn_count
            )));
        }
        Ok(())
    }
}

impl Default for Rules {
    /// Four pegs, nine turns
    fn default() -> Self {
        Self {
            code_length: 4,
            turn_count: 9,
        }
    }
}

/// Everything needed to start a `GameSession`
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    pub rules: Rules,
    pub alphabet: Alphabet,
    /// Seed for secrets and computer guesses; `None` draws from the OS
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Largest search space a solver is allowed to enumerate
    pub const MAX_SEARCH_SPACE: usize = 1 << 24;

    /// Create a configuration
    #[must_use]
    pub const fn new(rules: Rules, alphabet: Alphabet, seed: Option<u64>) -> Self {
        Self {
            rules,
            alphabet,
            seed,
        }
    }

    /// Check rules and alphabet
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfig` if the rules are out of range, the
    /// alphabet is empty, or the search space exceeds `MAX_SEARCH_SPACE`.
    pub fn validate(&self) -> Result<(), GameError> {
        self.rules.validate()?;
        if self.alphabet.is_empty() {
            return Err(GameError::InvalidConfig(
                "the alphabet needs at least one peg".to_string(),
            ));
        }
        if self.search_space() > Self::MAX_SEARCH_SPACE {
            return Err(GameError::InvalidConfig(format!(
                "{} pegs over {} symbols is too many codes to search",
                self.rules.code_length,
                self.alphabet.len()
            )));
        }
        Ok(())
    }

    /// Size of the full search space, `|alphabet| ^ code_length`
    #[must_use]
    pub fn search_space(&self) -> usize {
        self.alphabet
            .len()
            .saturating_pow(self.rules.code_length as u32)
    }
}
