//! Phase, turn and score value types

use crate::core::{Code, Feedback};
use std::fmt;

/// Where a session is in its round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    /// The computer holds the secret
    HumanGuessing,
    /// The human holds the secret
    ComputerGuessing,
    Complete,
}

impl Phase {
    /// The side making guesses in this phase
    #[must_use]
    pub const fn guesser(self) -> Option<Side> {
        match self {
            Self::HumanGuessing => Some(Side::Human),
            Self::ComputerGuessing => Some(Side::Computer),
            Self::NotStarted | Self::Complete => None,
        }
    }

    /// Short description used in error messages
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NotStarted => "no round has started",
            Self::HumanGuessing => "the human is guessing",
            Self::ComputerGuessing => "the computer is guessing",
            Self::Complete => "the round is complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::HumanGuessing => "phase 1: human guessing",
            Self::ComputerGuessing => "phase 2: computer guessing",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    /// The other player
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Human => Self::Computer,
            Self::Computer => Self::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Computer => "computer",
        })
    }
}

/// State of the current phase after a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    /// The guesser cracked the code
    Won,
    /// The turn budget ran out
    Lost,
}

impl Outcome {
    /// Check if the phase is over
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A played turn: the guess, its feedback and where it left the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub code: Code,
    pub feedback: Feedback,
    pub outcome: Outcome,
}

/// Points per side across all rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub human: u32,
    pub computer: u32,
}

impl Score {
    /// Give one point to a side
    pub const fn award(&mut self, side: Side) {
        match side {
            Side::Human => self.human += 1,
            Side::Computer => self.computer += 1,
        }
    }

    /// Points of one side
    #[must_use]
    pub const fn of(self, side: Side) -> u32 {
        match side {
            Side::Human => self.human,
            Side::Computer => self.computer,
        }
    }

    /// `(human, computer)`
    #[must_use]
    pub const fn as_pair(self) -> (u32, u32) {
        (self.human, self.computer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guessers_by_phase() {
        assert_eq!(Phase::HumanGuessing.guesser(), Some(Side::Human));
        assert_eq!(Phase::ComputerGuessing.guesser(), Some(Side::Computer));
        assert_eq!(Phase::NotStarted.guesser(), None);
        assert_eq!(Phase::Complete.guesser(), None);
    }

    #[test]
    fn opponents() {
        assert_eq!(Side::Human.opponent(), Side::Computer);
        assert_eq!(Side::Computer.opponent(), Side::Human);
    }

    #[test]
    fn score_awards() {
        let mut score = Score::default();
        score.award(Side::Human);
        score.award(Side::Computer);
        score.award(Side::Computer);

        assert_eq!(score.as_pair(), (1, 2));
        assert_eq!(score.of(Side::Computer), 2);
    }

    #[test]
    fn outcome_resolution() {
        assert!(!Outcome::InProgress.is_resolved());
        assert!(Outcome::Won.is_resolved());
        assert!(Outcome::Lost.is_resolved());
    }
}
