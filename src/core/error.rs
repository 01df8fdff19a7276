//! Error type shared by the whole game core

use thiserror::Error;

/// Every way a core operation can refuse to apply
///
/// All variants are local validation failures: the operation that returned
/// one has not changed any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Wrong length, unknown peg symbol, or unparseable code text
    #[error("invalid code: {0}")]
    InvalidCode(String),

    /// Feedback counts out of range for the configured code length
    #[error("invalid feedback: {0}")]
    InvalidFeedback(String),

    /// The phase already holds its full budget of turns
    #[error("turn limit of {0} reached for this phase")]
    TurnLimitExceeded(usize),

    /// A peg with this name is already registered
    #[error("peg '{0}' already exists")]
    DuplicatePeg(String),

    /// Operation does not belong to the current phase
    #[error("cannot {action} while {phase}")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    /// The phase was already won or lost
    #[error("this phase is already over")]
    PhaseResolved,

    /// Feedback arrived but the computer has no guess outstanding
    #[error("the computer has not made a guess yet")]
    NoPendingGuess,

    /// Rules or alphabet out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
