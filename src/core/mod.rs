//! Core domain types for Mastermind
//!
//! Pegs, codes, feedback and rules. Everything here is pure data plus the
//! feedback evaluator; no I/O and no randomness beyond an injected `Rng`.

mod code;
mod config;
mod error;
mod feedback;
mod peg;

pub use code::{Code, CodeDisplay, MAX_CODE_LENGTH};
pub use config::{GameConfig, Rules};
pub use error::GameError;
pub use feedback::{Feedback, evaluate};
pub use peg::{Alphabet, MAX_PEGS, Peg};
