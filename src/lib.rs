//! Mastermind
//!
//! A two-phase Mastermind game: the human cracks the computer's code, then the
//! computer cracks the human's by narrowing a pool of candidate codes.
//!
//! # Quick Start
//!
//! ```rust
//! use mastermind::core::{Alphabet, Code, Feedback};
//!
//! let alphabet = Alphabet::default();
//! let secret = Code::parse("ABCD", &alphabet).unwrap();
//! let guess = Code::parse("ABDC", &alphabet).unwrap();
//!
//! let feedback = Feedback::calculate(&secret, &guess);
//! assert_eq!((feedback.exact(), feedback.color_only()), (2, 2));
//! ```

// Core domain types
pub mod core;

// Candidate pool and solver
pub mod solver;

// Session, turns and score
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Logging setup
pub mod telemetry;
