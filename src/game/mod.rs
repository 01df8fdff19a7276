//! Two-phase game flow
//!
//! A round has the human crack the computer's secret, then the computer
//! crack the human's. The session enforces the turn budget and keeps score.

mod session;
mod turn;

pub use session::GameSession;
pub use turn::{Outcome, Phase, Score, Side, Turn};
