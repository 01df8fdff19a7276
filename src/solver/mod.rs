//! Code-breaking solver
//!
//! The candidate pool and the solver that draws guesses from it.

mod engine;
mod pool;

pub use engine::Solver;
pub use pool::{
    CandidatePool, FilterProgress, FilterSummary, HEARTBEAT_INTERVAL, enumerate_codes,
};
