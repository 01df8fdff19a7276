//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    code_label, print_alphabet, print_benchmark_result, print_board, print_score,
    print_solve_result,
};
