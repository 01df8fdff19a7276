//! Display functions for command results and game state

use super::formatters::{create_progress_bar, feedback_markers};
use crate::commands::{BenchmarkResult, SolveResult};
use crate::core::{Alphabet, Code};
use crate::game::{Score, Turn};
use colored::Colorize;

/// Render a code as text
#[must_use]
pub fn code_label(code: &Code, alphabet: &Alphabet) -> String {
    code.display(alphabet).to_string()
}

/// Print the turns of the current phase, oldest first
pub fn print_board(board: &[Turn], alphabet: &Alphabet, code_length: usize) {
    if board.is_empty() {
        println!("{}", "  (no turns played yet)".bright_black());
        return;
    }

    for (i, turn) in board.iter().enumerate() {
        println!(
            "  {:>2}. {}  {}  {}",
            (i + 1).to_string().bright_black(),
            code_label(&turn.code, alphabet).bright_white().bold(),
            feedback_markers(turn.feedback, code_length).bright_yellow(),
            format!("({})", turn.feedback).bright_black()
        );
    }
}

/// Print the score line
pub fn print_score(score: Score) {
    println!(
        "  Score  human {}  computer {}",
        score.human.to_string().bright_green().bold(),
        score.computer.to_string().bright_red().bold()
    );
}

/// Print the pegs of an alphabet
pub fn print_alphabet(alphabet: &Alphabet) {
    println!("  Pegs: {}", alphabet.to_string().bright_cyan());
}

/// Print the result of solving a code
pub fn print_solve_result(result: &SolveResult, alphabet: &Alphabet, verbose: bool) {
    let code_length = result.secret.len();

    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        code_label(&result.secret, alphabet).bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.guesses.iter().enumerate() {
        println!(
            "\nTurn {}: {} {}",
            i + 1,
            code_label(&step.code, alphabet),
            feedback_markers(step.feedback, code_length)
        );

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.candidates_before, step.candidates_after
            );
            if step.candidates_after > 0 && step.candidates_after < step.candidates_before {
                let ratio = step.candidates_before as f64 / step.candidates_after as f64;
                println!("  Reduction:  {ratio:.1}x");
            }
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", result.guesses.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Failed to solve in {} guesses", result.guesses.len())
                .red()
                .bold()
        );
    }
    if result.resets > 0 {
        println!("{}", format!("   Pool refilled {} times", result.resets).yellow());
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", result.win_rate()).bright_green().bold()
    );
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        result.min_guesses.to_string().green()
    );
    println!(
        "   Worst case:       {}",
        result.max_guesses.to_string().yellow()
    );
    println!("   Pool resets:      {}", result.total_resets);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.distribution.is_empty() {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let longest = result.distribution.keys().copied().max().unwrap_or(0);
    for guess_count in 1..=longest {
        if let Some(&count) = result.distribution.get(&guess_count) {
            let pct = count as f64 / result.total_games as f64 * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {guess_count:>2}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }
}
