//! Simple interactive CLI mode
//!
//! Text-based two-phase game without TUI

use crate::core::{Feedback, GameConfig};
use crate::game::{GameSession, Outcome, Side};
use crate::output::formatters::feedback_markers;
use crate::output::{code_label, print_alphabet, print_board, print_score};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

/// What a prompt produced after special commands were handled
enum Input {
    Line(String),
    Exit,
}

struct Console {
    session: GameSession,
    debug: bool,
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading from stdin or writing to stdout fails, or if
/// the configuration cannot start a game.
pub fn run_simple(config: GameConfig, debug: bool) -> Result<()> {
    let session = GameSession::new(config).context("invalid game configuration")?;
    let mut console = Console { session, debug };

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Mastermind - Console Mode                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let rules = console.session.rules();
    println!(
        "Each round has two phases. First you crack my code of {} pegs,",
        rules.code_length
    );
    println!(
        "then I crack yours. Each side gets {} guesses.\n",
        rules.turn_count
    );
    print_alphabet(console.session.alphabet());
    println!("\nFeedback is given as 'exact,color': pegs in the right spot, then right");
    println!("pegs in the wrong spot. Type 'x' to quit or 'd' to toggle debug mode.\n");

    console.run()?;
    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

impl Console {
    fn run(&mut self) -> Result<()> {
        loop {
            self.session.start_round()?;
            println!(
                "\n{}",
                format!("═══ Round {} ═══", self.session.round())
                    .bright_cyan()
                    .bold()
            );

            if !self.human_phase()? {
                return Ok(());
            }
            self.session.start_computer_phase()?;
            if !self.computer_phase()? {
                return Ok(());
            }
            self.session.finish_round()?;

            println!();
            print_score(self.session.score());
            match self.ask("Play another round? (yes/no)")? {
                Input::Line(answer) if matches!(answer.to_lowercase().as_str(), "yes" | "y") => {}
                _ => return Ok(()),
            }
        }
    }

    /// Returns `false` if the player quit
    fn human_phase(&mut self) -> Result<bool> {
        println!("\n{}", "Phase 1: crack my code".bright_white().bold());
        let code_length = self.session.rules().code_length;

        while !self.session.outcome().is_resolved() {
            let prompt = format!(
                "Guess #{} ({} left)",
                self.session.board().len() + 1,
                self.session.turns_left()
            );
            let Input::Line(line) = self.ask(&prompt)? else {
                return Ok(false);
            };

            let result = self
                .session
                .parse_code(&line)
                .and_then(|code| self.session.submit_guess(code));
            match result {
                Ok(feedback) => println!(
                    "   {}  {}",
                    feedback_markers(feedback, code_length).bright_yellow(),
                    format!("({feedback})").bright_black()
                ),
                Err(e) => println!("{}", format!("❌ {e}").red()),
            }
        }

        let secret = self
            .session
            .secret()
            .map(|c| code_label(&c, self.session.alphabet()))
            .unwrap_or_default();
        if self.session.outcome() == Outcome::Won {
            println!(
                "\n{} {}",
                "🎉 You cracked it:".bright_green().bold(),
                secret.bright_white().bold()
            );
        } else {
            println!(
                "\n{} {}",
                "Out of turns! My code was".red().bold(),
                secret.bright_white().bold()
            );
        }
        print_score(self.session.score());
        Ok(true)
    }

    /// Returns `false` if the player quit
    fn computer_phase(&mut self) -> Result<bool> {
        println!("\n{}", "Phase 2: I crack your code".bright_white().bold());
        let code_length = self.session.rules().code_length;
        println!("Think of a code of {code_length} pegs.");
        print_alphabet(self.session.alphabet());

        if self.debug {
            let Input::Line(line) = self.ask("Enter it to let me check your feedback (blank to skip)")?
            else {
                return Ok(false);
            };
            if !line.is_empty() {
                match self.session.parse_code(&line) {
                    Ok(code) => self.session.set_code(code.pegs())?,
                    Err(e) => println!("{}", format!("❌ {e}, keeping it secret").red()),
                }
            }
        }

        while !self.session.outcome().is_resolved() {
            let guess = self.session.next_computer_guess()?;
            println!(
                "\nMy guess #{}: {}",
                self.session.board().len() + 1,
                code_label(&guess, self.session.alphabet())
                    .bright_white()
                    .bold()
            );
            if let Some(expected) = self.session.expected_feedback().filter(|_| self.debug) {
                println!("{}", format!("   (truthful answer: {expected})").bright_black());
            }

            let Input::Line(line) = self.ask("Feedback (exact,color)")? else {
                return Ok(false);
            };
            let feedback = match Feedback::parse(&normalize_feedback(&line), code_length) {
                Ok(feedback) => feedback,
                Err(e) => {
                    println!("{}", format!("❌ {e}").red());
                    continue;
                }
            };

            self.submit_feedback(feedback)?;
        }

        if self.session.outcome() == Outcome::Won {
            println!("\n{}", "🤖 Got it!".bright_green().bold());
        } else {
            println!("\n{}", "I ran out of turns. You win this phase!".red().bold());
        }
        print_score(self.session.score());
        Ok(true)
    }

    fn submit_feedback(&mut self, feedback: Feedback) -> Result<()> {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("thinking...");

        let result = self.session.submit_external_feedback_with_progress(
            feedback.exact(),
            feedback.color_only(),
            |progress| {
                spinner.set_message(format!(
                    "thinking... {}/{}",
                    progress.scanned, progress.total
                ));
                spinner.tick();
            },
        );
        spinner.finish_and_clear();

        match result {
            Ok(_) => {
                if self.session.last_filter().is_some_and(|s| s.reset) {
                    println!(
                        "{}",
                        "🤔 No code fits all your answers. Starting over from scratch.".yellow()
                    );
                }
                if let Some(size) = self.session.pool_size().filter(|_| self.debug) {
                    let in_pool = match self.session.secret_in_pool() {
                        Some(true) => ", your code is still a candidate",
                        Some(false) => ", your code was ruled out: check your answers",
                        None => "",
                    };
                    println!(
                        "{}",
                        format!("   {size} candidates left{in_pool}").bright_black()
                    );
                }
            }
            Err(e) => println!("{}", format!("❌ {e}").red()),
        }
        Ok(())
    }

    /// Prompt for a line, handling special commands in place
    fn ask(&mut self, prompt: &str) -> Result<Input> {
        loop {
            let Some(line) = read_line(prompt)? else {
                return Ok(Input::Exit);
            };
            if self.handle_special(&line) {
                continue;
            }
            if matches!(line.to_lowercase().as_str(), "x" | "exit") {
                return Ok(Input::Exit);
            }
            return Ok(Input::Line(line));
        }
    }

    /// Run a debug special command; `false` means the line is ordinary input
    fn handle_special(&mut self, line: &str) -> bool {
        match line.to_lowercase().as_str() {
            "d" | "debug" => {
                self.debug = !self.debug;
                println!("Debug mode: {}", self.debug);
                true
            }
            "s" | "score" if self.debug => {
                print_score(self.session.score());
                true
            }
            "b" | "board" if self.debug => {
                print_board(
                    self.session.board(),
                    self.session.alphabet(),
                    self.session.rules().code_length,
                );
                true
            }
            "p" | "pins" if self.debug => {
                print_alphabet(self.session.alphabet());
                true
            }
            "c" | "code" if self.debug => {
                let code = self
                    .session
                    .secret()
                    .map_or_else(|| "(unknown)".to_string(), |c| {
                        code_label(&c, self.session.alphabet())
                    });
                let holder = match self.session.phase().guesser() {
                    Some(Side::Human) => "my code",
                    Some(Side::Computer) => "your code",
                    None => "code",
                };
                println!("  {holder}: {code}");
                true
            }
            _ => false,
        }
    }
}

/// Accept "2 1" as well as "2,1"
fn normalize_feedback(line: &str) -> String {
    if line.contains(',') {
        line.to_string()
    } else {
        line.split_whitespace().collect::<Vec<_>>().join(",")
    }
}

/// Read a trimmed line; `None` on end of input
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_separators() {
        assert_eq!(normalize_feedback("2,1"), "2,1");
        assert_eq!(normalize_feedback("2 1"), "2,1");
        assert_eq!(normalize_feedback("  3   0 "), "3,0");
    }

    #[test]
    fn normalized_feedback_parses() {
        let feedback = Feedback::parse(&normalize_feedback("1 2"), 4).unwrap();
        assert_eq!((feedback.exact(), feedback.color_only()), (1, 2));
    }

    #[test]
    fn debug_specials_need_debug_mode() {
        let session = GameSession::new(GameConfig::default()).unwrap();
        let mut console = Console {
            session,
            debug: false,
        };

        assert!(!console.handle_special("s"));
        assert!(console.handle_special("d"));
        assert!(console.debug);
        assert!(console.handle_special("score"));
        assert!(console.handle_special("P"));
        assert!(!console.handle_special("ABCD"));
    }
}
