//! TUI application state and logic

use crate::core::{Feedback, GameConfig, GameError};
use crate::game::{GameSession, Outcome, Phase};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Messages kept on screen
const MESSAGE_LIMIT: usize = 6;

/// Application state
pub struct App {
    pub session: GameSession,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub debug: bool,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing a guess at the computer's secret
    Guess,
    /// Typing feedback for the computer's guess
    Feedback,
    /// Debug mode: optionally typing the human's secret before phase 2
    SecretEntry,
    /// Human phase over, waiting to hand over
    PhaseOver,
    /// Round over, waiting for a new round or quit
    RoundOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    /// Create the app and start the first round
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot start a game.
    pub fn new(config: GameConfig, debug: bool) -> Result<Self, GameError> {
        let mut session = GameSession::new(config)?;
        session.start_round()?;

        let mut app = Self {
            session,
            input_mode: InputMode::Guess,
            input_buffer: String::new(),
            messages: Vec::new(),
            debug,
            should_quit: false,
        };
        app.add_message(
            "Phase 1: crack my code. Type a guess and press Enter.",
            MessageStyle::Info,
        );
        Ok(app)
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MESSAGE_LIMIT {
            self.messages.remove(0);
        }
    }

    /// Submit the input buffer as a guess or as feedback
    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        match self.input_mode {
            InputMode::Guess => self.handle_guess(&input),
            InputMode::Feedback => self.handle_feedback(&input),
            InputMode::SecretEntry => self.handle_secret(&input),
            InputMode::PhaseOver | InputMode::RoundOver => {}
        }
    }

    pub fn handle_guess(&mut self, input: &str) {
        let result = self
            .session
            .parse_code(input)
            .and_then(|code| self.session.submit_guess(code));

        match result {
            Ok(feedback) => {
                if self.session.outcome() == Outcome::InProgress {
                    self.add_message(
                        &format!("{feedback} ({} turns left)", self.session.turns_left()),
                        MessageStyle::Info,
                    );
                } else {
                    self.end_human_phase();
                }
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn end_human_phase(&mut self) {
        let secret = self.secret_label();
        if self.session.outcome() == Outcome::Won {
            self.add_message(&format!("🎉 You cracked {secret}!"), MessageStyle::Success);
        } else {
            self.add_message(
                &format!("Out of turns! My code was {secret}"),
                MessageStyle::Error,
            );
        }
        self.add_message(
            "Press Enter: now think of a code for me to crack.",
            MessageStyle::Info,
        );
        self.input_mode = InputMode::PhaseOver;
    }

    /// Hand the guessing over to the computer
    ///
    /// In debug mode the human may first type their secret so answers can be
    /// checked against it.
    pub fn start_computer_phase(&mut self) {
        if let Err(e) = self.session.start_computer_phase() {
            self.add_message(&e.to_string(), MessageStyle::Error);
            return;
        }
        if self.debug {
            self.input_mode = InputMode::SecretEntry;
            self.add_message(
                "Debug: type your code to check your answers, or Enter to skip.",
                MessageStyle::Info,
            );
            return;
        }
        self.begin_feedback();
    }

    pub fn handle_secret(&mut self, input: &str) {
        if !input.trim().is_empty() {
            let result = self
                .session
                .parse_code(input)
                .and_then(|code| self.session.set_code(code.pegs()));
            if let Err(e) = result {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        }
        self.begin_feedback();
    }

    fn begin_feedback(&mut self) {
        self.input_mode = InputMode::Feedback;
        self.add_message(
            "Phase 2: answer each guess with 'exact,color'.",
            MessageStyle::Info,
        );
        self.ask_computer();
    }

    fn ask_computer(&mut self) {
        match self.session.next_computer_guess() {
            Ok(guess) => {
                let text = guess.display(self.session.alphabet()).to_string();
                self.add_message(&format!("My guess: {text}"), MessageStyle::Info);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    pub fn handle_feedback(&mut self, input: &str) {
        let code_length = self.session.rules().code_length;
        let feedback = match Feedback::parse(input, code_length) {
            Ok(feedback) => feedback,
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        };

        let result = self
            .session
            .submit_external_feedback(feedback.exact(), feedback.color_only());
        if let Err(e) = result {
            self.add_message(&e.to_string(), MessageStyle::Error);
            return;
        }

        match self.session.outcome() {
            Outcome::InProgress => {
                if self.session.last_filter().is_some_and(|s| s.reset) {
                    self.add_message(
                        "No code fits all your answers. Starting over.",
                        MessageStyle::Error,
                    );
                }
                self.ask_computer();
            }
            Outcome::Won => self.end_round("🤖 Got it! I cracked your code.", MessageStyle::Success),
            Outcome::Lost => self.end_round("I ran out of turns. You win this phase!", MessageStyle::Success),
        }
    }

    fn end_round(&mut self, text: &str, style: MessageStyle) {
        self.add_message(text, style);
        if let Err(e) = self.session.finish_round() {
            self.add_message(&e.to_string(), MessageStyle::Error);
            return;
        }
        self.add_message("Press 'n' for a new round or 'q' to quit.", MessageStyle::Info);
        self.input_mode = InputMode::RoundOver;
    }

    pub fn new_round(&mut self) {
        if let Err(e) = self.session.start_round() {
            self.add_message(&e.to_string(), MessageStyle::Error);
            return;
        }
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Guess;
        self.add_message(
            &format!("Round {}: crack my code.", self.session.round()),
            MessageStyle::Info,
        );
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        let state = if self.debug { "on" } else { "off" };
        self.add_message(&format!("Debug mode {state}"), MessageStyle::Info);
    }

    /// The current secret as text, or a placeholder
    #[must_use]
    pub fn secret_label(&self) -> String {
        self.session.secret().map_or_else(
            || "?".repeat(self.session.rules().code_length),
            |c| c.display(self.session.alphabet()).to_string(),
        )
    }

    /// Whether the secret may be shown
    #[must_use]
    pub fn reveal_secret(&self) -> bool {
        self.debug
            || (self.session.phase() == Phase::HumanGuessing && self.session.outcome().is_resolved())
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match (key.code, app.input_mode) {
                (KeyCode::Char('c'), _) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                (KeyCode::Esc, _) => app.should_quit = true,
                (KeyCode::Tab, _) => app.toggle_debug(),
                (KeyCode::Enter, InputMode::PhaseOver) => app.start_computer_phase(),
                (KeyCode::Char('q'), InputMode::PhaseOver | InputMode::RoundOver) => {
                    app.should_quit = true;
                }
                (KeyCode::Char('n'), InputMode::RoundOver) => app.new_round(),
                (
                    KeyCode::Char(c),
                    InputMode::Guess | InputMode::Feedback | InputMode::SecretEntry,
                ) => {
                    app.input_buffer.push(c);
                }
                (
                    KeyCode::Backspace,
                    InputMode::Guess | InputMode::Feedback | InputMode::SecretEntry,
                ) => {
                    app.input_buffer.pop();
                }
                (
                    KeyCode::Enter,
                    InputMode::Guess | InputMode::Feedback | InputMode::SecretEntry,
                ) => app.submit_input(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
