//! Game session: the two-phase round, turn budget and score

use super::turn::{Outcome, Phase, Score, Turn};
use crate::core::{Alphabet, Code, Feedback, GameConfig, GameError, Peg, Rules};
use crate::solver::{FilterProgress, FilterSummary, Solver};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One playthrough between a human and the computer
///
/// Each round has two phases. In the first the session draws a random secret
/// and scores the human's guesses against it. In the second a `Solver` makes
/// the guesses and the human reports feedback. The session owns the board of
/// the current phase; callers only ever see read-only snapshots.
///
/// ```
/// use mastermind::core::{Code, GameConfig};
/// use mastermind::game::{GameSession, Phase};
///
/// let mut session = GameSession::new(GameConfig::default()).unwrap();
/// session.start_round().unwrap();
/// assert_eq!(session.phase(), Phase::HumanGuessing);
///
/// let guess = session.parse_code("ABCD").unwrap();
/// let feedback = session.submit_guess(guess).unwrap();
/// assert!(feedback.exact() + feedback.color_only() <= 4);
/// assert_eq!(session.board().len(), 1);
/// ```
pub struct GameSession {
    rules: Rules,
    alphabet: Alphabet,
    phase: Phase,
    outcome: Outcome,
    board: Vec<Turn>,
    secret: Option<Code>,
    score: Score,
    solver: Option<Solver<StdRng>>,
    last_filter: Option<FilterSummary>,
    round: u32,
    rng: StdRng,
}

impl GameSession {
    /// Create a session that has not started a round yet
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfig` if the configuration does not validate.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Ok(Self {
            rules: config.rules,
            alphabet: config.alphabet,
            phase: Phase::NotStarted,
            outcome: Outcome::InProgress,
            board: Vec::with_capacity(config.rules.turn_count),
            secret: None,
            score: Score::default(),
            solver: None,
            last_filter: None,
            round: 0,
            rng,
        })
    }

    /// Rules of this session
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Pegs usable in codes
    #[inline]
    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the current phase is won, lost or still running
    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Turns played this phase, oldest first
    #[inline]
    #[must_use]
    pub fn board(&self) -> &[Turn] {
        &self.board
    }

    /// Points so far
    #[inline]
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Rounds started so far
    #[inline]
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Guesses still allowed this phase
    #[must_use]
    pub fn turns_left(&self) -> usize {
        self.rules.turn_count.saturating_sub(self.board.len())
    }

    /// The secret of this phase, if known
    ///
    /// Always set while the human guesses. While the computer guesses it is
    /// only set if the human supplied it.
    #[inline]
    #[must_use]
    pub const fn secret(&self) -> Option<Code> {
        self.secret
    }

    /// Register an extra peg symbol
    ///
    /// Only allowed between rounds, so a running phase never sees its
    /// alphabet change.
    ///
    /// # Errors
    /// - `GameError::WrongPhase` during a round
    /// - `GameError::DuplicatePeg` if the label exists
    /// - `GameError::InvalidConfig` if one more peg would push the search
    ///   space past `GameConfig::MAX_SEARCH_SPACE`
    pub fn register_peg(&mut self, label: &str) -> Result<Peg, GameError> {
        if !matches!(self.phase, Phase::NotStarted | Phase::Complete) {
            return Err(self.wrong_phase("register a peg"));
        }
        let grown = (self.alphabet.len() + 1).saturating_pow(self.rules.code_length as u32);
        if self.alphabet.get(label).is_none() && grown > GameConfig::MAX_SEARCH_SPACE {
            return Err(GameError::InvalidConfig(format!(
                "another peg would make {grown} codes to search"
            )));
        }
        let peg = self.alphabet.register(label)?;
        tracing::info!(label, pegs = self.alphabet.len(), "registered peg");
        Ok(peg)
    }

    /// Parse a code and check it has the configured length
    ///
    /// # Errors
    /// Returns `GameError::InvalidCode` for unknown symbols or wrong length.
    pub fn parse_code(&self, text: &str) -> Result<Code, GameError> {
        let code = Code::parse(text, &self.alphabet)?;
        self.check_length(code.len())?;
        Ok(code)
    }

    fn check_length(&self, len: usize) -> Result<(), GameError> {
        if len == self.rules.code_length {
            Ok(())
        } else {
            Err(GameError::InvalidCode(format!(
                "a code needs exactly {} pegs, got {len}",
                self.rules.code_length
            )))
        }
    }

    fn check_code(&self, code: &Code) -> Result<(), GameError> {
        self.check_length(code.len())?;
        if code.pegs().iter().all(|&p| self.alphabet.contains(p)) {
            Ok(())
        } else {
            Err(GameError::InvalidCode(
                "code uses a peg outside the alphabet".to_string(),
            ))
        }
    }

    fn wrong_phase(&self, action: &'static str) -> GameError {
        GameError::WrongPhase {
            action,
            phase: self.phase.describe(),
        }
    }

    /// Start a new round with the human guessing a random secret
    ///
    /// # Errors
    /// Returns `GameError::WrongPhase` unless no round is running.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::NotStarted | Phase::Complete) {
            return Err(self.wrong_phase("start a round"));
        }

        let secret = Code::random(&self.alphabet, self.rules.code_length, &mut self.rng)?;
        self.enter_phase(Phase::HumanGuessing);
        self.secret = Some(secret);
        self.round += 1;
        tracing::info!(round = self.round, "round started, human is guessing");
        Ok(())
    }

    /// Hand the guessing over to the computer
    ///
    /// # Errors
    /// Returns `GameError::WrongPhase` unless the human phase is over.
    pub fn start_computer_phase(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::HumanGuessing || !self.outcome.is_resolved() {
            return Err(self.wrong_phase("start the computer phase"));
        }

        let solver = Solver::new(
            &self.alphabet,
            self.rules.code_length,
            StdRng::from_rng(&mut self.rng),
        )?;
        self.enter_phase(Phase::ComputerGuessing);
        self.solver = Some(solver);
        tracing::info!(round = self.round, "computer is guessing");
        Ok(())
    }

    /// Close the round once the computer phase is over
    ///
    /// # Errors
    /// Returns `GameError::WrongPhase` unless the computer phase is over.
    pub fn finish_round(&mut self) -> Result<Score, GameError> {
        if self.phase != Phase::ComputerGuessing || !self.outcome.is_resolved() {
            return Err(self.wrong_phase("finish the round"));
        }

        self.enter_phase(Phase::Complete);
        tracing::info!(
            round = self.round,
            human = self.score.human,
            computer = self.score.computer,
            "round complete"
        );
        Ok(self.score)
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.outcome = Outcome::InProgress;
        self.board.clear();
        self.secret = None;
        self.solver = None;
        self.last_filter = None;
    }

    /// Replace the secret of the current phase
    ///
    /// While the computer guesses, the secret is only kept for display and
    /// debugging; the solver never reads it.
    ///
    /// # Errors
    /// - `GameError::WrongPhase` outside the guessing phases
    /// - `GameError::InvalidCode` for a wrong length or unknown peg
    pub fn set_code(&mut self, pegs: &[Peg]) -> Result<(), GameError> {
        if self.phase.guesser().is_none() {
            return Err(self.wrong_phase("set the code"));
        }
        self.check_length(pegs.len())?;
        let code = Code::new(pegs, &self.alphabet)?;
        self.secret = Some(code);
        Ok(())
    }

    /// Score a human guess against the computer's secret
    ///
    /// # Errors
    /// - `GameError::WrongPhase` unless the human is guessing
    /// - `GameError::TurnLimitExceeded` once the budget is used up
    /// - `GameError::PhaseResolved` after the code was cracked
    /// - `GameError::InvalidCode` for a malformed guess
    pub fn submit_guess(&mut self, guess: Code) -> Result<Feedback, GameError> {
        if self.phase != Phase::HumanGuessing {
            return Err(self.wrong_phase("submit a guess"));
        }
        self.check_turn_available()?;
        self.check_code(&guess)?;
        let secret = self.secret.ok_or_else(|| {
            GameError::InvalidCode("no secret has been set for this phase".to_string())
        })?;

        let feedback = Feedback::calculate(&secret, &guess);
        self.record_turn(guess, feedback);
        Ok(feedback)
    }

    fn check_turn_available(&self) -> Result<(), GameError> {
        if self.board.len() >= self.rules.turn_count {
            return Err(GameError::TurnLimitExceeded(self.rules.turn_count));
        }
        if self.outcome.is_resolved() {
            return Err(GameError::PhaseResolved);
        }
        Ok(())
    }

    /// The computer's current guess
    ///
    /// Draws a new guess from the solver, or returns the pending one if the
    /// human has not answered it yet.
    ///
    /// # Errors
    /// - `GameError::WrongPhase` unless the computer is guessing
    /// - `GameError::TurnLimitExceeded` / `GameError::PhaseResolved` when
    ///   the phase is over
    pub fn next_computer_guess(&mut self) -> Result<Code, GameError> {
        if self.phase != Phase::ComputerGuessing {
            return Err(self.wrong_phase("ask for a computer guess"));
        }
        self.check_turn_available()?;
        let Some(solver) = self.solver.as_mut() else {
            return Err(self.wrong_phase("ask for a computer guess"));
        };

        Ok(solver
            .pending_guess()
            .unwrap_or_else(|| solver.next_guess()))
    }

    /// Record the human's feedback for the computer's pending guess
    ///
    /// # Errors
    /// - `GameError::WrongPhase` unless the computer is guessing
    /// - `GameError::TurnLimitExceeded` / `GameError::PhaseResolved` when
    ///   the phase is over
    /// - `GameError::InvalidFeedback` if the counts exceed the code length
    /// - `GameError::NoPendingGuess` if no guess was asked for
    pub fn submit_external_feedback(
        &mut self,
        exact: usize,
        color_only: usize,
    ) -> Result<Turn, GameError> {
        self.submit_external_feedback_with_progress(exact, color_only, |_| {})
    }

    /// Like [`GameSession::submit_external_feedback`], reporting heartbeats
    /// of the solver's filtering pass to `on_progress`
    ///
    /// # Errors
    /// See [`GameSession::submit_external_feedback`].
    pub fn submit_external_feedback_with_progress<F>(
        &mut self,
        exact: usize,
        color_only: usize,
        on_progress: F,
    ) -> Result<Turn, GameError>
    where
        F: FnMut(FilterProgress),
    {
        if self.phase != Phase::ComputerGuessing {
            return Err(self.wrong_phase("give feedback"));
        }
        self.check_turn_available()?;
        let feedback = Feedback::new(exact, color_only, self.rules.code_length)?;
        let guess = self
            .solver
            .as_ref()
            .and_then(Solver::pending_guess)
            .ok_or(GameError::NoPendingGuess)?;

        let turn = self.record_turn(guess, feedback);
        if turn.outcome.is_resolved() {
            return Ok(turn);
        }
        if let Some(solver) = self.solver.as_mut() {
            self.last_filter = Some(solver.observe_with_progress(feedback, on_progress)?);
        }
        Ok(turn)
    }

    fn record_turn(&mut self, code: Code, feedback: Feedback) -> Turn {
        let outcome = if feedback.is_win(self.rules.code_length) {
            Outcome::Won
        } else if self.board.len() + 1 >= self.rules.turn_count {
            Outcome::Lost
        } else {
            Outcome::InProgress
        };

        let turn = Turn {
            code,
            feedback,
            outcome,
        };
        self.board.push(turn);
        self.outcome = outcome;

        if let Some(guesser) = self.phase.guesser() {
            match outcome {
                Outcome::Won => {
                    self.score.award(guesser);
                    tracing::info!(%guesser, turns = self.board.len(), "code cracked");
                }
                Outcome::Lost => {
                    self.score.award(guesser.opponent());
                    tracing::info!(%guesser, "turn budget exhausted, phase lost");
                }
                Outcome::InProgress => {
                    tracing::debug!(turn = self.board.len(), %feedback, "turn recorded");
                }
            }
        }

        turn
    }

    /// Candidates the solver still considers, while the computer guesses
    #[must_use]
    pub fn pool_size(&self) -> Option<usize> {
        self.solver.as_ref().map(Solver::pool_size)
    }

    /// Pool refills so far this phase, while the computer guesses
    #[must_use]
    pub fn pool_resets(&self) -> Option<usize> {
        self.solver.as_ref().map(Solver::resets)
    }

    /// Summary of the most recent filtering pass this phase
    #[inline]
    #[must_use]
    pub const fn last_filter(&self) -> Option<FilterSummary> {
        self.last_filter
    }

    /// The computer guess awaiting feedback
    #[must_use]
    pub fn pending_guess(&self) -> Option<Code> {
        self.solver.as_ref().and_then(Solver::pending_guess)
    }

    /// Feedback the pending guess would truly earn, if the secret is known
    #[must_use]
    pub fn expected_feedback(&self) -> Option<Feedback> {
        let secret = self.secret?;
        let guess = self.pending_guess()?;
        Some(Feedback::calculate(&secret, &guess))
    }

    /// Whether the supplied secret is still a candidate, if it is known
    ///
    /// `Some(false)` means some feedback so far was wrong.
    #[must_use]
    pub fn secret_in_pool(&self) -> Option<bool> {
        let secret = self.secret?;
        self.solver.as_ref().map(|s| s.pool().contains(&secret))
    }
}
