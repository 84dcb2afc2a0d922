//! The game loop: alternates turns, validates every proposal against the
//! board, and decides between re-prompting and aborting.

use std::io::{self, Write};

use cozy_chess::Color;
use log::{info, warn};
use thiserror::Error;

use crate::board::{render, Game, GameResult, Termination};
use crate::error::{IllegalMoveError, OracleFailure};
use crate::players::{MoveSource, ProposeError, Seat};
use crate::uci::UciMove;

#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub human_color: Color,
    /// Extra oracle attempts per turn after a failure. Zero aborts on the
    /// first bad suggestion.
    pub oracle_retries: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { human_color: Color::White, oracle_retries: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Ongoing,
    AwaitingHuman,
    AwaitingOracle,
    Terminated,
}

/// Why the oracle's turn ended the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    #[error(transparent)]
    Oracle(#[from] OracleFailure),

    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),
}

/// How a session ended. Only `Finished` is a decided game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished { result: GameResult, termination: Termination },
    Aborted { reason: AbortReason, result: GameResult },
    Quit { result: GameResult },
}

impl SessionOutcome {
    pub fn result(&self) -> GameResult {
        match self {
            SessionOutcome::Finished { result, .. }
            | SessionOutcome::Aborted { result, .. }
            | SessionOutcome::Quit { result } => *result,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, SessionOutcome::Aborted { .. })
    }
}

pub struct Controller<H, O, W> {
    game: Game,
    human: H,
    oracle: O,
    config: ControllerConfig,
    out: W,
    state: LoopState,
    outcome: Option<SessionOutcome>,
}

impl<H: MoveSource, O: MoveSource, W: Write> Controller<H, O, W> {
    pub fn new(game: Game, human: H, oracle: O, config: ControllerConfig, out: W) -> Self {
        Self { game, human, oracle, config, out, state: LoopState::Ongoing, outcome: None }
    }

    pub fn game(&self) -> &Game { &self.game }

    pub fn state(&self) -> LoopState { self.state }

    pub fn output(&self) -> &W { &self.out }

    pub fn human(&self) -> &H { &self.human }

    pub fn oracle(&self) -> &O { &self.oracle }

    pub fn seat(&self, color: Color) -> Seat {
        if color == self.config.human_color { Seat::Human } else { Seat::Oracle }
    }

    /// Plays until the game ends or the session is cut short. Once
    /// terminated, further calls return the same outcome without touching
    /// the board.
    pub fn run(&mut self) -> io::Result<SessionOutcome> {
        loop {
            if let Some(outcome) = &self.outcome {
                return Ok(outcome.clone());
            }
            self.state = LoopState::Ongoing;
            writeln!(self.out, "\nCurrent Board:\n{}", render(self.game.current_position()))?;

            if let Some(termination) = self.game.termination() {
                let result = self.game.result();
                info!("game over by {termination}: {result}");
                writeln!(self.out, "\n{}", describe(termination, result))?;
                self.finish(SessionOutcome::Finished { result, termination })?;
                continue;
            }

            let step = match self.seat(self.game.side_to_move()) {
                Seat::Human => self.human_turn()?,
                Seat::Oracle => self.oracle_turn()?,
            };
            if let Some(outcome) = step {
                self.finish(outcome)?;
            }
        }
    }

    fn human_turn(&mut self) -> io::Result<Option<SessionOutcome>> {
        self.state = LoopState::AwaitingHuman;
        writeln!(self.out, "\nYour Turn:")?;
        loop {
            let mv = match self.human.propose_move(&self.game) {
                Ok(mv) => mv,
                Err(ProposeError::Parse(e)) => {
                    info!("unparsable human input: {e}");
                    writeln!(self.out, "Invalid move format. Use UCI notation (e.g., e2e4).")?;
                    continue;
                }
                Err(ProposeError::Resigned | ProposeError::InputClosed) => {
                    writeln!(self.out, "\nThanks for playing!")?;
                    return Ok(Some(SessionOutcome::Quit { result: self.game.result() }));
                }
                Err(ProposeError::Io(e)) => return Err(e),
                Err(ProposeError::Oracle(e)) => return Err(io::Error::other(e)),
            };
            match self.play(mv) {
                Ok(()) => return Ok(None),
                Err(_) => writeln!(self.out, "Illegal move. Try again.")?,
            }
        }
    }

    fn oracle_turn(&mut self) -> io::Result<Option<SessionOutcome>> {
        self.state = LoopState::AwaitingOracle;
        writeln!(self.out, "\n{}'s Turn:", self.oracle.name())?;
        let mut attempts = 0;
        loop {
            let reason = match self.oracle.propose_move(&self.game) {
                Ok(mv) => {
                    writeln!(self.out, "{} suggests: {mv}", self.oracle.name())?;
                    match self.play(mv) {
                        Ok(()) => return Ok(None),
                        Err(e) => AbortReason::IllegalMove(e),
                    }
                }
                Err(ProposeError::Oracle(e)) => AbortReason::Oracle(e),
                Err(ProposeError::Io(e)) => return Err(e),
                Err(other) => AbortReason::Oracle(OracleFailure::Malformed(other.to_string())),
            };

            if attempts < self.config.oracle_retries {
                attempts += 1;
                warn!("oracle attempt {attempts} failed: {reason}");
                self.oracle.reject(&reason.to_string());
                continue;
            }
            writeln!(self.out, "Error during {}'s turn: {reason}", self.oracle.name())?;
            return Ok(Some(SessionOutcome::Aborted { reason, result: self.game.result() }));
        }
    }

    /// The only path by which the board changes.
    fn play(&mut self, mv: UciMove) -> Result<(), IllegalMoveError> {
        if !self.game.is_legal(&mv) {
            return Err(IllegalMoveError(mv));
        }
        self.game.apply(&mv)?;
        info!("{:?} played {mv}", !self.game.side_to_move());
        Ok(())
    }

    fn finish(&mut self, outcome: SessionOutcome) -> io::Result<()> {
        self.state = LoopState::Terminated;
        writeln!(self.out, "\nGame Over!")?;
        writeln!(self.out, "Result: {}", outcome.result())?;
        self.out.flush()?;
        self.outcome = Some(outcome);
        Ok(())
    }
}

fn describe(termination: Termination, result: GameResult) -> String {
    match (termination, result) {
        (Termination::Checkmate, GameResult::WhiteWins) => "Checkmate! White wins!".to_string(),
        (Termination::Checkmate, _) => "Checkmate! Black wins!".to_string(),
        (other, _) => format!("Draw by {other}."),
    }
}
