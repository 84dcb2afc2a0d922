//! Move sources: where a candidate move for the side to move comes from.

mod human;
mod oracle;

pub use human::{HumanPlayer, HUMAN_PROMPT};
pub use oracle::{OraclePlayer, SYSTEM_PROMPT};

use thiserror::Error;

use crate::board::Game;
use crate::error::{OracleFailure, ParseError};
use crate::uci::UciMove;

/// Why a move source produced no move.
#[derive(Error, Debug)]
pub enum ProposeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Oracle(#[from] OracleFailure),

    #[error("player resigned")]
    Resigned,

    #[error("input closed")]
    InputClosed,

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MoveAttempt = Result<UciMove, ProposeError>;

/// Produces a candidate move for the current position.
///
/// Sources never check legality; the controller validates every proposal
/// against the same legal-move set.
pub trait MoveSource {
    fn propose_move(&mut self, game: &Game) -> MoveAttempt;

    fn name(&self) -> &str;

    /// Told that its last proposal was refused, before being asked again.
    fn reject(&mut self, _reason: &str) {}
}

/// Which kind of player sits on a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Human,
    Oracle,
}
