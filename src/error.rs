use thiserror::Error;

use crate::uci::UciMove;

/// Move text that is not well-formed coordinate notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 4 or 5 characters, got {0}")]
    Length(usize),

    #[error("invalid square: {0}")]
    Square(String),

    #[error("invalid promotion piece: {0}")]
    Promotion(char),
}

/// A well-formed move that is not in the current legal-move set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal move: {0}")]
pub struct IllegalMoveError(pub UciMove);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid FEN string: {0}")]
pub struct FenError(pub String);

/// Anything that keeps the suggestion service from producing a usable move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleFailure {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("empty reply")]
    Empty,

    #[error("reply {reply:?} is not a move: {source}")]
    Unparsable {
        reply: String,
        #[source]
        source: ParseError,
    },
}

pub type Result<T> = std::result::Result<T, OracleFailure>;
