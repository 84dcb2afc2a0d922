// Console chess against a language-model move oracle
pub mod board;
pub mod controller;
pub mod error;
pub mod llm;
pub mod players;
pub mod uci;

pub use board::{Game, GameResult, Termination};
pub use controller::{AbortReason, Controller, ControllerConfig, LoopState, SessionOutcome};
pub use uci::UciMove;
