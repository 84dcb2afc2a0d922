use cozy_chess::Color;
use log::{debug, warn};

use super::{MoveAttempt, MoveSource, ProposeError};
use crate::board::Game;
use crate::error::OracleFailure;
use crate::llm::Suggest;
use crate::uci::UciMove;

pub const SYSTEM_PROMPT: &str =
    "You are a chess engine. Reply with exactly one move in UCI coordinate notation and nothing else.";

/// Asks a suggestion service for the side to move's next move.
pub struct OraclePlayer<S> {
    name: String,
    service: S,
    correction: Option<String>,
}

impl<S: Suggest> OraclePlayer<S> {
    pub fn new(name: impl Into<String>, service: S) -> Self {
        Self { name: name.into(), service, correction: None }
    }

    /// The user message sent for `game`, including any pending correction.
    pub fn build_prompt(&self, game: &Game) -> String {
        let side = match game.side_to_move() {
            Color::White => "White",
            Color::Black => "Black",
        };
        let mut prompt = format!(
            "The current chess board in FEN format is:\n{}\n\
             Suggest the best move for {side} in UCI format (e.g., e2e4). \
             Respond with only the move, no explanation.",
            game.fen()
        );
        if let Some(note) = &self.correction {
            prompt.push_str(&format!("\nYour previous suggestion was rejected: {note}. Choose a legal move."));
        }
        prompt
    }
}

impl<S: Suggest> MoveSource for OraclePlayer<S> {
    fn propose_move(&mut self, game: &Game) -> MoveAttempt {
        let prompt = self.build_prompt(game);
        self.correction = None;

        let raw = self.service.suggest(SYSTEM_PROMPT, &prompt)?;
        let reply = raw.trim();
        debug!("{} replied {:?}", self.name, reply);
        if reply.is_empty() {
            return Err(OracleFailure::Empty.into());
        }
        reply.parse::<UciMove>().map_err(|source| {
            ProposeError::Oracle(OracleFailure::Unparsable { reply: reply.to_string(), source })
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reject(&mut self, reason: &str) {
        warn!("{} suggestion rejected: {reason}", self.name);
        self.correction = Some(reason.to_string());
    }
}
