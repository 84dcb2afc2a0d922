use std::io::{BufRead, Write};

use super::{MoveAttempt, MoveSource, ProposeError};
use crate::board::Game;
use crate::uci::UciMove;

pub const HUMAN_PROMPT: &str = "Enter your move in UCI notation (e.g., e2e4): ";

/// Reads one line per proposal from a console.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self { name: name.into(), input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> MoveSource for HumanPlayer<R, W> {
    fn propose_move(&mut self, _game: &Game) -> MoveAttempt {
        write!(self.output, "{HUMAN_PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ProposeError::InputClosed);
        }
        match line.trim() {
            "quit" | "resign" => Err(ProposeError::Resigned),
            text => Ok(text.parse::<UciMove>()?),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
