#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Cursor;

use chessprompt::error::{OracleFailure, Result};
use chessprompt::llm::Suggest;
use chessprompt::players::{HumanPlayer, OraclePlayer};
use chessprompt::{Controller, ControllerConfig, Game};

/// Replays canned replies; an exhausted script fails like a dropped connection.
#[derive(Default)]
pub struct ScriptedOracle {
    replies: RefCell<VecDeque<Result<String>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedOracle {
    pub fn new<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_results(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn with_results(replies: impl IntoIterator<Item = Result<String>>) -> Self {
        Self { replies: RefCell::new(replies.into_iter().collect()), prompts: RefCell::default() }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Suggest for ScriptedOracle {
    fn suggest(&self, _system_prompt: &str, user_message: &str) -> Result<String> {
        self.prompts.borrow_mut().push(user_message.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(OracleFailure::Transport("connection reset".into())))
    }
}

pub type TestController<'a> =
    Controller<HumanPlayer<Cursor<Vec<u8>>, Vec<u8>>, OraclePlayer<&'a ScriptedOracle>, Vec<u8>>;

pub fn controller<'a>(input: &str, oracle: &'a ScriptedOracle, config: ControllerConfig) -> TestController<'a> {
    controller_from(Game::new(), input, oracle, config)
}

pub fn controller_from<'a>(
    game: Game,
    input: &str,
    oracle: &'a ScriptedOracle,
    config: ControllerConfig,
) -> TestController<'a> {
    let human = HumanPlayer::new("You", Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let oracle = OraclePlayer::new("Oracle", oracle);
    Controller::new(game, human, oracle, config, Vec::new())
}

pub fn console(ctl: &TestController<'_>) -> String {
    String::from_utf8_lossy(ctl.output()).into_owned()
}

pub fn prompts_shown(ctl: &TestController<'_>) -> usize {
    String::from_utf8_lossy(ctl.human().output()).matches(chessprompt::players::HUMAN_PROMPT).count()
}
