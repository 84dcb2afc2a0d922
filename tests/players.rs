mod common;

use std::io::Cursor;

use chessprompt::error::{OracleFailure, ParseError};
use chessprompt::players::{HumanPlayer, MoveSource, OraclePlayer, ProposeError, HUMAN_PROMPT};
use chessprompt::{Game, UciMove};
use common::ScriptedOracle;
use pretty_assertions::assert_eq;

fn human(input: &str) -> HumanPlayer<Cursor<Vec<u8>>, Vec<u8>> {
    HumanPlayer::new("You", Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

#[test]
fn human_reads_one_line_per_proposal() {
    let game = Game::new();
    let mut player = human("  e2e4 \nzz99\nresign\n");

    assert_eq!(player.propose_move(&game).unwrap(), "e2e4".parse::<UciMove>().unwrap());
    assert!(matches!(player.propose_move(&game), Err(ProposeError::Parse(ParseError::Square(_)))));
    assert!(matches!(player.propose_move(&game), Err(ProposeError::Resigned)));
    assert!(matches!(player.propose_move(&game), Err(ProposeError::InputClosed)));
    assert_eq!(String::from_utf8_lossy(player.output()), HUMAN_PROMPT.repeat(4));
}

#[test]
fn human_does_not_judge_legality() {
    let mut player = human("a1a1\n");
    assert_eq!(player.propose_move(&Game::new()).unwrap().to_string(), "a1a1");
}

#[test]
fn oracle_prompt_carries_fen_and_side() {
    let service = ScriptedOracle::new(["e7e5"]);
    let mut oracle = OraclePlayer::new("Oracle", &service);
    let mut game = Game::new();
    game.apply(&"e2e4".parse().unwrap()).unwrap();

    assert_eq!(oracle.propose_move(&game).unwrap().to_string(), "e7e5");
    let prompt = &service.prompts()[0];
    assert!(prompt.contains("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq"));
    assert!(prompt.contains("best move for Black"));
    assert!(prompt.contains("Respond with only the move"));
}

#[test]
fn oracle_does_not_judge_legality() {
    let service = ScriptedOracle::new(["a1a1"]);
    let mut oracle = OraclePlayer::new("Oracle", &service);
    assert_eq!(oracle.propose_move(&Game::new()).unwrap().to_string(), "a1a1");
}

#[test]
fn oracle_passes_service_errors_through() {
    let service = ScriptedOracle::with_results([Err(OracleFailure::Timeout)]);
    let mut oracle = OraclePlayer::new("Oracle", &service);
    assert!(matches!(oracle.propose_move(&Game::new()), Err(ProposeError::Oracle(OracleFailure::Timeout))));
}

#[test]
fn correction_is_sent_once() {
    let service = ScriptedOracle::new(["e7e5", "e7e5"]);
    let mut oracle = OraclePlayer::new("Oracle", &service);
    let game = Game::new();

    oracle.reject("illegal move: a1a1");
    oracle.propose_move(&game).unwrap();
    oracle.propose_move(&game).unwrap();
    let prompts = service.prompts();
    assert!(prompts[0].contains("rejected: illegal move: a1a1"));
    assert!(!prompts[1].contains("rejected"));
}
