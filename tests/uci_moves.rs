use chessprompt::{Game, UciMove};
use cozy_chess::Color;
use pretty_assertions::assert_eq;

fn play_all(moves: &[&str]) -> Game {
    let mut game = Game::new();
    for m in moves {
        let mv: UciMove = m.parse().expect("well-formed move");
        game.apply(&mv).expect("legal move sequence");
    }
    game
}

#[test]
fn apply_startpos_moves_sequence() {
    let game = play_all(&["e2e4", "e7e5", "g1f3"]);
    assert_eq!(game.side_to_move(), Color::Black, "expected black to move after 3 plies");
    assert!(!game.is_terminal());
}

#[test]
fn castling_uses_king_step_notation() {
    let game = play_all(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"]);
    let legal: Vec<String> = game.legal_moves().iter().map(|m| m.to_string()).collect();
    assert!(legal.contains(&"e1g1".to_string()), "short castling missing: {legal:?}");
    assert!(!legal.contains(&"e1h1".to_string()), "rook-capture encoding leaked");

    let game = play_all(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1"]);
    assert!(game.fen().starts_with("r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq"));
}

#[test]
fn promotion_requires_piece_suffix() {
    let game = Game::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("valid fen");
    assert!(game.is_legal(&"a7a8q".parse().unwrap()));
    assert!(game.is_legal(&"a7a8n".parse().unwrap()));
    assert!(!game.is_legal(&"a7a8".parse().unwrap()));
}
