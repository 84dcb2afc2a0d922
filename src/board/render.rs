use cozy_chess::{Board, Color, File, Piece, Rank, Square};

fn glyph(piece: Piece, color: Color) -> char {
    match (color, piece) {
        (Color::White, Piece::King) => '♔',
        (Color::White, Piece::Queen) => '♕',
        (Color::White, Piece::Rook) => '♖',
        (Color::White, Piece::Bishop) => '♗',
        (Color::White, Piece::Knight) => '♘',
        (Color::White, Piece::Pawn) => '♙',
        (Color::Black, Piece::King) => '♚',
        (Color::Black, Piece::Queen) => '♛',
        (Color::Black, Piece::Rook) => '♜',
        (Color::Black, Piece::Bishop) => '♝',
        (Color::Black, Piece::Knight) => '♞',
        (Color::Black, Piece::Pawn) => '♟',
    }
}

/// Eight lines, rank 8 first, squares separated by spaces.
pub fn render(board: &Board) -> String {
    let mut rows = Vec::with_capacity(8);
    for &rank in Rank::ALL.iter().rev() {
        let row: Vec<String> = File::ALL
            .iter()
            .map(|&file| {
                let sq = Square::new(file, rank);
                match (board.piece_on(sq), board.color_on(sq)) {
                    (Some(p), Some(c)) => glyph(p, c).to_string(),
                    _ => ".".to_string(),
                }
            })
            .collect();
        rows.push(row.join(" "));
    }
    rows.join("\n")
}
