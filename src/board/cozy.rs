use std::fmt;

use cozy_chess::{Board, Color, File, Move, Piece, Square};
use log::debug;

use crate::error::{FenError, IllegalMoveError};
use crate::uci::UciMove;

/// Terminal classification of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::Ongoing => "*",
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        })
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::SeventyFiveMoves => "seventy-five-move rule",
            Termination::FivefoldRepetition => "fivefold repetition",
        })
    }
}

/// The single authoritative game position.
///
/// Every read and write of the board goes through here. The hash history and
/// the half-move clock are part of the position: repetition and move-count
/// draws depend on them. cozy-chess stops its own clock at 100, so the clock
/// is kept here.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: Vec<u64>,
    halfmoves: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_board(Board::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Board::from_fen(fen, false)
            .map(Self::with_board)
            .map_err(|e| FenError(format!("{fen}: {e:?}")))
    }

    fn with_board(board: Board) -> Self {
        let history = vec![board.hash()];
        let halfmoves = u32::from(board.halfmove_clock());
        Self { board, history, halfmoves }
    }

    pub fn current_position(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Regenerated from the current board on every call.
    pub fn legal_moves(&self) -> Vec<UciMove> {
        let mut out = Vec::new();
        self.board.generate_moves(|moves| {
            for mv in moves {
                out.push(to_uci(&self.board, mv));
            }
            false
        });
        out
    }

    pub fn is_legal(&self, mv: &UciMove) -> bool {
        self.find(mv).is_some()
    }

    /// Plays `mv`. An illegal move leaves the position untouched.
    pub fn apply(&mut self, mv: &UciMove) -> Result<(), IllegalMoveError> {
        let native = self.find(mv).ok_or(IllegalMoveError(*mv))?;
        let stm = self.board.side_to_move();
        let irreversible = self.board.piece_on(native.from) == Some(Piece::Pawn)
            || self.board.colors(!stm).has(native.to);
        self.board.play(native);
        self.halfmoves = if irreversible { 0 } else { self.halfmoves + 1 };
        self.history.push(self.board.hash());
        debug!("applied {} -> {}", mv, self.board);
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.termination().is_some()
    }

    pub fn termination(&self) -> Option<Termination> {
        if !self.has_legal_move() {
            return Some(if self.board.checkers().is_empty() {
                Termination::Stalemate
            } else {
                Termination::Checkmate
            });
        }
        if self.insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        if self.halfmoves >= 150 {
            return Some(Termination::SeventyFiveMoves);
        }
        if self.repetitions() >= 5 {
            return Some(Termination::FivefoldRepetition);
        }
        None
    }

    pub fn result(&self) -> GameResult {
        match self.termination() {
            None => GameResult::Ongoing,
            // The side to move is the one that got mated.
            Some(Termination::Checkmate) => match self.side_to_move() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            },
            Some(_) => GameResult::Draw,
        }
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmoves
    }

    /// How many times the current position has occurred, itself included.
    pub fn repetitions(&self) -> usize {
        let current = self.board.hash();
        self.history.iter().filter(|&&h| h == current).count()
    }

    fn find(&self, mv: &UciMove) -> Option<Move> {
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if to_uci(&self.board, m) == *mv {
                    found = Some(m);
                    break;
                }
            }
            found.is_some()
        });
        found
    }

    fn has_legal_move(&self) -> bool {
        self.board.generate_moves(|moves| !moves.is_empty())
    }

    fn insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 {
            return true;
        }
        // Bishops only, all on one square colour.
        knights.is_empty() && {
            let mut shades = bishops.into_iter().map(square_shade);
            let first = shades.next();
            shades.all(|s| Some(s) == first)
        }
    }
}

fn square_shade(sq: Square) -> usize {
    (sq.file() as usize + sq.rank() as usize) % 2
}

/// cozy-chess encodes castling as the king capturing its own rook.
fn to_uci(board: &Board, mv: Move) -> UciMove {
    let stm = board.side_to_move();
    if board.piece_on(mv.from) == Some(Piece::King) && board.colors(stm).has(mv.to) {
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
        return UciMove::new(mv.from, Square::new(file, mv.from.rank()), None);
    }
    UciMove::new(mv.from, mv.to, mv.promotion)
}
