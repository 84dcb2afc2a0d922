use std::fmt;
use std::str::FromStr;

use cozy_chess::{Piece, Square};

use crate::error::ParseError;

/// A move in coordinate notation: origin, destination, optional promotion.
///
/// Castling is written as the king's two-square step (`e1g1`), never as the
/// king capturing its own rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl UciMove {
    pub fn new(from: Square, to: Square, promotion: Option<Piece>) -> Self {
        Self { from, to, promotion }
    }
}

fn promotion_piece(c: char) -> Result<Piece, ParseError> {
    match c {
        'q' => Ok(Piece::Queen),
        'r' => Ok(Piece::Rook),
        'b' => Ok(Piece::Bishop),
        'n' => Ok(Piece::Knight),
        other => Err(ParseError::Promotion(other)),
    }
}

fn promotion_char(piece: Piece) -> char {
    match piece {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        Piece::Pawn => 'p',
        Piece::King => 'k',
    }
}

fn parse_square(s: &str) -> Result<Square, ParseError> {
    s.parse::<Square>().map_err(|_| ParseError::Square(s.to_string()))
}

impl FromStr for UciMove {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if !(4..=5).contains(&len) || !s.is_ascii() {
            return Err(ParseError::Length(len));
        }
        let from = parse_square(&s[0..2])?;
        let to = parse_square(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(promotion_piece(c)?),
            None => None,
        };
        Ok(Self { from, to, promotion })
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", promotion_char(p))?;
        }
        Ok(())
    }
}
