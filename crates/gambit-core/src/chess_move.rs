//! Moves as a pair of squares.

use std::fmt;

use crate::square::Square;

/// A move from one square to another.
///
/// Whether it captures, castles or takes en passant is a property of the
/// position it is played in, not of the move itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Create a move from `from` to `to`.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }

    /// Extract the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Extract the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Return the coordinate notation, e.g. `"e2e4"`.
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parse coordinate notation.
    ///
    /// Anything after the fourth character (an engine's promotion letter) is
    /// ignored.
    pub fn from_uci(s: &str) -> Option<Move> {
        let from = Square::from_algebraic(s.get(0..2)?)?;
        let to = Square::from_algebraic(s.get(2..4)?)?;
        Some(Move::new(from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}
