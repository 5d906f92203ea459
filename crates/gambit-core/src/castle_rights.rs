//! Castling rights, keyed by color and side, that can only ever be lost.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Both sides, king side first (FEN letter order).
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Column the rook starts on.
    #[inline]
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_dest_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// Column the rook lands on, adjacent to the king on the side of travel.
    #[inline]
    pub const fn rook_dest_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }
}

/// Column the king starts on for both colors.
pub(crate) const KING_HOME_COL: u8 = 4;

/// Original square of the king for `color`.
#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::at(color.back_row(), KING_HOME_COL)
}

/// Original square of the castling rook for `color` on `side`.
#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    Square::at(color.back_row(), side.rook_col())
}

/// Castling rights encoded as four flags: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
///
/// Once a flag is cleared nothing in the public API can set it again:
/// rights are granted only when a position is created.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All castling rights (the initial position).
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// Return `true` if no castling rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check whether `color` may still castle toward `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    /// Return these rights with the `(color, side)` right cleared.
    #[inline]
    #[must_use]
    pub const fn remove(self, color: Color, side: CastleSide) -> CastleRights {
        CastleRights(self.0 & !Self::bit(color, side))
    }

    /// Return these rights with both of `color`'s rights cleared.
    #[inline]
    #[must_use]
    pub const fn remove_color(self, color: Color) -> CastleRights {
        self.remove(color, CastleSide::KingSide)
            .remove(color, CastleSide::QueenSide)
    }

    /// Grant a right. Only position construction may do this.
    #[inline]
    pub(crate) const fn grant(self, color: Color, side: CastleSide) -> CastleRights {
        CastleRights(self.0 | Self::bit(color, side))
    }

    #[inline]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => 0b0001,
            (Color::White, CastleSide::QueenSide) => 0b0010,
            (Color::Black, CastleSide::KingSide) => 0b0100,
            (Color::Black, CastleSide::QueenSide) => 0b1000,
        }
    }

    /// Parse the FEN castling field (`"KQkq"`, `"Kq"`, `"-"`).
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::KingSide),
                'Q' => (Color::White, CastleSide::QueenSide),
                'k' => (Color::Black, CastleSide::KingSide),
                'q' => (Color::Black, CastleSide::QueenSide),
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            rights = rights.grant(color, side);
        }
        Ok(rights)
    }

    /// Serialize the flags alone to the FEN castling field.
    ///
    /// FEN output for a whole position additionally requires the rook to be
    /// on its corner; see [`Position::to_fen`](crate::Position::to_fen).
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if self.has(color, side) {
                    s.push(fen_letter(color, side));
                }
            }
        }
        s
    }
}

/// FEN letter for a single castling right.
pub(crate) const fn fen_letter(color: Color, side: CastleSide) -> char {
    match (color, side) {
        (Color::White, CastleSide::KingSide) => 'K',
        (Color::White, CastleSide::QueenSide) => 'Q',
        (Color::Black, CastleSide::KingSide) => 'k',
        (Color::Black, CastleSide::QueenSide) => 'q',
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide, king_home, rook_home};
    use crate::color::Color;
    use crate::square::Square;

    #[test]
    fn from_fen_to_fen_roundtrip() {
        for fen in ["KQkq", "Kq", "k", "-", "KQ", "kq", "Qk"] {
            let rights = CastleRights::from_fen(fen).unwrap();
            let reparsed = CastleRights::from_fen(&rights.to_fen()).unwrap();
            assert_eq!(rights, reparsed, "roundtrip failed for {fen}");
        }
        assert_eq!(CastleRights::from_fen("qkQK").unwrap().to_fen(), "KQkq");
    }

    #[test]
    fn from_fen_invalid() {
        assert!(CastleRights::from_fen("KQxq").is_err());
        assert!(CastleRights::from_fen("1").is_err());
    }

    #[test]
    fn has_color_side() {
        let rights = CastleRights::from_fen("Kq").unwrap();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn removal_is_one_way() {
        let rights = CastleRights::ALL
            .remove(Color::White, CastleSide::KingSide)
            .remove(Color::White, CastleSide::KingSide);
        assert!(!rights.has(Color::White, CastleSide::KingSide));
        assert!(rights.has(Color::White, CastleSide::QueenSide));

        let rights = rights.remove_color(Color::Black);
        assert_eq!(rights.to_fen(), "Q");
        assert!(rights.remove_color(Color::White).is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", CastleRights::ALL), "KQkq");
        assert_eq!(format!("{}", CastleRights::NONE), "-");
        assert_eq!(format!("{:?}", CastleRights::ALL), "CastleRights(KQkq)");
    }

    #[test]
    fn home_squares() {
        assert_eq!(king_home(Color::White), Square::E1);
        assert_eq!(king_home(Color::Black), Square::E8);
        assert_eq!(rook_home(Color::White, CastleSide::KingSide), Square::H1);
        assert_eq!(rook_home(Color::White, CastleSide::QueenSide), Square::A1);
        assert_eq!(rook_home(Color::Black, CastleSide::KingSide), Square::H8);
        assert_eq!(rook_home(Color::Black, CastleSide::QueenSide), Square::A8);
    }
}
