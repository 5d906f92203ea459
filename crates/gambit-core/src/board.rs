//! Piece placement: 64 cells, each empty or holding one piece.

use std::fmt;

use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// Back-row layout shared by both colors in the initial position.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The contents of all 64 squares.
///
/// A plain value: copying it is how move simulations and search branches get
/// a scratch board of their own.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Board {
        Board {
            cells: [None; Square::COUNT],
        }
    }

    /// The standard initial layout.
    pub fn starting() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_row();
            let pawns = color.pawn_start_row();
            for (col, kind) in (0u8..).zip(BACK_ROW) {
                board.set(Square::at(back, col), Some(Piece::new(kind, color)));
                board.set(Square::at(pawns, col), Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
        board
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Return `true` if `sq` holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_none()
    }

    /// Return the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.cells[sq.index()].map(Piece::color)
    }

    /// Overwrite the contents of `sq`.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece;
    }

    /// Remove and return whatever stands on `sq`.
    #[inline]
    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Move whatever stands on `from` to `to`, replacing anything there.
    ///
    /// No rules are applied: this is raw relocation.
    #[inline]
    pub fn relocate(&mut self, from: Square, to: Square) {
        let piece = self.clear(from);
        self.set(to, piece);
    }

    /// Return the square of `color`'s king, scanning from a8.
    ///
    /// Returns `None` on a board without such a king; callers treat that as
    /// "not in check" rather than crashing.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.squares_of(color)
            .find(|&(_, piece)| piece.kind() == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Iterate over occupied squares of `color` in index order.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |&(_, piece)| piece.color() == color)
    }

    /// Iterate over all occupied squares in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Count the pieces of one kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|piece| piece.is(kind, color))
            .count()
    }

    /// Return `true` if every square strictly between `from` and `to` is empty.
    ///
    /// Only meaningful for squares on a shared row, column or diagonal;
    /// other pairs report `false`.
    pub fn path_clear(&self, from: Square, to: Square) -> bool {
        let d_row = to.row() as i8 - from.row() as i8;
        let d_col = to.col() as i8 - from.col() as i8;
        let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
        if !aligned || from == to {
            return false;
        }

        let (step_row, step_col) = (d_row.signum(), d_col.signum());
        let mut current = from.offset(step_row, step_col);
        while let Some(sq) = current {
            if sq == to {
                return true;
            }
            if !self.is_empty(sq) {
                return false;
            }
            current = sq.offset(step_row, step_col);
        }
        false
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{}\n)", self.pretty())
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid, rank 8 on top.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0u8..8 {
            write!(f, "{}  ", 8 - row)?;
            for col in 0u8..8 {
                let c = self.0.piece_at(Square::at(row, col)).map_or('.', Piece::fen_char);
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
