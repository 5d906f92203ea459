//! Material balance evaluation.
//!
//! Sums fixed piece values for each side. The king carries a value far
//! above everything else combined, so a line that loses the king scores as
//! lost. All scores are from White's perspective (positive = White ahead).

use gambit_core::{Board, Color, PieceKind};

/// Value of a piece of `kind` in centipawns.
///
/// | Piece  | Value |
/// |--------|-------|
/// | Pawn   |   100 |
/// | Knight |   320 |
/// | Bishop |   330 |
/// | Rook   |   500 |
/// | Queen  |   900 |
/// | King   | 20000 |
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

/// Evaluate material balance from White's perspective.
pub fn material(board: &Board) -> i32 {
    board
        .occupied()
        .map(|(_, piece)| match piece.color() {
            Color::White => piece_value(piece.kind()),
            Color::Black => -piece_value(piece.kind()),
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use gambit_core::{Board, Piece, PieceKind, Position, Square};

    use super::{material, piece_value};

    #[test]
    fn starting_position_is_zero() {
        assert_eq!(material(&Board::starting()), 0);
    }

    #[test]
    fn empty_board_is_zero() {
        assert_eq!(material(&Board::empty()), 0);
    }

    #[test]
    fn extra_white_knight() {
        let position: Position = "4k3/8/8/8/8/8/8/3NK3 w - - 0 1".parse().unwrap();
        assert_eq!(material(position.board()), piece_value(PieceKind::Knight));
    }

    #[test]
    fn black_ahead_is_negative() {
        let mut board = Board::starting();
        board.clear(Square::D1);
        assert_eq!(material(&board), -900);
    }

    #[test]
    fn missing_king_dominates() {
        let mut board = Board::empty();
        board.set(Square::E1, Some(Piece::WHITE_QUEEN));
        board.set(Square::E8, Some(Piece::BLACK_KING));
        assert_eq!(material(&board), 900 - 20_000);
    }
}
