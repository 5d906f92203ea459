//! Pseudo-legal move generation for the fallback search.
//!
//! A reduced rule set: no castling, no en passant, no promotion, and no
//! check filter, so a king can walk into capture and be taken. Generation
//! order is fixed and doubles as the search's tie-break.

use gambit_core::{Board, Color, Move, PieceKind, Square};

/// Knight jumps as `(d_row, d_col)`.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Generate every pseudo-legal move for `side`, source squares a8 to h1.
pub fn generate_moves(board: &Board, side: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in board.squares_of(side) {
        match piece.kind() {
            PieceKind::Pawn => pawn_moves(board, side, from, &mut moves),
            PieceKind::Knight => step_moves(board, side, from, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::Bishop => slide_moves(board, side, from, &BISHOP_DIRS, &mut moves),
            PieceKind::Rook => slide_moves(board, side, from, &ROOK_DIRS, &mut moves),
            PieceKind::Queen => {
                slide_moves(board, side, from, &BISHOP_DIRS, &mut moves);
                slide_moves(board, side, from, &ROOK_DIRS, &mut moves);
            }
            PieceKind::King => king_moves(board, side, from, &mut moves),
        }
    }
    moves
}

fn pawn_moves(board: &Board, side: Color, from: Square, moves: &mut Vec<Move>) {
    let dir = side.pawn_direction();

    if let Some(one) = from.offset(dir, 0)
        && board.is_empty(one)
    {
        moves.push(Move::new(from, one));
        if from.row() == side.pawn_start_row()
            && let Some(two) = from.offset(2 * dir, 0)
            && board.is_empty(two)
        {
            moves.push(Move::new(from, two));
        }
    }

    for d_col in [-1, 1] {
        if let Some(to) = from.offset(dir, d_col)
            && board.color_at(to) == Some(!side)
        {
            moves.push(Move::new(from, to));
        }
    }
}

/// Single-step pieces: anything but a same-colored piece on the target.
fn step_moves(board: &Board, side: Color, from: Square, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col)
            && board.color_at(to) != Some(side)
        {
            moves.push(Move::new(from, to));
        }
    }
}

fn slide_moves(board: &Board, side: Color, from: Square, dirs: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(d_row, d_col) in dirs {
        let mut current = from.offset(d_row, d_col);
        while let Some(to) = current {
            match board.color_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(color) => {
                    if color != side {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            current = to.offset(d_row, d_col);
        }
    }
}

fn king_moves(board: &Board, side: Color, from: Square, moves: &mut Vec<Move>) {
    for d_row in -1..=1 {
        for d_col in -1..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            step_moves(board, side, from, &[(d_row, d_col)], moves);
        }
    }
}

#[cfg(test)]
mod tests {
    use gambit_core::{Board, Color, Position};

    use super::generate_moves;

    fn uci(moves: &[gambit_core::Move]) -> Vec<String> {
        moves.iter().map(|m| m.to_uci()).collect()
    }

    #[test]
    fn starting_position_order() {
        let moves = generate_moves(&Board::starting(), Color::White);
        assert_eq!(moves.len(), 20);
        let names = uci(&moves);
        assert_eq!(&names[..4], ["a2a3", "a2a4", "b2b3", "b2b4"]);
        assert_eq!(&names[16..], ["b1a3", "b1c3", "g1f3", "g1h3"]);
    }

    #[test]
    fn black_moves_start_on_row_one() {
        let moves = generate_moves(&Board::starting(), Color::Black);
        assert_eq!(moves.len(), 20);
        let names = uci(&moves);
        assert_eq!(&names[..2], ["b8c6", "b8a6"]);
        assert_eq!(names[4], "a7a6");
    }

    #[test]
    fn pawn_captures_lower_column_first() {
        let position: Position = "4k3/8/8/8/8/3n1n2/4P3/4K3 w - - 0 1".parse().unwrap();
        let names = uci(&generate_moves(position.board(), Color::White));
        assert_eq!(&names[..4], ["e2e3", "e2e4", "e2d3", "e2f3"]);
    }

    #[test]
    fn queen_rays_bishop_directions_first() {
        let position: Position = "4k3/8/8/8/8/8/8/Q3K3 w - - 0 1".parse().unwrap();
        let names = uci(&generate_moves(position.board(), Color::White));
        // From a1 only the (-1, 1) diagonal exists, then rook rays up and right.
        assert_eq!(names[0], "a1b2");
        assert_eq!(names[7], "a1a2");
        assert_eq!(names[14], "a1b1");
    }

    #[test]
    fn no_castling_en_passant_or_check_filter() {
        let position: Position = "4k3/8/8/3pP3/8/8/8/R3K2R w KQ d6 0 1".parse().unwrap();
        let names = uci(&generate_moves(position.board(), Color::White));
        assert!(!names.contains(&"e1g1".to_string()));
        assert!(!names.contains(&"e5d6".to_string()));

        // King may step next to the enemy king.
        let position: Position = "8/8/8/8/8/4k3/8/4K3 w - - 0 1".parse().unwrap();
        let names = uci(&generate_moves(position.board(), Color::White));
        assert!(names.contains(&"e1e2".to_string()));
    }
}
