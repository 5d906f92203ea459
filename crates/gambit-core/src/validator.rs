//! Move legality: piece geometry first, then king safety on a scratch board.

use crate::board::Board;
use crate::castle_rights::{CastleSide, king_home, rook_home};
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// What a pseudo-legal move does beyond moving one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveKind {
    /// Quiet move or ordinary capture.
    Normal,
    /// Pawn advancing two rows from its start row.
    DoublePush,
    /// Pawn capture onto the en passant target; `victim` holds the pawn taken.
    EnPassant { victim: Square },
    /// King's two-file castling step; the rook travels too.
    Castle { rook_from: Square, rook_to: Square },
}

/// Move pieces on `board` for a move already classified as `kind`.
///
/// Shared by the check-safety simulation and move execution so both see
/// exactly the same placement.
pub(crate) fn shift_pieces(board: &mut Board, from: Square, to: Square, kind: MoveKind) {
    match kind {
        MoveKind::EnPassant { victim } => {
            board.clear(victim);
        }
        MoveKind::Castle { rook_from, rook_to } => board.relocate(rook_from, rook_to),
        MoveKind::Normal | MoveKind::DoublePush => {}
    }
    board.relocate(from, to);
}

impl Board {
    /// Return `true` if `sq` is attacked by any piece of `by_color`.
    ///
    /// Works backwards from the target: looks for pawns and knights on the
    /// squares they would attack from, then walks the eight rays until the
    /// first occupied square.
    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        // Attacking pawns stand one row behind the target, seen from `by_color`.
        let behind = -by_color.pawn_direction();
        for d_col in [-1, 1] {
            if let Some(from) = sq.offset(behind, d_col)
                && self.piece_at(from) == Some(Piece::new(PieceKind::Pawn, by_color))
            {
                return true;
            }
        }

        for (d_row, d_col) in KNIGHT_OFFSETS {
            if let Some(from) = sq.offset(d_row, d_col)
                && self.piece_at(from) == Some(Piece::new(PieceKind::Knight, by_color))
            {
                return true;
            }
        }

        self.ray_attacker(sq, by_color, &ORTHOGONAL, PieceKind::Rook)
            || self.ray_attacker(sq, by_color, &DIAGONAL, PieceKind::Bishop)
    }

    /// Walk each ray from `sq` and report whether the first piece met is an
    /// attacker of `by_color`: the `slider` kind or a queen at any distance,
    /// or the king when adjacent.
    fn ray_attacker(
        &self,
        sq: Square,
        by_color: Color,
        rays: &[(i8, i8)],
        slider: PieceKind,
    ) -> bool {
        for &(d_row, d_col) in rays {
            let mut distance = 1;
            let mut current = sq.offset(d_row, d_col);
            while let Some(target) = current {
                if let Some(piece) = self.piece_at(target) {
                    if piece.color() == by_color {
                        let kind = piece.kind();
                        if kind == slider
                            || kind == PieceKind::Queen
                            || (kind == PieceKind::King && distance == 1)
                        {
                            return true;
                        }
                    }
                    break;
                }
                distance += 1;
                current = target.offset(d_row, d_col);
            }
        }
        false
    }
}

impl Position {
    /// Return `true` if the side to move may play `from` to `to`.
    ///
    /// Pure: the position is not touched. Castling is expressed as the
    /// king's two-file step (`e1g1`).
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        let Some(kind) = self.classify(from, to) else {
            return false;
        };

        let us = self.side_to_move;
        let mut scratch = self.board;
        shift_pieces(&mut scratch, from, to, kind);
        match scratch.king_square(us) {
            Some(king) => !scratch.is_square_attacked(king, !us),
            None => true,
        }
    }

    /// Return `true` if `mv` is legal in this position.
    #[inline]
    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.is_legal(mv.from(), mv.to())
    }

    /// Every legal move, sources in index order then targets in index order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, _) in self.board.squares_of(self.side_to_move) {
            for to in Square::all() {
                if self.is_legal(from, to) {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// Return `true` if the side to move has at least one legal move.
    pub fn has_legal_move(&self) -> bool {
        self.board
            .squares_of(self.side_to_move)
            .any(|(from, _)| Square::all().any(|to| self.is_legal(from, to)))
    }

    /// Return `true` if the side to move's king is attacked.
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        self.board
            .king_square(us)
            .is_some_and(|king| self.board.is_square_attacked(king, !us))
    }

    /// Pseudo-legal filter: geometry, occupancy, en passant and castling
    /// preconditions. Says nothing about the mover's own king except for the
    /// castling squares.
    pub(crate) fn classify(&self, from: Square, to: Square) -> Option<MoveKind> {
        if from == to {
            return None;
        }
        let us = self.side_to_move;
        let piece = self.board.piece_at(from)?;
        if piece.color() != us || self.board.color_at(to) == Some(us) {
            return None;
        }

        let d_row = to.row() as i8 - from.row() as i8;
        let d_col = to.col() as i8 - from.col() as i8;

        match piece.kind() {
            PieceKind::Pawn => self.classify_pawn(from, to, d_row, d_col),
            PieceKind::Knight => {
                let shape = (d_row.abs(), d_col.abs());
                (shape == (1, 2) || shape == (2, 1)).then_some(MoveKind::Normal)
            }
            PieceKind::Bishop => (d_row.abs() == d_col.abs() && self.board.path_clear(from, to))
                .then_some(MoveKind::Normal),
            PieceKind::Rook => ((d_row == 0 || d_col == 0) && self.board.path_clear(from, to))
                .then_some(MoveKind::Normal),
            PieceKind::Queen => self.board.path_clear(from, to).then_some(MoveKind::Normal),
            PieceKind::King => {
                if d_row.abs() <= 1 && d_col.abs() <= 1 {
                    Some(MoveKind::Normal)
                } else if d_row == 0 && d_col.abs() == 2 {
                    let side = if d_col > 0 {
                        CastleSide::KingSide
                    } else {
                        CastleSide::QueenSide
                    };
                    self.classify_castle(from, to, side)
                } else {
                    None
                }
            }
        }
    }

    fn classify_pawn(&self, from: Square, to: Square, d_row: i8, d_col: i8) -> Option<MoveKind> {
        let us = self.side_to_move;
        let dir = us.pawn_direction();

        if d_col == 0 {
            if d_row == dir && self.board.is_empty(to) {
                return Some(MoveKind::Normal);
            }
            if d_row == 2 * dir
                && from.row() == us.pawn_start_row()
                && self.board.is_empty(to)
                && from.offset(dir, 0).is_some_and(|mid| self.board.is_empty(mid))
            {
                return Some(MoveKind::DoublePush);
            }
            return None;
        }

        if d_col.abs() != 1 || d_row != dir {
            return None;
        }
        if self.board.color_at(to) == Some(!us) {
            return Some(MoveKind::Normal);
        }
        if self.en_passant == Some(to) {
            // The double-stepped pawn sits beside the capturing pawn.
            let victim = Square::at(from.row(), to.col());
            if self.board.piece_at(victim) == Some(Piece::new(PieceKind::Pawn, !us)) {
                return Some(MoveKind::EnPassant { victim });
            }
        }
        None
    }

    fn classify_castle(&self, from: Square, to: Square, side: CastleSide) -> Option<MoveKind> {
        let us = self.side_to_move;
        if from != king_home(us) || !self.castling.has(us, side) {
            return None;
        }
        let rook_from = rook_home(us, side);
        if self.board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, us)) {
            return None;
        }
        if !self.board.path_clear(from, rook_from) {
            return None;
        }

        let step = if side == CastleSide::KingSide { 1 } else { -1 };
        let transit = from.offset(0, step)?;
        let them = !us;
        if [from, transit, to]
            .into_iter()
            .any(|sq| self.board.is_square_attacked(sq, them))
        {
            return None;
        }

        Some(MoveKind::Castle {
            rook_from,
            rook_to: Square::at(us.back_row(), side.rook_dest_col()),
        })
    }
}
