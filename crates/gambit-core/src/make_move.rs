//! Move execution: mutate a position in place after a move has been
//! validated.

use tracing::{debug, warn};

use crate::castle_rights::{CastleSide, rook_home};
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;
use crate::validator::{MoveKind, shift_pieces};

impl Position {
    /// Play `from` to `to` for the side to move.
    ///
    /// The move must satisfy [`Position::is_legal`]. A request that is not
    /// even pseudo-legal is logged and leaves the position unchanged.
    pub fn apply(&mut self, from: Square, to: Square) {
        if self.apply_unrecorded(from, to) {
            self.record();
        }
    }

    /// Play `mv`; see [`Position::apply`].
    #[inline]
    pub fn apply_move(&mut self, mv: Move) {
        self.apply(mv.from(), mv.to());
    }

    /// Every effect of [`Position::apply`] except the repetition table update.
    ///
    /// Returns `false` (and changes nothing) if the move is not pseudo-legal.
    pub(crate) fn apply_unrecorded(&mut self, from: Square, to: Square) -> bool {
        let (Some(kind), Some(piece)) = (self.classify(from, to), self.board.piece_at(from)) else {
            warn!(%from, %to, "ignoring move that is not playable here");
            return false;
        };

        let us = self.side_to_move;
        let is_capture =
            matches!(kind, MoveKind::EnPassant { .. }) || !self.board.is_empty(to);

        shift_pieces(&mut self.board, from, to, kind);

        if piece.kind() == PieceKind::King {
            self.castling = self.castling.remove_color(us);
        }
        self.revoke_orphaned_rights();

        self.en_passant = match kind {
            MoveKind::DoublePush => Square::new((from.row() + to.row()) / 2, from.col()),
            _ => None,
        };

        if piece.kind() == PieceKind::Pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        self.side_to_move = !us;
        if self.side_to_move == Color::White {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        debug!(
            mv = %Move::new(from, to),
            ?kind,
            capture = is_capture,
            halfmove = self.halfmove_clock,
            "applied move"
        );
        true
    }

    /// Clear every right whose rook no longer stands on its home square.
    ///
    /// Covers both a rook leaving home and a rook being captured there.
    fn revoke_orphaned_rights(&mut self) {
        for color in Color::ALL {
            for side in CastleSide::ALL {
                let rook = Piece::new(PieceKind::Rook, color);
                if self.castling.has(color, side)
                    && self.board.piece_at(rook_home(color, side)) != Some(rook)
                {
                    self.castling = self.castling.remove(color, side);
                }
            }
        }
    }
}
