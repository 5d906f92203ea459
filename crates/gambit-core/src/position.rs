//! Full game position: placement, side to move, rights, clocks and the
//! repetition table.

use std::collections::HashMap;
use std::fmt;

use crate::board::{Board, PrettyBoard};
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::square::Square;

/// Identity of a position for repetition counting.
///
/// Two positions are "the same" when placement, side to move, castling
/// rights and en passant target all match. Clocks are not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    board: Board,
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
}

/// A chess position plus the game history needed to detect repetitions.
///
/// Created by [`Position::starting_position`] or by decoding FEN; both start
/// a fresh repetition table that already counts the new position once.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) repetitions: HashMap<PositionKey, u32>,
}

impl Position {
    /// The standard initial position, White to move.
    pub fn starting_position() -> Position {
        Position::from_parts(Board::starting(), Color::White, CastleRights::ALL, None, 0, 1)
    }

    /// Assemble a position and count it once in a fresh repetition table.
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Position {
        let mut position = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            repetitions: HashMap::new(),
        };
        position.record();
        position
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// The square a pawn skipped over on the previous ply, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Repetition key of the current position.
    pub fn key(&self) -> PositionKey {
        PositionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    /// How many times the current position has occurred in this game.
    pub fn repetition_count(&self) -> u32 {
        self.occurrences(&self.key())
    }

    /// How many times `key` has occurred in this game.
    pub fn occurrences(&self, key: &PositionKey) -> u32 {
        self.repetitions.get(key).copied().unwrap_or(0)
    }

    /// Count the current position in the repetition table.
    pub(crate) fn record(&mut self) {
        *self.repetitions.entry(self.key()).or_insert(0) += 1;
    }

    /// A copy of this position with an empty repetition table.
    ///
    /// Used where only move legality matters (perft) so that clones stay
    /// allocation-free.
    pub(crate) fn detached(&self) -> Position {
        Position {
            repetitions: HashMap::new(),
            ..*self
        }
    }

    /// Return a pretty-printable wrapper for the board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        self.board.pretty()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
