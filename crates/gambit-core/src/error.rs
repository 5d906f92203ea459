//! Error types for FEN decoding.

/// Structural errors in a FEN string.
///
/// The move counters are decoded leniently and never produce an error;
/// everything that determines where the pieces stand does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The input has no piece placement field at all.
    #[error("empty FEN string")]
    Empty,
    /// Placement split on `/` did not give 8 rows.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Rows actually present.
        found: usize,
    },
    /// A placement row does not add up to 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index in FEN order (0 = rank 8).
        rank_index: usize,
        /// Squares the row covers.
        length: usize,
    },
    /// Placement contains a letter that names no piece.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The placement is not followed by an active color field.
    #[error("missing active color field")]
    MissingColor,
    /// Side to move is something other than `w` or `b`.
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// Field as given.
        found: String,
    },
    /// Castling field contains a letter other than `KQkq`.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// En passant field is neither `-` nor a square name.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// Field as given.
        found: String,
    },
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
}
