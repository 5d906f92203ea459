//! FEN string parsing and serialization for [`Position`].

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::board::Board;
use crate::castle_rights::{CastleRights, CastleSide, fen_letter, rook_home};
use crate::color::Color;
use crate::error::FenError;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Decode a FEN string; see the [`FromStr`] impl.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        fen.parse()
    }

    /// Encode this position as a six-field FEN string.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

/// Parse one of the trailing move counters, keeping `default` when the field
/// is missing or not a number.
fn parse_counter(field: Option<&str>, name: &'static str, default: u32) -> u32 {
    match field {
        None => default,
        Some(text) => text.parse().unwrap_or_else(|_| {
            warn!(field = name, found = text, default, "unparsable FEN counter, using default");
            default
        }),
    }
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut board = Board::empty();
    // FEN lists rank 8 first, which is row 0.
    for (rank_index, rank_str) in ranks.iter().enumerate() {
        let mut length = 0usize;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                length += digit as usize;
                continue;
            }

            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            if let Some(sq) = Square::new(rank_index as u8, length as u8) {
                board.set(sq, Some(piece));
            }
            length += 1;
        }

        if length != 8 {
            return Err(FenError::BadRankLength { rank_index, length });
        }
    }

    for color in Color::ALL {
        let count = board.count(PieceKind::King, color);
        if count != 1 {
            return Err(FenError::InvalidKingCount {
                color: color.name(),
                count,
            });
        }
    }

    Ok(board)
}

impl FromStr for Position {
    type Err = FenError;

    /// Decode FEN.
    ///
    /// Placement and active color are required. Missing castling or en
    /// passant fields read as `-`; missing or malformed move counters fall
    /// back to 0 and 1. The repetition table starts fresh.
    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let placement = fields.first().ok_or(FenError::Empty)?;
        let board = parse_placement(placement)?;

        let side_to_move = match fields.get(1) {
            Some(&"w") => Color::White,
            Some(&"b") => Color::Black,
            Some(other) => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
            None => return Err(FenError::MissingColor),
        };

        let castling = CastleRights::from_fen(fields.get(2).copied().unwrap_or("-"))?;

        let en_passant = match fields.get(3).copied().unwrap_or("-") {
            "-" => None,
            text => Some(Square::from_algebraic(text).ok_or_else(|| {
                FenError::InvalidEnPassant {
                    found: text.to_string(),
                }
            })?),
        };

        let halfmove_clock = parse_counter(fields.get(4).copied(), "halfmove clock", 0);
        let fullmove_number = parse_counter(fields.get(5).copied(), "fullmove number", 1);

        Ok(Position::from_parts(
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Piece placement
        for row in 0u8..8 {
            let mut empty_count = 0u8;
            for col in 0u8..8 {
                match self.board.piece_at(Square::at(row, col)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if row < 7 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} ", self.side_to_move)?;

        // A right is only written while its rook still stands on the corner.
        let mut any_castling = false;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                let rook = Piece::new(PieceKind::Rook, color);
                if self.castling.has(color, side)
                    && self.board.piece_at(rook_home(color, side)) == Some(rook)
                {
                    write!(f, "{}", fen_letter(color, side))?;
                    any_castling = true;
                }
            }
        }
        if !any_castling {
            write!(f, "-")?;
        }

        match self.en_passant {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::castle_rights::CastleRights;
    use crate::color::Color;
    use crate::error::FenError;
    use crate::piece::Piece;
    use crate::position::Position;
    use crate::square::Square;

    fn roundtrip(fen: &str) {
        let position: Position = fen.parse().unwrap();
        let output = format!("{position}");
        assert_eq!(output, fen, "FEN roundtrip failed");
        let reparsed: Position = output.parse().unwrap();
        assert_eq!(position, reparsed);
    }

    #[test]
    fn roundtrip_starting() {
        roundtrip(STARTING_FEN);
    }

    #[test]
    fn roundtrip_sicilian() {
        roundtrip("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2");
    }

    #[test]
    fn roundtrip_kiwipete() {
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn roundtrip_endgame() {
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    }

    #[test]
    fn roundtrip_black_to_move() {
        roundtrip("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn starting_position_matches_fen() {
        let from_constructor = Position::starting_position();
        let from_fen: Position = STARTING_FEN.parse().unwrap();
        assert_eq!(from_constructor, from_fen);
        assert_eq!(from_constructor.to_fen(), STARTING_FEN);
    }

    #[test]
    fn decoded_fields() {
        let p = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 b - d6 3 27").unwrap();
        assert_eq!(p.side_to_move(), Color::Black);
        assert_eq!(p.en_passant(), Some(Square::D6));
        assert_eq!(p.halfmove_clock(), 3);
        assert_eq!(p.fullmove_number(), 27);
        assert_eq!(p.board().piece_at(Square::D5), Some(Piece::BLACK_PAWN));
        assert_eq!(p.repetition_count(), 1);
    }

    #[test]
    fn castling_letter_needs_rook_on_corner() {
        // Flags claim KQkq but the h1 rook is missing.
        let p: Position = "r3k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1".parse().unwrap();
        assert_eq!(p.castling(), CastleRights::ALL, "flags are kept as given");
        assert_eq!(p.to_fen(), "r3k2r/8/8/8/8/8/8/R3K3 w Qkq - 0 1");
    }

    #[test]
    fn no_castling_written_as_dash() {
        let p: Position = "r3k2r/8/8/8/8/8/8/4K3 w KQ - 0 1".parse().unwrap();
        assert_eq!(p.to_fen(), "r3k2r/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    // --- Lenient trailing fields ---

    #[test]
    fn missing_trailing_fields_default() {
        let p: Position = "4k3/8/8/8/8/8/8/4K3 w".parse().unwrap();
        assert_eq!(p.castling(), CastleRights::NONE);
        assert_eq!(p.en_passant(), None);
        assert_eq!(p.halfmove_clock(), 0);
        assert_eq!(p.fullmove_number(), 1);
    }

    #[test]
    fn bad_counters_keep_defaults() {
        let p: Position = "4k3/8/8/8/8/8/8/4K3 w - - abc -7".parse().unwrap();
        assert_eq!(p.halfmove_clock(), 0);
        assert_eq!(p.fullmove_number(), 1);
    }

    #[test]
    fn pawn_on_back_rank_accepted() {
        let p: Position = "P3k3/8/8/8/8/8/8/4K3 b - - 0 1".parse().unwrap();
        assert_eq!(p.board().piece_at(Square::A8), Some(Piece::WHITE_PAWN));
    }

    // --- Structural errors ---

    #[test]
    fn error_empty() {
        assert_eq!("".parse::<Position>(), Err(FenError::Empty));
        assert_eq!("   ".parse::<Position>(), Err(FenError::Empty));
    }

    #[test]
    fn error_missing_color() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3".parse::<Position>(),
            Err(FenError::MissingColor)
        );
    }

    #[test]
    fn error_wrong_rank_count() {
        assert_eq!(
            "4k3/8/8/8/8/8/4K3 w - - 0 1".parse::<Position>(),
            Err(FenError::WrongRankCount { found: 7 })
        );
    }

    #[test]
    fn error_invalid_piece_char() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidPieceChar { character: 'X' }));
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPP0PPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidPieceChar { character: '0' }));
    }

    #[test]
    fn error_bad_rank_length() {
        let result = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::BadRankLength { rank_index: 1, length: 7 }));
        let result = "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert!(result.is_err());
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::BadRankLength { rank_index: 6, length: 9 }));
    }

    #[test]
    fn error_invalid_color() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidColor { found: "x".to_string() }));
    }

    #[test]
    fn error_invalid_castling() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidCastlingChar { character: 'X' }));
    }

    #[test]
    fn error_invalid_en_passant() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidEnPassant { found: "z9".to_string() }));
    }

    #[test]
    fn error_king_count() {
        let result = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidKingCount { color: "Black", count: 0 }));
        let result = "4k3/8/8/8/8/8/8/3KK3 w - - 0 1".parse::<Position>();
        assert_eq!(result, Err(FenError::InvalidKingCount { color: "White", count: 2 }));
    }
}
