//! Core chess types: board representation, move legality, move execution,
//! game state and FEN.

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod game;
mod make_move;
mod piece;
mod position;
mod square;
mod status;
mod validator;

pub mod perft;

pub use board::{Board, PrettyBoard};
pub use castle_rights::{CastleRights, CastleSide, king_home, rook_home};
pub use chess_move::Move;
pub use color::Color;
pub use error::FenError;
pub use fen::STARTING_FEN;
pub use game::{Game, Termination};
pub use piece::{Piece, PieceKind};
pub use position::{Position, PositionKey};
pub use square::Square;
pub use status::GameStatus;
