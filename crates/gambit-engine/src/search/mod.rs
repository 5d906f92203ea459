//! Fallback move search used when no external engine is available.

pub mod minimax;
pub mod movegen;

use gambit_core::{Board, Color, FenError, Move, Position};
use tracing::debug;

use minimax::minimax;

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move at the root, or `None` at depth 0 or with no moves.
    pub best_move: Option<Move>,
    /// Minimax score in centipawns from White's perspective.
    pub score: i32,
    /// Total nodes visited during the search.
    pub nodes: u64,
    /// Depth searched.
    pub depth: u8,
}

/// Search `board` with `side` to move to a fixed `depth`.
///
/// Works on copies: `board` is never modified.
pub fn search(board: &Board, side: Color, depth: u8) -> SearchResult {
    let mut nodes = 0u64;
    let (score, best_move) = minimax(board, side, depth, &mut nodes);
    debug!(
        depth,
        nodes,
        score,
        best = best_move.map(|m| m.to_uci()).unwrap_or_else(|| "(none)".to_string()),
        "fallback search finished"
    );
    SearchResult {
        best_move,
        score,
        nodes,
        depth,
    }
}

/// Decode `fen` and return the best move for the side to move.
///
/// # Errors
///
/// Returns the decoding error if `fen` is structurally invalid.
pub fn best_move(fen: &str, depth: u8) -> Result<Option<Move>, FenError> {
    let position: Position = fen.parse()?;
    Ok(search(position.board(), position.side_to_move(), depth).best_move)
}
