//! Material-only minimax search for gambit.

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::{SearchResult, best_move, search};
