//! A game session: the live position, its navigable history, and the ways a
//! game can end off the board.

use std::fmt;

use tracing::{debug, info};

use crate::chess_move::Move;
use crate::color::Color;
use crate::error::FenError;
use crate::position::Position;
use crate::square::Square;
use crate::status::GameStatus;

/// Why a game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The rules ended it: mate, stalemate or a draw rule.
    Rules(GameStatus),
    /// One side resigned.
    Resignation { winner: Color },
    /// Both sides agreed to a draw.
    DrawAgreed,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Rules(status) => write!(f, "{status}"),
            Termination::Resignation { winner } => {
                write!(f, "{} resigned, {} won", (!*winner).name(), winner.name())
            }
            Termination::DrawAgreed => write!(f, "Draw by agreement"),
        }
    }
}

/// Position history with a cursor.
///
/// Snapshots include the repetition table, so stepping back also rewinds
/// repetition counts. Playing a move while the cursor is not at the end
/// discards everything after it.
#[derive(Debug, Clone)]
pub struct Game {
    history: Vec<Position>,
    cursor: usize,
    agreement: Option<Termination>,
}

impl Game {
    /// A new game from the standard initial position.
    pub fn new() -> Game {
        Game::from_position(Position::starting_position())
    }

    /// A new game starting from `position`.
    pub fn from_position(position: Position) -> Game {
        Game {
            history: vec![position],
            cursor: 0,
            agreement: None,
        }
    }

    /// A new game starting from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        Ok(Game::from_position(fen.parse()?))
    }

    /// Discard everything and start over from the initial position.
    pub fn new_game(&mut self) {
        info!("new game");
        *self = Game::new();
    }

    /// The position at the cursor.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.history[self.cursor]
    }

    /// Rules status of the position at the cursor.
    pub fn status(&self) -> GameStatus {
        self.position().status()
    }

    /// Return why the game is over, or `None` while it can continue.
    pub fn termination(&self) -> Option<Termination> {
        if let Some(agreed) = self.agreement {
            return Some(agreed);
        }
        let status = self.status();
        status.is_game_over().then_some(Termination::Rules(status))
    }

    /// Play `from` to `to` if it is legal and the game is not over.
    ///
    /// Returns the status after the move, or `None` if the move was refused.
    pub fn play(&mut self, from: Square, to: Square) -> Option<GameStatus> {
        if self.termination().is_some() || !self.position().is_legal(from, to) {
            debug!(%from, %to, "move refused");
            return None;
        }

        let mut next = self.position().clone();
        next.apply(from, to);
        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor += 1;

        let status = self.status();
        if status.is_game_over() {
            info!(%status, "game over");
        }
        Some(status)
    }

    /// Play `mv`; see [`Game::play`].
    pub fn play_move(&mut self, mv: Move) -> Option<GameStatus> {
        self.play(mv.from(), mv.to())
    }

    /// The side to move resigns. Has no effect once the game is over.
    pub fn resign(&mut self) -> Option<Termination> {
        if self.termination().is_some() {
            return None;
        }
        let winner = !self.position().side_to_move();
        self.agreement = Some(Termination::Resignation { winner });
        info!(winner = winner.name(), "resignation");
        self.agreement
    }

    /// End the game as a draw by agreement. Has no effect once the game is over.
    pub fn agree_draw(&mut self) -> Option<Termination> {
        if self.termination().is_some() {
            return None;
        }
        self.agreement = Some(Termination::DrawAgreed);
        info!("draw agreed");
        self.agreement
    }

    /// Step one position back. Returns `false` at the start of the history.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step one position forward. Returns `false` at the end of the history.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Index of the current position in the history (0 = first position).
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored positions, including the first.
    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always `false`: a game holds at least its first position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
