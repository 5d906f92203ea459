//! Game state classification after a move.

use std::fmt;

use crate::color::Color;
use crate::position::Position;

/// Where the game stands for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a legal reply.
    Check,
    Checkmate {
        winner: Color,
    },
    Stalemate,
    /// Halfmove clock reached 100 plies.
    DrawFiftyMove,
    /// The current position has occurred for the third time.
    DrawRepetition,
}

impl GameStatus {
    /// Return `true` for every status that ends the game.
    pub fn is_game_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    /// Return `true` for the two draw-by-rule statuses and stalemate.
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::DrawFiftyMove | GameStatus::DrawRepetition
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "Game in progress"),
            GameStatus::Check => write!(f, "Check!"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate, {} won", winner.name()),
            GameStatus::Stalemate => write!(f, "Stalemate!"),
            GameStatus::DrawFiftyMove => write!(f, "Draw by 50-move rule!"),
            GameStatus::DrawRepetition => write!(f, "Draw by threefold repetition!"),
        }
    }
}

impl Position {
    /// Classify the position for the side to move.
    ///
    /// Draw rules take precedence over mate: a position that is both the
    /// third repetition and checkmate reports the draw.
    pub fn status(&self) -> GameStatus {
        if self.halfmove_clock >= 100 {
            return GameStatus::DrawFiftyMove;
        }
        if self.repetition_count() >= 3 {
            return GameStatus::DrawRepetition;
        }

        let in_check = self.is_in_check();
        match (self.has_legal_move(), in_check) {
            (false, true) => GameStatus::Checkmate {
                winner: !self.side_to_move,
            },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Ongoing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GameStatus;
    use crate::color::Color;
    use crate::position::Position;

    fn pos(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn start_is_ongoing() {
        assert_eq!(Position::starting_position().status(), GameStatus::Ongoing);
    }

    #[test]
    fn check_with_escape() {
        let p = pos("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
        assert_eq!(p.status(), GameStatus::Check);
    }

    #[test]
    fn back_rank_mate() {
        let p = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
        assert_eq!(p.status(), GameStatus::Checkmate { winner: Color::White });
    }

    #[test]
    fn stalemate() {
        let p = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(p.status(), GameStatus::Stalemate);
    }

    #[test]
    fn fifty_move_boundary() {
        assert_eq!(pos("4k3/8/8/8/8/8/8/4K3 w - - 99 80").status(), GameStatus::Ongoing);
        assert_eq!(pos("4k3/8/8/8/8/8/8/4K3 w - - 100 80").status(), GameStatus::DrawFiftyMove);
    }

    #[test]
    fn fifty_move_outranks_mate() {
        let p = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 60");
        assert_eq!(p.status(), GameStatus::DrawFiftyMove);
    }

    #[test]
    fn game_over_flags() {
        assert!(!GameStatus::Ongoing.is_game_over());
        assert!(!GameStatus::Check.is_game_over());
        assert!(GameStatus::Stalemate.is_game_over());
        assert!(GameStatus::DrawRepetition.is_draw());
        let mate = GameStatus::Checkmate { winner: Color::Black };
        assert!(mate.is_game_over());
        assert!(!mate.is_draw());
    }

    #[test]
    fn display_messages() {
        let mate = GameStatus::Checkmate { winner: Color::Black };
        assert_eq!(mate.to_string(), "Checkmate, Black won");
        assert_eq!(GameStatus::DrawFiftyMove.to_string(), "Draw by 50-move rule!");
        assert_eq!(GameStatus::DrawRepetition.to_string(), "Draw by threefold repetition!");
    }
}
