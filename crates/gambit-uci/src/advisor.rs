//! Move suggestions: external engine first, fallback search otherwise.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use gambit_core::{Move, Position};

use crate::client::{ExternalEngine, UciClient};
use crate::config::EngineConfig;
use crate::error::UciError;

/// Where a suggested move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// The external UCI engine.
    External,
    /// The built-in minimax search.
    Fallback,
}

impl fmt::Display for MoveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveSource::External => f.write_str("engine"),
            MoveSource::Fallback => f.write_str("fallback search"),
        }
    }
}

/// A legal move proposed for the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub mv: Move,
    pub source: MoveSource,
}

/// Picks moves for the side to move.
///
/// Holds at most one external engine. Any engine failure falls back to the
/// built-in search for that request; failures that leave the process
/// unusable also drop the engine for good.
pub struct Advisor {
    engine: Option<Box<dyn ExternalEngine>>,
    movetime: Duration,
    fallback_depth: u8,
}

impl Advisor {
    /// Start the configured engine, if any.
    ///
    /// A failing engine is logged and replaced by the fallback search.
    pub fn from_config(config: &EngineConfig) -> Advisor {
        let engine = config.engine_path.as_ref().and_then(|path| {
            let mut client =
                match UciClient::spawn(path, &config.engine_args, config.reply_timeout) {
                    Ok(client) => client,
                    Err(err) => {
                        warn!(error = %err, "external engine unavailable, using fallback search");
                        return None;
                    }
                };
            if let Some(elo) = config.elo
                && let Err(err) = client.set_elo(elo)
            {
                warn!(elo, error = %err, "failed to set engine strength, using fallback search");
                return None;
            }
            Some(Box::new(client) as Box<dyn ExternalEngine>)
        });

        if engine.is_none() {
            info!(depth = config.fallback_depth, "move suggestions from fallback search");
        }

        Advisor {
            engine,
            movetime: config.movetime,
            fallback_depth: config.fallback_depth,
        }
    }

    /// An advisor that only uses the fallback search.
    pub fn fallback_only(depth: u8) -> Advisor {
        Advisor {
            engine: None,
            movetime: Duration::ZERO,
            fallback_depth: depth,
        }
    }

    /// An advisor around an already running engine.
    pub fn with_engine(
        engine: Box<dyn ExternalEngine>,
        movetime: Duration,
        fallback_depth: u8,
    ) -> Advisor {
        Advisor {
            engine: Some(engine),
            movetime,
            fallback_depth,
        }
    }

    /// Whether an external engine is still attached.
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Tell the external engine a new game begins (`ucinewgame`).
    ///
    /// Failures are logged; a fatal one drops the engine.
    pub fn new_game(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(err) = engine.new_game() {
            self.on_engine_error(err);
        }
    }

    /// Suggest a legal move for the side to move, or `None` if there is none.
    pub fn suggest(&mut self, position: &Position) -> Option<Suggestion> {
        if let Some(mv) = self.ask_engine(position) {
            return Some(Suggestion {
                mv,
                source: MoveSource::External,
            });
        }

        let result = gambit_engine::search(
            position.board(),
            position.side_to_move(),
            self.fallback_depth,
        );
        // The fallback search ignores check, so its choice may leave the king
        // attacked. Substitute the first legal move in that case.
        let mv = match result.best_move {
            Some(mv) if position.is_legal_move(mv) => mv,
            searched => {
                let legal = position.legal_moves().into_iter().next()?;
                debug!(?searched, %legal, "fallback move not legal, substituting");
                legal
            }
        };
        Some(Suggestion {
            mv,
            source: MoveSource::Fallback,
        })
    }

    fn ask_engine(&mut self, position: &Position) -> Option<Move> {
        let engine = self.engine.as_mut()?;
        let fen = position.to_fen();
        match engine.best_move(&fen, self.movetime) {
            Ok(Some(mv)) if position.is_legal_move(mv) => Some(mv),
            Ok(Some(mv)) => {
                warn!(%mv, fen = %fen, "engine suggested an illegal move");
                None
            }
            Ok(None) => {
                debug!(fen = %fen, "engine has no move");
                None
            }
            Err(err) => {
                self.on_engine_error(err);
                None
            }
        }
    }

    fn on_engine_error(&mut self, err: UciError) {
        warn!(error = %err, "engine request failed");
        if err.is_fatal() {
            info!("dropping external engine");
            self.engine = None;
        }
    }
}

impl fmt::Debug for Advisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Advisor")
            .field("engine", &self.engine.is_some())
            .field("movetime", &self.movetime)
            .field("fallback_depth", &self.fallback_depth)
            .finish()
    }
}
