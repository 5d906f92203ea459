//! UCI wire format: commands we send and replies we read.

use std::fmt;
use std::time::Duration;

use gambit_core::Move;

use crate::error::UciError;

/// Search limits for the `go` command. A bare `go` has neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Search for exactly this duration.
    pub movetime: Option<Duration>,
    /// Search to this depth only.
    pub depth: Option<u8>,
}

/// A command sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// `uci` -- ask the engine to identify itself.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- the next position belongs to a new game.
    UciNewGame,
    /// `setoption name <name> value <value>`.
    SetOption { name: String, value: String },
    /// `position fen <fen>`.
    Position { fen: String },
    /// `go` with optional limits.
    Go(GoParams),
    /// `stop` -- halt the current search.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
}

impl EngineCommand {
    /// `setoption name UCI_LimitStrength value true`.
    pub fn limit_strength() -> EngineCommand {
        EngineCommand::SetOption {
            name: "UCI_LimitStrength".to_string(),
            value: "true".to_string(),
        }
    }

    /// `setoption name UCI_Elo value <elo>`.
    pub fn elo(elo: u32) -> EngineCommand {
        EngineCommand::SetOption {
            name: "UCI_Elo".to_string(),
            value: elo.to_string(),
        }
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineCommand::Uci => write!(f, "uci"),
            EngineCommand::IsReady => write!(f, "isready"),
            EngineCommand::UciNewGame => write!(f, "ucinewgame"),
            EngineCommand::SetOption { name, value } => {
                write!(f, "setoption name {name} value {value}")
            }
            EngineCommand::Position { fen } => write!(f, "position fen {fen}"),
            EngineCommand::Go(params) => {
                write!(f, "go")?;
                if let Some(movetime) = params.movetime {
                    write!(f, " movetime {}", movetime.as_millis())?;
                }
                if let Some(depth) = params.depth {
                    write!(f, " depth {depth}")?;
                }
                Ok(())
            }
            EngineCommand::Stop => write!(f, "stop"),
            EngineCommand::Quit => write!(f, "quit"),
        }
    }
}

/// A parsed line of engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineReply {
    /// `uciok` -- identification finished.
    UciOk,
    /// `readyok` -- answer to `isready`.
    ReadyOk,
    /// `bestmove <move> [ponder <move>]`; `best` is `None` for `(none)` or `0000`.
    BestMove {
        best: Option<Move>,
        ponder: Option<Move>,
    },
    /// `id <key> <value...>`, e.g. `id name Stockfish 16`.
    Id { key: String, value: String },
    /// `info ...`, kept verbatim without the keyword.
    Info(String),
    /// Anything else (silently ignored per UCI convention).
    Unknown(String),
}

/// Parse a single line of engine output into an [`EngineReply`].
pub fn parse_reply(line: &str) -> Result<EngineReply, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&keyword) = tokens.first() else {
        return Ok(EngineReply::Unknown(String::new()));
    };

    match keyword {
        "uciok" => Ok(EngineReply::UciOk),
        "readyok" => Ok(EngineReply::ReadyOk),
        "bestmove" => parse_bestmove(line, &tokens[1..]),
        "id" => Ok(EngineReply::Id {
            key: tokens.get(1).copied().unwrap_or_default().to_string(),
            value: tokens.get(2..).map(|rest| rest.join(" ")).unwrap_or_default(),
        }),
        "info" => Ok(EngineReply::Info(tokens[1..].join(" "))),
        _ => Ok(EngineReply::Unknown(line.trim().to_string())),
    }
}

/// Parse the `bestmove` arguments.
fn parse_bestmove(line: &str, tokens: &[&str]) -> Result<EngineReply, UciError> {
    let malformed = || UciError::MalformedReply {
        line: line.trim().to_string(),
    };

    let best = match tokens.first() {
        None => return Err(malformed()),
        Some(&"(none)") | Some(&"0000") => None,
        Some(text) => Some(Move::from_uci(text).ok_or_else(malformed)?),
    };

    let ponder = match tokens.get(1..3) {
        Some(["ponder", text]) => Move::from_uci(text),
        _ => None,
    };

    Ok(EngineReply::BestMove { best, ponder })
}
