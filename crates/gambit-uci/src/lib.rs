//! External engine bridge for gambit: UCI subprocess client and move advisor.

pub mod advisor;
pub mod client;
pub mod command;
pub mod config;
pub mod error;

pub use advisor::{Advisor, MoveSource, Suggestion};
pub use client::{ExternalEngine, UciClient};
pub use command::{EngineCommand, EngineReply, GoParams, parse_reply};
pub use config::{BASE_ELO, EngineConfig, elo_for_level};
pub use error::UciError;
