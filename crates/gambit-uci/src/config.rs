//! External engine configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Lowest strength a level maps to.
pub const BASE_ELO: u32 = 800;

/// Map a strength level (0 and up) to the ELO value sent to the engine.
pub const fn elo_for_level(level: u32) -> u32 {
    BASE_ELO + level
}

/// How to reach and drive the external engine, and what to do without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Engine executable; `None` means fallback search only.
    pub engine_path: Option<PathBuf>,
    /// Extra command-line arguments for the engine.
    pub engine_args: Vec<String>,
    /// Think time per `go`.
    pub movetime: Duration,
    /// Strength limit forwarded as `UCI_Elo`; `None` plays at full strength.
    pub elo: Option<u32>,
    /// Depth of the fallback minimax search.
    pub fallback_depth: u8,
    /// Longest wait for any single engine reply.
    pub reply_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_path: None,
            engine_args: Vec::new(),
            movetime: Duration::from_millis(10),
            elo: None,
            fallback_depth: 3,
            reply_timeout: Duration::from_secs(5),
        }
    }
}
