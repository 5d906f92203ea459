//! External engine errors.

use std::time::Duration;

/// Errors that can occur while talking to an external UCI engine.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The engine process could not be started.
    #[error("failed to start engine {program}: {source}")]
    Spawn {
        /// The program that was launched.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The engine did not send the expected reply in time.
    #[error("timed out after {after:?} waiting for {waiting_for}")]
    Timeout {
        /// The reply that was expected.
        waiting_for: &'static str,
        /// How long we waited.
        after: Duration,
    },

    /// A timed-out search was stopped but its `bestmove` never arrived, so
    /// later replies can no longer be matched to queries.
    #[error("engine did not answer stop; replies are out of step")]
    Unresponsive,

    /// The engine closed its output.
    #[error("engine exited")]
    EngineExited,

    /// A reply line that should carry a value could not be understood.
    #[error("malformed engine reply: {line}")]
    MalformedReply {
        /// The offending line.
        line: String,
    },

    /// An I/O error occurred while writing to the engine.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl UciError {
    /// Return `true` if the engine process can no longer be used.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            UciError::Spawn { .. }
                | UciError::Unresponsive
                | UciError::EngineExited
                | UciError::Io { .. }
        )
    }
}
