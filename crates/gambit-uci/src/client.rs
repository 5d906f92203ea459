//! Subprocess UCI client: spawn an engine, handshake, and ask for moves.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use gambit_core::Move;

use crate::command::{EngineCommand, EngineReply, GoParams, parse_reply};
use crate::error::UciError;

/// Something that can pick a move for a FEN position.
///
/// Implemented by [`UciClient`]; the advisor only depends on this seam.
pub trait ExternalEngine: Send {
    /// Ask for the best move in `fen`, thinking for `movetime`.
    ///
    /// `Ok(None)` means the engine answered but has no move.
    fn best_move(&mut self, fen: &str, movetime: Duration) -> Result<Option<Move>, UciError>;

    /// Forget per-game state before the next position. Does nothing by default.
    fn new_game(&mut self) -> Result<(), UciError> {
        Ok(())
    }
}

/// A running UCI engine process.
///
/// A reader thread forwards every stdout line over a channel, so each wait
/// is a bounded `recv_timeout`. The process is told to quit and then killed
/// when the client is dropped.
pub struct UciClient {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    timeout: Duration,
    name: Option<String>,
    /// Set once a stopped search never produced its `bestmove`.
    desynced: bool,
}

impl UciClient {
    /// Start `program` and complete the `uci` / `isready` handshake.
    ///
    /// `timeout` bounds every later wait for a reply.
    pub fn spawn<S: AsRef<OsStr>>(
        program: S,
        args: &[String],
        timeout: Duration,
    ) -> Result<UciClient, UciError> {
        let program_name = program.as_ref().to_string_lossy().into_owned();
        let mut child = Command::new(program.as_ref())
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| UciError::Spawn {
                program: program_name.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(UciError::EngineExited);
        };

        let (tx, rx) = mpsc::channel::<String>();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
            // Dropping `tx` tells the client the engine is gone.
        });

        let mut client = UciClient {
            child,
            stdin,
            lines: rx,
            timeout,
            name: None,
            desynced: false,
        };
        client.handshake()?;
        info!(
            program = %program_name,
            name = client.name.as_deref().unwrap_or("unknown"),
            "external engine ready"
        );
        Ok(client)
    }

    /// The engine's self-reported name, if it sent `id name`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn handshake(&mut self) -> Result<(), UciError> {
        self.send(&EngineCommand::Uci)?;
        let mut name = None;
        self.wait_for("uciok", |reply| match reply {
            EngineReply::UciOk => Some(()),
            EngineReply::Id { key, value } if key == "name" => {
                name = Some(value);
                None
            }
            _ => None,
        })?;
        self.name = name;
        self.sync()
    }

    /// Send `isready` and wait for `readyok`.
    pub fn sync(&mut self) -> Result<(), UciError> {
        self.send(&EngineCommand::IsReady)?;
        self.wait_for("readyok", |reply| (reply == EngineReply::ReadyOk).then_some(()))
    }

    /// Limit the engine's playing strength to `elo`.
    pub fn set_elo(&mut self, elo: u32) -> Result<(), UciError> {
        self.send(&EngineCommand::limit_strength())?;
        self.send(&EngineCommand::elo(elo))?;
        self.sync()
    }

    /// Tell the engine the next position starts a new game.
    pub fn new_game(&mut self) -> Result<(), UciError> {
        self.send(&EngineCommand::UciNewGame)?;
        self.sync()
    }

    /// Search `fen` with the given limits and return the engine's move.
    ///
    /// A search that overruns the timeout is stopped and its late reply
    /// discarded before the `Timeout` error is returned.
    pub fn go(&mut self, fen: &str, params: GoParams) -> Result<Option<Move>, UciError> {
        if self.desynced {
            return Err(UciError::Unresponsive);
        }
        self.drain_stale();
        self.send(&EngineCommand::Position {
            fen: fen.to_string(),
        })?;
        self.send(&EngineCommand::Go(params))?;

        match self.wait_for("bestmove", |reply| match reply {
            EngineReply::BestMove { best, .. } => Some(best),
            _ => None,
        }) {
            Err(UciError::Timeout { waiting_for, after }) => {
                self.discard_late_bestmove()?;
                Err(UciError::Timeout { waiting_for, after })
            }
            result => result,
        }
    }

    /// Stop an overdue search and consume its `bestmove`, so the next query
    /// cannot pick it up as its own answer.
    ///
    /// An engine that does not answer `stop` within the timeout leaves the
    /// reply stream out of step; the client is unusable from then on.
    fn discard_late_bestmove(&mut self) -> Result<(), UciError> {
        self.send(&EngineCommand::Stop)?;
        let late = self.wait_for("bestmove", |reply| {
            matches!(reply, EngineReply::BestMove { .. }).then_some(())
        });
        match late {
            Ok(()) => {
                debug!("discarded late bestmove");
                Ok(())
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!(error = %err, "engine did not answer stop");
                self.desynced = true;
                Err(UciError::Unresponsive)
            }
        }
    }

    /// Write one command line to the engine.
    fn send(&mut self, command: &EngineCommand) -> Result<(), UciError> {
        debug!(cmd = %command, "to engine");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read replies until `accept` returns a value or the timeout elapses.
    fn wait_for<T>(
        &mut self,
        waiting_for: &'static str,
        mut accept: impl FnMut(EngineReply) -> Option<T>,
    ) -> Result<T, UciError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = match self.lines.recv_timeout(remaining) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(UciError::Timeout {
                        waiting_for,
                        after: self.timeout,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(UciError::EngineExited),
            };
            debug!(line = %line, "from engine");
            if let Some(value) = accept(parse_reply(&line)?) {
                return Ok(value);
            }
        }
    }

    /// Discard output left over from an earlier, abandoned query.
    fn drain_stale(&mut self) {
        while let Ok(line) = self.lines.try_recv() {
            debug!(line = %line, "discarding stale engine output");
        }
    }
}

impl ExternalEngine for UciClient {
    fn best_move(&mut self, fen: &str, movetime: Duration) -> Result<Option<Move>, UciError> {
        self.go(
            fen,
            GoParams {
                movetime: Some(movetime),
                depth: None,
            },
        )
    }

    fn new_game(&mut self) -> Result<(), UciError> {
        UciClient::new_game(self)
    }
}

impl Drop for UciClient {
    fn drop(&mut self) {
        let _ = self.send(&EngineCommand::Quit);
        if let Err(err) = self.child.kill() {
            // Already exited after `quit`.
            debug!(error = %err, "engine kill skipped");
        }
        if let Err(err) = self.child.wait() {
            warn!(error = %err, "failed to reap engine process");
        }
    }
}
