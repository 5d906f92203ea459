//! Line-oriented console front end over a [`Game`].

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use gambit_core::{Game, GameStatus, Move};
use gambit_uci::Advisor;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `new` -- start over from the initial position.
    New,
    /// `fen` -- print the current position as FEN.
    Fen,
    /// `load <fen>` -- start a game from a FEN string.
    Load(String),
    /// `<move>` or `move <move>` -- play a move in coordinate form.
    Play(Move),
    /// `moves` -- list the legal moves.
    Moves,
    /// `status` -- print the game state.
    Status,
    /// `hint` -- ask for a move suggestion.
    Hint,
    /// `back` -- step back in the history.
    Back,
    /// `forward` -- step forward in the history.
    Forward,
    /// `resign` -- the side to move resigns.
    Resign,
    /// `draw` -- the players agree to a draw.
    Draw,
    /// `board` -- print the board.
    Board,
    /// `help` -- list the commands.
    Help,
    /// `quit` -- leave the console.
    Quit,
    /// Unrecognized input, kept for the error message.
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => return None,
        "new" => ConsoleCommand::New,
        "fen" => ConsoleCommand::Fen,
        "load" if !rest.is_empty() => ConsoleCommand::Load(rest.to_string()),
        "move" => match Move::from_uci(rest) {
            Some(mv) => ConsoleCommand::Play(mv),
            None => ConsoleCommand::Unknown(line.to_string()),
        },
        "moves" => ConsoleCommand::Moves,
        "status" => ConsoleCommand::Status,
        "hint" => ConsoleCommand::Hint,
        "back" => ConsoleCommand::Back,
        "forward" => ConsoleCommand::Forward,
        "resign" => ConsoleCommand::Resign,
        "draw" => ConsoleCommand::Draw,
        "board" => ConsoleCommand::Board,
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ if rest.is_empty() => match Move::from_uci(word) {
            Some(mv) => ConsoleCommand::Play(mv),
            None => ConsoleCommand::Unknown(line.to_string()),
        },
        _ => ConsoleCommand::Unknown(line.to_string()),
    };
    Some(command)
}

const HELP: &str = "\
commands:
  <move> | move <move>   play a move, e.g. e2e4 or e1g1 to castle
  moves                  list legal moves
  hint                   suggest a move
  status                 show the game state
  board                  show the board
  fen                    show the position as FEN
  load <fen>             start from a FEN position
  new                    start a new game
  back | forward         step through the history
  resign | draw          end the game
  quit                   leave";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The console session: a game plus a move advisor.
pub struct Console {
    game: Game,
    advisor: Advisor,
}

impl Console {
    pub fn new(game: Game, advisor: Advisor) -> Console {
        Console { game, advisor }
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "{}\n", self.game.position().pretty())?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            debug!(line = %line.trim(), "console input");
            if let Some(command) = parse_command(&line)
                && self.execute(command, &mut out)? == Flow::Quit
            {
                return Ok(());
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: ConsoleCommand, out: &mut W) -> Result<Flow> {
        match command {
            ConsoleCommand::New => {
                self.game.new_game();
                self.advisor.new_game();
                writeln!(out, "{}", self.game.position().pretty())?;
            }
            ConsoleCommand::Fen => writeln!(out, "{}", self.game.position().to_fen())?,
            ConsoleCommand::Load(fen) => match Game::from_fen(&fen) {
                Ok(game) => {
                    self.game = game;
                    self.advisor.new_game();
                    writeln!(out, "{}", self.game.position().pretty())?;
                    self.report_status(out)?;
                }
                Err(err) => writeln!(out, "invalid FEN: {err}")?,
            },
            ConsoleCommand::Play(mv) => self.play(mv, out)?,
            ConsoleCommand::Moves => {
                let moves: Vec<String> = self
                    .game
                    .position()
                    .legal_moves()
                    .into_iter()
                    .map(Move::to_uci)
                    .collect();
                if moves.is_empty() {
                    writeln!(out, "no legal moves")?;
                } else {
                    writeln!(out, "{} legal: {}", moves.len(), moves.join(" "))?;
                }
            }
            ConsoleCommand::Status => self.report_status(out)?,
            ConsoleCommand::Hint => match self.advisor.suggest(self.game.position()) {
                Some(suggestion) => {
                    writeln!(out, "hint: {} ({})", suggestion.mv, suggestion.source)?
                }
                None => writeln!(out, "no move to suggest")?,
            },
            ConsoleCommand::Back => {
                if self.game.back() {
                    writeln!(out, "{}", self.game.position().pretty())?;
                } else {
                    writeln!(out, "already at the first position")?;
                }
            }
            ConsoleCommand::Forward => {
                if self.game.forward() {
                    writeln!(out, "{}", self.game.position().pretty())?;
                } else {
                    writeln!(out, "already at the last position")?;
                }
            }
            ConsoleCommand::Resign => match self.game.resign() {
                Some(termination) => writeln!(out, "{termination}")?,
                None => writeln!(out, "the game is already over")?,
            },
            ConsoleCommand::Draw => match self.game.agree_draw() {
                Some(termination) => writeln!(out, "{termination}")?,
                None => writeln!(out, "the game is already over")?,
            },
            ConsoleCommand::Board => writeln!(out, "{}", self.game.position().pretty())?,
            ConsoleCommand::Help => writeln!(out, "{HELP}")?,
            ConsoleCommand::Quit => return Ok(Flow::Quit),
            ConsoleCommand::Unknown(text) => {
                writeln!(out, "unknown command: {text} (try 'help')")?
            }
        }
        Ok(Flow::Continue)
    }

    fn play<W: Write>(&mut self, mv: Move, out: &mut W) -> Result<()> {
        if let Some(termination) = self.game.termination() {
            writeln!(out, "the game is over: {termination}")?;
            return Ok(());
        }
        match self.game.play_move(mv) {
            Some(status) => {
                writeln!(out, "{}", self.game.position().pretty())?;
                if status != GameStatus::Ongoing {
                    writeln!(out, "{status}")?;
                }
            }
            None => writeln!(out, "illegal move: {mv}")?,
        }
        Ok(())
    }

    fn report_status<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.game.termination() {
            Some(termination) => writeln!(out, "{termination}")?,
            None => writeln!(
                out,
                "{}, {} to move",
                self.game.status(),
                self.game.position().side_to_move().name()
            )?,
        }
        Ok(())
    }
}
