//! Line-oriented text protocol for driving a game.
//!
//! Modelled on the Go Text Protocol: each line is an optional numeric id, a
//! command, and arguments. Successful responses start with `=`, failures
//! with `?`, and every response ends with a blank line. This is the input,
//! render and scheduler adapter for terminal play.
//!
//! ## Supported Commands
//!
//! - `name` / `version` / `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `new_game` - Reset to the starting layout
//! - `select <col> <row>` - Click a square (`select none` clicks off the board)
//! - `genmove` - Let the bot play the side to move
//! - `showboard` - Print the board
//! - `moves` - List legal moves of the side to move
//! - `score` - Pieces left and capture points per side
//! - `turn` - Side to move, or the winner
//! - `history` - Moves played so far
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rs::config::GameConfig;
//! use checkers_rs::protocol::Session;
//! let mut session = Session::new(GameConfig::default());
//! session.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::{Context, Result};
use log::trace;

use crate::config::GameConfig;
use crate::game::{Game, MoveReport, Outcome, PacedScheduler, Renderer};
use crate::square::{Color, Square};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "genmove",
    "history",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "new_game",
    "protocol_version",
    "quit",
    "score",
    "select",
    "showboard",
    "turn",
    "version",
];

/// Renderer that turns game events into response lines.
#[derive(Debug, Default)]
pub struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    /// Take everything logged since the last drain.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl Renderer for EventLog {
    fn piece_moved(&mut self, from: Square, to: Square, color: Color) {
        self.lines.push(format!("{color} {from}->{to}"));
    }

    fn piece_captured(&mut self, square: Square, color: Color) {
        self.lines.push(format!("captured {color} {square}"));
    }

    fn piece_promoted(&mut self, square: Square, color: Color) {
        self.lines.push(format!("king {color} {square}"));
    }

    fn turn_changed(&mut self, color: Color) {
        self.lines.push(format!("{color} to move"));
    }

    fn game_over(&mut self, winner: Color) {
        self.lines.push(format!("game over: {winner} wins"));
    }
}

/// A protocol session around one game.
pub struct Session {
    game: Game<EventLog, PacedScheduler>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let mut game = Game::with_adapters(config, EventLog::default(), PacedScheduler::default());
        game.renderer_mut().drain();
        Self { game }
    }

    pub fn game(&self) -> &Game<EventLog, PacedScheduler> {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> Result<()> {
        // A bot that moves first plays before the first command.
        let opening = self.play_due_bot_turn();
        if !opening.is_empty() {
            writeln!(output, "# {}", opening.join("; ")).context("writing opening move")?;
        }

        for line in input.lines() {
            let line = line.context("reading command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            trace!("command {command} {args:?}");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("writing response")?;
            output.flush().context("flushing response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "new_game" => {
                self.game.new_game();
                let mut lines = self.game.renderer_mut().drain();
                lines.extend(self.play_due_bot_turn());
                (true, lines.join("\n"))
            }

            "select" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let square = if args[0].eq_ignore_ascii_case("none") {
                    None
                } else {
                    Square::parse(&args.join(" "))
                };
                self.select(square)
            }

            "genmove" => {
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                self.game.scheduler_mut().take_due();
                let reports = self.game.play_bot_turn();
                let mut lines = self.game.renderer_mut().drain();
                lines.extend(self.play_due_bot_turn());
                (!reports.is_empty(), lines.join("\n"))
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "moves" => {
                let turn = self.game.turn();
                let moves: Vec<String> = self
                    .game
                    .board()
                    .all_legal_moves(turn)
                    .into_iter()
                    .map(|((from, to), captured)| match captured {
                        Some(c) => format!("{from}x{c}->{to}"),
                        None => format!("{from}->{to}"),
                    })
                    .collect();
                (true, moves.join("\n"))
            }

            "score" => {
                let score = self.game.score();
                let lines: Vec<String> = Color::BOTH
                    .iter()
                    .map(|&c| {
                        format!(
                            "{c}: {} left, {} points, {} kings",
                            score.remaining(c),
                            score.points(c),
                            self.game.board().king_count(c)
                        )
                    })
                    .collect();
                (true, lines.join("\n"))
            }

            "turn" => match self.game.winner() {
                Some(winner) => (true, format!("over: {winner} wins")),
                None => (true, self.game.turn().to_string()),
            },

            "history" => {
                let lines: Vec<String> = self
                    .game
                    .history()
                    .iter()
                    .enumerate()
                    .map(|(i, (color, mv))| format!("{}. {color} {mv}", i + 1))
                    .collect();
                (true, lines.join("\n"))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn select(&mut self, square: Option<Square>) -> (bool, String) {
        match self.game.handle_selection(square) {
            Outcome::OriginSelected(sq) => (true, format!("selected {sq}")),
            Outcome::Moved(report) => {
                let mut lines = self.game.renderer_mut().drain();
                if let Some(next) = report.continuation {
                    lines.push(format!("continue capturing to {next}"));
                }
                lines.extend(self.play_due_bot_turn());
                (true, lines.join("\n"))
            }
            Outcome::Rejected(reason) => (false, reason.to_string()),
        }
    }

    /// Honour a pending scheduler request: wait, then play one bot turn.
    ///
    /// With both sides automated the next turn stays due until the next command.
    fn play_due_bot_turn(&mut self) -> Vec<String> {
        let Some(delay) = self.game.scheduler_mut().take_due() else {
            return Vec::new();
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        let reports: Vec<MoveReport> = self.game.play_bot_turn();
        trace!("bot played {} moves", reports.len());
        self.game.renderer_mut().drain()
    }
}
