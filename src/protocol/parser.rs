//! AUI command parser.
//!
//! Parses incoming AUI protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use crate::board::Side;

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoParams {
    pub depth: Option<u32>,
}

/// A parsed host-to-engine AUI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the AUI protocol handshake.
    Aui,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the board: `position start` or `position <121 flat values>`.
    Position { layout: String },

    /// Set which side the engine plays, by protocol code.
    SetSide { side: Side },

    /// Deliver the opponent's move in algebraic notation.
    OpponentMove { text: String },

    /// Begin calculating a move with optional search constraints.
    Go(GoParams),

    /// Print the current board.
    Show,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "aui" => Some(Command::Aui),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "show" => Some(Command::Show),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "setside" => parse_setside(&tokens),
        "move" => parse_move_command(&tokens),
        "go" => parse_go(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    // Find the "value" keyword to split name from value.
    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => {
            let name = tokens[2..].join(" ");
            (name, None)
        }
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position start` or `position <flat values>`.
///
/// The flat form may be split across whitespace; the commas carry the
/// structure, so the tokens are rejoined without separators.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position start' or 'position <flat>'");
        return None;
    }
    Some(Command::Position {
        layout: tokens[1..].concat(),
    })
}

/// Parses `setside <1|2>`.
fn parse_setside(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed setside: expected 'setside <1|2>'");
        return None;
    }
    let code: u8 = match tokens[1].parse() {
        Ok(c) => c,
        Err(_) => {
            eprintln!("malformed setside: '{}' is not a side code", tokens[1]);
            return None;
        }
    };
    match Side::from_code(code) {
        Some(side) => Some(Command::SetSide { side }),
        None => {
            eprintln!("malformed setside: side code must be 1 or 2, got {}", code);
            None
        }
    }
}

/// Parses `move <notation>`.
fn parse_move_command(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed move: expected 'move <from>-<to>/<arrow>'");
        return None;
    }
    Some(Command::OpponentMove {
        text: tokens[1].to_string(),
    })
}

/// Parses `go [depth N]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();

    let mut i = 1;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                if i + 1 >= tokens.len() {
                    eprintln!("malformed go: depth requires a value");
                    return None;
                }
                match tokens[i + 1].parse() {
                    Ok(d) => params.depth = Some(d),
                    Err(_) => {
                        eprintln!("malformed go: invalid depth '{}'", tokens[i + 1]);
                        return None;
                    }
                }
                i += 2;
            }
            other => {
                eprintln!("malformed go: unknown parameter '{}'", other);
                return None;
            }
        }
    }

    Some(Command::Go(params))
}
