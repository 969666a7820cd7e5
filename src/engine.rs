//! Engine state management.
//!
//! Holds the current board, the side the engine plays, and the option
//! store, and services the AUI commands. Search depth comes from an
//! explicit `go depth N`, else the `Depth` option, else a schedule that
//! deepens as the game progresses and the branching factor collapses.

use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

use crate::board::{Board, Side};
use crate::eval::EvalWeights;
use crate::movegen::is_legal_move;
use crate::protocol::flat::parse_flat;
use crate::protocol::notation::{format_move, parse_move};
use crate::protocol::parser::GoParams;
use crate::search::Searcher;

/// Depth used by the adaptive schedule for the given 0-based ply count
/// of engine moves played so far. Early positions branch into thousands
/// of moves; the schedule deepens as the board fills with arrows.
pub fn scheduled_depth(ply: u32) -> u32 {
    if ply < 10 {
        2
    } else if ply < 30 {
        3
    } else if ply < 40 {
        4
    } else {
        5
    }
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub board: Option<Board>,
    pub side: Option<Side>,
    pub options: HashMap<String, String>,
    ply: u32,
}

impl Engine {
    /// Creates a new engine with no position or side.
    pub fn new() -> Self {
        Engine {
            board: None,
            side: None,
            options: HashMap::new(),
            ply: 0,
        }
    }

    /// Resets all engine state for a new game.
    pub fn new_game(&mut self) {
        self.board = None;
        self.side = None;
        self.ply = 0;
    }

    /// Sets the board from `start` or a comma-separated flat position.
    /// Returns an error message on failure.
    pub fn set_position(&mut self, layout: &str) -> Result<(), String> {
        if layout == "start" {
            self.board = Some(Board::new());
            return Ok(());
        }
        match parse_flat(layout) {
            Ok(board) => {
                self.board = Some(board);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse position: {}", e)),
        }
    }

    /// Sets the side the engine plays.
    pub fn set_side(&mut self, side: Side) {
        self.side = Some(side);
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        match value {
            Some(v) => {
                self.options.insert(name, v);
            }
            None => {
                self.options.insert(name, String::new());
            }
        }
    }

    /// Number of engine moves played since the last `newgame`.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Resolves the search depth: explicit `go depth`, else the `Depth`
    /// option (0 means adaptive), else the schedule.
    fn depth_for(&self, params: &GoParams) -> u32 {
        if let Some(depth) = params.depth {
            return depth;
        }
        let configured = self
            .options
            .get("Depth")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);
        if configured > 0 {
            configured
        } else {
            scheduled_depth(self.ply)
        }
    }

    /// Handles the AUI handshake: writes id, options, protocol_version,
    /// and auiok.
    pub fn handle_aui<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name quiver").unwrap();
        writeln!(out, "id author quiver").unwrap();
        writeln!(out, "option name Depth type spin default 0 min 0 max 10").unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "auiok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Applies a validated opponent move to the board.
    ///
    /// The move text is parsed and checked for queen-line legality
    /// before it touches the board; an illegal move leaves the board
    /// untouched and comes back as an error message.
    pub fn handle_move(&mut self, text: &str) -> Result<(), String> {
        let side = match self.side {
            Some(s) => s,
            None => return Err("move: no side set".to_string()),
        };
        let board = match self.board.as_mut() {
            Some(b) => b,
            None => return Err("move: no position set".to_string()),
        };

        let mv = parse_move(text).map_err(|e| format!("move: {}", e))?;
        let opponent = side.opponent();
        if !is_legal_move(board, &mv, opponent) {
            return Err(format!("move: illegal move '{}'", text));
        }

        board.apply_move(&mv, opponent);
        Ok(())
    }

    /// Handles the `go` command: searches, reports, and plays the move.
    pub fn handle_go<W: Write>(&mut self, params: &GoParams, out: &mut W) {
        let side = match self.side {
            Some(s) => s,
            None => {
                eprintln!("go: no side set");
                return;
            }
        };
        let depth = self.depth_for(params);

        let board = match self.board.as_mut() {
            Some(b) => b,
            None => {
                eprintln!("go: no position set");
                return;
            }
        };

        let searcher = Searcher::with_weights(side, EvalWeights::default());
        let start = Instant::now();
        let result = searcher.find_best_move(board, depth);
        let elapsed_ms = start.elapsed().as_millis();

        match result {
            Some(result) => {
                writeln!(
                    out,
                    "info depth {} score {:.1} nodes {} time {}",
                    depth, result.score, result.nodes, elapsed_ms
                )
                .unwrap();
                writeln!(out, "bestmove {}", format_move(&result.best_move)).unwrap();
                board.apply_move(&result.best_move, side);
                self.ply += 1;
            }
            None => {
                // No legal move: the game is over and we lost it.
                writeln!(out, "bestmove resign").unwrap();
            }
        }
        out.flush().unwrap();
    }

    /// Handles the `show` command: prints the current board.
    pub fn handle_show<W: Write>(&self, out: &mut W) {
        match &self.board {
            Some(board) => {
                writeln!(out, "{}", board).unwrap();
                out.flush().unwrap();
            }
            None => eprintln!("show: no position set"),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
