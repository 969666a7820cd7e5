//! Quiver -- an Amazons engine implementing the AUI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the AUI (Amazons Universal Interface) convention.

use std::io::{self, BufRead};

use quiver::engine::Engine;
use quiver::protocol::parser::{parse_command, Command};

/// Runs the main AUI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Aui => {
                engine.handle_aui(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::Position { layout } => {
                if let Err(e) = engine.set_position(&layout) {
                    eprintln!("{}", e);
                }
            }
            Command::SetSide { side } => {
                engine.set_side(side);
            }
            Command::OpponentMove { text } => {
                if let Err(e) = engine.handle_move(&text) {
                    eprintln!("{}", e);
                }
            }
            Command::Go(params) => {
                engine.handle_go(&params, &mut out);
            }
            Command::Show => {
                engine.handle_show(&mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
