//! Self-play game generation.
//!
//! Plays complete Amazons games with the engine on both sides, recording
//! move lists, winners, and per-move timing. Games can run concurrently
//! with one board per game; records are emitted as JSONL for later
//! analysis.

use std::io::{self, Write};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::board::{Board, Side};
use crate::engine::scheduled_depth;
use crate::movegen::{mobility, random_move};
use crate::protocol::notation::format_move;
use crate::search::Searcher;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Fixed search depth; 0 uses the adaptive schedule.
    pub depth: u32,
    /// Random plies at the start of each game, for opening variety.
    pub random_opening_plies: u32,
    /// Safety cap on game length. An Amazons game ends on its own within
    /// 92 plies (one arrow per ply); the cap only guards against a
    /// misconfigured run.
    pub max_plies: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            depth: 0,
            random_opening_plies: 4,
            max_plies: 120,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Winning side's protocol code.
    pub winner: u8,
    /// Total plies played.
    pub plies: u32,
    /// All moves in algebraic notation, in play order.
    pub moves: Vec<String>,
    /// Total thinking time across the game, in milliseconds.
    pub total_ms: u64,
    /// Mean thinking time per ply, in milliseconds.
    pub avg_ms: u64,
    /// Longest single move, in milliseconds.
    pub longest_ms: u64,
}

/// Plays one game to completion and returns its record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut board = Board::new();
    let mut to_move = Side::One;
    let mut moves = Vec::new();
    let mut plies = 0u32;
    let mut total_ms = 0u64;
    let mut longest_ms = 0u64;

    loop {
        if plies >= config.max_plies {
            break;
        }

        let start = Instant::now();
        let chosen = if plies < config.random_opening_plies {
            random_move(&mut board, to_move, rng)
        } else {
            let depth = if config.depth > 0 {
                config.depth
            } else {
                // The schedule is keyed on moves per player, not total plies.
                scheduled_depth(plies / 2)
            };
            Searcher::new(to_move)
                .find_best_move(&mut board, depth)
                .map(|r| r.best_move)
        };

        let mv = match chosen {
            Some(m) => m,
            // No legal move: the side to move has lost.
            None => break,
        };

        let elapsed = start.elapsed().as_millis() as u64;
        total_ms += elapsed;
        longest_ms = longest_ms.max(elapsed);

        board.apply_move(&mv, to_move);
        moves.push(format_move(&mv));
        plies += 1;
        to_move = to_move.opponent();
    }

    // Normally the loop ends because `to_move` is out of moves and has
    // lost. If the ply cap struck first, award the freer side, with ties
    // against the side to move.
    let winner = if plies >= config.max_plies
        && mobility(&board, to_move) > mobility(&board, to_move.opponent())
    {
        to_move
    } else {
        to_move.opponent()
    };

    let avg_ms = if plies > 0 { total_ms / plies as u64 } else { 0 };

    GameRecord {
        game_id,
        winner: winner.code(),
        plies,
        moves,
        total_ms,
        avg_ms,
        longest_ms,
    }
}

/// Creates the per-game RNG: entropy when `seed` is 0, otherwise a
/// seed offset by the game ID so parallel games stay reproducible.
fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    }
}

/// Plays all configured games, concurrently when `threads > 1`.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let play = |game_id: usize| {
        let mut rng = game_rng(config.seed, game_id);
        let record = play_game(config, game_id, &mut rng);
        if !config.quiet {
            eprintln!(
                "game {}: winner side {} in {} plies ({} ms)",
                record.game_id, record.winner, record.plies, record.total_ms
            );
        }
        record
    };

    if config.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .expect("failed to build self-play thread pool");
        pool.install(|| (0..config.num_games).into_par_iter().map(play).collect())
    } else {
        (0..config.num_games).map(play).collect()
    }
}

/// Writes one JSON object per line for each game record.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        let line = serde_json::to_string(game)?;
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Prints aggregate statistics for a batch of games to stderr.
pub fn print_summary(games: &[GameRecord]) {
    if games.is_empty() {
        eprintln!("no games played");
        return;
    }

    let side_one_wins = games.iter().filter(|g| g.winner == 1).count();
    let total_plies: u32 = games.iter().map(|g| g.plies).sum();
    let longest = games.iter().map(|g| g.longest_ms).max().unwrap_or(0);

    eprintln!(
        "{} games: side 1 won {}, side 2 won {}",
        games.len(),
        side_one_wins,
        games.len() - side_one_wins
    );
    eprintln!(
        "average game length {:.1} plies, longest move {} ms",
        total_plies as f64 / games.len() as f64,
        longest
    );
}
