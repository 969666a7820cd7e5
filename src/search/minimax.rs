//! Depth-limited minimax with alpha-beta pruning.
//!
//! The searcher owns nothing but the two side identities and the
//! evaluation weights; depth is a parameter of every invocation so the
//! caller can trade quality against time between moves. The board is
//! mutated and restored in lock-step with the recursion: after any call
//! returns, the board is identical to what was passed in.

use crate::board::{Board, Move, Side};
use crate::eval::{evaluate, EvalWeights};
use crate::movegen::generate_moves;
use crate::search::ordering::order_moves;

/// Score assigned when the side to move has been shut out entirely.
/// Dominates any reachable mobility difference at every depth.
pub const TERMINAL_SCORE: f32 = 999_999.0;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: f32,
    /// Interior minimax invocations, for `info` reporting.
    pub nodes: u64,
}

/// Adversarial move selection for one fixed side.
#[derive(Debug, Clone, Copy)]
pub struct Searcher {
    side: Side,
    opponent: Side,
    weights: EvalWeights,
}

impl Searcher {
    /// Creates a searcher for `side` with default weights.
    pub fn new(side: Side) -> Self {
        Searcher::with_weights(side, EvalWeights::default())
    }

    /// Creates a searcher for `side` with custom weights.
    pub fn with_weights(side: Side, weights: EvalWeights) -> Self {
        Searcher {
            side,
            opponent: side.opponent(),
            weights,
        }
    }

    /// The side this searcher plays for.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Finds the best move for the configured side at the given depth.
    ///
    /// Returns `None` iff the side has no legal move (a lost position).
    /// Ties keep the first move reaching the best value under the
    /// deterministic move order, so repeated calls agree.
    pub fn find_best_move(&self, board: &mut Board, depth: u32) -> Option<SearchResult> {
        let mut alpha = f32::NEG_INFINITY;
        let beta = f32::INFINITY;
        let mut nodes = 0u64;

        let mut moves = generate_moves(board, self.side);
        if moves.is_empty() {
            return None;
        }
        order_moves(board, &mut moves, self.side, &self.weights);

        let mut best_value = f32::NEG_INFINITY;
        let mut best_move = moves[0];

        for mv in &moves {
            let rec = board.apply_move(mv, self.side);
            let value = self.minimax(
                board,
                depth.saturating_sub(1),
                alpha,
                beta,
                false,
                &mut nodes,
            );
            board.undo_move(mv, self.side, rec);

            if value > best_value {
                best_value = value;
                best_move = *mv;
            }
            alpha = alpha.max(best_value);
        }

        Some(SearchResult {
            best_move,
            score: best_value,
            nodes,
        })
    }

    fn minimax(
        &self,
        board: &mut Board,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
        nodes: &mut u64,
    ) -> f32 {
        *nodes += 1;

        if depth == 0 {
            return evaluate(board, self.side, &self.weights);
        }

        let to_move = if maximizing { self.side } else { self.opponent };
        let mut moves = generate_moves(board, to_move);

        // No moves for the side to move: that side has lost, decisively,
        // regardless of remaining depth.
        if moves.is_empty() {
            return if maximizing {
                -TERMINAL_SCORE
            } else {
                TERMINAL_SCORE
            };
        }

        order_moves(board, &mut moves, to_move, &self.weights);

        if maximizing {
            let mut best = f32::NEG_INFINITY;
            for mv in &moves {
                let rec = board.apply_move(mv, to_move);
                let value = self.minimax(board, depth - 1, alpha, beta, false, nodes);
                board.undo_move(mv, to_move, rec);

                best = best.max(value);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f32::INFINITY;
            for mv in &moves {
                let rec = board.apply_move(mv, to_move);
                let value = self.minimax(board, depth - 1, alpha, beta, true, nodes);
                board.undo_move(mv, to_move, rec);

                best = best.min(value);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
