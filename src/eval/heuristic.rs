//! Heuristic position evaluation.
//!
//! Scores a position from the searching side's perspective as the
//! mobility difference plus a cramped-queen term: own queens running out
//! of moves are penalized on a tiered scale, opponent queens in the same
//! straits earn the mirrored bonus. Applied only at search leaves.

use crate::board::{Board, Side};
use crate::movegen::{mobility, reachable_from};

/// Tunable weights for evaluation and move ordering.
///
/// The numeric values are empirically chosen, not load-bearing for
/// correctness, so they live here as overridable defaults rather than
/// hard-coded constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    /// Move ordering: weight of the moved queen's mobility change.
    pub mobility_weight: f32,
    /// Move ordering: weight of the arrow's impact on cramped opponents.
    pub arrow_weight: f32,
    /// Cramped-queen penalties for mobility ≤1, ≤2, ≤3 respectively.
    pub cramped_penalties: [f32; 3],
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            mobility_weight: 1.0,
            arrow_weight: 1.5,
            cramped_penalties: [8.0, 4.0, 2.0],
        }
    }
}

/// Evaluates the position for `side`.
pub fn evaluate(board: &Board, side: Side, weights: &EvalWeights) -> f32 {
    let own = mobility(board, side) as f32;
    let opp = mobility(board, side.opponent()) as f32;

    let mut score = own - opp;
    score -= cramped_queen_total(board, side, weights);
    score += cramped_queen_total(board, side.opponent(), weights);
    score
}

/// Sums the tiered penalty over a side's queens: a queen with ≤1 legal
/// destinations is nearly trapped, ≤2 and ≤3 progressively less so.
fn cramped_queen_total(board: &Board, side: Side, weights: &EvalWeights) -> f32 {
    let mut total = 0.0;
    for &q in board.queens(side) {
        let mob = reachable_from(board, q).len();
        if mob <= 1 {
            total += weights.cramped_penalties[0];
        } else if mob <= 2 {
            total += weights.cramped_penalties[1];
        } else if mob <= 3 {
            total += weights.cramped_penalties[2];
        }
    }
    total
}
