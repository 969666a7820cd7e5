//! Heuristic move ordering.
//!
//! Scores candidate moves before the search recurses so that promising
//! lines are examined first and alpha-beta cutoffs come early. Ordering
//! never changes which move is best, only how fast the proof goes.
//!
//! The composite score combines two probes, both run through the board's
//! scoped-mutation helper so the grid is restored on every path:
//! - how much freer the moved queen is on its new square, and
//! - how hard the arrow squeezes opponent queens that are already down
//!   to two or fewer moves.

use std::cmp::Ordering;

use crate::board::{Board, Cell, Move, Side, Square};
use crate::eval::EvalWeights;
use crate::movegen::reachable_from;

/// Sorts `moves` by descending composite score.
///
/// The sort is stable, so equal scores keep generation order and repeated
/// calls on the same position produce the same sequence.
pub fn order_moves(board: &mut Board, moves: &mut Vec<Move>, side: Side, weights: &EvalWeights) {
    let mut scored: Vec<(f32, Move)> = moves
        .iter()
        .map(|&mv| (composite_score(board, &mv, side, weights), mv))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    moves.clear();
    moves.extend(scored.into_iter().map(|(_, mv)| mv));
}

fn composite_score(board: &mut Board, mv: &Move, side: Side, weights: &EvalWeights) -> f32 {
    weights.mobility_weight * queen_constraint(board, mv, side) as f32
        + weights.arrow_weight * arrow_impact(board, mv, side)
}

/// Mobility of the moved queen after the relocation minus before it.
///
/// Simulated with a grid-only queen swap; no arrow is placed.
fn queen_constraint(board: &mut Board, mv: &Move, side: Side) -> i32 {
    let before = reachable_from(board, mv.from).len() as i32;
    let after = board.probe(
        [(mv.from, Cell::Empty), (mv.to, Cell::Queen(side))],
        |b| reachable_from(b, mv.to).len(),
    ) as i32;
    after - before
}

/// Largest mobility reduction the arrow inflicts on any opponent queen
/// that is already constrained (two or fewer legal destinations).
///
/// Simulated with a lone temporary arrow; the queen move is not applied.
fn arrow_impact(board: &mut Board, mv: &Move, side: Side) -> f32 {
    let opponent = side.opponent();
    let opp_queens: Vec<Square> = board.queens(opponent).to_vec();

    let before: Vec<usize> = opp_queens
        .iter()
        .map(|&q| reachable_from(board, q).len())
        .collect();

    let after: Vec<usize> = board.probe([(mv.arrow, Cell::Arrow)], |b| {
        opp_queens
            .iter()
            .map(|&q| reachable_from(b, q).len())
            .collect()
    });

    let mut impact = 0.0f32;
    for (i, &mob) in before.iter().enumerate() {
        if mob > 2 {
            continue;
        }
        impact = impact.max(mob as f32 - after[i] as f32);
    }
    impact
}
