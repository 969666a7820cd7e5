//! Legal move generation.
//!
//! A queen slides any number of empty cells along the eight compass
//! directions; the arrow fired after the relocation obeys the same rule,
//! originating from the queen's new square. Destination enumeration is
//! pure; full move generation relocates the queen on the grid for the
//! duration of the arrow scan via the board's scoped probe.

use rand::Rng;

use crate::board::{Board, Cell, Move, Side, Square};

/// The eight slide directions, row-major over the compass offsets.
///
/// Enumeration order is fixed: it feeds move generation and therefore
/// the deterministic tie-breaking of the search.
pub const QUEEN_DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Enumerates every empty cell a queen on `from` can slide to, stopping
/// at the first blocker or the board edge in each direction.
///
/// Within a direction the cells come nearest first; directions follow
/// `QUEEN_DIRECTIONS` order.
pub fn reachable_from(board: &Board, from: Square) -> Vec<Square> {
    let mut reachable = Vec::new();
    for &(dr, dc) in QUEEN_DIRECTIONS.iter() {
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            if !board.get(next).is_empty() {
                break;
            }
            reachable.push(next);
            cur = next;
        }
    }
    reachable
}

/// Generates the full legal move set for `side`.
///
/// For each queen and each reachable destination, the queen is relocated
/// on the grid (probe only, queen lists untouched) so the arrow scan sees
/// the vacated origin as empty and the new square as occupied.
pub fn generate_moves(board: &mut Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    let queens: Vec<Square> = board.queens(side).to_vec();

    for &from in &queens {
        let destinations = reachable_from(board, from);
        for to in destinations {
            let arrows = board.probe(
                [(from, Cell::Empty), (to, Cell::Queen(side))],
                |b| reachable_from(b, to),
            );
            for arrow in arrows {
                moves.push(Move::new(from, to, arrow));
            }
        }
    }

    moves
}

/// Sum of reachable-destination counts over all of `side`'s queens.
///
/// A cheap proxy for positional freedom; this counts queen destinations
/// only, not (destination, arrow) pairs.
pub fn mobility(board: &Board, side: Side) -> usize {
    board
        .queens(side)
        .iter()
        .map(|&q| reachable_from(board, q).len())
        .sum()
}

/// Returns true if `side` has at least one legal move.
///
/// A queen that can step to any empty neighbor always has a full move,
/// since the arrow can be fired back into the vacated origin. So one
/// empty adjacent cell on any queen suffices, with no need to enumerate
/// the move set.
pub fn has_any_move(board: &Board, side: Side) -> bool {
    board.queens(side).iter().any(|&q| {
        QUEEN_DIRECTIONS
            .iter()
            .any(|&(dr, dc)| q.offset(dr, dc).map_or(false, |next| board.get(next).is_empty()))
    })
}

/// Checks that an externally-sourced move forms a legal queen-move
/// triple for `side`: origin occupancy, destination reachability, and
/// arrow reachability from the relocated queen.
pub fn is_legal_move(board: &mut Board, mv: &Move, side: Side) -> bool {
    if board.get(mv.from) != Cell::Queen(side) {
        return false;
    }
    if !reachable_from(board, mv.from).contains(&mv.to) {
        return false;
    }
    board.probe(
        [(mv.from, Cell::Empty), (mv.to, Cell::Queen(side))],
        |b| reachable_from(b, mv.to).contains(&mv.arrow),
    )
}

/// Picks a uniformly random legal move, or `None` in a lost position.
pub fn random_move(board: &mut Board, side: Side, rng: &mut impl Rng) -> Option<Move> {
    let moves = generate_moves(board, side);
    if moves.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SIZE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reachable_cells_are_in_bounds_and_empty() {
        let board = Board::new();
        for side in [Side::One, Side::Two] {
            for &q in board.queens(side) {
                for sq in reachable_from(&board, q) {
                    assert!(sq.row < SIZE && sq.col < SIZE);
                    assert!(board.get(sq).is_empty());
                }
            }
        }
    }

    #[test]
    fn reachable_stops_at_blockers() {
        let mut board = Board::empty();
        board.set(Square::new(5, 5), Cell::Queen(Side::One));
        board.set(Square::new(5, 7), Cell::Arrow);
        board.rebuild_queens();

        let reachable = reachable_from(&board, Square::new(5, 5));
        assert!(reachable.contains(&Square::new(5, 6)));
        assert!(!reachable.contains(&Square::new(5, 7)));
        assert!(!reachable.contains(&Square::new(5, 8)));
    }

    #[test]
    fn lone_queen_on_empty_board_reaches_all_lines() {
        let mut board = Board::empty();
        board.set(Square::new(0, 0), Cell::Queen(Side::One));
        board.rebuild_queens();

        // Corner queen: 9 up, 9 right, 9 diagonal.
        assert_eq!(reachable_from(&board, Square::new(0, 0)).len(), 27);
    }

    #[test]
    fn start_position_move_counts_are_symmetric() {
        let mut board = Board::new();
        let one = generate_moves(&mut board, Side::One).len();
        let two = generate_moves(&mut board, Side::Two).len();
        assert_eq!(one, two);
        // Known branching factor of the starting position.
        assert_eq!(one, 2176);
    }

    #[test]
    fn generate_moves_leaves_board_unchanged() {
        let mut board = Board::new();
        let snapshot = board.clone();
        generate_moves(&mut board, Side::One);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn generated_moves_are_legal() {
        let mut board = Board::new();
        let moves = generate_moves(&mut board, Side::One);
        for mv in &moves {
            assert!(is_legal_move(&mut board, mv, Side::One));
        }
    }

    #[test]
    fn enclosed_queen_has_no_moves() {
        let mut board = Board::empty();
        board.set(Square::new(0, 0), Cell::Queen(Side::One));
        board.set(Square::new(0, 1), Cell::Arrow);
        board.set(Square::new(1, 0), Cell::Arrow);
        board.set(Square::new(1, 1), Cell::Arrow);
        board.set(Square::new(9, 9), Cell::Queen(Side::Two));
        board.rebuild_queens();

        assert!(!has_any_move(&board, Side::One));
        assert!(generate_moves(&mut board, Side::One).is_empty());
        assert!(has_any_move(&board, Side::Two));
    }

    #[test]
    fn mobility_counts_destinations_only() {
        let mut board = Board::empty();
        board.set(Square::new(0, 0), Cell::Queen(Side::One));
        board.set(Square::new(0, 2), Cell::Arrow);
        board.set(Square::new(2, 0), Cell::Arrow);
        board.set(Square::new(2, 2), Cell::Arrow);
        board.rebuild_queens();

        // One step available in each of the three open directions.
        assert_eq!(mobility(&board, Side::One), 3);
    }

    #[test]
    fn mobility_is_symmetric_at_start() {
        let board = Board::new();
        assert_eq!(mobility(&board, Side::One), mobility(&board, Side::Two));
    }

    #[test]
    fn is_legal_move_rejects_bad_triples() {
        let mut board = Board::new();
        let from = Square::new(0, 3);

        // Wrong side at origin.
        assert!(!is_legal_move(
            &mut board,
            &Move::new(from, Square::new(1, 3), Square::new(0, 3)),
            Side::Two
        ));
        // Destination through a blocker: d1 cannot jump over g1 to h1.
        assert!(!is_legal_move(
            &mut board,
            &Move::new(from, Square::new(0, 7), Square::new(1, 7)),
            Side::One
        ));
        // Arrow not on a queen line from the destination.
        assert!(!is_legal_move(
            &mut board,
            &Move::new(from, Square::new(1, 3), Square::new(4, 5)),
            Side::One
        ));
        // Arrow back into the vacated origin is legal.
        assert!(is_legal_move(
            &mut board,
            &Move::new(from, Square::new(1, 3), from),
            Side::One
        ));
    }

    #[test]
    fn random_move_is_legal_and_seed_deterministic() {
        let mut board = Board::new();
        let a = random_move(&mut board, Side::One, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = random_move(&mut board, Side::One, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert!(is_legal_move(&mut board, &a, Side::One));
    }

    #[test]
    fn random_move_none_when_enclosed() {
        let mut board = Board::empty();
        board.set(Square::new(0, 0), Cell::Queen(Side::One));
        board.set(Square::new(0, 1), Cell::Arrow);
        board.set(Square::new(1, 0), Cell::Arrow);
        board.set(Square::new(1, 1), Cell::Arrow);
        board.rebuild_queens();

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_move(&mut board, Side::One, &mut rng), None);
    }
}
