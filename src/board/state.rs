//! Authoritative game state.
//!
//! Holds the 10×10 cell grid together with the two queen-position lists.
//! The lists are a derived index over the grid, kept in lock-step with it
//! so the search never scans 100 cells to find a queen. Invariant: every
//! queen cell has exactly one matching list entry and vice versa.
//!
//! Mutation goes through `apply_move`/`undo_move` (reversible, strict
//! LIFO nesting) or through the scoped `probe` helper, which restores the
//! touched cells on every exit path.

use std::fmt;

use super::moves::Move;
use super::square::{Cell, Side, Square, SIZE};

/// Undo token produced by `apply_move`.
///
/// Captures the prior contents of the three touched cells and the
/// queen-list slot that was updated. Must be consumed by the matching
/// `undo_move` call, in reverse order of nested applies.
#[derive(Debug)]
pub struct MoveRecord {
    prev_from: Cell,
    prev_to: Cell,
    prev_arrow: Cell,
    queen_slot: Option<usize>,
    prev_queen: Square,
}

/// The board: cell grid plus per-side queen lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; SIZE]; SIZE],
    queens: [Vec<Square>; 2],
}

impl Board {
    /// Creates the canonical starting position: four queens per side at
    /// the symmetric edge squares.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for sq in [
            Square::new(0, 3),
            Square::new(0, 6),
            Square::new(3, 0),
            Square::new(3, 9),
        ] {
            board.place_queen(sq, Side::One);
        }
        for sq in [
            Square::new(6, 0),
            Square::new(6, 9),
            Square::new(9, 3),
            Square::new(9, 6),
        ] {
            board.place_queen(sq, Side::Two);
        }
        board
    }

    /// Creates a board with every cell empty and no queens.
    pub fn empty() -> Self {
        Board {
            grid: [[Cell::Empty; SIZE]; SIZE],
            queens: [Vec::new(), Vec::new()],
        }
    }

    /// Places a queen on an empty cell and appends it to the side's list.
    fn place_queen(&mut self, sq: Square, side: Side) {
        self.grid[sq.row][sq.col] = Cell::Queen(side);
        self.queens[side.index()].push(sq);
    }

    /// Reads a cell.
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.grid[sq.row][sq.col]
    }

    /// Writes a cell directly, bypassing the queen lists.
    ///
    /// Exposed for heuristic what-if probing; callers must restore the
    /// prior value (prefer `probe`, which does so automatically) or call
    /// `rebuild_queens` after bulk placement.
    #[inline]
    pub fn set(&mut self, sq: Square, cell: Cell) {
        self.grid[sq.row][sq.col] = cell;
    }

    /// Returns the side's queen positions.
    pub fn queens(&self, side: Side) -> &[Square] {
        &self.queens[side.index()]
    }

    /// Rescans the grid into the queen lists.
    ///
    /// Needed after constructing a position with raw `set` calls, e.g. by
    /// the flat-state decoder or a hand-built test position.
    pub fn rebuild_queens(&mut self) {
        self.queens[0].clear();
        self.queens[1].clear();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if let Cell::Queen(side) = self.grid[row][col] {
                    self.queens[side.index()].push(Square::new(row, col));
                }
            }
        }
    }

    /// Applies `writes` to the grid, runs `f`, then restores the exact
    /// prior cell values before returning `f`'s result.
    ///
    /// This is the sanctioned path for temporary probing moves that do
    /// not need the full apply/undo machinery: the queen lists are left
    /// untouched and restoration cannot be forgotten at an early return.
    pub fn probe<const N: usize, T>(
        &mut self,
        writes: [(Square, Cell); N],
        f: impl FnOnce(&Board) -> T,
    ) -> T {
        let mut saved = [(Square::new(0, 0), Cell::Empty); N];
        for (slot, &(sq, _)) in saved.iter_mut().zip(writes.iter()) {
            *slot = (sq, self.get(sq));
        }
        for &(sq, cell) in writes.iter() {
            self.set(sq, cell);
        }
        let result = f(self);
        for &(sq, cell) in saved.iter().rev() {
            self.set(sq, cell);
        }
        result
    }

    /// Applies a move for `side` and returns the undo token.
    ///
    /// Contract: the origin holds one of `side`'s queens and the move was
    /// produced by move generation (or already validated). Legality is
    /// not re-checked here.
    pub fn apply_move(&mut self, mv: &Move, side: Side) -> MoveRecord {
        let queen_slot = self.queens[side.index()]
            .iter()
            .position(|&q| q == mv.from);
        debug_assert!(
            queen_slot.is_some(),
            "apply_move: no {:?} queen at {:?}",
            side,
            mv.from
        );

        let rec = MoveRecord {
            prev_from: self.get(mv.from),
            prev_to: self.get(mv.to),
            prev_arrow: self.get(mv.arrow),
            queen_slot,
            prev_queen: mv.from,
        };

        self.set(mv.from, Cell::Empty);
        self.set(mv.to, Cell::Queen(side));
        self.set(mv.arrow, Cell::Arrow);
        if let Some(slot) = queen_slot {
            self.queens[side.index()][slot] = mv.to;
        }

        rec
    }

    /// Reverts a move using the token returned by the matching apply.
    ///
    /// Contract: strict LIFO nesting; any moves applied after this one
    /// must already have been undone.
    pub fn undo_move(&mut self, mv: &Move, side: Side, rec: MoveRecord) {
        self.set(mv.from, rec.prev_from);
        self.set(mv.to, rec.prev_to);
        self.set(mv.arrow, rec.prev_arrow);
        if let Some(slot) = rec.queen_slot {
            self.queens[side.index()][slot] = rec.prev_queen;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// Renders the board with rank 10 at the top and files a–j across
    /// the bottom: `.` empty, `1`/`2` queens, `*` arrow.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..SIZE).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..SIZE {
                let ch = match self.grid[row][col] {
                    Cell::Empty => '.',
                    Cell::Queen(Side::One) => '1',
                    Cell::Queen(Side::Two) => '2',
                    Cell::Arrow => '*',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "    a b c d e f g h i j")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::QUEENS_PER_SIDE;

    #[test]
    fn starting_position_has_four_queens_per_side() {
        let board = Board::new();
        assert_eq!(board.queens(Side::One).len(), QUEENS_PER_SIDE);
        assert_eq!(board.queens(Side::Two).len(), QUEENS_PER_SIDE);
        assert_eq!(board.get(Square::new(0, 3)), Cell::Queen(Side::One));
        assert_eq!(board.get(Square::new(9, 6)), Cell::Queen(Side::Two));
    }

    #[test]
    fn grid_and_lists_agree_at_start() {
        let board = Board::new();
        for side in [Side::One, Side::Two] {
            for &q in board.queens(side) {
                assert_eq!(board.get(q), Cell::Queen(side));
            }
        }
    }

    #[test]
    fn apply_then_undo_restores_board() {
        let mut board = Board::new();
        let snapshot = board.clone();

        let mv = Move::new(Square::new(0, 3), Square::new(4, 3), Square::new(4, 7));
        let rec = board.apply_move(&mv, Side::One);

        assert_eq!(board.get(Square::new(0, 3)), Cell::Empty);
        assert_eq!(board.get(Square::new(4, 3)), Cell::Queen(Side::One));
        assert_eq!(board.get(Square::new(4, 7)), Cell::Arrow);
        assert!(board.queens(Side::One).contains(&Square::new(4, 3)));

        board.undo_move(&mv, Side::One, rec);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn arrow_into_vacated_origin_roundtrips() {
        let mut board = Board::new();
        let snapshot = board.clone();

        // Queen steps away and fires straight back into its old square.
        let mv = Move::new(Square::new(0, 3), Square::new(1, 3), Square::new(0, 3));
        let rec = board.apply_move(&mv, Side::One);
        assert_eq!(board.get(Square::new(0, 3)), Cell::Arrow);
        assert_eq!(board.get(Square::new(1, 3)), Cell::Queen(Side::One));

        board.undo_move(&mv, Side::One, rec);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn nested_applies_undo_in_reverse() {
        let mut board = Board::new();
        let snapshot = board.clone();

        let first = Move::new(Square::new(0, 3), Square::new(4, 3), Square::new(4, 7));
        let second = Move::new(Square::new(6, 0), Square::new(6, 5), Square::new(2, 5));
        let rec1 = board.apply_move(&first, Side::One);
        let rec2 = board.apply_move(&second, Side::Two);

        board.undo_move(&second, Side::Two, rec2);
        board.undo_move(&first, Side::One, rec1);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn probe_restores_cells() {
        let mut board = Board::new();
        let snapshot = board.clone();

        let seen = board.probe(
            [
                (Square::new(0, 3), Cell::Empty),
                (Square::new(5, 5), Cell::Queen(Side::One)),
            ],
            |b| (b.get(Square::new(0, 3)), b.get(Square::new(5, 5))),
        );
        assert_eq!(seen, (Cell::Empty, Cell::Queen(Side::One)));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn rebuild_queens_matches_grid() {
        let mut board = Board::empty();
        board.set(Square::new(2, 2), Cell::Queen(Side::One));
        board.set(Square::new(7, 7), Cell::Queen(Side::Two));
        board.set(Square::new(4, 4), Cell::Arrow);
        board.rebuild_queens();

        assert_eq!(board.queens(Side::One), &[Square::new(2, 2)]);
        assert_eq!(board.queens(Side::Two), &[Square::new(7, 7)]);
    }

    #[test]
    fn display_renders_start_position() {
        let board = Board::new();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SIZE + 1);
        // Rank 1 is the second-to-last line; side one's queens sit on d1 and g1.
        assert!(lines[SIZE - 1].contains('1'));
        assert!(lines[SIZE].contains("a b c"));
    }
}
