//! Board representation and game-state types.
//!
//! Contains the cell grid, queen-position tracking, reversible move
//! application, and the move type itself.

pub mod moves;
pub mod square;
pub mod state;

pub use moves::Move;
pub use square::{Cell, Side, Square, ALL_SIDES, QUEENS_PER_SIDE, SIZE};
pub use state::{Board, MoveRecord};
