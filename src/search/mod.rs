//! Adversarial search.
//!
//! Depth-limited minimax with alpha-beta pruning over the full move set,
//! with heuristic move ordering ahead of every recursion and a static
//! evaluation at the leaves.

pub mod minimax;
pub mod ordering;

pub use minimax::{SearchResult, Searcher, TERMINAL_SCORE};
pub use ordering::order_moves;
