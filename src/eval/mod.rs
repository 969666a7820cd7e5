//! Position evaluation.

pub mod heuristic;

pub use heuristic::{evaluate, EvalWeights};
