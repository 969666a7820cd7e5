//! AUI protocol handling.
//!
//! This module implements parsing and serialization for the AUI (Amazons
//! Universal Interface) protocol: the padded flat board encoding, the
//! algebraic move notation, and the command parser for the main loop.

pub mod flat;
pub mod notation;
pub mod parser;

pub use flat::{decode_flat, encode_flat, format_flat, parse_flat, FlatError, FLAT_LEN};
pub use notation::{format_move, format_square, parse_move, parse_square, NotationError};
pub use parser::{parse_command, Command, GoParams};
