//! Flat board encoding.
//!
//! The session host exchanges positions as a fixed-length sequence of
//! 121 integers: an 11×11 grid in row-major order, indexed 1-based by
//! the host, so row 0 and column 0 are an all-zero padding border. The
//! 10×10 region at rows/cols 1..=10 holds the cell codes {0 empty,
//! 1/2 queens, 3 arrow}. Decoding strips the padding and shifts indices
//! down by one per axis; encoding is the exact inverse, so a board
//! survives the round trip bit-for-bit.

use thiserror::Error;

use crate::board::{Board, Cell, Square, SIZE};

/// Edge length of the padded grid.
pub const PADDED_SIZE: usize = SIZE + 1;

/// Length of the flat representation (11×11).
pub const FLAT_LEN: usize = PADDED_SIZE * PADDED_SIZE;

/// Errors that can occur when decoding a flat position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlatError {
    #[error("expected 121 values, got {0}")]
    WrongLength(usize),

    #[error("invalid cell code {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },

    #[error("invalid integer '{0}'")]
    InvalidInteger(String),
}

/// Decodes a padded flat sequence into a board.
///
/// Rejects sequences of the wrong length and interior cell codes outside
/// {0, 1, 2, 3}; no partial board escapes a failed decode. The border
/// values are ignored on input.
pub fn decode_flat(values: &[u8]) -> Result<Board, FlatError> {
    if values.len() != FLAT_LEN {
        return Err(FlatError::WrongLength(values.len()));
    }

    let mut board = Board::empty();
    for row in 1..=SIZE {
        for col in 1..=SIZE {
            let index = row * PADDED_SIZE + col;
            let value = values[index];
            let cell = Cell::from_code(value).ok_or(FlatError::InvalidCell { index, value })?;
            board.set(Square::new(row - 1, col - 1), cell);
        }
    }
    board.rebuild_queens();
    Ok(board)
}

/// Encodes a board into the padded flat sequence, padding zeroed.
pub fn encode_flat(board: &Board) -> Vec<u8> {
    let mut values = Vec::with_capacity(FLAT_LEN);
    for row in 0..PADDED_SIZE {
        for col in 0..PADDED_SIZE {
            if row == 0 || col == 0 {
                values.push(0);
            } else {
                values.push(board.get(Square::new(row - 1, col - 1)).code());
            }
        }
    }
    values
}

/// Parses the comma-separated protocol form of a flat position.
pub fn parse_flat(s: &str) -> Result<Board, FlatError> {
    let mut values = Vec::with_capacity(FLAT_LEN);
    for token in s.split(',') {
        let token = token.trim();
        let value: u8 = token
            .parse()
            .map_err(|_| FlatError::InvalidInteger(token.to_string()))?;
        values.push(value);
    }
    decode_flat(&values)
}

/// Formats a board as the comma-separated protocol form.
pub fn format_flat(board: &Board) -> String {
    let values = encode_flat(board);
    let mut out = String::with_capacity(FLAT_LEN * 2);
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;

    #[test]
    fn encode_zeroes_the_padding() {
        let values = encode_flat(&Board::new());
        assert_eq!(values.len(), FLAT_LEN);
        for i in 0..PADDED_SIZE {
            assert_eq!(values[i], 0); // row 0
            assert_eq!(values[i * PADDED_SIZE], 0); // column 0
        }
    }

    #[test]
    fn encode_places_cells_at_shifted_indices() {
        let values = encode_flat(&Board::new());
        // Board (0,3) sits at padded (1,4); board (9,6) at padded (10,7).
        assert_eq!(values[PADDED_SIZE + 4], Side::One.code());
        assert_eq!(values[10 * PADDED_SIZE + 7], Side::Two.code());
    }

    #[test]
    fn flat_roundtrip_preserves_the_board() {
        let mut board = Board::new();
        let mv = crate::board::Move::new(
            Square::new(0, 3),
            Square::new(4, 3),
            Square::new(4, 7),
        );
        board.apply_move(&mv, Side::One);

        let decoded = decode_flat(&encode_flat(&board)).unwrap();
        assert_eq!(decoded, board);
    }

    #[test]
    fn decode_places_queens_where_expected() {
        let board = decode_flat(&encode_flat(&Board::new())).unwrap();
        assert_eq!(board.get(Square::new(0, 3)), Cell::Queen(Side::One));
        assert_eq!(board.get(Square::new(6, 9)), Cell::Queen(Side::Two));
        assert_eq!(board.queens(Side::One).len(), 4);
        assert_eq!(board.queens(Side::Two).len(), 4);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(decode_flat(&[0u8; 120]), Err(FlatError::WrongLength(120)));
        assert_eq!(decode_flat(&[0u8; 122]), Err(FlatError::WrongLength(122)));
        assert_eq!(decode_flat(&[]), Err(FlatError::WrongLength(0)));
    }

    #[test]
    fn decode_rejects_invalid_cell_code() {
        let mut values = encode_flat(&Board::new());
        let index = PADDED_SIZE + 1; // first interior cell
        values[index] = 7;
        assert_eq!(
            decode_flat(&values),
            Err(FlatError::InvalidCell { index, value: 7 })
        );
    }

    #[test]
    fn string_form_roundtrips() {
        let board = Board::new();
        let text = format_flat(&board);
        assert_eq!(parse_flat(&text).unwrap(), board);
    }

    #[test]
    fn parse_rejects_garbage_tokens() {
        assert!(matches!(
            parse_flat("0,1,x,3"),
            Err(FlatError::InvalidInteger(_))
        ));
    }

    #[test]
    fn parse_tolerates_spacing() {
        let spaced = format_flat(&Board::new()).replace(',', ", ");
        assert_eq!(parse_flat(&spaced).unwrap(), Board::new());
    }
}
