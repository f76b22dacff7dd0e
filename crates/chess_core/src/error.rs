use thiserror::Error;

use crate::types::Move;

/// Errors raised by the board adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("invalid move notation: {0}")]
    InvalidMove(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid side: expected 'white' or 'black', got '{0}'")]
    InvalidSide(String),
}
