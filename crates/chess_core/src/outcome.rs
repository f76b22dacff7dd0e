use std::fmt;

use crate::types::Side;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Side },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Outcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_draw(self) -> bool {
        self.winner().is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Outcome::Stalemate => write!(f, "Draw by stalemate"),
            Outcome::InsufficientMaterial => write!(f, "Draw by insufficient material"),
            Outcome::SeventyFiveMoves => write!(f, "Draw by the 75-move rule"),
            Outcome::FivefoldRepetition => write!(f, "Draw by fivefold repetition"),
        }
    }
}
