//! Session score keeping

use std::fmt;

use chess_core::{Outcome, Side};
use serde::{Deserialize, Serialize};

/// Who a finished game is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credit {
    Player,
    Computer,
    Draw,
}

/// Wins, losses and draws for the current process. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    pub player: u32,
    pub computer: u32,
    pub draws: u32,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits one finished game; `human` is the side the player had.
    pub fn record(&mut self, outcome: Outcome, human: Side) -> Credit {
        let credit = match outcome.winner() {
            Some(winner) if winner == human => Credit::Player,
            Some(_) => Credit::Computer,
            None => Credit::Draw,
        };
        match credit {
            Credit::Player => self.player += 1,
            Credit::Computer => self.computer += 1,
            Credit::Draw => self.draws += 1,
        }
        credit
    }

    pub fn total_games(&self) -> u32 {
        self.player + self.computer + self.draws
    }
}

impl fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You: {} | Computer: {} | Draws: {}",
            self.player, self.computer, self.draws
        )
    }
}

/// Message shown to the player when a game ends.
pub fn result_text(outcome: Outcome, human: Side) -> String {
    match outcome {
        Outcome::Checkmate { winner } if winner == human => "You win! Checkmate.".to_string(),
        Outcome::Checkmate { .. } => "Computer wins! Checkmate.".to_string(),
        Outcome::Stalemate => "Draw by stalemate.".to_string(),
        Outcome::InsufficientMaterial => "Draw by insufficient material.".to_string(),
        Outcome::SeventyFiveMoves => "Draw by rule (75 moves without progress).".to_string(),
        Outcome::FivefoldRepetition => "Draw by rule (fivefold repetition).".to_string(),
    }
}
