//! Heuristic Chess Opponent
//!
//! A deliberately small computer player: a material-count evaluator and
//! three selection policies, one per difficulty tier.
//!
//! - **Easy**: random most of the time, otherwise the worst-looking move
//! - **Medium**: grabs captures, otherwise greedy material with noise
//! - **Hard**: one-ply lookahead, material plus opponent mobility
//!
//! There is no search tree beyond one ply.

mod eval;
mod policy;

use std::fmt;
use std::str::FromStr;

use chess_core::{Board, Engine, SearchResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use eval::{evaluate, piece_value};
pub use policy::*;

#[cfg(test)]
mod eval_tests;

/// Strength tier of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}': expected easy, medium or hard")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Computer opponent playing the policy of its current difficulty.
#[derive(Debug, Clone)]
pub struct HeuristicEngine<R = StdRng> {
    difficulty: Difficulty,
    rng: R,
}

impl HeuristicEngine<StdRng> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    /// Reproducible opponent for a given seed.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HeuristicEngine<R> {
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}

impl<R: Rng> Engine for HeuristicEngine<R> {
    fn choose_move(&mut self, board: &mut Board) -> SearchResult {
        let result = select_move(board, self.difficulty, &mut self.rng);
        debug!(
            difficulty = %self.difficulty,
            best_move = ?result.best_move.map(|m| m.to_string()),
            score = ?result.score,
            nodes = result.nodes,
            "computer move selected"
        );
        result
    }

    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Easy => "Heuristic (Easy)",
            Difficulty::Medium => "Heuristic (Medium)",
            Difficulty::Hard => "Heuristic (Hard)",
        }
    }
}
