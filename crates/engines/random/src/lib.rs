//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. Besides
//! standing on its own as the weakest opponent, [`random_move`] is the
//! fallback every heuristic policy reaches for when it has nothing to
//! score.

use chess_core::{Board, Engine, Move, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};


/// Uniformly random legal move, `None` when there is none.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    board.legal_moves().choose(rng).copied()
}

/// A chess engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine<R = StdRng> {
    rng: R,
}

impl RandomEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for RandomEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Engine for RandomEngine<R> {
    fn choose_move(&mut self, board: &mut Board) -> SearchResult {
        SearchResult::unscored(random_move(board, &mut self.rng))
    }

    fn name(&self) -> &str {
        "Random"
    }
}
