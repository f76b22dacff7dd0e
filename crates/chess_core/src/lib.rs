pub mod board;
pub mod error;
pub mod outcome;
pub mod perft;
pub mod types;


// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::BoardError;
pub use outcome::Outcome;
pub use perft::perft;
pub use types::*;

// =============================================================================
// Engine trait — implemented by every computer opponent
// =============================================================================

/// Result of a move selection
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The chosen move (None if no legal moves)
    pub best_move: Option<Move>,
    /// Heuristic score of the chosen move, if it was scored at all
    pub score: Option<f64>,
    /// Number of candidate positions evaluated
    pub nodes: u64,
}

impl SearchResult {
    /// A move picked without scoring anything.
    pub fn unscored(best_move: Option<Move>) -> Self {
        Self {
            best_move,
            score: None,
            nodes: 0,
        }
    }
}

/// Trait that all computer opponents implement.
///
/// Engines borrow the live board mutably so they can apply and undo
/// candidate moves; they must hand it back exactly as they found it.
pub trait Engine {
    /// Pick a move for the side to move.
    fn choose_move(&mut self, board: &mut Board) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
