//! Game Session
//!
//! Orchestrates a human-vs-computer game on top of the board adapter and
//! the heuristic engine:
//! - turn protocol and selection state ([`GameSession`], [`TurnState`])
//! - score tally kept for the life of the process ([`ScoreTally`])
//! - presentation hooks a front end implements ([`Presenter`], [`ChoiceProvider`])
//! - startup defaults from TOML ([`SessionConfig`])

mod config;
mod hooks;
mod session;
mod tally;

use chess_core::BoardError;
use thiserror::Error;

pub use config::*;
pub use hooks::*;
pub use session::*;
pub use tally::*;

pub use chess_core::{Board, Move, Outcome, PieceKind, Side, Square};
pub use heuristic_engine::Difficulty;

#[cfg(test)]
mod session_tests;

/// Failures that are not the player's fault.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("rules engine rejected a move: {0}")]
    Rules(#[from] BoardError),

    #[error("computer found no legal move in a running game")]
    NoLegalMove,
}
