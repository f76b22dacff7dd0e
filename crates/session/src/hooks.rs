//! Presentation contract
//!
//! The session never draws or prompts by itself. A front end implements
//! [`Presenter`] to show state and receive notifications, and
//! [`ChoiceProvider`] to answer the questions a dialog would ask.

use std::fmt;

use chess_core::{Board, Move, Outcome, PieceKind, Side, Square};
use heuristic_engine::Difficulty;

use crate::session::TurnState;
use crate::tally::ScoreTally;

/// Status line shown above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    YourMove,
    ComputerThinking,
    YouAreInCheck,
    ComputerInCheck,
}

impl Status {
    pub fn is_check(self) -> bool {
        matches!(self, Status::YouAreInCheck | Status::ComputerInCheck)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::YourMove => write!(f, "Your move"),
            Status::ComputerThinking => write!(f, "Computer is thinking..."),
            Status::YouAreInCheck => write!(f, "You are in check!"),
            Status::ComputerInCheck => write!(f, "Computer is in check!"),
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub board: &'a Board,
    pub human: Side,
    pub difficulty: Difficulty,
    /// `GameOver` on the frame showing the final position
    pub state: TurnState,
    /// Square picked by the first click, if any
    pub selected: Option<Square>,
    /// Legal destinations from `selected`
    pub targets: Vec<Square>,
    pub last_move: Option<Move>,
    pub status: Status,
    pub scores: ScoreTally,
}

/// Output side of the presentation layer.
pub trait Presenter {
    /// Redraw the board.
    fn render(&mut self, view: &View<'_>);

    /// The player tried a move that is not legal.
    fn invalid_move(&mut self, _mv: Move) {}

    /// A game ended; `text` is the message for the player.
    fn game_over(&mut self, _outcome: Outcome, _text: &str) {}

    /// The tally changed.
    fn score_updated(&mut self, _scores: &ScoreTally) {}
}

/// Input side of the presentation layer. `None` means the player
/// dismissed the question.
pub trait ChoiceProvider {
    fn choose_promotion(&mut self) -> Option<PieceKind>;

    fn choose_side(&mut self) -> Option<Side>;

    fn choose_difficulty(&mut self, current: Difficulty) -> Option<Difficulty>;
}
