//! Turn protocol between the human and the computer

use chess_core::{Board, Engine, Move, Outcome, PieceKind, Side, Square};
use heuristic_engine::{Difficulty, HeuristicEngine};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::hooks::{ChoiceProvider, Presenter, Status, View};
use crate::tally::{result_text, ScoreTally};
use crate::SessionError;

/// Where the session is in the turn protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingHumanSelection,
    /// A human piece is picked up and waits for its destination
    AwaitingHumanTarget {
        from: Square,
    },
    ComputerThinking,
    GameOver,
}

/// One human against the heuristic engine, game after game.
///
/// All transitions happen synchronously inside [`GameSession::square_clicked`]
/// and [`GameSession::computer_turn`]; when either returns, the session is
/// waiting for the human again.
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    board: Board,
    human: Side,
    engine: HeuristicEngine<R>,
    scores: ScoreTally,
    state: TurnState,
}

impl GameSession<StdRng> {
    pub fn new(config: &SessionConfig) -> Self {
        let engine = match config.seed {
            Some(seed) => HeuristicEngine::seeded(config.difficulty, seed),
            None => HeuristicEngine::new(config.difficulty),
        };
        let human = config.human_side.unwrap_or(Side::White);
        Self::with_engine(Board::startpos(), human, engine)
    }

    /// Asks the player for a side and a difficulty. The side question is
    /// skipped when the config already names one; dismissing it aborts.
    /// Dismissing the difficulty keeps the configured one.
    pub fn from_choices<C: ChoiceProvider>(choices: &mut C, config: &SessionConfig) -> Option<Self> {
        let human = match config.human_side {
            Some(side) => side,
            None => choices.choose_side()?,
        };
        let difficulty = choices
            .choose_difficulty(config.difficulty)
            .unwrap_or(config.difficulty);
        Some(Self::new(&SessionConfig {
            human_side: Some(human),
            difficulty,
            seed: config.seed,
        }))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(human: Side, difficulty: Difficulty, rng: R) -> Self {
        Self::with_board(Board::startpos(), human, difficulty, rng)
    }

    /// Session resuming from an arbitrary position.
    pub fn with_board(board: Board, human: Side, difficulty: Difficulty, rng: R) -> Self {
        Self::with_engine(board, human, HeuristicEngine::with_rng(difficulty, rng))
    }

    fn with_engine(board: Board, human: Side, engine: HeuristicEngine<R>) -> Self {
        let state = if board.side_to_move() == human {
            TurnState::AwaitingHumanSelection
        } else {
            TurnState::ComputerThinking
        };
        Self {
            board,
            human,
            engine,
            scores: ScoreTally::new(),
            state,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human_side(&self) -> Side {
        self.human
    }

    pub fn computer_side(&self) -> Side {
        self.human.other()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    /// Takes effect from the next computer turn.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "difficulty changed");
        self.engine.set_difficulty(difficulty);
    }

    pub fn scores(&self) -> ScoreTally {
        self.scores
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn selected(&self) -> Option<Square> {
        match self.state {
            TurnState::AwaitingHumanTarget { from } => Some(from),
            _ => None,
        }
    }

    /// Drops a picked-up piece without moving it.
    pub fn clear_selection(&mut self) {
        if let TurnState::AwaitingHumanTarget { .. } = self.state {
            self.state = TurnState::AwaitingHumanSelection;
        }
    }

    /// Legal destinations of the selected piece.
    pub fn legal_targets(&self) -> Vec<Square> {
        let Some(from) = self.selected() else {
            return Vec::new();
        };
        let mut targets: Vec<Square> = self
            .board
            .legal_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect();
        targets.dedup();
        targets
    }

    pub fn status(&self) -> Status {
        let humans_turn = self.board.side_to_move() == self.human;
        match (self.board.is_check(), humans_turn) {
            (true, true) => Status::YouAreInCheck,
            (true, false) => Status::ComputerInCheck,
            (false, true) => Status::YourMove,
            (false, false) => Status::ComputerThinking,
        }
    }

    pub fn view(&self) -> View<'_> {
        View {
            board: &self.board,
            human: self.human,
            difficulty: self.difficulty(),
            state: self.state,
            selected: self.selected(),
            targets: self.legal_targets(),
            last_move: self.board.last_move(),
            status: self.status(),
            scores: self.scores,
        }
    }

    /// First frame; lets the computer open when it has the move.
    pub fn start<U: Presenter>(&mut self, ui: &mut U) -> Result<(), SessionError> {
        info!(human = %self.human, difficulty = %self.difficulty(), "session started");
        ui.render(&self.view());
        self.computer_turn(ui)
    }

    /// Handles one click on `sq`.
    ///
    /// The first click picks up a human piece; the second tries to move
    /// it. Clicks outside the human's turn are ignored.
    pub fn square_clicked<U>(&mut self, sq: Square, ui: &mut U) -> Result<(), SessionError>
    where
        U: Presenter + ChoiceProvider,
    {
        if self.board.side_to_move() != self.human || self.board.is_game_over() {
            return Ok(());
        }

        match self.state {
            TurnState::AwaitingHumanTarget { from } => self.human_move(from, sq, ui),
            _ => {
                self.state = match self.board.piece_at(sq) {
                    Some(piece) if piece.side == self.human => {
                        TurnState::AwaitingHumanTarget { from: sq }
                    }
                    _ => TurnState::AwaitingHumanSelection,
                };
                ui.render(&self.view());
                Ok(())
            }
        }
    }

    fn human_move<U>(&mut self, from: Square, to: Square, ui: &mut U) -> Result<(), SessionError>
    where
        U: Presenter + ChoiceProvider,
    {
        self.state = TurnState::AwaitingHumanSelection;

        let mut mv = Move::new(from, to);
        if self.board.is_promotion_square(from, to) {
            mv.promo = Some(ui.choose_promotion().unwrap_or(PieceKind::Queen));
        }

        if !self.board.is_legal(mv) {
            warn!(%mv, "rejected illegal move");
            ui.invalid_move(mv);
            ui.render(&self.view());
            return Ok(());
        }

        self.board.apply(mv)?;
        debug!(%mv, "human moved");
        if self.settle(ui)? {
            return Ok(());
        }

        self.state = TurnState::ComputerThinking;
        ui.render(&self.view());
        self.computer_turn(ui)
    }

    /// Plays the computer's move if it is the computer's turn.
    pub fn computer_turn<U: Presenter>(&mut self, ui: &mut U) -> Result<(), SessionError> {
        if self.board.side_to_move() == self.human || self.board.is_game_over() {
            return Ok(());
        }
        self.state = TurnState::ComputerThinking;

        let result = self.engine.choose_move(&mut self.board);
        let mut mv = result.best_move.ok_or(SessionError::NoLegalMove)?;
        if self.board.is_promotion_square(mv.from, mv.to) {
            mv.promo = Some(PieceKind::Queen);
        }
        self.board.apply(mv)?;
        debug!(%mv, score = ?result.score, "computer moved");

        if self.settle(ui)? {
            return Ok(());
        }
        self.state = TurnState::AwaitingHumanSelection;
        ui.render(&self.view());
        Ok(())
    }

    /// Ends the game if the last move finished it. Returns whether it did.
    fn settle<U: Presenter>(&mut self, ui: &mut U) -> Result<bool, SessionError> {
        match self.board.outcome() {
            Some(outcome) => {
                self.finish_game(outcome, ui)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Scores the finished game and sets up the next one.
    fn finish_game<U: Presenter>(&mut self, outcome: Outcome, ui: &mut U) -> Result<(), SessionError> {
        self.state = TurnState::GameOver;
        ui.render(&self.view());

        let credit = self.scores.record(outcome, self.human);
        let text = result_text(outcome, self.human);
        info!(%outcome, ?credit, scores = %self.scores, "game over");
        ui.game_over(outcome, &text);
        ui.score_updated(&self.scores);

        self.board.reset();
        self.engine.new_game();
        self.state = TurnState::AwaitingHumanSelection;
        info!(games = self.scores.total_games() + 1, "new game");
        ui.render(&self.view());

        // Black leaves the opening move to the computer.
        if self.human == Side::Black {
            self.computer_turn(ui)?;
        }
        Ok(())
    }
}
