use chess_core::{coord_to_sq, Board, Move, PieceKind, Side, Square};
use heuristic_engine::Difficulty;
use rand::rngs::mock::StepRng;

use crate::{ChoiceProvider, GameSession, Presenter, ScoreTally, SessionConfig, Status, TurnState, View};

#[derive(Default)]
struct Frames {
    statuses: Vec<Status>,
    invalid: Vec<Move>,
    side: Option<Side>,
    sides_asked: usize,
    difficulty: Option<Difficulty>,
}

impl Presenter for Frames {
    fn render(&mut self, view: &View<'_>) {
        self.statuses.push(view.status);
    }

    fn invalid_move(&mut self, mv: Move) {
        self.invalid.push(mv);
    }
}

impl ChoiceProvider for Frames {
    fn choose_promotion(&mut self) -> Option<PieceKind> {
        None
    }

    fn choose_side(&mut self) -> Option<Side> {
        self.sides_asked += 1;
        self.side
    }

    fn choose_difficulty(&mut self, _current: Difficulty) -> Option<Difficulty> {
        self.difficulty
    }
}

fn session(fen: &str, human: Side) -> GameSession<StepRng> {
    let board = Board::from_fen(fen).unwrap();
    GameSession::with_board(board, human, Difficulty::Easy, StepRng::new(0, 0))
}

fn at(coord: &str) -> Square {
    coord_to_sq(coord).unwrap()
}

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn first_click_on_own_piece_selects_it() {
    let mut s = session(START, Side::White);
    let mut ui = Frames::default();

    s.square_clicked(at("e2"), &mut ui).unwrap();

    assert_eq!(s.state(), TurnState::AwaitingHumanTarget { from: at("e2") });
    let mut targets = s.legal_targets();
    targets.sort();
    assert_eq!(targets, vec![at("e3"), at("e4")]);
    assert_eq!(ui.statuses, vec![Status::YourMove]);
}

#[test]
fn first_click_on_empty_or_enemy_square_selects_nothing() {
    let mut s = session(START, Side::White);
    let mut ui = Frames::default();

    s.square_clicked(at("e5"), &mut ui).unwrap();
    assert_eq!(s.state(), TurnState::AwaitingHumanSelection);

    s.square_clicked(at("e7"), &mut ui).unwrap();
    assert_eq!(s.state(), TurnState::AwaitingHumanSelection);
    assert!(s.legal_targets().is_empty());
}

#[test]
fn clicks_on_the_computers_turn_are_ignored() {
    let mut s = session(START, Side::Black);
    let mut ui = Frames::default();

    s.square_clicked(at("e7"), &mut ui).unwrap();

    assert_eq!(s.state(), TurnState::ComputerThinking);
    assert_eq!(s.board().ply_count(), 0);
    assert!(ui.statuses.is_empty());
}

#[test]
fn illegal_second_click_clears_the_selection() {
    let mut s = session(START, Side::White);
    let mut ui = Frames::default();

    s.square_clicked(at("e2"), &mut ui).unwrap();
    s.square_clicked(at("e5"), &mut ui).unwrap();

    assert_eq!(ui.invalid, vec![Move::new(at("e2"), at("e5"))]);
    assert_eq!(s.state(), TurnState::AwaitingHumanSelection);
    assert_eq!(s.board().ply_count(), 0);
    assert_eq!(s.board().fen(), START);
}

#[test]
fn status_reports_whose_check_it_is() {
    // Black queen on h4 gives check after f3 g4
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    assert_eq!(session(fen, Side::White).status(), Status::YouAreInCheck);
    assert_eq!(session(fen, Side::Black).status(), Status::ComputerInCheck);
    assert_eq!(session(START, Side::White).status(), Status::YourMove);
    assert_eq!(session(START, Side::Black).status(), Status::ComputerThinking);
}

#[test]
fn status_text() {
    assert_eq!(Status::YourMove.to_string(), "Your move");
    assert_eq!(Status::ComputerThinking.to_string(), "Computer is thinking...");
    assert_eq!(Status::YouAreInCheck.to_string(), "You are in check!");
    assert!(Status::ComputerInCheck.is_check());
}

#[test]
fn difficulty_change_applies_to_the_running_session() {
    let mut s = session(START, Side::White);
    assert_eq!(s.difficulty(), Difficulty::Easy);
    s.set_difficulty(Difficulty::Hard);
    assert_eq!(s.difficulty(), Difficulty::Hard);
    assert_eq!(s.view().difficulty, Difficulty::Hard);
}

#[test]
fn dismissing_the_side_question_aborts() {
    let mut ui = Frames::default();
    assert!(GameSession::from_choices(&mut ui, &SessionConfig::default()).is_none());
}

#[test]
fn dismissing_the_difficulty_question_keeps_the_configured_one() {
    let config = SessionConfig {
        human_side: None,
        difficulty: Difficulty::Medium,
        seed: Some(7),
    };

    let mut ui = Frames {
        side: Some(Side::Black),
        ..Frames::default()
    };
    let s = GameSession::from_choices(&mut ui, &config).unwrap();
    assert_eq!(s.human_side(), Side::Black);
    assert_eq!(s.computer_side(), Side::White);
    assert_eq!(s.difficulty(), Difficulty::Medium);

    ui.difficulty = Some(Difficulty::Hard);
    let s = GameSession::from_choices(&mut ui, &config).unwrap();
    assert_eq!(s.difficulty(), Difficulty::Hard);
}

#[test]
fn new_session_starts_with_an_empty_tally() {
    let s = GameSession::new(&SessionConfig::default());
    assert_eq!(s.scores(), ScoreTally::default());
    assert_eq!(s.state(), TurnState::AwaitingHumanSelection);
    assert!(s.board().outcome().is_none());
}

#[test]
fn configured_side_skips_the_side_question() {
    let config = SessionConfig {
        human_side: Some(Side::Black),
        difficulty: Difficulty::Hard,
        seed: Some(1),
    };
    let mut ui = Frames::default();

    let s = GameSession::from_choices(&mut ui, &config).unwrap();

    assert_eq!(ui.sides_asked, 0);
    assert_eq!(s.human_side(), Side::Black);
    assert_eq!(s.difficulty(), Difficulty::Hard);
    assert_eq!(s.state(), TurnState::ComputerThinking);
}

#[test]
fn new_session_uses_the_configured_side() {
    let config = SessionConfig {
        human_side: Some(Side::Black),
        ..SessionConfig::default()
    };
    assert_eq!(GameSession::new(&config).human_side(), Side::Black);
    assert_eq!(GameSession::new(&SessionConfig::default()).human_side(), Side::White);
}

#[test]
fn cleared_selection_lets_a_fresh_move_through() {
    let mut s = session(START, Side::White);
    let mut ui = Frames::default();

    s.square_clicked(at("e2"), &mut ui).unwrap();
    s.clear_selection();
    assert_eq!(s.state(), TurnState::AwaitingHumanSelection);
    assert!(s.view().selected.is_none());

    s.square_clicked(at("g1"), &mut ui).unwrap();
    s.square_clicked(at("f3"), &mut ui).unwrap();

    assert!(ui.invalid.is_empty());
    assert_eq!(s.board().ply_count(), 2);
}

#[test]
fn view_carries_the_turn_state() {
    let mut s = session(START, Side::White);
    let mut ui = Frames::default();
    assert_eq!(s.view().state, TurnState::AwaitingHumanSelection);

    s.square_clicked(at("e2"), &mut ui).unwrap();
    assert_eq!(s.view().state, TurnState::AwaitingHumanTarget { from: at("e2") });
}
