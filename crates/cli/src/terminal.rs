//! Line-based terminal front end

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail};
use chess_core::{coord_to_sq, Move, Outcome, Piece, PieceKind, Side, Square};
use game_session::{ChoiceProvider, Presenter, ScoreTally, TurnState, View};
use heuristic_engine::Difficulty;

/// One line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A single square, like clicking it
    Click(Square),
    /// Two squares in a row, like two clicks
    Move(Square, Square),
    Difficulty(Difficulty),
    Score,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  e2          select a piece, or move the selected piece there
  e2e4        move in one go
  difficulty  change the computer's strength (easy, medium, hard)
  score       show the session tally
  help        show this text
  quit        leave";

pub fn parse_command(line: &str) -> anyhow::Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        bail!("empty command");
    };
    let head = head.to_ascii_lowercase();

    match head.as_str() {
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        "score" | "s" => Ok(Command::Score),
        "difficulty" | "d" => {
            let level = parts
                .next()
                .ok_or_else(|| anyhow!("usage: difficulty <easy|medium|hard>"))?;
            Ok(Command::Difficulty(level.parse()?))
        }
        _ if head.len() == 2 => coord_to_sq(&head)
            .map(Command::Click)
            .ok_or_else(|| anyhow!("not a square: {head}")),
        // a trailing promotion letter is ignored; the prompt asks for it
        _ if head.len() == 4 || head.len() == 5 => {
            let from = head.get(..2).and_then(coord_to_sq);
            let to = head.get(2..4).and_then(coord_to_sq);
            match (from, to) {
                (Some(from), Some(to)) => Ok(Command::Move(from, to)),
                _ => bail!("not a move: {head}"),
            }
        }
        _ => bail!("unknown command '{head}', type help"),
    }
}

fn glyph(piece: Piece) -> char {
    match (piece.side, piece.kind) {
        (Side::White, PieceKind::King) => '♔',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::Black, PieceKind::King) => '♚',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Pawn) => '♟',
    }
}

/// Draws the board from the human's side. The selected square is
/// bracketed, legal targets are starred, the last move is parenthesised.
pub fn draw_board(view: &View<'_>) -> String {
    let flipped = view.human == Side::Black;
    let ranks: Vec<i8> = if flipped {
        (0..8).collect()
    } else {
        (0..8).rev().collect()
    };
    let files: Vec<i8> = if flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };
    let last = view.last_move.map(|m| [m.from, m.to]);

    let mut out = String::new();
    for &rank in &ranks {
        out.push_str(&format!("{} ", rank + 1));
        for &file in &files {
            let sq = (rank * 8 + file) as Square;
            let body = match view.board.piece_at(sq) {
                Some(piece) => glyph(piece),
                None if view.targets.contains(&sq) => '*',
                None => '·',
            };
            let (open, close) = if view.selected == Some(sq) {
                ('[', ']')
            } else if view.targets.contains(&sq) && view.board.piece_at(sq).is_some() {
                ('*', ' ')
            } else if last.is_some_and(|l| l.contains(&sq)) {
                ('(', ')')
            } else {
                (' ', ' ')
            };
            out.push(open);
            out.push(body);
            out.push(close);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for &file in &files {
        out.push(' ');
        out.push((b'a' + file as u8) as char);
        out.push(' ');
    }
    out.push('\n');
    out
}

/// Presenter and prompt provider over any line reader and writer.
pub struct Terminal<I, O> {
    input: I,
    out: O,
}

impl<I: BufRead, O: Write> Terminal<I, O> {
    pub fn new(input: I, out: O) -> Self {
        Self { input, out }
    }

    /// Next trimmed input line, or `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    pub fn say(&mut self, text: &str) {
        writeln!(self.out, "{text}").ok();
        self.out.flush().ok();
    }

    pub fn prompt(&mut self, text: &str) {
        write!(self.out, "{text}").ok();
        self.out.flush().ok();
    }

    /// Repeats `question` until `parse` accepts the answer. An empty
    /// answer or end of input dismisses it.
    fn ask<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        loop {
            self.prompt(question);
            let answer = self.read_line()?;
            if answer.is_empty() {
                return None;
            }
            match parse(&answer) {
                Some(value) => return Some(value),
                None => self.say(&format!("'{answer}' is not a valid choice")),
            }
        }
    }

    pub fn into_output(self) -> O {
        self.out
    }
}

impl<I: BufRead, O: Write> Presenter for Terminal<I, O> {
    fn render(&mut self, view: &View<'_>) {
        let board = draw_board(view);
        let status = match view.state {
            TurnState::GameOver => "Game over".to_string(),
            _ => view.status.to_string(),
        };
        let header = format!("{status} | You play {} | {}", view.human, view.difficulty);
        writeln!(self.out, "\n{header}\n{board}{}", view.scores).ok();
        self.out.flush().ok();
    }

    fn invalid_move(&mut self, mv: Move) {
        self.say(&format!("Invalid move: {mv} is not allowed."));
    }

    fn game_over(&mut self, _outcome: Outcome, text: &str) {
        self.say(&format!("\n*** Game over: {text} ***"));
    }

    fn score_updated(&mut self, scores: &ScoreTally) {
        self.say(&format!("Score: {scores}"));
    }
}

impl<I: BufRead, O: Write> ChoiceProvider for Terminal<I, O> {
    fn choose_promotion(&mut self) -> Option<PieceKind> {
        self.ask("Promote to (q)ueen, (r)ook, (b)ishop or k(n)ight? ", |a| {
            let mut chars = a.chars();
            match (chars.next().and_then(PieceKind::from_symbol), chars.next()) {
                (Some(kind), None) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => None,
            }
        })
    }

    fn choose_side(&mut self) -> Option<Side> {
        self.ask("Play as (w)hite or (b)lack? ", |a| a.parse().ok())
    }

    fn choose_difficulty(&mut self, current: Difficulty) -> Option<Difficulty> {
        self.ask(
            &format!("Difficulty: easy, medium or hard [{current}]? "),
            |a| a.parse().ok(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Board;
    use std::io::Cursor;

    fn terminal(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("e2").unwrap(), Command::Click(12));
        assert_eq!(parse_command(" E2E4 ").unwrap(), Command::Move(12, 28));
        assert_eq!(parse_command("a7a8q").unwrap(), Command::Move(48, 56));
        assert_eq!(
            parse_command("difficulty Hard").unwrap(),
            Command::Difficulty(Difficulty::Hard)
        );
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert!(parse_command("difficulty").is_err());
        assert!(parse_command("difficulty insane").is_err());
        assert!(parse_command("z9").is_err());
        assert!(parse_command("").is_err());
        assert!(parse_command("é2e4").is_err());
    }

    #[test]
    fn empty_answer_dismisses_a_question() {
        let mut t = terminal("\n");
        assert_eq!(t.choose_side(), None);
        let mut t = terminal("");
        assert_eq!(t.choose_promotion(), None);
    }

    #[test]
    fn bad_answers_are_asked_again() {
        let mut t = terminal("purple\nb\n");
        assert_eq!(t.choose_side(), Some(Side::Black));

        let mut t = terminal("k\nn\n");
        assert_eq!(t.choose_promotion(), Some(PieceKind::Knight));

        let mut t = terminal("3\n");
        assert_eq!(t.choose_difficulty(Difficulty::Easy), Some(Difficulty::Hard));
        let out = String::from_utf8(t.into_output()).unwrap();
        assert!(out.contains("[Easy]"));
    }

    #[test]
    fn board_is_drawn_from_the_humans_side() {
        let board = Board::startpos();
        let mut view = View {
            board: &board,
            human: Side::White,
            difficulty: Difficulty::Easy,
            state: TurnState::AwaitingHumanTarget { from: 12 },
            selected: Some(12),
            targets: vec![20, 28],
            last_move: None,
            status: game_session::Status::YourMove,
            scores: ScoreTally::default(),
        };

        let white = draw_board(&view);
        let lines: Vec<&str> = white.lines().collect();
        assert!(lines[0].starts_with("8 "));
        assert!(lines[6].contains("[♙]"));
        assert!(lines[5].contains('*'));
        assert!(lines[8].trim_start().starts_with('a'));

        view.human = Side::Black;
        let black = draw_board(&view);
        assert!(black.lines().next().unwrap().starts_with("1 "));
        assert!(black.lines().nth(8).unwrap().trim_start().starts_with('h'));
    }
}
