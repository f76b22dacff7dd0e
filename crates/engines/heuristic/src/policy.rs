//! Per-difficulty move selection.
//!
//! Every policy reads the legal moves fresh, scores candidates by applying
//! and undoing them on the live board, and leaves the board as it found
//! it. The side to move on entry is the computer, and all scores are from
//! its point of view.

use chess_core::{Board, Move, SearchResult};
use rand::seq::SliceRandom;
use rand::Rng;
use random_engine::random_move;

use crate::eval::evaluate;
use crate::Difficulty;

/// Chance that Easy skips scoring and plays a random move.
pub const EASY_RANDOM_CHANCE: f64 = 0.7;
/// Chance that Medium grabs a random capture when one exists.
pub const MEDIUM_CAPTURE_CHANCE: f64 = 0.8;
/// Half-width of the uniform noise Medium adds to each score.
pub const MEDIUM_NOISE: f64 = 1.0;
/// Weight of the opponent's reply count in Hard's score.
pub const HARD_MOBILITY_WEIGHT: f64 = 0.1;
/// Chance that Hard switches to a candidate that ties the best score.
pub const HARD_TIE_CHANCE: f64 = 0.3;

/// A candidate paired with its score, alive only during one selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub score: f64,
    pub mv: Move,
}

/// Dispatches to the policy for `difficulty`.
pub fn select_move<R: Rng + ?Sized>(
    board: &mut Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> SearchResult {
    match difficulty {
        Difficulty::Easy => easy_move(board, rng),
        Difficulty::Medium => medium_move(board, rng),
        Difficulty::Hard => hard_move(board, rng),
    }
}

/// Mostly random; otherwise deliberately the worst-looking move.
///
/// Ties for the lowest score go to the first candidate in generation order.
pub fn easy_move<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> SearchResult {
    let computer = board.side_to_move();
    let moves = board.legal_moves();

    if rng.gen_bool(EASY_RANDOM_CHANCE) {
        return SearchResult::unscored(moves.choose(rng).copied());
    }

    let scored = score_moves(board, &moves, |b| evaluate(b, computer));
    let worst = scored.iter().copied().reduce(|acc, s| if s.score < acc.score { s } else { acc });
    finish(board, worst, scored.len(), rng)
}

/// Prefers captures; otherwise the best material outcome blurred by noise.
///
/// Ties for the highest perturbed score go to the first candidate in
/// generation order.
pub fn medium_move<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> SearchResult {
    let computer = board.side_to_move();
    let moves = board.legal_moves();

    let captures: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|&mv| board.is_capture(mv))
        .collect();
    if !captures.is_empty() && rng.gen_bool(MEDIUM_CAPTURE_CHANCE) {
        return SearchResult::unscored(captures.choose(rng).copied());
    }

    let scored = score_moves(board, &moves, |b| {
        evaluate(b, computer) + rng.gen_range(-MEDIUM_NOISE..=MEDIUM_NOISE)
    });
    let best = scored.iter().copied().reduce(|acc, s| if s.score > acc.score { s } else { acc });
    finish(board, best, scored.len(), rng)
}

/// One-ply lookahead: material plus a bonus per opponent reply.
///
/// A candidate replaces the running best when it scores strictly higher,
/// or when it ties and a [`HARD_TIE_CHANCE`] coin lands.
pub fn hard_move<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> SearchResult {
    let computer = board.side_to_move();
    let moves = board.legal_moves();

    let scored = score_moves(board, &moves, |b| {
        evaluate(b, computer) + HARD_MOBILITY_WEIGHT * b.mobility() as f64
    });

    let mut best: Option<ScoredMove> = None;
    for s in scored.iter().copied() {
        let replace = match best {
            None => true,
            Some(b) => s.score > b.score || (s.score == b.score && rng.gen_bool(HARD_TIE_CHANCE)),
        };
        if replace {
            best = Some(s);
        }
    }
    finish(board, best, scored.len(), rng)
}

/// Scores every candidate by playing it, scoring the resulting position
/// and taking it back.
fn score_moves<F>(board: &mut Board, moves: &[Move], mut score: F) -> Vec<ScoredMove>
where
    F: FnMut(&Board) -> f64,
{
    let mut scored = Vec::with_capacity(moves.len());
    for &mv in moves {
        if board.apply(mv).is_err() {
            continue;
        }
        let s = score(board);
        board.undo();
        scored.push(ScoredMove { score: s, mv });
    }
    scored
}

fn finish<R: Rng + ?Sized>(
    board: &Board,
    chosen: Option<ScoredMove>,
    nodes: usize,
    rng: &mut R,
) -> SearchResult {
    match chosen {
        Some(s) => SearchResult {
            best_move: Some(s.mv),
            score: Some(s.score),
            nodes: nodes as u64,
        },
        None => SearchResult::unscored(random_move(board, rng)),
    }
}
