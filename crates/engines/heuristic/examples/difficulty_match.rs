//! Plays the difficulty tiers against each other.
//!
//! Usage:
//!   cargo run --release --example difficulty_match -p heuristic_engine -- [first] [second] [games] [seed]
//!
//! Examples:
//!   # Default: hard against easy, 20 games
//!   cargo run --release --example difficulty_match -p heuristic_engine
//!
//!   # Medium against hard, 50 games, fixed seed
//!   cargo run --release --example difficulty_match -p heuristic_engine -- medium hard 50 7

use chess_core::{Board, Engine, Outcome, Side};
use heuristic_engine::{Difficulty, HeuristicEngine};
use std::env;
use std::time::Instant;

/// Plays one game to its natural end. Returns the outcome and the ply count.
fn play_game<'a>(white: &'a mut dyn Engine, black: &'a mut dyn Engine) -> (Outcome, usize) {
    let mut board = Board::startpos();
    white.new_game();
    black.new_game();

    loop {
        if let Some(outcome) = board.outcome() {
            return (outcome, board.ply_count());
        }
        let engine = match board.side_to_move() {
            Side::White => &mut *white,
            Side::Black => &mut *black,
        };
        let Some(mv) = engine.choose_move(&mut board).best_move else {
            unreachable!("a running game always has a legal move");
        };
        if let Err(e) = board.apply(mv) {
            panic!("{} played an illegal move: {e}", engine.name());
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let first: Difficulty = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(Difficulty::Hard);
    let second: Difficulty = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(Difficulty::Easy);
    let games: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(20);
    let seed: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);

    let mut a = HeuristicEngine::seeded(first, seed);
    let mut b = HeuristicEngine::seeded(second, seed.wrapping_add(1));

    println!("=== {first} vs {second}, {games} games ===");

    let (mut wins, mut losses, mut draws) = (0u32, 0u32, 0u32);
    let start = Instant::now();

    for game in 0..games {
        // alternate colours
        let a_white = game % 2 == 0;
        let (outcome, plies) = if a_white {
            play_game(&mut a, &mut b)
        } else {
            play_game(&mut b, &mut a)
        };

        let a_side = if a_white { Side::White } else { Side::Black };
        let score = match outcome.winner() {
            Some(w) if w == a_side => {
                wins += 1;
                "1-0"
            }
            Some(_) => {
                losses += 1;
                "0-1"
            }
            None => {
                draws += 1;
                "1/2"
            }
        };

        println!(
            "Game {}/{}: {} ({}) {outcome} after {plies} plies - Score: {wins}-{losses}-{draws}",
            game + 1,
            games,
            score,
            if a_white { "W" } else { "B" },
        );
    }

    println!("{:=<70}", "");
    println!(
        "{first}: +{wins} -{losses} ={draws} in {:.3?}",
        start.elapsed()
    );
}
