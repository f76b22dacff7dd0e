//! Perft through the apply/undo stack.
//!
//! Move generation belongs to `cozy-chess`; these counts check that the
//! adapter's notation rewriting and undo log lose nothing on the way.

use rayon::prelude::*;

use chess_core::{perft, Board};

const CASES: &[(&str, &[(u8, u64)])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902)],
    ),
    (
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[(1, 48), (2, 2_039)],
    ),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[(1, 14), (2, 191), (3, 2_812)]),
    (
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[(1, 6), (2, 264)],
    ),
];

#[test]
fn perft_matches_reference_counts() {
    CASES.par_iter().for_each(|(fen, depths)| {
        for &(depth, expected) in depths.iter() {
            let mut board = Board::from_fen(fen).unwrap();
            let before = board.fen();
            let got = perft(&mut board, depth);
            assert_eq!(
                got, expected,
                "Perft mismatch for FEN '{}' at depth {}",
                fen, depth
            );
            assert_eq!(board.fen(), before, "perft left the board changed");
        }
    });
}
