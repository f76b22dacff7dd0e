use super::*;
use chess_core::Side;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

#[test]
fn startpos_is_balanced() {
    let b = Board::startpos();
    assert_eq!(evaluate(&b, Side::White), 0.0);
    assert_eq!(evaluate(&b, Side::Black), 0.0);
}

#[test]
fn extra_queen_counts_nine() {
    let b = board("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    assert_eq!(evaluate(&b, Side::White), 9.0);
    assert_eq!(evaluate(&b, Side::Black), -9.0);
}

#[test]
fn bishop_outweighs_knight() {
    let b = board("4k1n1/8/8/8/8/8/8/2B1K3 w - - 0 1");
    let white = evaluate(&b, Side::White);
    assert!((white - 0.1).abs() < 1e-9, "got {white}");
}

#[test]
fn kings_are_worth_nothing() {
    let b = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(evaluate(&b, Side::White), 0.0);
    assert_eq!(piece_value(chess_core::PieceKind::King), 0.0);
}

#[test]
fn evaluation_is_antisymmetric() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k1n1/8/8/8/8/8/8/2B1K3 w - - 0 1",
        "3q2k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let b = board(fen);
        assert_eq!(evaluate(&b, Side::White), -evaluate(&b, Side::Black), "{fen}");
    }
}

#[test]
fn piece_values_follow_the_table() {
    use chess_core::PieceKind::*;
    let values: Vec<f64> = [Pawn, Knight, Bishop, Rook, Queen].map(piece_value).to_vec();
    assert_eq!(values, vec![1.0, 3.2, 3.3, 5.0, 9.0]);
}
