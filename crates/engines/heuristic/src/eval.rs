//! Material-based position evaluation.

use chess_core::{Board, PieceKind, Side};

/// Material values in pawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [f64; 6] = [1.0, 3.2, 3.3, 5.0, 9.0, 0.0];

/// Evaluates the position for `perspective`.
///
/// The raw score is Black material minus White material; it is negated
/// when `perspective` is White, so positive always means "good for
/// `perspective`". Material only: no positional or mobility terms.
pub fn evaluate(board: &Board, perspective: Side) -> f64 {
    let mut score = 0.0;

    for kind in PieceKind::ALL {
        let value = PIECE_VALUES[kind.idx()];
        score += board.count(Side::Black, kind) as f64 * value;
        score -= board.count(Side::White, kind) as f64 * value;
    }

    match perspective {
        Side::Black => score,
        Side::White => -score,
    }
}

/// Returns the material value of a piece in pawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> f64 {
    PIECE_VALUES[kind.idx()]
}
