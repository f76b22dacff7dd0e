use crate::board::Board;

/// Pure perft node count through [`Board::apply`]/[`Board::undo`].
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        if board.apply(mv).is_ok() {
            nodes += perft(board, depth - 1);
            board.undo();
        }
    }
    nodes
}
