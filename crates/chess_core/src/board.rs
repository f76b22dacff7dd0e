use cozy_chess::{Color as CozyColor, Piece as CozyPiece, Square as CozySquare};

use crate::error::BoardError;
use crate::outcome::Outcome;
use crate::types::*;

/// Plies without a capture or pawn move after which the game is drawn
/// automatically (75-move rule).
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position that end the game (fivefold repetition).
pub const FIVEFOLD: usize = 5;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// State saved by [`Board::apply`] and restored by [`Board::undo`].
#[derive(Clone, Debug)]
struct Undo {
    prev: cozy_chess::Board,
    mv: Move,
    quiet_plies: u32,
}

/// A game board backed by `cozy-chess`.
///
/// Legality, check detection and move generation are all delegated to
/// `cozy-chess`. This type adds a stack-disciplined undo log, the
/// position history for repetition detection and an uncapped
/// quiet-move counter for the 75-move rule.
#[derive(Clone, Debug)]
pub struct Board {
    inner: cozy_chess::Board,
    history: Vec<Undo>,
    quiet_plies: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn startpos() -> Self {
        Board {
            inner: cozy_chess::Board::default(),
            history: Vec::new(),
            quiet_plies: 0,
        }
    }

    /// Parses a FEN string. The halfmove field may exceed 100; the excess
    /// is tracked here since `cozy-chess` caps its own clock.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let invalid = |reason: String| BoardError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let quiet_plies = match fields.get(4) {
            Some(h) => h
                .parse::<u32>()
                .map_err(|_| invalid(format!("bad halfmove clock '{h}'")))?,
            None => 0,
        };
        let capped = quiet_plies.min(100).to_string();
        let normalized = fields
            .iter()
            .enumerate()
            .map(|(i, f)| if i == 4 { capped.as_str() } else { *f })
            .collect::<Vec<_>>()
            .join(" ");

        let inner = cozy_chess::Board::from_fen(&normalized, false)
            .map_err(|e| invalid(format!("{e:?}")))?;

        Ok(Board {
            inner,
            history: Vec::new(),
            quiet_plies,
        })
    }

    /// Back to the initial position with an empty history.
    pub fn reset(&mut self) {
        *self = Board::startpos();
    }

    pub fn fen(&self) -> String {
        self.inner.to_string()
    }

    pub fn side_to_move(&self) -> Side {
        from_cozy_color(self.inner.side_to_move())
    }

    /// Number of moves applied since the board was created or reset.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Plies since the last capture or pawn move.
    pub fn quiet_plies(&self) -> u32 {
        self.quiet_plies
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|u| u.mv)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let s = to_cozy_square(sq);
        let kind = self.inner.piece_on(s)?;
        let color = self.inner.color_on(s)?;
        Some(Piece {
            side: from_cozy_color(color),
            kind: from_cozy_piece(kind),
        })
    }

    /// Number of pieces of one kind held by one side.
    pub fn count(&self, side: Side, kind: PieceKind) -> u32 {
        self.inner
            .colored_pieces(to_cozy_color(side), to_cozy_piece(kind))
            .len()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.raw_moves()
            .into_iter()
            .map(|mv| self.to_standard(mv))
            .collect()
    }

    /// Number of legal moves for the side to move.
    pub fn mobility(&self) -> usize {
        let mut n = 0;
        self.inner.generate_moves(|moves| {
            n += moves.len();
            false
        });
        n
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.find_raw(mv).is_some()
    }

    /// Whether `mv` takes a piece, en passant included.
    pub fn is_capture(&self, mv: Move) -> bool {
        let mover = match self.piece_at(mv.from) {
            Some(p) => p,
            None => return false,
        };
        match self.piece_at(mv.to) {
            Some(target) => target.side != mover.side,
            None => mover.kind == PieceKind::Pawn && file_of(mv.from) != file_of(mv.to),
        }
    }

    /// Whether `mv` moves a pawn onto its last rank.
    pub fn is_promotion_square(&self, from: Square, to: Square) -> bool {
        match self.piece_at(from) {
            Some(p) => p.kind == PieceKind::Pawn && rank_of(to) == p.side.last_rank(),
            None => false,
        }
    }

    /// Plays a legal move. Anything outside the current legal set is
    /// rejected and the board is left untouched.
    pub fn apply(&mut self, mv: Move) -> Result<(), BoardError> {
        let raw = self.find_raw(mv).ok_or(BoardError::IllegalMove(mv))?;
        let resets_clock = self.is_capture(mv)
            || self.piece_at(mv.from).map(|p| p.kind) == Some(PieceKind::Pawn);

        self.history.push(Undo {
            prev: self.inner.clone(),
            mv,
            quiet_plies: self.quiet_plies,
        });
        self.inner.play_unchecked(raw);
        self.quiet_plies = if resets_clock { 0 } else { self.quiet_plies + 1 };
        Ok(())
    }

    /// Takes back the last applied move, returning it.
    pub fn undo(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.inner = undo.prev;
        self.quiet_plies = undo.quiet_plies;
        Some(undo.mv)
    }

    pub fn is_check(&self) -> bool {
        !self.inner.checkers().is_empty()
    }

    fn has_legal_move(&self) -> bool {
        self.inner.generate_moves(|moves| !moves.is_empty())
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        Side::ALL
            .iter()
            .all(|&side| self.has_insufficient_material(side))
    }

    /// Whether `side` alone lacks mating material.
    pub fn has_insufficient_material(&self, side: Side) -> bool {
        let b = &self.inner;
        let ours = b.colors(to_cozy_color(side));
        let theirs = b.colors(to_cozy_color(side.other()));
        let heavy = b.pieces(CozyPiece::Pawn) | b.pieces(CozyPiece::Rook) | b.pieces(CozyPiece::Queen);

        if !(ours & heavy).is_empty() {
            return false;
        }

        if !(ours & b.pieces(CozyPiece::Knight)).is_empty() {
            // A lone knight mates only with help from the opponent's own
            // minor pieces, rooks or pawns.
            let helpers = b.pieces(CozyPiece::Pawn)
                | b.pieces(CozyPiece::Knight)
                | b.pieces(CozyPiece::Bishop)
                | b.pieces(CozyPiece::Rook);
            return ours.len() <= 2 && (theirs & helpers).is_empty();
        }

        let bishops = b.pieces(CozyPiece::Bishop);
        if !(ours & bishops).is_empty() {
            let mut dark = 0;
            let mut light = 0;
            for s in bishops {
                let s = from_cozy_square(s);
                if (file_of(s) + rank_of(s)) % 2 == 0 {
                    dark += 1;
                } else {
                    light += 1;
                }
            }
            let same_color = dark == 0 || light == 0;
            return same_color
                && b.pieces(CozyPiece::Pawn).is_empty()
                && b.pieces(CozyPiece::Knight).is_empty();
        }

        true
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.quiet_plies >= SEVENTY_FIVE_MOVE_PLIES && self.has_legal_move()
    }

    /// How often the current position has occurred in this game.
    pub fn repetitions(&self) -> usize {
        let hash = self.inner.hash();
        1 + self
            .history
            .iter()
            .filter(|u| u.prev.hash() == hash)
            .count()
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetitions() >= FIVEFOLD
    }

    /// Terminal classification, `None` while the game goes on.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_checkmate() {
            Some(Outcome::Checkmate {
                winner: self.side_to_move().other(),
            })
        } else if self.is_stalemate() {
            Some(Outcome::Stalemate)
        } else if self.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if self.is_seventyfive_moves() {
            Some(Outcome::SeventyFiveMoves)
        } else if self.is_fivefold_repetition() {
            Some(Outcome::FivefoldRepetition)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    fn raw_moves(&self) -> Vec<cozy_chess::Move> {
        let mut moves = Vec::with_capacity(64);
        self.inner.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    fn find_raw(&self, mv: Move) -> Option<cozy_chess::Move> {
        self.raw_moves()
            .into_iter()
            .find(|&raw| self.to_standard(raw) == mv)
    }

    /// `cozy-chess` writes castling as king-takes-own-rook; rewrite it as
    /// the king's two-square step.
    fn to_standard(&self, raw: cozy_chess::Move) -> Move {
        let from = from_cozy_square(raw.from);
        let mut to = from_cozy_square(raw.to);
        let stm = self.inner.side_to_move();
        if self.inner.piece_on(raw.from) == Some(CozyPiece::King)
            && self.inner.colors(stm).has(raw.to)
        {
            let file = if file_of(to) > file_of(from) { 6 } else { 2 };
            if let Some(s) = sq(file, rank_of(from)) {
                to = s;
            }
        }
        Move {
            from,
            to,
            promo: raw.promotion.map(from_cozy_piece),
        }
    }
}

fn to_cozy_square(sq: Square) -> CozySquare {
    CozySquare::index(sq as usize)
}

fn from_cozy_square(sq: CozySquare) -> Square {
    sq as u8
}

fn to_cozy_color(side: Side) -> CozyColor {
    match side {
        Side::White => CozyColor::White,
        Side::Black => CozyColor::Black,
    }
}

fn from_cozy_color(color: CozyColor) -> Side {
    match color {
        CozyColor::White => Side::White,
        CozyColor::Black => Side::Black,
    }
}

fn to_cozy_piece(kind: PieceKind) -> CozyPiece {
    match kind {
        PieceKind::Pawn => CozyPiece::Pawn,
        PieceKind::Knight => CozyPiece::Knight,
        PieceKind::Bishop => CozyPiece::Bishop,
        PieceKind::Rook => CozyPiece::Rook,
        PieceKind::Queen => CozyPiece::Queen,
        PieceKind::King => CozyPiece::King,
    }
}

fn from_cozy_piece(piece: CozyPiece) -> PieceKind {
    match piece {
        CozyPiece::Pawn => PieceKind::Pawn,
        CozyPiece::Knight => PieceKind::Knight,
        CozyPiece::Bishop => PieceKind::Bishop,
        CozyPiece::Rook => PieceKind::Rook,
        CozyPiece::Queen => PieceKind::Queen,
        CozyPiece::King => PieceKind::King,
    }
}
