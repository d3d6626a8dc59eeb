//! Pseudo-legal move generation.
//!
//! Generated moves obey piece movement rules but may leave the mover's king
//! attacked; [`Position::make_move`](crate::Position::make_move) filters those
//! out. [`legal_moves`] does the filtering up front.

mod castling;
mod pawns;
mod pieces;

use crate::chess_move::Move;
use crate::make_move::MoveMode;
use crate::position::Position;

use self::castling::gen_castling;
use self::pawns::gen_pawns;
use self::pieces::gen_pieces;

/// Upper bound on moves in any position, with headroom over the known maximum of 218.
pub const MAX_MOVES: usize = 256;

/// Fixed-capacity, stack-allocated move buffer.
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList { moves: [Move::NULL; MAX_MOVES], len: 0 }
    }

    /// Append a move.
    ///
    /// # Panics
    ///
    /// Panics if the list already holds [`MAX_MOVES`] moves.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> MoveList {
        MoveList::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Append every pseudo-legal move for the side to move to `list`.
pub fn generate_moves(pos: &Position, list: &mut MoveList) {
    gen_pawns(pos, list);
    gen_pieces(pos, list);
    gen_castling(pos, list);
}

/// Every move that does not leave the mover's king attacked.
pub fn legal_moves(pos: &Position) -> MoveList {
    let mut pseudo = MoveList::new();
    generate_moves(pos, &mut pseudo);

    let mut scratch = *pos;
    let mut legal = MoveList::new();
    for &mv in pseudo.iter() {
        if let Some(snapshot) = scratch.make_move(mv, MoveMode::AllMoves) {
            scratch.unmake_move(snapshot);
            legal.push(mv);
        }
    }
    legal
}

/// Resolve UCI text such as `e2e4` or `a7a8q` against the pseudo-legal moves.
///
/// Matches on source, target and promotion letter. A promotion with no suffix,
/// or a suffix on a non-promotion, does not match. Legality is left to
/// `make_move`.
pub fn find_uci_move(pos: &Position, text: &str) -> Option<Move> {
    let text = text.trim();
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return None;
    }
    let mut list = MoveList::new();
    generate_moves(pos, &mut list);
    list.iter().copied().find(|mv| mv.to_string() == text)
}
