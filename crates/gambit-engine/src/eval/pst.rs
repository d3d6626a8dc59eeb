//! Piece-square tables.
//!
//! Tables are laid out as a board diagram from White's side: the first row
//! is rank 8, the last row rank 1. White looks a square up through
//! [`Square::flip_rank`], Black reads the table directly, which mirrors it
//! vertically.

use gambit_core::{Color, Piece, PieceKind, Position, Square};

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
    90,  90,  90,  90,  90,  90,  90,  90,
    30,  30,  30,  40,  40,  30,  30,  30,
    20,  20,  20,  30,  30,  30,  20,  20,
    10,  10,  10,  20,  20,  10,  10,  10,
     5,   5,  10,  20,  20,   5,   5,   5,
     0,   0,   0,   5,   5,   0,   0,   0,
     0,   0,   0, -10, -10,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,  10,  10,   0,   0,  -5,
    -5,   5,  20,  20,  20,  20,   5,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,   5,  20,  10,  10,  20,   5,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5, -10,   0,   0,   0,   0, -10,  -5,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,  10,   0,   0,   0,   0,  10,   0,
     0,  30,   0,   0,   0,   0,  30,   0,
     0,   0, -10,   0,   0, -10,   0,   0,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
    50,  50,  50,  50,  50,  50,  50,  50,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,   0,  20,  20,   0,   0,   0,
];

/// Queens carry no positional term.
const QUEEN_PST: [i32; 64] = [0; 64];

#[rustfmt::skip]
const KING_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   5,   5,   5,   5,   0,   0,
     0,   5,   5,  10,  10,   5,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   5,   5,  -5,  -5,   0,   5,   0,
     0,   0,   5,   0, -15,   0,  10,   0,
];

const TABLES: [&[i32; 64]; PieceKind::COUNT] =
    [&PAWN_PST, &KNIGHT_PST, &BISHOP_PST, &ROOK_PST, &QUEEN_PST, &KING_PST];

/// Positional bonus for `piece` standing on `sq`, from its owner's point of view.
#[inline]
pub fn pst_value(piece: Piece, sq: Square) -> i32 {
    let index = match piece.color() {
        Color::White => sq.flip_rank().index(),
        Color::Black => sq.index(),
    };
    TABLES[piece.kind().index()][index]
}

/// Sum of piece-square bonuses, White minus Black.
pub fn pst(pos: &Position) -> i32 {
    let mut score = 0;
    for piece in Piece::all() {
        let sign = match piece.color() {
            Color::White => 1,
            Color::Black => -1,
        };
        for sq in pos.pieces(piece) {
            score += sign * pst_value(piece, sq);
        }
    }
    score
}
