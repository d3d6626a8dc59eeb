//! Zobrist keys and full-position hashing.
//!
//! Keys come from a fixed xorshift stream, so hashes are identical across runs
//! and machines.

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

pub(crate) struct ZobristKeys {
    piece_square: [[u64; 64]; 12],
    en_passant: [u64; 64],
    castling: [u64; 16],
    black_to_move: u64,
}

pub(crate) static KEYS: ZobristKeys = ZobristKeys::generate(0x9E37_79B9_7F4A_7C15);

const fn next_key(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

impl ZobristKeys {
    const fn generate(seed: u64) -> ZobristKeys {
        let mut state = seed;
        let mut piece_square = [[0u64; 64]; 12];
        let mut piece = 0;
        while piece < 12 {
            let mut sq = 0;
            while sq < 64 {
                piece_square[piece][sq] = next_key(&mut state);
                sq += 1;
            }
            piece += 1;
        }

        let mut en_passant = [0u64; 64];
        let mut sq = 0;
        while sq < 64 {
            en_passant[sq] = next_key(&mut state);
            sq += 1;
        }

        let mut castling = [0u64; 16];
        let mut rights = 0;
        while rights < 16 {
            castling[rights] = next_key(&mut state);
            rights += 1;
        }

        let black_to_move = next_key(&mut state);

        ZobristKeys { piece_square, en_passant, castling, black_to_move }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_square[piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant[sq.index()]
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastleRights) -> u64 {
        self.castling[rights.index()]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.black_to_move
    }
}

/// Hash `pos` from scratch, ignoring the incrementally maintained value.
pub fn compute_hash(pos: &Position) -> u64 {
    let mut hash = 0;
    for piece in Piece::all() {
        for sq in pos.pieces(piece) {
            hash ^= KEYS.piece(piece, sq);
        }
    }
    if let Some(ep) = pos.en_passant() {
        hash ^= KEYS.en_passant(ep);
    }
    hash ^= KEYS.castling(pos.castling());
    if pos.side_to_move() == Color::Black {
        hash ^= KEYS.side();
    }
    hash
}
