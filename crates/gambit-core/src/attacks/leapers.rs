//! Pawn, knight and king attack tables, built by shifting a single bit and
//! masking off squares that wrapped around the board edge.

use crate::bitboard::Bitboard;
use crate::color::Color;

const NOT_A: u64 = Bitboard::NOT_A_FILE.inner();
const NOT_H: u64 = Bitboard::NOT_H_FILE.inner();
const NOT_AB: u64 = Bitboard::NOT_AB_FILE.inner();
const NOT_GH: u64 = Bitboard::NOT_GH_FILE.inner();

const fn pawn_mask(color: Color, sq: usize) -> u64 {
    let b = 1u64 << sq;
    match color {
        Color::White => (b << 7 & NOT_H) | (b << 9 & NOT_A),
        Color::Black => (b >> 7 & NOT_A) | (b >> 9 & NOT_H),
    }
}

const fn knight_mask(sq: usize) -> u64 {
    let b = 1u64 << sq;
    (b << 17 & NOT_A)
        | (b << 15 & NOT_H)
        | (b << 10 & NOT_AB)
        | (b << 6 & NOT_GH)
        | (b >> 17 & NOT_H)
        | (b >> 15 & NOT_A)
        | (b >> 10 & NOT_GH)
        | (b >> 6 & NOT_AB)
}

const fn king_mask(sq: usize) -> u64 {
    let b = 1u64 << sq;
    (b << 8)
        | (b >> 8)
        | (b << 1 & NOT_A)
        | (b >> 1 & NOT_H)
        | (b << 9 & NOT_A)
        | (b << 7 & NOT_H)
        | (b >> 7 & NOT_A)
        | (b >> 9 & NOT_H)
}

const fn build_pawn() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0;
    while sq < 64 {
        table[0][sq] = Bitboard::new(pawn_mask(Color::White, sq));
        table[1][sq] = Bitboard::new(pawn_mask(Color::Black, sq));
        sq += 1;
    }
    table
}

pub(super) static PAWN_ATTACKS: [[Bitboard; 64]; 2] = build_pawn();
pub(super) static KNIGHT_ATTACKS: [Bitboard; 64] = build_knight();
pub(super) static KING_ATTACKS: [Bitboard; 64] = build_king();

const fn build_knight() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = Bitboard::new(knight_mask(sq));
        sq += 1;
    }
    table
}

const fn build_king() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = Bitboard::new(king_mask(sq));
        sq += 1;
    }
    table
}
