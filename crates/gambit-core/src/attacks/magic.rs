//! Magic-bitboard lookup for bishops and rooks.
//!
//! Each square owns a fixed block of 4096 (rook) or 512 (bishop) entries. A
//! lookup masks the board down to the relevant blockers, multiplies by the
//! square's magic and keeps the top `relevant_bits` bits as the index.

use std::sync::OnceLock;

use tracing::debug;

use crate::bitboard::Bitboard;
use crate::square::Square;

use super::magic_data::{BISHOP_MAGICS, BISHOP_RELEVANT_BITS, ROOK_MAGICS, ROOK_RELEVANT_BITS};

pub(crate) const ROOK_TABLE_SIZE: usize = 4096;
pub(crate) const BISHOP_TABLE_SIZE: usize = 512;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Walk each ray from `sq`, stopping on (and including) the first blocker.
fn ray_attacks(sq: Square, occupied: u64, directions: &[(i8, i8); 4]) -> u64 {
    let mut attacks = 0u64;
    for &(dr, df) in directions {
        let (mut rank, mut file) = (sq.rank() as i8 + dr, sq.file() as i8 + df);
        while (0..8).contains(&rank) && (0..8).contains(&file) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupied & bit != 0 {
                break;
            }
            rank += dr;
            file += df;
        }
    }
    attacks
}

/// Ray-cast rook attacks without tables.
pub(crate) fn rook_attacks_slow(sq: Square, occupied: u64) -> u64 {
    ray_attacks(sq, occupied, &ROOK_DIRECTIONS)
}

/// Ray-cast bishop attacks without tables.
pub(crate) fn bishop_attacks_slow(sq: Square, occupied: u64) -> u64 {
    ray_attacks(sq, occupied, &BISHOP_DIRECTIONS)
}

/// Rays from `sq` with the final edge square of each ray removed.
fn relevant_mask(sq: Square, directions: &[(i8, i8); 4]) -> u64 {
    let mut mask = 0u64;
    for &(dr, df) in directions {
        let (mut rank, mut file) = (sq.rank() as i8 + dr, sq.file() as i8 + df);
        while (0..8).contains(&(rank + dr)) && (0..8).contains(&(file + df)) {
            mask |= 1u64 << (rank * 8 + file);
            rank += dr;
            file += df;
        }
    }
    mask
}

pub(crate) fn rook_mask(sq: Square) -> u64 {
    relevant_mask(sq, &ROOK_DIRECTIONS)
}

pub(crate) fn bishop_mask(sq: Square) -> u64 {
    relevant_mask(sq, &BISHOP_DIRECTIONS)
}

/// The `index`-th subset of `mask`: bit `i` of `index` decides whether the
/// `i`-th lowest square of `mask` is occupied.
pub(crate) fn occupancy_subset(index: usize, bits: u32, mask: u64) -> u64 {
    let mut remaining = Bitboard::new(mask);
    let mut occupancy = 0u64;
    for i in 0..bits {
        let Some(sq) = remaining.pop_lsb() else { break };
        if index & (1 << i) != 0 {
            occupancy |= sq.bit();
        }
    }
    occupancy
}

#[inline(always)]
fn magic_index(occupied: Bitboard, mask: u64, magic: u64, bits: u32) -> usize {
    ((occupied & Bitboard::new(mask)) * magic >> (64 - bits)) as usize
}

pub(crate) struct SliderTables {
    rook_masks: [u64; 64],
    bishop_masks: [u64; 64],
    rook: Vec<[Bitboard; ROOK_TABLE_SIZE]>,
    bishop: Vec<[Bitboard; BISHOP_TABLE_SIZE]>,
}

impl SliderTables {
    fn build() -> SliderTables {
        let mut tables = SliderTables {
            rook_masks: [0; 64],
            bishop_masks: [0; 64],
            rook: vec![[Bitboard::EMPTY; ROOK_TABLE_SIZE]; 64],
            bishop: vec![[Bitboard::EMPTY; BISHOP_TABLE_SIZE]; 64],
        };

        for sq in Square::all() {
            let i = sq.index();

            let mask = rook_mask(sq);
            let bits = ROOK_RELEVANT_BITS[i];
            tables.rook_masks[i] = mask;
            for subset in 0..1usize << bits {
                let occupancy = occupancy_subset(subset, bits, mask);
                let slot = magic_index(Bitboard::new(occupancy), mask, ROOK_MAGICS[i], bits);
                tables.rook[i][slot] = Bitboard::new(rook_attacks_slow(sq, occupancy));
            }

            let mask = bishop_mask(sq);
            let bits = BISHOP_RELEVANT_BITS[i];
            tables.bishop_masks[i] = mask;
            for subset in 0..1usize << bits {
                let occupancy = occupancy_subset(subset, bits, mask);
                let slot = magic_index(Bitboard::new(occupancy), mask, BISHOP_MAGICS[i], bits);
                tables.bishop[i][slot] = Bitboard::new(bishop_attacks_slow(sq, occupancy));
            }
        }

        debug!("slider attack tables built");
        tables
    }

    #[inline]
    pub(crate) fn rook(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let i = sq.index();
        self.rook[i][magic_index(occupied, self.rook_masks[i], ROOK_MAGICS[i], ROOK_RELEVANT_BITS[i])]
    }

    #[inline]
    pub(crate) fn bishop(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let i = sq.index();
        self.bishop[i]
            [magic_index(occupied, self.bishop_masks[i], BISHOP_MAGICS[i], BISHOP_RELEVANT_BITS[i])]
    }
}

static SLIDERS: OnceLock<SliderTables> = OnceLock::new();

#[inline]
pub(crate) fn sliders() -> &'static SliderTables {
    SLIDERS.get_or_init(SliderTables::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_bit_counts_match_masks() {
        for sq in Square::all() {
            assert_eq!(rook_mask(sq).count_ones(), ROOK_RELEVANT_BITS[sq.index()], "rook {sq}");
            assert_eq!(bishop_mask(sq).count_ones(), BISHOP_RELEVANT_BITS[sq.index()], "bishop {sq}");
        }
    }

    #[test]
    fn masks_skip_board_edges() {
        let mask = Bitboard::new(rook_mask(Square::A1));
        assert!(mask.contains(Square::A7));
        assert!(!mask.contains(Square::A8));
        assert!(!mask.contains(Square::H1));
        assert!(!mask.contains(Square::A1));

        let mask = Bitboard::new(bishop_mask(Square::D4));
        assert!(mask.contains(Square::G7));
        assert!(!mask.contains(Square::H8));
    }

    #[test]
    fn subsets_cover_the_mask() {
        let mask = rook_mask(Square::E4);
        let bits = mask.count_ones();
        assert_eq!(occupancy_subset(0, bits, mask), 0);
        assert_eq!(occupancy_subset((1 << bits) - 1, bits, mask), mask);
        assert_eq!(occupancy_subset(1, bits, mask), mask & mask.wrapping_neg());
    }
}
