//! Attack sets for every piece type.

mod leapers;
mod magic;
mod magic_data;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::Square;

use self::leapers::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use self::magic::sliders;

/// Force the slider tables to be built now instead of on first use.
pub fn init() {
    let _ = sliders();
}

/// Squares a pawn of `color` on `sq` attacks.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Diagonal attacks from `sq`, stopping at the first piece in each direction.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliders().bishop(sq, occupied)
}

/// Orthogonal attacks from `sq`, stopping at the first piece in each direction.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliders().rook(sq, occupied)
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::magic::{bishop_attacks_slow, rook_attacks_slow};
    use super::*;

    fn lcg(state: &mut u64) -> u64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        *state
    }

    #[test]
    fn leaper_counts() {
        assert_eq!(knight_attacks(Square::D4).count(), 8);
        assert_eq!(knight_attacks(Square::H1).count(), 2);
        assert_eq!(knight_attacks(Square::B7).count(), 4);
        assert_eq!(king_attacks(Square::A8).count(), 3);
        assert_eq!(king_attacks(Square::E1).count(), 5);
        assert_eq!(king_attacks(Square::F5).count(), 8);
    }

    #[test]
    fn knight_does_not_wrap() {
        let attacks = knight_attacks(Square::G1);
        assert_eq!(attacks, Bitboard::EMPTY.with(Square::E2).with(Square::F3).with(Square::H3));
    }

    #[test]
    fn pawn_attacks_face_forward_without_wrapping() {
        assert_eq!(pawn_attacks(Color::White, Square::A2), Square::B3.bitboard());
        assert_eq!(pawn_attacks(Color::White, Square::H2), Square::G3.bitboard());
        assert_eq!(
            pawn_attacks(Color::Black, Square::E7),
            Square::D6.bitboard() | Square::F6.bitboard()
        );
        assert_eq!(pawn_attacks(Color::Black, Square::A7), Square::B6.bitboard());
        assert!(pawn_attacks(Color::White, Square::C8).is_empty());
    }

    #[test]
    fn sliders_on_empty_board() {
        for sq in Square::all() {
            assert_eq!(rook_attacks(sq, Bitboard::EMPTY).count(), 14, "{sq}");
        }
        assert_eq!(bishop_attacks(Square::D4, Bitboard::EMPTY).count(), 13);
        assert_eq!(bishop_attacks(Square::A1, Bitboard::EMPTY).count(), 7);
        assert_eq!(queen_attacks(Square::D4, Bitboard::EMPTY).count(), 27);
    }

    #[test]
    fn blockers_are_included_and_stop_the_ray() {
        let occupied = Square::E6.bitboard() | Square::C4.bitboard();
        let attacks = rook_attacks(Square::E4, occupied);
        assert!(attacks.contains(Square::E6));
        assert!(!attacks.contains(Square::E7));
        assert!(attacks.contains(Square::C4));
        assert!(!attacks.contains(Square::B4));
        assert!(attacks.contains(Square::E1));
    }

    #[test]
    fn rook_lookup_matches_ray_casting() {
        let mut state = 0x0123_4567_89AB_CDEF;
        for sq in Square::all() {
            for _ in 0..200 {
                let occupied = lcg(&mut state) & lcg(&mut state);
                assert_eq!(
                    rook_attacks(sq, Bitboard::new(occupied)).inner(),
                    rook_attacks_slow(sq, occupied),
                    "rook on {sq}, occupancy {occupied:#018x}"
                );
            }
        }
    }

    #[test]
    fn bishop_lookup_matches_ray_casting() {
        let mut state = 0xFEDC_BA98_7654_3210;
        for sq in Square::all() {
            for _ in 0..200 {
                let occupied = lcg(&mut state) & lcg(&mut state);
                assert_eq!(
                    bishop_attacks(sq, Bitboard::new(occupied)).inner(),
                    bishop_attacks_slow(sq, occupied),
                    "bishop on {sq}, occupancy {occupied:#018x}"
                );
            }
        }
    }
}
