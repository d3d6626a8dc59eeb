//! Bitboards: one bit per square, `a1` in bit 0 and `h8` in bit 63.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Mul, Not, Shl, Shr};

use crate::square::Square;

/// A set of squares packed into a `u64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_B: Bitboard = Bitboard(0x0202_0202_0202_0202);
    pub const FILE_G: Bitboard = Bitboard(0x4040_4040_4040_4040);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    /// Every square except the a-file. Guards shifts that move east.
    pub const NOT_A_FILE: Bitboard = Bitboard(!Self::FILE_A.0);
    /// Every square except the h-file. Guards shifts that move west.
    pub const NOT_H_FILE: Bitboard = Bitboard(!Self::FILE_H.0);
    /// Every square except the a- and b-files.
    pub const NOT_AB_FILE: Bitboard = Bitboard(!(Self::FILE_A.0 | Self::FILE_B.0));
    /// Every square except the g- and h-files.
    pub const NOT_GH_FILE: Bitboard = Bitboard(!(Self::FILE_G.0 | Self::FILE_H.0));

    #[inline]
    pub const fn new(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    #[inline]
    pub const fn inner(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_nonempty(self) -> bool {
        self.0 != 0
    }

    /// Population count.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Test whether `sq` is in the set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & sq.bit() != 0
    }

    /// Add `sq` to the set in place.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= sq.bit();
    }

    /// Remove `sq` from the set in place.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !sq.bit();
    }

    /// Copy of the set with `sq` added.
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | sq.bit())
    }

    /// Lowest set square, if any.
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as u8))
        }
    }

    /// Remove and return the lowest set square.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl Shl<u8> for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn shl(self, rhs: u8) -> Bitboard {
        Bitboard(self.0 << rhs)
    }
}

impl Shr<u8> for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn shr(self, rhs: u8) -> Bitboard {
        Bitboard(self.0 >> rhs)
    }
}

/// Wrapping multiply, used by the magic index computation.
impl Mul<u64> for Bitboard {
    type Output = u64;
    #[inline]
    fn mul(self, rhs: u64) -> u64 {
        self.0.wrapping_mul(rhs)
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bitboard {}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8u8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8u8 {
                let mark = if self.0 >> (rank * 8 + file) & 1 == 1 { 'x' } else { '.' };
                write!(f, "{mark} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "    a b c d e f g h  0x{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Bitboard;
    use crate::square::Square;

    #[test]
    fn set_and_clear_in_place() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square::E4);
        bb.set(Square::H8);
        assert!(bb.contains(Square::E4));
        assert_eq!(bb.count(), 2);
        bb.clear(Square::E4);
        assert!(!bb.contains(Square::E4));
        assert_eq!(bb, Bitboard::EMPTY.with(Square::H8));
    }

    #[test]
    fn pop_lsb_walks_upwards() {
        let mut bb = Bitboard::EMPTY.with(Square::H8).with(Square::A1).with(Square::D5);
        assert_eq!(bb.pop_lsb(), Some(Square::A1));
        assert_eq!(bb.pop_lsb(), Some(Square::D5));
        assert_eq!(bb.pop_lsb(), Some(Square::H8));
        assert_eq!(bb.pop_lsb(), None);
    }

    #[test]
    fn iteration_visits_every_square_once() {
        let full = Bitboard::new(!0);
        assert_eq!(full.count(), 64);
        assert_eq!(full.len(), 64);
        let squares: Vec<Square> = Bitboard::RANK_8.collect();
        assert_eq!(squares.first(), Some(&Square::A8));
        assert_eq!(squares.last(), Some(&Square::H8));
    }

    #[test]
    fn file_guards_exclude_edges() {
        assert!(!Bitboard::NOT_A_FILE.contains(Square::A4));
        assert!(Bitboard::NOT_A_FILE.contains(Square::B4));
        assert!(!Bitboard::NOT_GH_FILE.contains(Square::G1));
        assert!(!Bitboard::NOT_AB_FILE.contains(Square::B8));
        assert_eq!(Bitboard::NOT_AB_FILE.count(), 48);
    }

    #[test]
    fn shifts_move_whole_ranks() {
        assert_eq!(Bitboard::RANK_1 << 8, Bitboard::new(0xFF00));
        assert_eq!(Bitboard::RANK_8 >> 8, Bitboard::new(0x00FF_0000_0000_0000));
        assert_eq!(Bitboard::RANK_1 << 56, Bitboard::RANK_8);
    }

    #[test]
    fn wrapping_multiply_does_not_panic() {
        let product = Bitboard::new(!0) * 0x8000_0000_0000_0001;
        assert_eq!(product, 0x7FFF_FFFF_FFFF_FFFF);
    }
}
