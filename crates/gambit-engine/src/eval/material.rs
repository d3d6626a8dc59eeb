//! Material balance.
//!
//! Scores are from White's perspective (positive = White ahead).

use gambit_core::{Color, PieceKind, Position};

/// Piece values in centipawns, indexed by [`PieceKind::index()`].
///
/// | Piece  | value  |
/// |--------|--------|
/// | Pawn   |    100 |
/// | Knight |    300 |
/// | Bishop |    350 |
/// | Rook   |    500 |
/// | Queen  |   1000 |
/// | King   | 10 000 |
pub const MATERIAL_VALUE: [i32; PieceKind::COUNT] = [100, 300, 350, 500, 1000, 10_000];

/// Sum of piece values, White minus Black.
pub fn material(pos: &Position) -> i32 {
    PieceKind::ALL
        .into_iter()
        .map(|kind| {
            let white = pos.pieces_of(Color::White, kind).count() as i32;
            let black = pos.pieces_of(Color::Black, kind).count() as i32;
            MATERIAL_VALUE[kind.index()] * (white - black)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use gambit_core::Position;

    use super::material;

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(material(&Position::starting_position()), 0);
    }

    #[test]
    fn extra_queen_for_white() {
        let pos: Position = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        assert_eq!(material(&pos), 1000);
    }

    #[test]
    fn black_up_a_rook_and_pawn() {
        let pos: Position = "r3k3/p7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(material(&pos), -600);
    }
}
