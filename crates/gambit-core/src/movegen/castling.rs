//! Castling: right held, path empty, king's start and pass-through squares safe.
//!
//! The landing square is left to the legality check in `make_move`.

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

struct CastlePath {
    right: CastleRights,
    king_from: Square,
    king_to: Square,
    /// Squares between king and rook that must be empty.
    empty: Bitboard,
    /// Square the king crosses.
    crossed: Square,
}

const fn squares(list: &[Square]) -> Bitboard {
    let mut bits = 0u64;
    let mut i = 0;
    while i < list.len() {
        bits |= list[i].bit();
        i += 1;
    }
    Bitboard::new(bits)
}

const WHITE_PATHS: [CastlePath; 2] = [
    CastlePath {
        right: CastleRights::WHITE_KING,
        king_from: Square::E1,
        king_to: Square::G1,
        empty: squares(&[Square::F1, Square::G1]),
        crossed: Square::F1,
    },
    CastlePath {
        right: CastleRights::WHITE_QUEEN,
        king_from: Square::E1,
        king_to: Square::C1,
        empty: squares(&[Square::B1, Square::C1, Square::D1]),
        crossed: Square::D1,
    },
];

const BLACK_PATHS: [CastlePath; 2] = [
    CastlePath {
        right: CastleRights::BLACK_KING,
        king_from: Square::E8,
        king_to: Square::G8,
        empty: squares(&[Square::F8, Square::G8]),
        crossed: Square::F8,
    },
    CastlePath {
        right: CastleRights::BLACK_QUEEN,
        king_from: Square::E8,
        king_to: Square::C8,
        empty: squares(&[Square::B8, Square::C8, Square::D8]),
        crossed: Square::D8,
    },
];

pub(super) fn gen_castling(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let king = Piece::new(us, PieceKind::King);
    let paths = match us {
        Color::White => &WHITE_PATHS,
        Color::Black => &BLACK_PATHS,
    };

    for path in paths {
        if !pos.castling().contains(path.right)
            || !pos.pieces(king).contains(path.king_from)
            || (pos.occupied() & path.empty).is_nonempty()
        {
            continue;
        }
        if pos.is_square_attacked(path.king_from, !us) || pos.is_square_attacked(path.crossed, !us) {
            continue;
        }
        list.push(Move::castle(path.king_from, path.king_to, king));
    }
}

#[cfg(test)]
mod tests {
    use crate::movegen::{MoveList, generate_moves};
    use crate::position::Position;

    fn castles(fen: &str) -> Vec<String> {
        let pos: Position = fen.parse().unwrap();
        let mut list = MoveList::new();
        generate_moves(&pos, &mut list);
        list.iter().filter(|mv| mv.is_castling()).map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn both_sides_when_clear() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), ["e1g1", "e1c1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), ["e8g8", "e8c8"]);
    }

    #[test]
    fn blocked_or_unrighted_paths_are_skipped() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/RN2K2R w Kkq - 0 1"), ["e1g1"]);
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K1NR w KQkq - 0 1") == ["e1c1"]);
    }

    #[test]
    fn rights_without_a_rook_do_not_castle() {
        assert!(castles("4k3/8/8/8/8/8/8/4K3 w K - 0 1").is_empty());
        assert_eq!(castles("r3k3/8/8/8/8/8/8/4K3 b kq - 0 1"), ["e8c8"]);
    }

    #[test]
    fn attacked_start_or_crossing_square_forbids_castling() {
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2r w KQq - 0 1").is_empty());
        assert_eq!(castles("r3k2r/8/8/8/8/8/5r2/R3K2R w KQ - 0 1"), ["e1c1"]);
        // b1 attacked does not matter for the long castle
        assert_eq!(castles("r3k2r/8/8/8/8/8/1r6/R3K2R w Q - 0 1"), ["e1c1"]);
    }
}
