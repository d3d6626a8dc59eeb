//! Knight, bishop, rook, queen and king steps, split into quiet moves and captures.

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::chess_move::Move;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

const KINDS: [PieceKind; 5] =
    [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen, PieceKind::King];

fn targets(kind: PieceKind, sq: Square, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupied),
        PieceKind::Rook => rook_attacks(sq, occupied),
        PieceKind::Queen => queen_attacks(sq, occupied),
        PieceKind::King => king_attacks(sq),
        PieceKind::Pawn => Bitboard::EMPTY,
    }
}

pub(super) fn gen_pieces(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let own = pos.occupancy(us);
    let enemies = pos.occupancy(!us);
    let occupied = pos.occupied();

    for kind in KINDS {
        let piece = Piece::new(us, kind);
        for source in pos.pieces(piece) {
            let reachable = targets(kind, source, occupied) & !own;
            for target in reachable {
                list.push(Move::normal(source, target, piece, enemies.contains(target)));
            }
        }
    }
}
