//! Pawn pushes, captures, promotions and en passant.

use crate::attacks::pawn_attacks;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

fn push_promotions(list: &mut MoveList, source: Square, target: Square, pawn: Piece, capture: bool) {
    for kind in PieceKind::PROMOTIONS {
        list.push(Move::promotion_move(source, target, pawn, kind, capture));
    }
}

pub(super) fn gen_pawns(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let pawn = Piece::new(us, PieceKind::Pawn);
    let occupied = pos.occupied();
    let enemies = pos.occupancy(!us);

    // (step, start rank, rank before promotion)
    let (step, start_rank, last_rank) = match us {
        Color::White => (8i8, 1u8, 6u8),
        Color::Black => (-8i8, 6u8, 1u8),
    };

    for source in pos.pieces(pawn) {
        let promotes = source.rank() == last_rank;

        let one = source.offset(step);
        if !occupied.contains(one) {
            if promotes {
                push_promotions(list, source, one, pawn, false);
            } else {
                list.push(Move::normal(source, one, pawn, false));
                let two = one.offset(step);
                if source.rank() == start_rank && !occupied.contains(two) {
                    list.push(Move::double_push(source, two, pawn));
                }
            }
        }

        let attacks = pawn_attacks(us, source);
        for target in attacks & enemies {
            if promotes {
                push_promotions(list, source, target, pawn, true);
            } else {
                list.push(Move::normal(source, target, pawn, true));
            }
        }

        if let Some(ep) = pos.en_passant() {
            if attacks.contains(ep) {
                list.push(Move::en_passant_move(source, ep, pawn));
            }
        }
    }
}
