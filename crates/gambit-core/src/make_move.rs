//! In-place move application with snapshot-based undo.
//!
//! `make_move` applies a pseudo-legal move, updating the hash incrementally,
//! then rejects it if the mover's king is left attacked. The returned
//! [`Snapshot`] restores the exact prior state.

use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Castling rights that survive a move touching each square, as a bitmask.
/// A king leaving its home square drops both of its rights; a rook square
/// being left or captured on drops that corner's right.
#[rustfmt::skip]
const CASTLING_KEEP: [u8; 64] = [
    13, 15, 15, 15, 12, 15, 15, 14,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
     7, 15, 15, 15,  3, 15, 15, 11,
];

/// Which moves `make_move` should accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    AllMoves,
    /// Quiet moves are refused without touching the position.
    CapturesOnly,
}

/// Saved state for [`Position::unmake_move`].
#[derive(Clone, Copy)]
#[must_use = "a snapshot is the only way to undo the move"]
pub struct Snapshot(Position);

/// Rook source and destination for a castling king landing on `king_target`.
fn castling_rook(king_target: Square) -> Option<(Square, Square)> {
    match king_target {
        Square::G1 => Some((Square::H1, Square::F1)),
        Square::C1 => Some((Square::A1, Square::D1)),
        Square::G8 => Some((Square::H8, Square::F8)),
        Square::C8 => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

impl Position {
    /// Apply `mv` for the side to move.
    ///
    /// Returns `None`, with the position unchanged, if the move is quiet under
    /// [`MoveMode::CapturesOnly`] or leaves the mover's own king attacked.
    pub fn make_move(&mut self, mv: Move, mode: MoveMode) -> Option<Snapshot> {
        if mode == MoveMode::CapturesOnly && !mv.is_capture() {
            return None;
        }

        let snapshot = Snapshot(*self);
        let us = self.side_to_move();
        let them = !us;
        let source = mv.source();
        let target = mv.target();
        let piece = mv.piece();

        self.remove_piece(piece, source);

        if mv.is_capture() && !mv.is_en_passant() {
            let victim = Piece::all()
                .filter(|p| p.color() == them)
                .find(|&p| self.pieces(p).contains(target));
            if let Some(victim) = victim {
                self.remove_piece(victim, target);
            }
        }

        match mv.promotion() {
            Some(kind) => self.put_piece(Piece::new(us, kind), target),
            None => self.put_piece(piece, target),
        }

        if mv.is_en_passant() {
            let captured = match us {
                Color::White => target.offset(-8),
                Color::Black => target.offset(8),
            };
            self.remove_piece(Piece::new(them, PieceKind::Pawn), captured);
        }

        let en_passant = if mv.is_double_push() {
            Some(match us {
                Color::White => target.offset(-8),
                Color::Black => target.offset(8),
            })
        } else {
            None
        };
        self.set_en_passant(en_passant);

        if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook(target) {
                let rook = Piece::new(us, PieceKind::Rook);
                self.remove_piece(rook, rook_from);
                self.put_piece(rook, rook_to);
            }
        }

        let keep = CASTLING_KEEP[source.index()] & CASTLING_KEEP[target.index()];
        self.set_castling(self.castling().retain(keep));

        self.refresh_occupancy();
        self.flip_side();

        if self.king_attacked(us) {
            *self = snapshot.0;
            return None;
        }
        Some(snapshot)
    }

    /// Restore the position saved by the matching `make_move` or `make_null_move`.
    pub fn unmake_move(&mut self, snapshot: Snapshot) {
        *self = snapshot.0;
    }

    /// Pass the turn: flip the side to move and clear the en passant target.
    pub fn make_null_move(&mut self) -> Snapshot {
        let snapshot = Snapshot(*self);
        self.set_en_passant(None);
        self.flip_side();
        snapshot
    }
}
