//! Bitboard position: twelve piece sets, three occupancy sets, side to move,
//! castling rights, en passant target and the Zobrist hash.

use std::fmt;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist::{self, KEYS};

/// Index of the combined occupancy in [`Position`]'s occupancy array.
const BOTH: usize = 2;

/// A complete position.
///
/// The occupancy sets always equal the union of the piece sets they cover, and
/// `hash` always equals [`zobrist::compute_hash`] of the position.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pieces: [Bitboard; Piece::COUNT],
    occupancy: [Bitboard; 3],
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    hash: u64,
}

impl Position {
    /// A board with no pieces, white to move and no rights.
    pub(crate) fn empty() -> Position {
        let mut pos = Position {
            pieces: [Bitboard::EMPTY; Piece::COUNT],
            occupancy: [Bitboard::EMPTY; 3],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            hash: 0,
        };
        pos.hash = zobrist::compute_hash(&pos);
        pos
    }

    pub fn starting_position() -> Position {
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut pos = Position::empty();
        for (file, kind) in (0u8..).zip(back_rank) {
            for (color, home, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let (Some(piece_sq), Some(pawn_sq)) =
                    (Square::from_coords(home, file), Square::from_coords(pawns, file))
                {
                    pos.pieces[Piece::new(color, kind).index()].set(piece_sq);
                    pos.pieces[Piece::new(color, PieceKind::Pawn).index()].set(pawn_sq);
                }
            }
        }
        pos.castling = CastleRights::ALL;
        pos.refresh_occupancy();
        pos.hash = zobrist::compute_hash(&pos);
        pos
    }

    /// Build a position from raw parts and compute its hash.
    pub(crate) fn from_parts(
        pieces: [Bitboard; Piece::COUNT],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
    ) -> Position {
        let mut pos = Position {
            pieces,
            occupancy: [Bitboard::EMPTY; 3],
            side_to_move,
            castling,
            en_passant,
            hash: 0,
        };
        pos.refresh_occupancy();
        pos.hash = zobrist::compute_hash(&pos);
        pos
    }

    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// Pieces of `kind` belonging to `color`.
    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[Piece::new(color, kind).index()]
    }

    /// Every square occupied by `color`.
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    /// Every occupied square.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[BOTH]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Incrementally maintained Zobrist hash.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        if !self.occupied().contains(sq) {
            return None;
        }
        Piece::all().find(|&piece| self.pieces[piece.index()].contains(sq))
    }

    /// The king of `color`, or `None` on a board without one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color, PieceKind::King).lsb()
    }

    /// Is `sq` attacked by any piece of `by`?
    ///
    /// Works in reverse: a piece of `by` attacks `sq` exactly when the same kind
    /// of piece standing on `sq` would attack it.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let occupied = self.occupied();
        if (pawn_attacks(!by, sq) & self.pieces_of(by, PieceKind::Pawn)).is_nonempty() {
            return true;
        }
        if (knight_attacks(sq) & self.pieces_of(by, PieceKind::Knight)).is_nonempty() {
            return true;
        }
        if (king_attacks(sq) & self.pieces_of(by, PieceKind::King)).is_nonempty() {
            return true;
        }
        let queens = self.pieces_of(by, PieceKind::Queen);
        if (bishop_attacks(sq, occupied) & (self.pieces_of(by, PieceKind::Bishop) | queens))
            .is_nonempty()
        {
            return true;
        }
        (rook_attacks(sq, occupied) & (self.pieces_of(by, PieceKind::Rook) | queens)).is_nonempty()
    }

    /// Is the side to move in check?
    pub fn in_check(&self) -> bool {
        self.king_attacked(self.side_to_move)
    }

    /// Is the king of `color` attacked? A missing king counts as not attacked.
    pub(crate) fn king_attacked(&self, color: Color) -> bool {
        self.king_square(color).is_some_and(|king| self.is_square_attacked(king, !color))
    }

    /// Check the structural rules a loaded position must satisfy.
    pub fn validate(&self) -> Result<(), BoardError> {
        for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
            let count = self.pieces_of(color, PieceKind::King).count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color: name, count });
            }
        }

        let pawns = self.pieces(Piece::WHITE_PAWN) | self.pieces(Piece::BLACK_PAWN);
        if (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_nonempty() {
            return Err(BoardError::PawnsOnBackRank);
        }

        let total: u32 = self.pieces.iter().map(|bb| bb.count()).sum();
        if total != self.occupied().count() {
            return Err(BoardError::OverlappingPieces);
        }

        if self.king_attacked(!self.side_to_move) {
            return Err(BoardError::OpponentInCheck);
        }
        Ok(())
    }

    /// Board diagram for console output.
    pub fn pretty(&self) -> PrettyPosition<'_> {
        PrettyPosition(self)
    }

    #[inline]
    pub(crate) fn put_piece(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].set(sq);
        self.hash ^= KEYS.piece(piece, sq);
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].clear(sq);
        self.hash ^= KEYS.piece(piece, sq);
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= KEYS.en_passant(old);
        }
        if let Some(new) = sq {
            self.hash ^= KEYS.en_passant(new);
        }
        self.en_passant = sq;
    }

    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.hash ^= KEYS.castling(self.castling) ^ KEYS.castling(rights);
        self.castling = rights;
    }

    pub(crate) fn flip_side(&mut self) {
        self.side_to_move = !self.side_to_move;
        self.hash ^= KEYS.side();
    }

    /// Recompute the three occupancy sets from the piece sets.
    pub(crate) fn refresh_occupancy(&mut self) {
        let mut sides = [Bitboard::EMPTY; 2];
        for piece in Piece::all() {
            sides[piece.color().index()] |= self.pieces[piece.index()];
        }
        self.occupancy = [sides[0], sides[1], sides[0] | sides[1]];
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// An 8x8 text diagram of a position, rank 8 at the top.
pub struct PrettyPosition<'a>(&'a Position);

impl fmt::Display for PrettyPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.0;
        for rank in (0u8..8).rev() {
            write!(f, " {} ", rank + 1)?;
            for file in 0u8..8 {
                let c = Square::from_coords(rank, file)
                    .and_then(|sq| pos.piece_on(sq))
                    .map_or('.', |piece| piece.fen_char());
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f)?;
        writeln!(f, " side:      {}", pos.side_to_move)?;
        writeln!(f, " castling:  {}", pos.castling)?;
        match pos.en_passant {
            Some(sq) => writeln!(f, " enpassant: {sq}")?,
            None => writeln!(f, " enpassant: -")?,
        }
        write!(f, " hash:      {:016x}", pos.hash)
    }
}
