//! Moves packed into a `u32`.
//!
//! ```text
//! bits  0-5   source square
//! bits  6-11  target square
//! bits 12-15  moving piece (colour-aware index 0..12)
//! bits 16-19  promotion kind (0 = none)
//! bit  20     capture
//! bit  21     double pawn push
//! bit  22     en passant
//! bit  23     castling
//! ```

use std::fmt;

use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const SOURCE_SHIFT: u32 = 0;
const TARGET_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMOTION_SHIFT: u32 = 16;
const SQUARE_MASK: u32 = 0x3F;
const NIBBLE_MASK: u32 = 0xF;

const CAPTURE_FLAG: u32 = 1 << 20;
const DOUBLE_PUSH_FLAG: u32 = 1 << 21;
const EN_PASSANT_FLAG: u32 = 1 << 22;
const CASTLING_FLAG: u32 = 1 << 23;

/// The unpacked fields of a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub source: Square,
    pub target: Square,
    pub piece: Piece,
    pub promotion: Option<PieceKind>,
    pub capture: bool,
    pub double_push: bool,
    pub en_passant: bool,
    pub castling: bool,
}

/// A move as produced by the generator. Encoding does no legality checking.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u32);

impl Move {
    /// Empty slot marker for killer and PV tables. Never generated.
    pub const NULL: Move = Move(0);

    /// Pack a record into a move.
    pub const fn encode(record: MoveRecord) -> Move {
        let promotion = match record.promotion {
            Some(kind) => kind as u32,
            None => 0,
        };
        let mut bits = (record.source.index() as u32) << SOURCE_SHIFT
            | (record.target.index() as u32) << TARGET_SHIFT
            | (record.piece.index() as u32) << PIECE_SHIFT
            | promotion << PROMOTION_SHIFT;
        if record.capture {
            bits |= CAPTURE_FLAG;
        }
        if record.double_push {
            bits |= DOUBLE_PUSH_FLAG;
        }
        if record.en_passant {
            bits |= EN_PASSANT_FLAG;
        }
        if record.castling {
            bits |= CASTLING_FLAG;
        }
        Move(bits)
    }

    /// Unpack every field.
    pub fn decode(self) -> MoveRecord {
        MoveRecord {
            source: self.source(),
            target: self.target(),
            piece: self.piece(),
            promotion: self.promotion(),
            capture: self.is_capture(),
            double_push: self.is_double_push(),
            en_passant: self.is_en_passant(),
            castling: self.is_castling(),
        }
    }

    /// A plain move or capture.
    pub const fn normal(source: Square, target: Square, piece: Piece, capture: bool) -> Move {
        Move::encode(MoveRecord {
            source,
            target,
            piece,
            promotion: None,
            capture,
            double_push: false,
            en_passant: false,
            castling: false,
        })
    }

    pub const fn promotion_move(
        source: Square,
        target: Square,
        piece: Piece,
        promotion: PieceKind,
        capture: bool,
    ) -> Move {
        Move::encode(MoveRecord {
            source,
            target,
            piece,
            promotion: Some(promotion),
            capture,
            double_push: false,
            en_passant: false,
            castling: false,
        })
    }

    pub const fn double_push(source: Square, target: Square, piece: Piece) -> Move {
        Move::encode(MoveRecord {
            source,
            target,
            piece,
            promotion: None,
            capture: false,
            double_push: true,
            en_passant: false,
            castling: false,
        })
    }

    /// En passant always counts as a capture.
    pub const fn en_passant_move(source: Square, target: Square, piece: Piece) -> Move {
        Move::encode(MoveRecord {
            source,
            target,
            piece,
            promotion: None,
            capture: true,
            double_push: false,
            en_passant: true,
            castling: false,
        })
    }

    /// Castling is encoded as the king's own move.
    pub const fn castle(source: Square, target: Square, king: Piece) -> Move {
        Move::encode(MoveRecord {
            source,
            target,
            piece: king,
            promotion: None,
            capture: false,
            double_push: false,
            en_passant: false,
            castling: true,
        })
    }

    #[inline]
    pub const fn source(self) -> Square {
        Square::from_index_unchecked((self.0 >> SOURCE_SHIFT & SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn target(self) -> Square {
        Square::from_index_unchecked((self.0 >> TARGET_SHIFT & SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn piece(self) -> Piece {
        match Piece::from_index((self.0 >> PIECE_SHIFT & NIBBLE_MASK) as usize) {
            Some(piece) => piece,
            None => Piece::WHITE_PAWN,
        }
    }

    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match (self.0 >> PROMOTION_SHIFT & NIBBLE_MASK) as usize {
            0 => None,
            n => PieceKind::from_index(n),
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_FLAG != 0
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.0 & DOUBLE_PUSH_FLAG != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.0 & EN_PASSANT_FLAG != 0
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        self.0 & CASTLING_FLAG != 0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// UCI long algebraic notation: `e2e4`, `e7e8q`, `0000` for the null move.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.source(), self.target())?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {:?}", self.piece())?;
        for (set, name) in [
            (self.is_capture(), "x"),
            (self.is_double_push(), "dbl"),
            (self.is_en_passant(), "ep"),
            (self.is_castling(), "castle"),
        ] {
            if set {
                write!(f, " {name}")?;
            }
        }
        f.write_str(")")
    }
}
