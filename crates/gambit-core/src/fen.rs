//! FEN loading and printing for [`Position`].

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse the piece placement field into one bitboard per piece.
fn parse_placement(placement: &str) -> Result<[Bitboard; Piece::COUNT], FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::WrongRankCount { found: rows.len() });
    }

    let mut pieces = [Bitboard::EMPTY; Piece::COUNT];
    for (row, text) in rows.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0usize;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let sq = Square::from_coords(rank, file as u8)
                .ok_or(FenError::BadRankLength { rank: row, length: file + 1 })?;
            pieces[piece.index()].set(sq);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength { rank: row, length: file });
        }
    }
    Ok(pieces)
}

/// Drop castling rights whose king or rook has left its home square.
fn castling_on_board(pieces: &[Bitboard; Piece::COUNT], rights: CastleRights) -> CastleRights {
    let stands_on = |color, kind, rank, file| {
        Square::from_coords(rank, file).is_some_and(|sq| pieces[Piece::new(color, kind).index()].contains(sq))
    };

    let mut kept = CastleRights::NONE;
    for (color, rank) in [(Color::White, 0), (Color::Black, 7)] {
        if !stands_on(color, PieceKind::King, rank, 4) {
            continue;
        }
        for (flag, rook_file) in [(CastleRights::king_side(color), 7), (CastleRights::queen_side(color), 0)] {
            if rights.contains(flag) && stands_on(color, PieceKind::Rook, rank, rook_file) {
                kept = kept.with(flag);
            }
        }
    }
    kept
}

/// Keep an en-passant target only if an enemy pawn stands just past it and
/// both the target and that pawn's start square are empty.
fn en_passant_on_board(pieces: &[Bitboard; Piece::COUNT], side: Color, target: Square) -> Option<Square> {
    let (pushed_rank, start_rank) = match side {
        Color::White => (4, 6),
        Color::Black => (3, 1),
    };
    let pushed = Square::from_coords(pushed_rank, target.file())?;
    let start = Square::from_coords(start_rank, target.file())?;
    let occupied = pieces.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
    let pawn = Piece::new(!side, PieceKind::Pawn);
    let consistent =
        pieces[pawn.index()].contains(pushed) && !occupied.contains(target) && !occupied.contains(start);
    consistent.then_some(target)
}

impl Position {
    /// Load a position from the four position-bearing FEN fields and check it.
    pub fn from_fields(
        placement: &str,
        side: &str,
        castling: &str,
        en_passant: &str,
    ) -> Result<Position, FenError> {
        let pieces = parse_placement(placement)?;
        let side = Color::from_fen(side).ok_or_else(|| FenError::InvalidColor { found: side.to_string() })?;
        let castling = castling_on_board(&pieces, CastleRights::from_fen(castling)?);
        let en_passant = match en_passant {
            "-" => None,
            text => {
                let target_rank = match side {
                    Color::White => 5,
                    Color::Black => 2,
                };
                let sq = Square::from_algebraic(text)
                    .filter(|sq| sq.rank() == target_rank)
                    .ok_or_else(|| FenError::InvalidEnPassant { found: text.to_string() })?;
                en_passant_on_board(&pieces, side, sq)
            }
        };

        let pos = Position::from_parts(pieces, side, castling, en_passant);
        pos.validate()?;
        Ok(pos)
    }
}

/// Accepts standard six-field FEN. The move counters are optional and ignored.
impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        match fields[..] {
            [placement, side, castling, en_passant, ..] if fields.len() <= 6 => {
                Position::from_fields(placement, side, castling, en_passant)
            }
            _ => Err(FenError::WrongFieldCount { found: fields.len() }),
        }
    }
}

/// Six-field FEN with the counters fixed at `0 1`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut gap = 0;
            for file in 0u8..8 {
                match Square::from_coords(rank, file).and_then(|sq| self.piece_on(sq)) {
                    Some(piece) => {
                        if gap > 0 {
                            write!(f, "{gap}")?;
                            gap = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                write!(f, "{gap}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }
        write!(f, " {} {} ", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        f.write_str(" 0 1")
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::castle_rights::CastleRights;
    use crate::color::Color;
    use crate::error::{BoardError, FenError};
    use crate::piece::Piece;
    use crate::position::Position;
    use crate::square::Square;
    use crate::zobrist::compute_hash;

    #[test]
    fn starting_fen_matches_constructor() {
        let parsed: Position = STARTING_FEN.parse().unwrap();
        assert_eq!(parsed, Position::starting_position());
        assert_eq!(parsed.to_string(), STARTING_FEN);
    }

    #[test]
    fn four_field_fen_is_accepted() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K3 b -  -".parse().unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
    }

    #[test]
    fn en_passant_and_castling_fields() {
        let pos: Position = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3".parse().unwrap();
        assert_eq!(pos.en_passant(), Some(Square::D6));
        assert_eq!(pos.castling().to_string(), "Kq");
        assert_eq!(pos.piece_on(Square::E5), Some(Piece::WHITE_PAWN));
        assert_eq!(pos.to_string(), "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 1");
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(
            "8/8/8 w - -".parse::<Position>(),
            Err(FenError::WrongRankCount { found: 3 })
        );
        assert_eq!("".parse::<Position>(), Err(FenError::WrongFieldCount { found: 0 }));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra".parse::<Position>(),
            Err(FenError::WrongFieldCount { found: 7 })
        ));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1".parse::<Position>(),
            Err(FenError::BadRankLength { rank: 7, length: 7 })
        ));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K3X w - - 0 1".parse::<Position>(),
            Err(FenError::InvalidPieceChar { character: 'X' })
        ));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1".parse::<Position>(),
            Err(FenError::InvalidColor { .. })
        ));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K3 w - e4 0 1".parse::<Position>(),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/8 w - - 0 1".parse::<Position>(),
            Err(FenError::InvalidBoard(BoardError::InvalidKingCount { .. }))
        ));
    }

    #[test]
    fn castling_rights_need_king_and_rook_at_home() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1".parse().unwrap();
        assert_eq!(pos.castling(), CastleRights::NONE);

        let pos: Position = "r3k3/8/8/8/8/8/8/4K2R w KQkq - 0 1".parse().unwrap();
        assert_eq!(pos.castling().to_string(), "Kq");

        // King off its home square keeps neither side.
        let pos: Position = "r3k2r/8/8/8/8/8/8/R2K3R w KQkq - 0 1".parse().unwrap();
        assert_eq!(pos.castling().to_string(), "kq");

        // A rook of the wrong colour does not count.
        let pos: Position = "4k3/8/8/8/8/8/8/4K2r w K - 0 1".parse().unwrap();
        assert_eq!(pos.castling(), CastleRights::NONE);
        assert_eq!(pos.hash(), compute_hash(&pos));
    }

    #[test]
    fn en_passant_must_match_the_side_to_move() {
        assert!(matches!(
            "4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1".parse::<Position>(),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            "4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1".parse::<Position>(),
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn en_passant_without_a_pushed_pawn_is_dropped() {
        let pos: Position = "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.hash(), compute_hash(&pos));

        // The pawn cannot have come from d7 if d7 is occupied.
        let pos: Position = "4k3/3p4/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        assert_eq!(pos.en_passant(), None);

        let pos: Position = "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1".parse().unwrap();
        assert_eq!(pos.en_passant(), Some(Square::E3));
    }
}
