//! Errors raised while loading positions.

/// A FEN string that cannot be turned into a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// `rank` is counted from the top of the FEN string (0 is the eighth rank).
    #[error("rank {rank} describes {length} squares, expected 8")]
    BadRankLength { rank: usize, length: usize },
    #[error("invalid piece character '{character}'")]
    InvalidPieceChar { character: char },
    #[error("invalid side to move \"{found}\"")]
    InvalidColor { found: String },
    #[error("invalid castling character '{character}'")]
    InvalidCastlingChar { character: char },
    #[error("invalid en passant square \"{found}\"")]
    InvalidEnPassant { found: String },
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}

/// Structural problems found by [`Position::validate`](crate::Position::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected exactly one {color} king, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },
    #[error("pawns found on the first or eighth rank")]
    PawnsOnBackRank,
    #[error("two pieces claim the same square")]
    OverlappingPieces,
    #[error("side to move can capture the opposing king")]
    OpponentInCheck,
}
