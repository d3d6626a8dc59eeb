//! Chess rules on bitboards: position state, attack tables, move encoding,
//! pseudo-legal move generation and make/unmake.

mod attacks;
mod bitboard;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod square;
mod zobrist;

pub use attacks::{
    bishop_attacks, init, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
pub use bitboard::Bitboard;
pub use castle_rights::CastleRights;
pub use chess_move::{Move, MoveRecord};
pub use color::Color;
pub use error::{BoardError, FenError};
pub use fen::STARTING_FEN;
pub use make_move::{MoveMode, Snapshot};
pub use movegen::{MAX_MOVES, MoveList, find_uci_move, generate_moves, legal_moves};
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::{Position, PrettyPosition};
pub use square::Square;
pub use zobrist::compute_hash;
