//! Static evaluation: material plus piece-square tables.

pub mod material;
pub mod pst;

use gambit_core::{Color, Position};

use self::material::material;
use self::pst::pst;

/// Evaluate `pos` in centipawns from the side to move's point of view.
pub fn evaluate(pos: &Position) -> i32 {
    let score = material(pos) + pst(pos);
    match pos.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}
