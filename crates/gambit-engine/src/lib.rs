//! Search and evaluation for gambit.

pub mod engine;
pub mod eval;
pub mod search;
pub mod time;

pub use engine::Engine;
pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::{IterationInfo, SearchResult, SearchScore};
pub use time::SearchLimits;
