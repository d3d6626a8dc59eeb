//! UCI protocol handling for gambit.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, parse_command};
pub use engine::{EngineConfig, UciEngine};
pub use error::UciError;
