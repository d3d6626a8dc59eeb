//! UCI protocol errors.

use gambit_core::FenError;

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// `position fen` was not followed by four to six FEN fields.
    #[error("wrong number of FEN fields: {fen:?}")]
    FenFieldCount {
        /// The fields that were given.
        fen: String,
    },

    /// The FEN fields were present but did not describe a valid position.
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),

    /// A move in the `position` command matched no legal move.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The UCI move string that failed to apply.
        uci_move: String,
    },

    /// A `go` parameter was given without its value.
    #[error("missing value for go parameter {param}")]
    MissingGoValue {
        /// The parameter name.
        param: String,
    },

    /// A `go` parameter value could not be parsed.
    #[error("invalid value {value:?} for go parameter {param}")]
    InvalidGoValue {
        /// The parameter name.
        param: String,
        /// The offending value.
        value: String,
    },

    /// `setoption` without a `name ... value ...` pair.
    #[error("malformed setoption command")]
    MalformedOption,

    /// `setoption` for an option this engine does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as given.
        name: String,
    },

    /// `setoption` with a value the option does not accept.
    #[error("invalid value {value:?} for option {name}")]
    InvalidOptionValue {
        /// The option name.
        name: String,
        /// The offending value.
        value: String,
    },

    /// An I/O error occurred while reading from stdin.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
