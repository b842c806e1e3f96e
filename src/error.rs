//! Error types for the oxlearn crate

use thiserror::Error;

/// Main error type for the oxlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: position {position} cannot be played on board {encoded}")]
    IllegalMove { position: usize, encoded: u16 },

    #[error("board encoding {encoded} is not a valid state")]
    InvalidState { encoded: u32 },

    #[error("board {encoded} is terminal and has no legal moves")]
    NoLegalMoves { encoded: u16 },

    #[error("cannot parse board '{input}': {reason}")]
    InvalidBoardString { input: String, reason: String },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("mapping {mapping:?} is not a permutation")]
    InvalidPermutation { mapping: Vec<usize> },

    #[error("permutation moves index {required} but the sequence has only {len} elements")]
    PermutationOutOfRange { required: usize, len: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("malformed value table entry '{key}': {reason}")]
    MalformedEntry { key: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_operation() {
        let err = Error::Io {
            operation: "write value table".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write value table: denied");
    }

    #[test]
    fn illegal_move_mentions_board() {
        let err = Error::IllegalMove {
            position: 4,
            encoded: 81,
        };
        assert!(err.to_string().contains("position 4"));
        assert!(err.to_string().contains("81"));
    }
}
