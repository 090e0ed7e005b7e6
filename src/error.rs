//! Error types for the maze race crate

use thiserror::Error;

use crate::types::Position;

/// Main error type for the maze race crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid maze size {size}: must be at least {min}")]
    InvalidMazeSize { size: usize, min: usize },

    #[error("position {position} is out of bounds for a {size}x{size} maze")]
    OutOfBounds { position: Position, size: usize },

    #[error("start {position} lies on the border of a {size}x{size} maze; carving needs an interior cell")]
    StartOnBorder { position: Position, size: usize },

    #[error("goal {goal} is unreachable from {start} after generation")]
    UnreachableGoal { start: Position, goal: Position },

    #[error("layout is not square: row {row} has {got} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("invalid character '{character}' at row {row}, column {column} in layout")]
    InvalidLayoutCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("layout cell {position} must be a path")]
    BlockedLayoutCell { position: Position },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    #[error("episode {episode} did not finish within {limit} ticks")]
    TickLimitExceeded { episode: usize, limit: usize },

    #[error("invalid difficulty '{input}'. Expected one of: {expected}")]
    ParseDifficulty { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
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
