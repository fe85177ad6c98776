//! Error types for grid access and board persistence

use std::path::PathBuf;

/// Errors raised by checked grid access and by the board codec.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    /// A coordinate fell outside the grid.
    #[error("cell ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// The persisted board held fewer cells than the grid needs.
    #[error("truncated input: expected {expected} cells, found {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    /// Strict decoding met something other than '0' or '1'.
    #[error("invalid character {character:?} at position {index} (cell {x}, {y}); only '0' and '1' are allowed")]
    MalformedCharacter {
        character: char,
        index: usize,
        x: usize,
        y: usize,
    },

    /// A board file could not be opened, read or written.
    #[error("I/O failure on board file {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A board stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
