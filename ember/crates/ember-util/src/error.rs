//! Core error types for ember-util crate

use thiserror::Error;

/// Error type for magic string table construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MagicTableError {
    /// More entries than the id type can address
    #[error("Magic string table too large: {count} entries, at most {max} supported")]
    TooManyEntries { count: usize, max: usize },

    /// An entry longer than a literal may be
    #[error("Magic string {id} is {size} bytes, at most {max} supported")]
    EntryTooLong { id: usize, size: usize, max: usize },
}

/// Error type for index vector operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexVecError {
    /// Index out of bounds
    #[error("Index out of bounds: index {index}, length {length}")]
    OutOfBounds { index: usize, length: usize },
}

/// Result type alias for magic table operations
pub type MagicTableResult<T> = std::result::Result<T, MagicTableError>;

/// Result type alias for index vector operations
pub type IndexVecResult<T> = std::result::Result<T, IndexVecError>;
