//! Error Module - Memory Error Types
//!
//! Defines all error types used in ember-mem.
//!
//! # Error Categories
//!
//! ## Memory Errors
//! - `OutOfMemory` - The heap refused a new pool
//! - `ArenaExhausted` - No cell id left that a compressed pointer can address
//!
//! ## Caller Errors
//! - `InvalidCell` - Cell id not live in this allocator
//! - `Configuration` - Invalid configuration

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for ember-mem operations
///
/// The infallible entry points (`PoolAllocator::alloc`) turn the memory
/// errors into process termination; the `try_*` variants hand them back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemError {
    /// The underlying heap could not supply a new pool
    #[error("Out of memory: requested {requested} bytes for a new pool")]
    OutOfMemory { requested: usize },

    /// Every cell id addressable by a compressed pointer is taken
    #[error("Arena exhausted: {cells} cells allocated, compressed pointers address at most {max}")]
    ArenaExhausted { cells: usize, max: usize },

    /// Cell id is not a live cell of this allocator
    ///
    /// Indicates a stale handle or a double free.
    #[error("Invalid cell: {cell} is not a live cell")]
    InvalidCell { cell: u32 },

    /// Invalid allocator configuration
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl MemError {
    /// Whether freeing memory (`collect_empty`) could make a retry succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MemError::OutOfMemory { .. })
    }

    /// Check if this error indicates a bug in the calling code
    pub fn is_bug(&self) -> bool {
        matches!(self, MemError::InvalidCell { .. })
    }
}

/// Result type alias for ember-mem operations
pub type Result<T> = std::result::Result<T, MemError>;
