//! Error types for ember-lit.
//!
//! Only store setup is fallible. Misuse of a running store (stale handle,
//! wrong-variant accessor, use outside the active state) is a bug in the
//! caller and panics.

use thiserror::Error;

use ember_mem::{ConfigError, MemError};
use ember_util::MagicTableError;

use crate::storage::StoreState;

#[derive(Debug, Error)]
pub enum LiteralError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Memory error: {0}")]
    Mem(#[from] MemError),

    #[error("Magic string table error: {0}")]
    MagicTable(#[from] MagicTableError),

    #[error("Literal store is {actual}, expected {expected}")]
    InvalidState {
        expected: StoreState,
        actual: StoreState,
    },
}

pub type Result<T> = std::result::Result<T, LiteralError>;
