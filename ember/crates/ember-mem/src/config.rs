//! Configuration Module - Pool Allocator Parameters
//!
//! Pool geometry and diagnostics switches for [`PoolAllocator`].
//!
//! [`PoolAllocator`]: crate::pool::PoolAllocator

use serde::{Deserialize, Serialize};

use crate::cpointer::CompressedPointer;

/// Largest accepted number of cells per pool
pub const MAX_CELLS_PER_POOL: usize = 256;

/// Default number of cells per pool
pub const DEFAULT_CELLS_PER_POOL: usize = 8;

/// Configuration for a [`PoolAllocator`](crate::pool::PoolAllocator)
///
/// # Examples
///
/// ```rust
/// use ember_mem::PoolConfig;
///
/// let config = PoolConfig {
///     cells_per_pool: 16,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Cells carved out of each pool
    ///
    /// Must be a power of two in `1..=256`. Larger pools mean fewer pool
    /// headers but coarser release by `collect_empty`.
    ///
    /// Default: 8
    pub cells_per_pool: usize,

    /// Emit pool lifecycle events to the global [`MemLogger`]
    ///
    /// Default: false
    ///
    /// [`MemLogger`]: crate::logging::MemLogger
    pub verbose: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            cells_per_pool: DEFAULT_CELLS_PER_POOL,
            verbose: false,
        }
    }
}

impl PoolConfig {
    /// Validate configuration
    ///
    /// # Returns
    /// `Ok(())` if valid, `Err(ConfigError)` otherwise
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cells_per_pool == 0 {
            return Err(ConfigError::InvalidCellsPerPool(
                "must be > 0".to_string(),
            ));
        }

        if !self.cells_per_pool.is_power_of_two() {
            return Err(ConfigError::InvalidCellsPerPool(format!(
                "{} is not a power of two",
                self.cells_per_pool
            )));
        }

        if self.cells_per_pool > MAX_CELLS_PER_POOL {
            return Err(ConfigError::InvalidCellsPerPool(format!(
                "{} exceeds {}",
                self.cells_per_pool, MAX_CELLS_PER_POOL
            )));
        }

        // At least one whole pool must be addressable
        if self.cells_per_pool > CompressedPointer::MAX_CELLS {
            return Err(ConfigError::InvalidCellsPerPool(format!(
                "{} exceeds the {} addressable cells",
                self.cells_per_pool,
                CompressedPointer::MAX_CELLS
            )));
        }

        Ok(())
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `EMBER_POOL_CELLS`: cells per pool
    /// - `EMBER_POOL_VERBOSE`: `1` or `true` to log pool events
    ///
    /// Unparseable values are ignored. The result is not validated.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("EMBER_POOL_CELLS") {
            if let Ok(cells) = val.parse::<usize>() {
                config.cells_per_pool = cells;
            }
        }

        if let Ok(val) = std::env::var("EMBER_POOL_VERBOSE") {
            config.verbose = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config
    }

    /// Number of whole pools the compressed pointer width can address
    pub fn max_pools(&self) -> usize {
        CompressedPointer::MAX_CELLS / self.cells_per_pool
    }
}

/// Error types for configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid cells_per_pool: {0}")]
    InvalidCellsPerPool(String),
}
