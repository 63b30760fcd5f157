//! Configuration Module - Literal Store Parameters

use serde::{Deserialize, Serialize};

use ember_mem::{ConfigError, PoolConfig};

/// Configuration for a [`LiteralStorage`](crate::LiteralStorage)
///
/// # Examples
///
/// ```rust
/// use ember_lit::StoreConfig;
/// use ember_mem::PoolConfig;
///
/// let config = StoreConfig {
///     pool: PoolConfig { cells_per_pool: 32, ..Default::default() },
///     dump_on_finalize: true,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Geometry of the pools holding literal records
    pub pool: PoolConfig,

    /// Log a listing of all literals when the store is finalized
    ///
    /// Only effective with the `dump` feature.
    ///
    /// Default: false
    pub dump_on_finalize: bool,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pool.validate()
    }

    /// Create configuration from environment variables
    ///
    /// Reads the [`PoolConfig::from_env`] variables and `EMBER_LIT_DUMP`
    /// (`1` or `true` to dump on finalize).
    pub fn from_env() -> Self {
        let mut config = Self {
            pool: PoolConfig::from_env(),
            ..Default::default()
        };

        if let Ok(val) = std::env::var("EMBER_LIT_DUMP") {
            config.dump_on_finalize = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config
    }
}
