//! # ember-mem - Pool allocation for runtime records
//!
//! Small, fixed-size runtime records (literals and friends) live in cells
//! handed out by a [`PoolAllocator`] and refer to each other through 16-bit
//! [`CompressedPointer`]s instead of machine pointers.
//!
//! ## Quick Start
//!
//! ```rust
//! use ember_mem::{CompressedPointer, PoolAllocator, PoolConfig};
//!
//! fn main() -> Result<(), ember_mem::MemError> {
//!     let mut pools: PoolAllocator<&str> = PoolAllocator::new(PoolConfig::default())?;
//!
//!     let cell = pools.alloc("length");
//!     let cp = CompressedPointer::compress(cell);
//!     assert_eq!(cp.decompress(), Some(cell));
//!     assert_eq!(pools.get(cell), Some(&"length"));
//!
//!     pools.free(cell);
//!     assert_eq!(pools.collect_empty(), 1);
//!     assert_eq!(pools.finalize(), 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Record owners                    │
//! │   hold CellId / CompressedPointer handles     │
//! └──────────────────────┬───────────────────────┘
//!                        │ alloc / free / get
//! ┌──────────────────────▼───────────────────────┐
//! │              PoolAllocator<T>                 │
//! │  ┌────────┐ ┌────────┐ ┌────────┐            │
//! │  │ pool 0 │ │ pool 1 │ │ pool 2 │  ...       │
//! │  └────────┘ └────────┘ └────────┘            │
//! │  free list (LIFO)     PoolStats counters      │
//! └──────────────────────┬───────────────────────┘
//!                        │ MemEvent
//! ┌──────────────────────▼───────────────────────┐
//! │      MemLogger (global)  /  `log` facade      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//!
//! [`PoolConfig`] can be built in code or read from `EMBER_POOL_CELLS` and
//! `EMBER_POOL_VERBOSE` with [`PoolConfig::from_env`].

pub mod config;
pub mod cpointer;
pub mod error;
pub mod logging;
pub mod pool;

pub use config::{ConfigError, PoolConfig};
pub use cpointer::{CellId, CompressedPointer};
pub use error::{MemError, Result};
pub use logging::{MemEvent, MemLogger, MemLoggerConfig};
pub use pool::{PoolAllocator, PoolId, PoolStats};
