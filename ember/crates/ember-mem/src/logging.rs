//! Pool Logging and Tracing
//!
//! Structured events for pool lifecycle, useful for:
//! - Memory footprint analysis
//! - Debugging leaks at teardown
//!
//! Log Levels:
//! - ERROR: Allocation failures
//! - INFO: Finalization, statistics
//! - DEBUG: Pool allocation and release, empty-pool collection
//!
//! Every event also goes through the `log` facade, so an application that
//! installs a logger sees pool activity without touching [`MemLogger`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use serde::Serialize;

use crate::pool::PoolStats;

/// Log level for pool events
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Pool event types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MemEvent {
    /// A new pool was carved out of the heap
    PoolAllocated {
        pool: u32,
        cells: usize,
        pools_count: usize,
    },

    /// An empty pool was handed back to the heap
    PoolReleased { pool: u32, pools_count: usize },

    /// `collect_empty` finished
    CollectEmpty { released: usize, pools_count: usize },

    /// Allocator torn down
    Finalize {
        outstanding_cells: usize,
        pools_released: usize,
    },

    /// The heap refused a new pool
    AllocationFailure { requested: usize, pools_count: usize },

    /// Statistics snapshot
    Stats(PoolStats),
}

impl MemEvent {
    /// Severity of this event
    pub fn level(&self) -> LogLevel {
        match self {
            MemEvent::AllocationFailure { .. } => LogLevel::Error,
            MemEvent::Finalize {
                outstanding_cells, ..
            } if *outstanding_cells > 0 => LogLevel::Warn,
            MemEvent::Finalize { .. } | MemEvent::Stats(_) => LogLevel::Info,
            MemEvent::PoolAllocated { .. }
            | MemEvent::PoolReleased { .. }
            | MemEvent::CollectEmpty { .. } => LogLevel::Debug,
        }
    }
}

impl std::fmt::Display for MemEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemEvent::PoolAllocated {
                pool,
                cells,
                pools_count,
            } => write!(
                f,
                "[MEM] Pool {} allocated ({} cells, {} pools live)",
                pool, cells, pools_count
            ),
            MemEvent::PoolReleased { pool, pools_count } => {
                write!(f, "[MEM] Pool {} released ({} pools live)", pool, pools_count)
            },
            MemEvent::CollectEmpty {
                released,
                pools_count,
            } => write!(
                f,
                "[MEM] Collected {} empty pools ({} pools live)",
                released, pools_count
            ),
            MemEvent::Finalize {
                outstanding_cells,
                pools_released,
            } => write!(
                f,
                "[MEM] Finalized: {} pools released, {} cells outstanding",
                pools_released, outstanding_cells
            ),
            MemEvent::AllocationFailure {
                requested,
                pools_count,
            } => write!(
                f,
                "[MEM] Allocation failure: {} bytes ({} pools live)",
                requested, pools_count
            ),
            MemEvent::Stats(stats) => write!(f, "[MEM] {}", stats),
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct MemLoggerConfig {
    /// Minimum log level
    pub level: LogLevel,

    /// Forward events to the `log` facade
    pub console: bool,

    /// Enable JSON format
    pub json: bool,

    /// Enable timestamps
    pub timestamps: bool,
}

impl Default for MemLoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: true,
            json: false,
            timestamps: true,
        }
    }
}

/// Mem Logger - centralized record of pool events
pub struct MemLogger {
    config: MemLoggerConfig,
    events: Mutex<Vec<(Instant, MemEvent)>>,
    enabled: AtomicBool,
}

impl MemLogger {
    pub fn new(config: MemLoggerConfig) -> Self {
        Self {
            config,
            events: Mutex::new(Vec::new()),
            enabled: AtomicBool::new(true),
        }
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Record an event
    pub fn log(&self, event: MemEvent) {
        if !self.is_enabled() {
            return;
        }

        if event.level() > self.config.level {
            return;
        }

        if self.config.console {
            self.output_console(&event);
        }

        if let Ok(mut events) = self.events.lock() {
            events.push((Instant::now(), event));
        }
    }

    fn output_console(&self, event: &MemEvent) {
        let body = if self.config.json {
            match serde_json::to_string(event) {
                Ok(json) => json,
                Err(_) => return,
            }
        } else {
            event.to_string()
        };

        let level = log::Level::from(event.level());
        if self.config.timestamps {
            let now = chrono::Local::now();
            log::log!(level, "[{}] {}", now.format("%Y-%m-%d %H:%M:%S%.3f"), body);
        } else {
            log::log!(level, "{}", body);
        }
    }

    /// Get all events
    pub fn get_events(&self) -> Vec<(Instant, MemEvent)> {
        if let Ok(events) = self.events.lock() {
            events.clone()
        } else {
            Vec::new()
        }
    }

    pub fn clear_events(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    pub fn event_count(&self) -> usize {
        if let Ok(events) = self.events.lock() {
            events.len()
        } else {
            0
        }
    }
}

impl Default for MemLogger {
    fn default() -> Self {
        Self::new(MemLoggerConfig::default())
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_LOGGER: Mutex<MemLogger> = Mutex::new(MemLogger::default());
}

/// Log an event to the global logger
pub fn log_event(event: MemEvent) {
    if let Ok(logger) = GLOBAL_LOGGER.lock() {
        logger.log(event);
    }
}

/// Replace the global logger
pub fn configure_logger(config: MemLoggerConfig) {
    if let Ok(mut logger) = GLOBAL_LOGGER.lock() {
        *logger = MemLogger::new(config);
    }
}

/// Global logger event count
pub fn get_event_count() -> usize {
    if let Ok(logger) = GLOBAL_LOGGER.lock() {
        logger.event_count()
    } else {
        0
    }
}
