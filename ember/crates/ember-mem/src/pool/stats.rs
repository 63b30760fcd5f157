//! Pool allocator statistics.

use serde::{Deserialize, Serialize};

/// Snapshot of pool allocator counters
///
/// Taken with [`PoolAllocator::stats`](super::PoolAllocator::stats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Cells per pool at the time of the snapshot
    pub cells_per_pool: usize,

    /// Pools currently held
    pub pools_count: usize,

    /// Highest `pools_count` since the last `reset_peak`
    pub peak_pools_count: usize,

    /// Highest `pools_count` since the allocator was created
    pub global_peak_pools_count: usize,

    /// Cells in held pools that are not allocated
    pub free_chunks: usize,

    /// Allocations that had to carve a new pool
    pub new_alloc_count: usize,

    /// Allocations served from a free cell of an existing pool
    pub reused_count: usize,
}

impl PoolStats {
    /// Cells currently handed out
    pub fn allocated_chunks(&self) -> usize {
        self.pools_count * self.cells_per_pool - self.free_chunks
    }

    /// Allocations served since creation
    pub fn total_allocs(&self) -> usize {
        self.new_alloc_count + self.reused_count
    }

    /// Share of allocations served from free cells, 0.0 to 1.0
    pub fn reuse_ratio(&self) -> f64 {
        match self.total_allocs() {
            0 => 0.0,
            total => self.reused_count as f64 / total as f64,
        }
    }
}

impl std::fmt::Display for PoolStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pools: {} (peak {}, global peak {}), cells: {} allocated, {} free, allocs: {} new, {} reused",
            self.pools_count,
            self.peak_pools_count,
            self.global_peak_pools_count,
            self.allocated_chunks(),
            self.free_chunks,
            self.new_alloc_count,
            self.reused_count
        )
    }
}
