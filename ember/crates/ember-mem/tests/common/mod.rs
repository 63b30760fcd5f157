//! Test utilities for the ember-mem integration suite.

#![allow(dead_code)]

use ember_mem::{CellId, PoolAllocator, PoolConfig, PoolStats};

/// Pool fixture with a record of every live cell
///
/// Checks the allocator's own bookkeeping against an independent model.
pub struct PoolFixture {
    pub pools: PoolAllocator<u32>,
    pub live: Vec<(CellId, u32)>,
    next_value: u32,
}

impl PoolFixture {
    pub fn with_cells_per_pool(cells_per_pool: usize) -> Self {
        let pools = PoolAllocator::new(PoolConfig {
            cells_per_pool,
            ..Default::default()
        })
        .expect("pool config should be valid");

        Self {
            pools,
            live: Vec::new(),
            next_value: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::with_cells_per_pool(PoolConfig::default().cells_per_pool)
    }

    pub fn alloc(&mut self) -> CellId {
        let value = self.next_value;
        self.next_value += 1;
        let cell = self.pools.alloc(value);
        self.live.push((cell, value));
        cell
    }

    /// Free the `n`-th live cell (modulo the live count)
    pub fn free_nth(&mut self, n: usize) -> Option<CellId> {
        if self.live.is_empty() {
            return None;
        }
        let (cell, value) = self.live.swap_remove(n % self.live.len());
        assert_eq!(self.pools.free(cell), value, "cell {:?} lost its value", cell);
        Some(cell)
    }

    pub fn stats(&self) -> PoolStats {
        self.pools.stats()
    }

    /// Every modelled cell is live with its value and counters agree
    pub fn assert_consistent(&self) {
        for (cell, value) in &self.live {
            assert_eq!(self.pools.get(*cell), Some(value), "cell {:?} corrupted", cell);
        }
        assert_eq!(self.pools.live_cells(), self.live.len());

        let stats = self.stats();
        assert_eq!(stats.allocated_chunks(), self.live.len());
        assert!(stats.peak_pools_count >= stats.pools_count);
        assert!(stats.global_peak_pools_count >= stats.peak_pools_count);
    }
}
