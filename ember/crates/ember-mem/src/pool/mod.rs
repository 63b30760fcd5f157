//! Pool Allocator - fixed-size cells grouped into pools
//!
//! All cells of an allocator hold the same type `T`. Cells are carved out of
//! pools of `cells_per_pool` cells; a pool is requested from the heap when no
//! free cell is left and handed back by [`PoolAllocator::collect_empty`] once
//! none of its cells is allocated.
//!
//! ```text
//! pools:  ┌─────────────── pool 0 ───────────────┐┌─────── pool 1 ────────
//!         │ cell 0 │ cell 1 │ ... │ cell cpp - 1 ││ cell cpp │ ...
//!         └──────────────────────────────────────┘└───────────────────────
//! free:   [cell ids of unallocated cells in held pools]  (LIFO)
//! ```
//!
//! A cell id is stable for as long as the cell stays allocated. Pool ids
//! are reused once a pool is released, so a released pool's cell ids come
//! back into circulation, always below [`CompressedPointer::MAX_CELLS`].
//!
//! # Out of memory
//!
//! [`PoolAllocator::alloc`] never returns failure: a refused pool request
//! goes to [`std::alloc::handle_alloc_error`] and exhausting the compressed
//! pointer range panics. [`PoolAllocator::try_alloc`] reports both instead.

mod stats;

pub use stats::PoolStats;

use std::alloc::Layout;

use ember_util::define_idx;
use ember_util::index_vec::{Idx, IndexVec};

use crate::config::PoolConfig;
use crate::cpointer::{CellId, CompressedPointer};
use crate::error::{MemError, Result};
use crate::logging::{self, MemEvent};

define_idx!(PoolId, u32);

struct Pool<T> {
    cells: Box<[Option<T>]>,
    live: usize,
}

#[derive(Debug, Default)]
struct Counters {
    pools_count: usize,
    peak_pools_count: usize,
    global_peak_pools_count: usize,
    new_alloc_count: usize,
    reused_count: usize,
}

/// Pool allocator for cells of type `T`
pub struct PoolAllocator<T> {
    config: PoolConfig,
    pools: IndexVec<PoolId, Option<Pool<T>>>,
    free_cells: Vec<CellId>,
    counters: Counters,
}

impl<T> PoolAllocator<T> {
    /// Create an allocator holding no pools
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pools: IndexVec::new(),
            free_cells: Vec::new(),
            counters: Counters::default(),
        })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    #[inline]
    pub fn cells_per_pool(&self) -> usize {
        self.config.cells_per_pool
    }

    /// Place `value` in a cell
    ///
    /// Reuses the most recently freed cell if any, otherwise carves a new
    /// pool and returns its first cell.
    ///
    /// # Panics
    ///
    /// Panics when every addressable cell is allocated. Aborts through
    /// [`std::alloc::handle_alloc_error`] when the heap refuses a pool.
    pub fn alloc(&mut self, value: T) -> CellId {
        match self.try_alloc(value) {
            Ok(cell) => cell,
            Err(MemError::OutOfMemory { .. }) => {
                let layout = Layout::array::<Option<T>>(self.config.cells_per_pool)
                    .unwrap_or_else(|_| Layout::new::<Option<T>>());
                std::alloc::handle_alloc_error(layout)
            },
            Err(err) => panic!("{}", err),
        }
    }

    /// Place `value` in a cell, reporting memory exhaustion
    ///
    /// On error `value` is dropped and the allocator is unchanged.
    pub fn try_alloc(&mut self, value: T) -> Result<CellId> {
        if let Some(cell) = self.free_cells.pop() {
            let (pool_id, slot) = self.locate(cell);
            let Some(pool) = self.pools[pool_id].as_mut() else {
                unreachable!("free cell {} belongs to released pool {}", cell.0, pool_id.0)
            };
            debug_assert!(pool.cells[slot].is_none(), "free cell {} is occupied", cell.0);
            pool.cells[slot] = Some(value);
            pool.live += 1;
            self.counters.reused_count += 1;
            return Ok(cell);
        }

        let pool_id = self.grow()?;
        let Some(pool) = self.pools[pool_id].as_mut() else {
            unreachable!("pool {} vanished after grow", pool_id.0)
        };
        pool.cells[0] = Some(value);
        pool.live = 1;
        self.counters.new_alloc_count += 1;
        Ok(self.cell_at(pool_id, 0))
    }

    /// Carve a new pool, seeding the free list with all but its first cell
    fn grow(&mut self) -> Result<PoolId> {
        let cells_per_pool = self.config.cells_per_pool;
        let pool_id = self
            .pools
            .position(Option::is_none)
            .unwrap_or_else(|| self.pools.next_index());
        let first = pool_id.index() * cells_per_pool;

        if first + cells_per_pool > CompressedPointer::MAX_CELLS {
            let err = MemError::ArenaExhausted {
                cells: self.counters.pools_count * cells_per_pool,
                max: CompressedPointer::MAX_CELLS,
            };
            log::error!("{}", err);
            return Err(err);
        }

        let requested = cells_per_pool * std::mem::size_of::<Option<T>>();
        let mut cells: Vec<Option<T>> = Vec::new();
        let reserved = cells.try_reserve_exact(cells_per_pool).is_ok()
            && self.free_cells.try_reserve(cells_per_pool - 1).is_ok()
            && (pool_id != self.pools.next_index() || self.pools.try_reserve(1).is_ok());
        if !reserved {
            self.emit_always(MemEvent::AllocationFailure {
                requested,
                pools_count: self.counters.pools_count,
            });
            return Err(MemError::OutOfMemory { requested });
        }
        cells.resize_with(cells_per_pool, || None);

        let pool = Pool {
            cells: cells.into_boxed_slice(),
            live: 0,
        };
        if pool_id == self.pools.next_index() {
            self.pools.push(Some(pool));
        } else {
            self.pools[pool_id] = Some(pool);
        }

        // Reversed so the lowest slot is handed out next
        for slot in (1..cells_per_pool).rev() {
            let cell = self.cell_at(pool_id, slot);
            self.free_cells.push(cell);
        }

        let counters = &mut self.counters;
        counters.pools_count += 1;
        counters.peak_pools_count = counters.peak_pools_count.max(counters.pools_count);
        counters.global_peak_pools_count =
            counters.global_peak_pools_count.max(counters.pools_count);

        self.emit(MemEvent::PoolAllocated {
            pool: pool_id.0,
            cells: cells_per_pool,
            pools_count: self.counters.pools_count,
        });
        Ok(pool_id)
    }

    /// Return a cell, handing back the value it held
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not allocated.
    pub fn free(&mut self, cell: CellId) -> T {
        match self.try_free(cell) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Return a cell, failing on an unallocated one
    pub fn try_free(&mut self, cell: CellId) -> Result<T> {
        let (pool_id, slot) = self.locate(cell);
        let pool = self
            .pools
            .get_mut(pool_id)
            .and_then(Option::as_mut)
            .ok_or(MemError::InvalidCell { cell: cell.0 })?;
        let value = pool.cells[slot]
            .take()
            .ok_or(MemError::InvalidCell { cell: cell.0 })?;
        pool.live -= 1;
        self.free_cells.push(cell);
        Ok(value)
    }

    /// Release every pool with no allocated cell
    ///
    /// Returns the number of pools released. Allocated cells are untouched.
    pub fn collect_empty(&mut self) -> usize {
        let mut released = Vec::new();
        for (pool_id, slot) in self.pools.iter_enumerated_mut() {
            if matches!(slot, Some(pool) if pool.live == 0) {
                *slot = None;
                released.push(pool_id);
            }
        }

        if !released.is_empty() {
            let cells_per_pool = self.config.cells_per_pool;
            let pools = &self.pools;
            self.free_cells
                .retain(|cell| pools[PoolId::from_usize(cell.index() / cells_per_pool)].is_some());

            while matches!(self.pools.last(), Some((_, None))) {
                self.pools.pop();
            }
            self.counters.pools_count -= released.len();

            for pool_id in &released {
                self.emit(MemEvent::PoolReleased {
                    pool: pool_id.0,
                    pools_count: self.counters.pools_count,
                });
            }
        }

        self.emit(MemEvent::CollectEmpty {
            released: released.len(),
            pools_count: self.counters.pools_count,
        });
        released.len()
    }

    /// Release every pool, allocated or not
    ///
    /// Returns the number of cells that were still allocated. Values in
    /// those cells are dropped.
    pub fn finalize(&mut self) -> usize {
        let outstanding = self.live_cells();
        let pools_released = self.counters.pools_count;

        self.pools.clear();
        self.free_cells.clear();
        self.counters.pools_count = 0;

        self.emit_always(MemEvent::Finalize {
            outstanding_cells: outstanding,
            pools_released,
        });
        outstanding
    }

    #[inline]
    pub fn get(&self, cell: CellId) -> Option<&T> {
        let (pool_id, slot) = self.locate(cell);
        self.pools.get(pool_id)?.as_ref()?.cells[slot].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, cell: CellId) -> Option<&mut T> {
        let (pool_id, slot) = self.locate(cell);
        self.pools.get_mut(pool_id)?.as_mut()?.cells[slot].as_mut()
    }

    /// Whether `cell` is currently allocated
    #[inline]
    pub fn is_live(&self, cell: CellId) -> bool {
        self.get(cell).is_some()
    }

    /// Cells currently allocated
    pub fn live_cells(&self) -> usize {
        self.pools.iter().flatten().map(|pool| pool.live).sum()
    }

    pub fn pools_count(&self) -> usize {
        self.counters.pools_count
    }

    /// Counter snapshot
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            cells_per_pool: self.config.cells_per_pool,
            pools_count: self.counters.pools_count,
            peak_pools_count: self.counters.peak_pools_count,
            global_peak_pools_count: self.counters.global_peak_pools_count,
            free_chunks: self.free_cells.len(),
            new_alloc_count: self.counters.new_alloc_count,
            reused_count: self.counters.reused_count,
        }
    }

    /// Restart peak tracking from the current pool count
    pub fn reset_peak(&mut self) {
        self.counters.peak_pools_count = self.counters.pools_count;
    }

    /// Log a statistics snapshot
    pub fn print_stats(&self) {
        self.emit_always(MemEvent::Stats(self.stats()));
    }

    #[inline]
    fn locate(&self, cell: CellId) -> (PoolId, usize) {
        let cells_per_pool = self.config.cells_per_pool;
        (
            PoolId::from_usize(cell.index() / cells_per_pool),
            cell.index() % cells_per_pool,
        )
    }

    #[inline]
    fn cell_at(&self, pool_id: PoolId, slot: usize) -> CellId {
        CellId::from_usize(pool_id.index() * self.config.cells_per_pool + slot)
    }

    /// Pool lifecycle events: global logger when verbose, `log` trace otherwise
    fn emit(&self, event: MemEvent) {
        if self.config.verbose {
            logging::log_event(event);
        } else {
            log::trace!("{}", event);
        }
    }

    /// Events that always reach the `log` facade at their own level
    fn emit_always(&self, event: MemEvent) {
        if self.config.verbose {
            logging::log_event(event);
        } else {
            let level: log::Level = event.level().into();
            log::log!(level, "{}", event);
        }
    }
}

impl<T> std::fmt::Debug for PoolAllocator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolAllocator")
            .field("config", &self.config)
            .field("counters", &self.counters)
            .field("live_cells", &self.live_cells())
            .finish()
    }
}
