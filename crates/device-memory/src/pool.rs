// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Page-granular device pool with budget enforcement.
//!
//! The [`DevicePool`] is where accelerator tensors get their storage. It:
//!
//! 1. Rounds every request up to whole 4 KiB pages.
//! 2. Enforces a hard ceiling. Requests past it return
//!    `Err(OutOfMemory)`.
//! 3. Keeps released page runs on a free list keyed by page count, and
//!    hands them out again zeroed.
//! 4. Tracks [`AllocationStats`].
//!
//! All mutable state sits behind a single `Mutex`, so the pool can be
//! shared through an `Arc` although the harness drives it from one thread.

use crate::{pages_for, AllocationStats, MemoryBudget, MemoryError, PageBuffer};
use crate::{CELLS_PER_PAGE, PAGE_SIZE};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct PoolState {
    /// Live (handed out, not yet returned) device bytes.
    allocated_bytes: usize,
    /// page count → released cell vectors of exactly that many pages.
    free: HashMap<usize, Vec<Vec<f32>>>,
    /// Device bytes parked on the free list.
    free_bytes: usize,
    stats: AllocationStats,
}

/// Shared pool state, referenced by every [`PageBuffer`].
pub struct PoolInner {
    budget: MemoryBudget,
    state: Mutex<PoolState>,
}

impl PoolInner {
    fn lock(&self) -> MutexGuard<'_, PoolState> {
        // A panic while holding the lock leaves only counters behind; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Called by `PageBuffer::drop` to hand pages back.
    pub(crate) fn release(&self, cells: Vec<f32>, pages: usize) {
        let bytes = pages * PAGE_SIZE;
        let mut state = self.lock();
        state.allocated_bytes = state.allocated_bytes.saturating_sub(bytes);
        state.free_bytes += bytes;
        state.free.entry(pages).or_default().push(cells);
        state.stats.record_deallocation();
        tracing::trace!(pages, live = state.allocated_bytes, "device pages released");
    }
}

/// Allocator for accelerator-side storage.
///
/// # Example
/// ```
/// use device_memory::{DevicePool, MemoryBudget, MemoryError};
///
/// let pool = DevicePool::new(MemoryBudget::from_bytes(8192));
/// let a = pool.allocate(4096).unwrap();
/// let b = pool.allocate(1).unwrap();
/// assert!(matches!(pool.allocate(1), Err(MemoryError::OutOfMemory { .. })));
///
/// drop((a, b));
/// assert_eq!(pool.allocated_bytes(), 0);
/// ```
#[derive(Clone)]
pub struct DevicePool {
    inner: Arc<PoolInner>,
}

impl DevicePool {
    /// Creates a pool with the given ceiling.
    pub fn new(budget: MemoryBudget) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                budget,
                state: Mutex::new(PoolState::default()),
            }),
        }
    }

    /// Allocates enough whole pages to hold `size_bytes`.
    ///
    /// The returned cells are zeroed. A released run with the same page
    /// count is reused when available.
    pub fn allocate(&self, size_bytes: usize) -> Result<PageBuffer, MemoryError> {
        if size_bytes == 0 {
            return Err(MemoryError::ZeroSizedAllocation);
        }

        let pages = pages_for(size_bytes);
        let bytes = pages * PAGE_SIZE;
        let budget = self.inner.budget.as_bytes();

        let mut state = self.inner.lock();
        if state.allocated_bytes + bytes > budget {
            state.stats.record_oom();
            return Err(MemoryError::OutOfMemory {
                requested_bytes: bytes,
                available_bytes: budget.saturating_sub(state.allocated_bytes),
                budget_bytes: budget,
            });
        }

        let reused = state.free.get_mut(&pages).and_then(Vec::pop);
        let hit = reused.is_some();
        let cells = match reused {
            Some(mut cells) => {
                state.free_bytes -= bytes;
                cells.fill(0.0);
                cells
            }
            None => vec![0.0; pages * CELLS_PER_PAGE],
        };

        state.allocated_bytes += bytes;
        let live = state.allocated_bytes;
        state.stats.record_allocation(hit, live);
        drop(state);

        tracing::trace!(pages, hit, live, "device pages allocated");
        Ok(PageBuffer::new(cells, Arc::clone(&self.inner), pages))
    }

    /// Returns the number of live device bytes.
    pub fn allocated_bytes(&self) -> usize {
        self.inner.lock().allocated_bytes
    }

    /// Returns the number of bytes left before the ceiling.
    pub fn available_bytes(&self) -> usize {
        self.inner
            .budget
            .as_bytes()
            .saturating_sub(self.allocated_bytes())
    }

    /// Returns the number of bytes parked on the free list.
    pub fn free_list_bytes(&self) -> usize {
        self.inner.lock().free_bytes
    }

    pub fn budget(&self) -> MemoryBudget {
        self.inner.budget
    }

    /// Returns a snapshot of the pool statistics.
    pub fn stats(&self) -> AllocationStats {
        self.inner.lock().stats.clone()
    }

    /// Drops every cached page run.
    pub fn shrink(&self) {
        let mut state = self.inner.lock();
        state.free.clear();
        state.free_bytes = 0;
    }
}

impl std::fmt::Debug for DevicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevicePool")
            .field("budget", &self.inner.budget)
            .field("allocated_bytes", &self.allocated_bytes())
            .field("available_bytes", &self.available_bytes())
            .finish()
    }
}
