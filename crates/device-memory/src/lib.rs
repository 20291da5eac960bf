// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # device-memory
//!
//! Accelerator-side storage for transformed tensors.
//!
//! Accelerator tensors live in page-aligned, page-granular storage. This
//! crate models that storage on the host:
//!
//! - [`MemoryBudget`] — the device memory ceiling, parsed from strings like
//!   `"64M"` or `"1G"`.
//! - [`DevicePool`] — hands out whole 4 KiB pages, enforces the budget, and
//!   keeps released page runs on a free list keyed by page count.
//! - [`PageBuffer`] — an RAII guard over one allocation. Dropping it returns
//!   the pages to the pool, so storage is released on every exit path.
//! - [`AllocationStats`] — cumulative counters (peak, hits, OOMs).
//!
//! # Cells
//! Device bytes are accounted at the accelerator's native element width
//! ([`CELL_BYTES`]). Each native element is backed by one `f32` *cell*, so a
//! page holds [`CELLS_PER_PAGE`] cells and values survive a transform
//! without rounding.
//!
//! ```text
//! DevicePool::allocate(bytes)
//!       │  round up to pages
//!       ▼
//!   PageBuffer  ◄─── owns Vec<f32> cells, holds Arc<PoolInner>
//!       │
//!       │  drop()
//!       ▼
//!   PoolInner::release()  ──► free list
//! ```
//!
//! # Example
//! ```
//! use device_memory::{DevicePool, MemoryBudget, PAGE_SIZE};
//!
//! let pool = DevicePool::new(MemoryBudget::from_mb(1));
//! let buf = pool.allocate(100).unwrap();
//! assert_eq!(buf.size_bytes(), PAGE_SIZE);
//! assert_eq!(pool.allocated_bytes(), PAGE_SIZE);
//!
//! drop(buf);
//! assert_eq!(pool.allocated_bytes(), 0);
//! ```

mod budget;
mod error;
mod guard;
pub mod pool;
mod stats;

pub use budget::MemoryBudget;
pub use error::MemoryError;
pub use guard::PageBuffer;
pub use pool::DevicePool;
pub use stats::AllocationStats;

/// Size of one device page in bytes.
pub const PAGE_SIZE: usize = 4096;

/// Accounted size of one native device element in bytes.
pub const CELL_BYTES: usize = 2;

/// Number of native elements (cells) in one page.
pub const CELLS_PER_PAGE: usize = PAGE_SIZE / CELL_BYTES;

/// Returns the number of whole pages needed to hold `bytes`.
pub fn pages_for(bytes: usize) -> usize {
    bytes.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_for() {
        assert_eq!(pages_for(0), 0);
        assert_eq!(pages_for(1), 1);
        assert_eq!(pages_for(PAGE_SIZE), 1);
        assert_eq!(pages_for(PAGE_SIZE + 1), 2);
    }

    #[test]
    fn test_cells_per_page() {
        assert_eq!(CELLS_PER_PAGE, 2048);
    }
}
