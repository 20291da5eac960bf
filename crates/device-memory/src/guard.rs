// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII guard over a run of device pages.
//!
//! A [`PageBuffer`] returns its pages to the [`DevicePool`](crate::DevicePool)
//! when dropped. Accelerator tensors embed one, which is what makes device
//! storage release unconditional: an early `?` return drops the tensor and
//! the pages go back with it.

use crate::pool::PoolInner;
use crate::{CELLS_PER_PAGE, PAGE_SIZE};
use std::sync::Arc;

/// An allocated run of whole device pages.
pub struct PageBuffer {
    /// Backing cells. `Option` so `drop()` can move them out.
    cells: Option<Vec<f32>>,
    pool: Arc<PoolInner>,
    pages: usize,
}

impl PageBuffer {
    pub(crate) fn new(cells: Vec<f32>, pool: Arc<PoolInner>, pages: usize) -> Self {
        Self {
            cells: Some(cells),
            pool,
            pages,
        }
    }

    /// Returns the number of pages in this allocation.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Returns the accounted device size in bytes (always page-aligned).
    pub fn size_bytes(&self) -> usize {
        self.pages * PAGE_SIZE
    }

    /// Returns the number of cells (`pages * CELLS_PER_PAGE`).
    pub fn len(&self) -> usize {
        self.pages * CELLS_PER_PAGE
    }

    pub fn is_empty(&self) -> bool {
        self.pages == 0
    }

    /// Returns the backing cells.
    pub fn cells(&self) -> &[f32] {
        self.cells.as_deref().unwrap_or(&[])
    }

    /// Returns the backing cells mutably.
    pub fn cells_mut(&mut self) -> &mut [f32] {
        self.cells.as_deref_mut().unwrap_or(&mut [])
    }
}

impl Drop for PageBuffer {
    fn drop(&mut self) {
        if let Some(cells) = self.cells.take() {
            self.pool.release(cells, self.pages);
        }
    }
}

impl std::fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageBuffer")
            .field("pages", &self.pages)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}
