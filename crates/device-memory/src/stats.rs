// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device pool statistics.

/// Cumulative counters for a [`DevicePool`](crate::DevicePool).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AllocationStats {
    /// Successful allocations.
    pub total_allocations: u64,
    /// Allocations served from the free list.
    pub cache_hits: u64,
    /// Allocations that required fresh cells.
    pub cache_misses: u64,
    /// Requests refused because of the budget.
    pub oom_count: u64,
    /// Page runs returned to the pool.
    pub total_deallocations: u64,
    /// High-water mark of live device bytes.
    pub peak_allocated_bytes: usize,
}

impl AllocationStats {
    /// Returns the fraction of allocations served from the free list.
    pub fn cache_hit_ratio(&self) -> f64 {
        if self.total_allocations == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / self.total_allocations as f64
    }

    /// Returns `true` if every allocation has been returned.
    pub fn is_balanced(&self) -> bool {
        self.total_allocations == self.total_deallocations
    }

    pub(crate) fn record_allocation(&mut self, hit: bool, live_bytes: usize) {
        self.total_allocations += 1;
        if hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }
        self.peak_allocated_bytes = self.peak_allocated_bytes.max(live_bytes);
    }

    pub(crate) fn record_oom(&mut self) {
        self.oom_count += 1;
    }

    pub(crate) fn record_deallocation(&mut self) {
        self.total_deallocations += 1;
    }

    /// Returns a one-line summary for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Device pool: {} allocations ({} hits, {} misses), {} released, \
             {} OOMs, peak {:.2} KB",
            self.total_allocations,
            self.cache_hits,
            self.cache_misses,
            self.total_deallocations,
            self.oom_count,
            self.peak_allocated_bytes as f64 / 1024.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let s = AllocationStats::default();
        assert_eq!(s.cache_hit_ratio(), 0.0);
        assert!(s.is_balanced());
    }

    #[test]
    fn test_record_and_peak() {
        let mut s = AllocationStats::default();
        s.record_allocation(false, 4096);
        s.record_allocation(true, 8192);
        s.record_deallocation();
        assert_eq!(s.total_allocations, 2);
        assert_eq!(s.peak_allocated_bytes, 8192);
        assert!((s.cache_hit_ratio() - 0.5).abs() < 1e-9);
        assert!(!s.is_balanced());
    }

    #[test]
    fn test_summary() {
        let mut s = AllocationStats::default();
        s.record_allocation(false, 4096);
        s.record_oom();
        let line = s.summary();
        assert!(line.contains("1 allocations"));
        assert!(line.contains("1 OOMs"));
        assert!(line.contains("peak 4.00 KB"));
    }
}
