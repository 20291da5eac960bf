// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-phase timing for a harness run.

use std::time::Duration;

/// Wall-clock time spent in each pipeline phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct PhaseTimings {
    /// Host buffer allocation and fill.
    pub fill: Duration,
    /// Descriptor generation, device allocation and transform-in.
    pub stage: Duration,
    /// The element-wise primitive.
    pub compute: Duration,
    /// Transform-out and device release.
    pub readback: Duration,
    /// Scalar verification and console report.
    pub verify: Duration,
    /// End-to-end time.
    pub total: Duration,
}

impl PhaseTimings {
    /// Sum of the individual phases.
    pub fn phases_total(&self) -> Duration {
        self.fill + self.stage + self.compute + self.readback + self.verify
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        format!(
            "Harness: {:.3}ms total, {:.3}ms fill, {:.3}ms stage, \
             {:.3}ms compute, {:.3}ms readback, {:.3}ms verify",
            ms(self.total),
            ms(self.fill),
            ms(self.stage),
            ms(self.compute),
            ms(self.readback),
            ms(self.verify),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let t = PhaseTimings::default();
        assert_eq!(t.phases_total(), Duration::ZERO);
    }

    #[test]
    fn test_phases_total() {
        let t = PhaseTimings {
            fill: Duration::from_millis(1),
            stage: Duration::from_millis(2),
            compute: Duration::from_millis(3),
            readback: Duration::from_millis(4),
            verify: Duration::from_millis(5),
            total: Duration::from_millis(16),
        };
        assert_eq!(t.phases_total(), Duration::from_millis(15));
    }

    #[test]
    fn test_summary_format() {
        let t = PhaseTimings {
            compute: Duration::from_micros(1500),
            total: Duration::from_millis(10),
            ..Default::default()
        };
        let s = t.summary();
        assert!(s.starts_with("Harness: 10.000ms total"));
        assert!(s.contains("1.500ms compute"));
    }
}
