// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The harness pipeline with type-state–enforced ordering.
//!
//! ```text
//! TensorOpHarness::fill_inputs()
//!     ▼
//! HarnessRun<Filled>     host inputs A and B
//!     │  .stage()
//!     ▼
//! HarnessRun<Staged>     both inputs resident on the accelerator
//!     │  .compute()
//!     ▼
//! HarnessRun<Computed>   result read back, device storage released
//!     │  .verify(sink)
//!     ▼
//!   HarnessOutcome
//! ```
//!
//! Each transition consumes the previous run. Device tensors live inside
//! the `Staged` state, so an error at any step drops them and their pages
//! return to the pool.

use crate::verify::Verifier;
use crate::{steps, HarnessConfig, HarnessError, PhaseTimings, VerificationReport};
use accelerator::{AccelTensor, TensorAccelerator};
use std::fmt;
use std::io::Write;
use std::time::Instant;
use tensor_core::HostBuffer;

// ── Type-state markers ─────────────────────────────────────────

/// Host inputs are allocated and filled.
#[derive(Debug)]
pub struct Filled {
    a: HostBuffer,
    b: HostBuffer,
}

/// Inputs have been transformed into accelerator tensors.
#[derive(Debug)]
pub struct Staged {
    a: HostBuffer,
    b: HostBuffer,
    ta: AccelTensor,
    tb: AccelTensor,
}

/// The result has been read back into host memory.
#[derive(Debug)]
pub struct Computed {
    a: HostBuffer,
    b: HostBuffer,
    result: HostBuffer,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Filled {}
    impl Sealed for super::Staged {}
    impl Sealed for super::Computed {}
}

/// Sealed trait for run states.
pub trait RunState: std::fmt::Debug + sealed::Sealed {}
impl RunState for Filled {}
impl RunState for Staged {}
impl RunState for Computed {}

// ── Outcome ────────────────────────────────────────────────────

/// The result of a completed run.
///
/// A run with failed elements still completes; check
/// [`VerificationReport::all_passed`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct HarnessOutcome {
    pub report: VerificationReport,
    pub timings: PhaseTimings,
}

/// Snapshot of the accelerator queries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AcceleratorInfo {
    pub name: String,
    pub installed: bool,
    pub max_dim_idx_size: u32,
    pub max_tensor_size: u64,
}

impl AcceleratorInfo {
    pub fn query<A: TensorAccelerator + ?Sized>(accel: &A) -> Self {
        Self {
            name: accel.name().to_string(),
            installed: accel.is_installed(),
            max_dim_idx_size: accel.max_dim_idx_size(),
            max_tensor_size: accel.max_tensor_size(),
        }
    }
}

impl fmt::Display for AcceleratorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accelerator installed: {}", self.installed)?;
        writeln!(f, "Max dim index size:    {}", self.max_dim_idx_size)?;
        write!(f, "Max tensor size:       {} bytes", self.max_tensor_size)
    }
}

// ── Harness ────────────────────────────────────────────────────

/// Runs one element-wise operation end to end against an accelerator.
///
/// # Example
/// ```
/// use accelerator::SoftNnpa;
/// use device_memory::MemoryBudget;
/// use harness::{HarnessConfig, TensorOpHarness};
///
/// let config = HarnessConfig { dims: [1, 1, 1, 4], ..Default::default() };
/// let accel = SoftNnpa::new(MemoryBudget::from_mb(1));
/// let harness = TensorOpHarness::new(config, accel).unwrap();
///
/// let computed = harness.fill_inputs().unwrap().stage().unwrap().compute().unwrap();
/// assert_eq!(computed.output().as_slice(), &[2.0, 6.0, 12.0, 20.0]);
/// ```
#[derive(Debug)]
pub struct TensorOpHarness<A: TensorAccelerator> {
    config: HarnessConfig,
    accel: A,
}

impl<A: TensorAccelerator> TensorOpHarness<A> {
    /// Creates a harness after validating `config`.
    pub fn new(config: HarnessConfig, accel: A) -> Result<Self, HarnessError> {
        config.validate()?;
        tracing::info!(
            "harness created: {} on {} ({}, {})",
            config.op,
            config.shape(),
            config.layout,
            config.dtype,
        );
        Ok(Self { config, accel })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn accelerator(&self) -> &A {
        &self.accel
    }

    /// Queries the accelerator's capabilities.
    pub fn capabilities(&self) -> AcceleratorInfo {
        AcceleratorInfo::query(&self.accel)
    }

    fn verifier(&self) -> Verifier {
        Verifier {
            op: self.config.op,
            tolerance: self.config.tolerance,
            print_elements: self.config.print_elements,
        }
    }

    /// Logs the accelerator queries and builds both host inputs.
    pub fn fill_inputs(&self) -> Result<HarnessRun<'_, A, Filled>, HarnessError> {
        let started = Instant::now();

        let info = self.capabilities();
        tracing::info!("accelerator '{}' installed: {}", info.name, info.installed);
        tracing::info!("max dim index size: {}", info.max_dim_idx_size);
        tracing::info!("max tensor size: {} bytes", info.max_tensor_size);

        tracing::info!("initialising input data...");
        let shape = self.config.shape();
        let pattern_a = self.config.pattern_a();
        let pattern_b = self.config.pattern_b();
        let a = steps::allocate_and_fill(shape, |i| pattern_a.value_at(i))?;
        let b = steps::allocate_and_fill(shape, |i| pattern_b.value_at(i))?;

        let timings = PhaseTimings {
            fill: started.elapsed(),
            ..Default::default()
        };
        Ok(HarnessRun {
            harness: self,
            state: Filled { a, b },
            timings,
            started,
        })
    }

    /// Runs the full pipeline, writing the verification report to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<HarnessOutcome, HarnessError> {
        self.fill_inputs()?.stage()?.compute()?.verify(out)
    }
}

// ── Run ────────────────────────────────────────────────────────

/// One pass through the pipeline, parked in state `S`.
#[derive(Debug)]
pub struct HarnessRun<'h, A: TensorAccelerator, S: RunState> {
    harness: &'h TensorOpHarness<A>,
    state: S,
    timings: PhaseTimings,
    started: Instant,
}

impl<A: TensorAccelerator, S: RunState> HarnessRun<'_, A, S> {
    /// Timings recorded so far.
    pub fn timings(&self) -> &PhaseTimings {
        &self.timings
    }
}

// ── Filled → Staged ────────────────────────────────────────────

impl<'h, A: TensorAccelerator> HarnessRun<'h, A, Filled> {
    pub fn inputs(&self) -> (&HostBuffer, &HostBuffer) {
        (&self.state.a, &self.state.b)
    }

    /// Transforms both inputs into accelerator tensors.
    pub fn stage(self) -> Result<HarnessRun<'h, A, Staged>, HarnessError> {
        let t = Instant::now();
        let config = &self.harness.config;
        let accel = &self.harness.accel;

        tracing::info!("transforming input tensors...");
        let ta = steps::to_accelerator_tensor(accel, &self.state.a, config.layout, config.dtype)?;
        let tb = steps::to_accelerator_tensor(accel, &self.state.b, config.layout, config.dtype)?;
        tracing::debug!(
            "staged inputs: {} + {} device bytes",
            ta.size_bytes(),
            tb.size_bytes()
        );

        let mut timings = self.timings;
        timings.stage = t.elapsed();
        let Filled { a, b } = self.state;
        Ok(HarnessRun {
            harness: self.harness,
            state: Staged { a, b, ta, tb },
            timings,
            started: self.started,
        })
    }
}

// ── Staged → Computed ──────────────────────────────────────────

impl<'h, A: TensorAccelerator> HarnessRun<'h, A, Staged> {
    /// Runs the element-wise primitive, reads the result back and releases
    /// all three device tensors.
    pub fn compute(self) -> Result<HarnessRun<'h, A, Computed>, HarnessError> {
        let accel = &self.harness.accel;
        let op = self.harness.config.op;
        let Staged { a, b, ta, tb } = self.state;
        let mut timings = self.timings;

        let t = Instant::now();
        tracing::info!("performing {op} op...");
        let out = steps::elementwise(accel, op, &ta, &tb)?;
        tracing::info!("{op} operation completed successfully");
        timings.compute = t.elapsed();

        let t = Instant::now();
        tracing::info!("transforming result tensor back to original format...");
        let result = steps::from_accelerator_tensor(accel, &out)?;
        tracing::info!("transformed result tensor back to original format successfully");
        steps::release(accel, ta)?;
        steps::release(accel, tb)?;
        steps::release(accel, out)?;
        timings.readback = t.elapsed();

        Ok(HarnessRun {
            harness: self.harness,
            state: Computed { a, b, result },
            timings,
            started: self.started,
        })
    }
}

// ── Computed → Outcome ─────────────────────────────────────────

impl<A: TensorAccelerator> HarnessRun<'_, A, Computed> {
    pub fn inputs(&self) -> (&HostBuffer, &HostBuffer) {
        (&self.state.a, &self.state.b)
    }

    /// The host copy of the accelerator result.
    pub fn output(&self) -> &HostBuffer {
        &self.state.result
    }

    /// Mutable access to the result before verification.
    pub fn output_mut(&mut self) -> &mut HostBuffer {
        &mut self.state.result
    }

    /// Verifies the result and writes the console report to `out`.
    pub fn verify<W: Write>(self, out: &mut W) -> Result<HarnessOutcome, HarnessError> {
        let t = Instant::now();
        let Computed { a, b, result } = &self.state;
        let report = self
            .harness
            .verifier()
            .verify(a.as_slice(), b.as_slice(), result.as_slice(), out)?;

        let mut timings = self.timings;
        timings.verify = t.elapsed();
        timings.total = self.started.elapsed();

        if report.all_passed() {
            tracing::info!("verification passed: {} elements", report.element_count);
        } else {
            tracing::warn!(
                "verification failed: {} of {} elements",
                report.failed,
                report.element_count
            );
        }
        tracing::debug!("{}", timings.summary());

        Ok(HarnessOutcome { report, timings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accelerator::{ElementwiseOp, SoftNnpa};
    use device_memory::MemoryBudget;

    fn harness(config: HarnessConfig) -> TensorOpHarness<SoftNnpa> {
        TensorOpHarness::new(config, SoftNnpa::new(MemoryBudget::from_mb(4))).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = HarnessConfig {
            pattern_period: 0,
            ..Default::default()
        };
        let accel = SoftNnpa::new(MemoryBudget::from_mb(1));
        let err = TensorOpHarness::new(config, accel).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigError(_)));
    }

    #[test]
    fn test_new_rejects_overflowing_dims() {
        let config = HarnessConfig {
            dims: [65536, 65536, 65536, 65536],
            ..Default::default()
        };
        let accel = SoftNnpa::new(MemoryBudget::from_mb(1));
        let err = TensorOpHarness::new(config, accel).unwrap_err();
        assert!(err.to_string().contains("invalid dims"));
    }

    #[test]
    fn test_capabilities() {
        let h = harness(HarnessConfig::default());
        let info = h.capabilities();
        assert!(info.installed);
        assert_eq!(info.max_dim_idx_size, 32768);
        assert_eq!(info.max_tensor_size, 4 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_accelerator_info_display() {
        let text = harness(HarnessConfig::default()).capabilities().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Accelerator installed: true",
                "Max dim index size:    32768",
                "Max tensor size:       4294967296 bytes",
            ]
        );
    }

    #[test]
    fn test_fill_inputs() {
        let h = harness(HarnessConfig::default());
        let run = h.fill_inputs().unwrap();
        let (a, b) = run.inputs();
        assert_eq!(a.len(), 2048);
        assert_eq!(a.as_slice()[129], 2.0);
        assert_eq!(b.as_slice()[129], 3.0);
    }

    #[test]
    fn test_pipeline_states() {
        let h = harness(HarnessConfig::default());
        let staged = h.fill_inputs().unwrap().stage().unwrap();
        // Two 2048-element tensors at 64 pages each.
        assert_eq!(h.accelerator().pool().allocated_bytes(), 2 * 64 * 4096);

        let computed = staged.compute().unwrap();
        assert_eq!(h.accelerator().pool().allocated_bytes(), 0);
        assert_eq!(computed.output().as_slice()[0], 2.0);
        assert_eq!(computed.output().as_slice()[127], 128.0 * 129.0);
    }

    #[test]
    fn test_run_default() {
        let h = harness(HarnessConfig::default());
        let mut out = Vec::new();
        let outcome = h.run(&mut out).unwrap();

        assert_eq!(outcome.report.passed, 2048);
        assert!(outcome.report.all_passed());
        assert!(outcome.timings.total >= outcome.timings.compute);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("Index")).count(), 2048);
        assert!(text.contains("all 2048 test cases passed!"));
    }

    #[test]
    fn test_run_other_ops() {
        for op in ElementwiseOp::ALL {
            let h = harness(HarnessConfig {
                dims: [1, 2, 3, 5],
                op,
                print_elements: false,
                ..Default::default()
            });
            let outcome = h.run(&mut std::io::sink()).unwrap();
            assert!(outcome.report.all_passed(), "op {op}");
            assert_eq!(outcome.report.element_count, 30);
        }
    }

    #[test]
    fn test_stage_rejects_oversized_dim() {
        let h = harness(HarnessConfig {
            dims: [1, 1, 1, 40000],
            ..Default::default()
        });
        let err = h.fill_inputs().unwrap().stage().unwrap_err();
        assert!(matches!(err, HarnessError::Accelerator { step: "to_accelerator_tensor", .. }));
    }

    #[test]
    fn test_stage_releases_first_input_when_second_fails() {
        // Room for one 64-page tensor but not two.
        let accel = SoftNnpa::new(MemoryBudget::from_bytes(300 * 1024));
        let h = TensorOpHarness::new(HarnessConfig::default(), accel).unwrap();

        let err = h.fill_inputs().unwrap().stage().unwrap_err();
        match err {
            HarnessError::Accelerator { step, source } => {
                assert_eq!(step, "to_accelerator_tensor");
                assert_eq!(source.status, accelerator::StatusCode::AllocationFailure);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(h.accelerator().pool().allocated_bytes(), 0);
    }
}
