// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # harness
//!
//! Orchestrates one end-to-end element-wise tensor operation on an
//! accelerator and checks it against plain scalar arithmetic.
//!
//! The harness:
//! 1. Fills two host buffers with a deterministic ramp.
//! 2. Transforms both into accelerator tensors.
//! 3. Runs the element-wise primitive (multiply by default).
//! 4. Transforms the result back to linear memory.
//! 5. Verifies every element within a fixed tolerance, printing one line
//!    per element and a summary.
//!
//! Any accelerator status other than success aborts the run with a
//! [`HarnessError`]. Numeric mismatches are counted, not raised.
//!
//! # Type-State Pipeline
//! ```text
//! TensorOpHarness::fill_inputs → HarnessRun<Filled>
//!     → .stage()   → HarnessRun<Staged>
//!     → .compute() → HarnessRun<Computed>
//!     → .verify()  → HarnessOutcome
//! ```
//!
//! # Example
//! ```
//! use accelerator::SoftNnpa;
//! use device_memory::MemoryBudget;
//! use harness::{HarnessConfig, TensorOpHarness};
//!
//! let config = HarnessConfig { dims: [1, 1, 1, 256], ..Default::default() };
//! let accel = SoftNnpa::new(MemoryBudget::from_mb(4));
//! let harness = TensorOpHarness::new(config, accel).unwrap();
//!
//! let mut console = Vec::new();
//! let outcome = harness.run(&mut console).unwrap();
//! assert_eq!(outcome.report.failed, 0);
//! assert_eq!(outcome.report.passed, 256);
//! ```

mod config;
mod engine;
mod error;
mod metrics;
pub mod steps;
mod verify;

pub use config::HarnessConfig;
pub use engine::{
    AcceleratorInfo, Computed, Filled, HarnessOutcome, HarnessRun, RunState, Staged,
    TensorOpHarness,
};
pub use error::HarnessError;
pub use metrics::PhaseTimings;
pub use verify::{CheckLine, ElementCheck, VerificationReport, Verifier, DEFAULT_TOLERANCE};
