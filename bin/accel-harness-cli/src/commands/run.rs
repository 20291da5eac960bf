// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `accel-harness run` command: one element-wise op, end to end.
//!
//! Drives the full type-state pipeline on the soft accelerator:
//! ```text
//! fill_inputs → <Filled> → stage → <Staged> → compute → <Computed> → verify
//! ```
//! Failed elements are reported but do not change the exit code; only
//! accelerator, allocation and configuration errors do.

use accelerator::{ElementwiseOp, SoftNnpa};
use harness::{AcceleratorInfo, HarnessConfig, TensorOpHarness};
use std::io::Write;
use std::path::Path;
use tensor_core::Shape;

/// Flags for `accel-harness run`. Each one overrides the config file.
#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// Tensor dimensions as N,C,H,W (or NxCxHxW).
    #[arg(short, long)]
    dims: Option<Shape>,

    /// Element-wise op: mul, add, sub, div, min, max.
    #[arg(short, long)]
    op: Option<ElementwiseOp>,

    /// Absolute verification tolerance.
    #[arg(short, long)]
    tolerance: Option<f32>,

    /// Device memory budget (e.g., "64M", "1G").
    #[arg(short = 'm', long)]
    device_memory: Option<String>,

    /// Print only the verification summary, not one line per element.
    #[arg(long)]
    quiet_elements: bool,

    /// Write the outcome as JSON to stdout; the report goes to stderr.
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(shape) = self.dims {
            config.dims = shape.dims();
        }
        if let Some(op) = self.op {
            config.op = op;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(device_memory) = &self.device_memory {
            config.device_memory = device_memory.clone();
        }
        if self.quiet_elements {
            config.print_elements = false;
        }
    }
}

pub fn execute(config_path: Option<&Path>, args: RunArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    args.apply(&mut config);

    let budget = config.parse_device_memory()?;
    let harness = TensorOpHarness::new(config, SoftNnpa::new(budget))?;

    let info = AcceleratorInfo::query(harness.accelerator());

    if args.json {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{info}")?;
        let outcome = harness.run(&mut err)?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            accel-harness · Tensor Op Runner          ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let config = harness.config();
    println!("  Config:");
    println!("   Shape:     {} ({})", config.shape(), config.layout);
    println!("   DType:     {}", config.dtype);
    println!("   Op:        {} ({})", config.op, config.op.symbol());
    println!("   Tolerance: {:e}", config.tolerance);
    println!("   Device:    {budget}");
    println!();

    println!("  Accelerator:");
    for line in info.to_string().lines() {
        println!("   {line}");
    }
    println!();

    let outcome = {
        let mut out = std::io::stdout().lock();
        let outcome = harness.run(&mut out)?;
        out.flush()?;
        outcome
    };

    println!();
    println!("  Metrics:");
    println!("   {}", outcome.timings.summary());
    println!("   {}", harness.accelerator().pool().stats().summary());
    println!();

    if !outcome.report.all_passed() {
        tracing::warn!(
            "{} element(s) outside tolerance, first at index {}",
            outcome.report.failed,
            outcome.report.first_failure.unwrap_or_default(),
        );
    }

    Ok(())
}
