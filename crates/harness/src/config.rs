// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Harness configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! dims = [1, 1, 1, 2048]
//! layout = "nchw"
//! dtype = "fp32"
//! op = "mul"
//! tolerance = 1e-6
//! pattern_period = 128
//! input_a_offset = 1.0
//! input_b_offset = 2.0
//! device_memory = "64M"
//! print_elements = true
//! ```
//!
//! Every field is optional; missing fields take the defaults above.

use crate::HarnessError;
use accelerator::ElementwiseOp;
use device_memory::MemoryBudget;
use std::path::Path;
use tensor_core::{DType, FillPattern, Layout, Shape};

/// Configuration for a single harness run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Tensor dimensions as `[N, C, H, W]`.
    pub dims: [u32; 4],
    /// Pre-transform layout of the host buffers.
    pub layout: Layout,
    /// Element type named by the pre-transform descriptor.
    pub dtype: DType,
    /// Element-wise primitive to exercise.
    pub op: ElementwiseOp,
    /// Absolute tolerance for verification.
    pub tolerance: f32,
    /// Period of the input ramp.
    pub pattern_period: usize,
    /// Offset added to the ramp for input A.
    pub input_a_offset: f32,
    /// Offset added to the ramp for input B.
    pub input_b_offset: f32,
    /// Device memory budget (human-readable, e.g., `"64M"`).
    pub device_memory: String,
    /// Whether to print one console line per verified element.
    pub print_elements: bool,
}

impl HarnessConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, HarnessError> {
        toml::from_str(toml_str)
            .map_err(|e| HarnessError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, HarnessError> {
        toml::to_string_pretty(self)
            .map_err(|e| HarnessError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Parses the device memory string into a [`MemoryBudget`].
    pub fn parse_device_memory(&self) -> Result<MemoryBudget, HarnessError> {
        MemoryBudget::parse(&self.device_memory)
            .map_err(|e| HarnessError::ConfigError(format!("invalid device memory: {e}")))
    }

    /// The configured tensor shape.
    pub fn shape(&self) -> Shape {
        Shape::from(self.dims)
    }

    /// Fill pattern for input A.
    pub fn pattern_a(&self) -> FillPattern {
        FillPattern::new(self.pattern_period, self.input_a_offset)
    }

    /// Fill pattern for input B.
    pub fn pattern_b(&self) -> FillPattern {
        FillPattern::new(self.pattern_period, self.input_b_offset)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.pattern_period == 0 {
            return Err(HarnessError::ConfigError(
                "pattern_period must be greater than zero".into(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(HarnessError::ConfigError(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        if !self.input_a_offset.is_finite() || !self.input_b_offset.is_finite() {
            return Err(HarnessError::ConfigError(
                "input offsets must be finite".into(),
            ));
        }
        self.shape()
            .checked_num_elements()
            .map_err(|e| HarnessError::ConfigError(format!("invalid dims: {e}")))?;
        self.parse_device_memory()?;
        Ok(())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            dims: Shape::default().dims(),
            layout: Layout::default(),
            dtype: DType::default(),
            op: ElementwiseOp::default(),
            tolerance: crate::DEFAULT_TOLERANCE,
            pattern_period: FillPattern::INPUT_A.period,
            input_a_offset: FillPattern::INPUT_A.offset,
            input_b_offset: FillPattern::INPUT_B.offset,
            device_memory: "64M".to_string(),
            print_elements: true,
        }
    }
}
