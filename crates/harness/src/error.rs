// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the harness.

use accelerator::AcceleratorError;

/// Errors that abort a harness run.
///
/// None of these are recoverable: the caller is expected to stop.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// An accelerator call returned a non-success status.
    #[error("step '{step}' failed: {source}")]
    Accelerator {
        step: &'static str,
        #[source]
        source: AcceleratorError,
    },

    /// The host could not allocate a buffer.
    #[error("host allocation of {elements} elements failed")]
    HostAllocation { elements: usize },

    /// A host tensor could not be built.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),

    /// Verification was handed buffers of different lengths.
    #[error("verification buffers differ in length: lhs {lhs}, rhs {rhs}, actual {actual}")]
    ShapeMismatch {
        lhs: usize,
        rhs: usize,
        actual: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Writing the console report failed.
    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Returns a closure tagging an accelerator error with the harness step.
    pub(crate) fn in_step(step: &'static str) -> impl FnOnce(AcceleratorError) -> Self {
        move |source| HarnessError::Accelerator { step, source }
    }
}
