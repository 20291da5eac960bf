// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for host tensor handling.

/// Errors that can occur while building or accessing host tensors.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer length does not match the element count of the shape.
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A shape string or dimension list could not be interpreted.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// The host allocator refused the request.
    #[error("host allocation of {elements} elements failed")]
    AllocationFailed { elements: usize },

    /// The requested data type is not supported for this operation.
    #[error("unsupported dtype {dtype} for {op}")]
    UnsupportedDType {
        op: &'static str,
        dtype: crate::DType,
    },
}
