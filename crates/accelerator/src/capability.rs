// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`TensorAccelerator`] trait.

use crate::{AccelTensor, AcceleratorError, ElementwiseOp, PreTransformedDesc, TransformedDesc};

/// An external tensor-acceleration capability.
///
/// The harness only ever talks to an accelerator through this trait, so a
/// hardware binding and the [`SoftNnpa`](crate::SoftNnpa) emulation are
/// interchangeable. Every fallible call returns an [`AcceleratorError`]
/// whose status is something other than the success sentinel.
pub trait TensorAccelerator {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Whether the accelerator facility is present.
    fn is_installed(&self) -> bool;

    /// Largest element count allowed in any single dimension.
    fn max_dim_idx_size(&self) -> u32;

    /// Largest transformed tensor, in bytes.
    fn max_tensor_size(&self) -> u64;

    /// Derives the native descriptor for `pre`.
    fn generate_transformed_desc(
        &self,
        pre: &PreTransformedDesc,
    ) -> Result<TransformedDesc, AcceleratorError>;

    /// Allocates device storage for a tensor described by `pre` and `tfm`.
    fn init_tensor_with_malloc(
        &self,
        pre: &PreTransformedDesc,
        tfm: &TransformedDesc,
    ) -> Result<AccelTensor, AcceleratorError>;

    /// Converts a linear host buffer into the tensor's native layout.
    fn transform_tensor(&self, tensor: &mut AccelTensor, data: &[f32])
        -> Result<(), AcceleratorError>;

    /// Computes `out = a <op> b` element by element.
    fn elementwise(
        &self,
        op: ElementwiseOp,
        a: &AccelTensor,
        b: &AccelTensor,
        out: &mut AccelTensor,
    ) -> Result<(), AcceleratorError>;

    /// Computes `out = a * b` element by element.
    fn mul(
        &self,
        a: &AccelTensor,
        b: &AccelTensor,
        out: &mut AccelTensor,
    ) -> Result<(), AcceleratorError> {
        self.elementwise(ElementwiseOp::Mul, a, b, out)
    }

    /// Converts a transformed tensor back into a linear host buffer laid
    /// out as its pre-transform descriptor says.
    fn transform_origtensor(
        &self,
        tensor: &AccelTensor,
        out: &mut [f32],
    ) -> Result<(), AcceleratorError>;

    /// Releases the tensor's device storage.
    fn free_tensor_buffer(&self, tensor: AccelTensor) -> Result<(), AcceleratorError>;
}
