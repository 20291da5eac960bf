// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The individual pipeline steps.
//!
//! Each step is a free function over any [`TensorAccelerator`], so tests can
//! drive them one at a time. [`TensorOpHarness`](crate::TensorOpHarness)
//! composes them into the full run. Every non-success accelerator status is
//! returned as [`HarnessError::Accelerator`] tagged with the step name; there
//! is no retry.

use crate::HarnessError;
use accelerator::{AccelTensor, ElementwiseOp, PreTransformedDesc, TensorAccelerator};
use tensor_core::{DType, HostBuffer, Layout, Shape, TensorError};

/// Maps host allocation failure to its harness error, passing others through.
fn host_error(err: TensorError) -> HarnessError {
    match err {
        TensorError::AllocationFailed { elements } => HarnessError::HostAllocation { elements },
        other => HarnessError::Tensor(other),
    }
}

/// Allocates a host buffer for `shape` and sets element `i` to `fill(i)`.
pub fn allocate_and_fill<F>(shape: Shape, fill: F) -> Result<HostBuffer, HarnessError>
where
    F: Fn(usize) -> f32,
{
    let buffer = HostBuffer::filled_with(shape, fill).map_err(host_error)?;
    tracing::info!("initialised input length: {}", buffer.len());
    Ok(buffer)
}

/// Builds an accelerator tensor holding the contents of `buffer`.
///
/// Derives the native descriptor, allocates device storage and transforms
/// the host data in. Storage acquired before a failing call is released by
/// drop on the way out.
pub fn to_accelerator_tensor<A>(
    accel: &A,
    buffer: &HostBuffer,
    layout: Layout,
    dtype: DType,
) -> Result<AccelTensor, HarnessError>
where
    A: TensorAccelerator + ?Sized,
{
    const STEP: &str = "to_accelerator_tensor";

    let pre = PreTransformedDesc::from_shape(layout, dtype, *buffer.shape());
    let tfm = accel
        .generate_transformed_desc(&pre)
        .map_err(HarnessError::in_step(STEP))?;
    let mut tensor = accel
        .init_tensor_with_malloc(&pre, &tfm)
        .map_err(HarnessError::in_step(STEP))?;
    accel
        .transform_tensor(&mut tensor, buffer.as_slice())
        .map_err(HarnessError::in_step(STEP))?;

    tracing::trace!(
        "staged {} elements into {} device bytes",
        buffer.len(),
        tensor.size_bytes()
    );
    Ok(tensor)
}

/// Allocates an output tensor shaped like `like`.
fn alloc_output<A>(
    accel: &A,
    like: &AccelTensor,
    step: &'static str,
) -> Result<AccelTensor, HarnessError>
where
    A: TensorAccelerator + ?Sized,
{
    accel
        .init_tensor_with_malloc(like.pre_desc(), like.transformed_desc())
        .map_err(HarnessError::in_step(step))
}

/// Computes `a * b` on the accelerator into a freshly allocated tensor.
pub fn multiply<A>(accel: &A, a: &AccelTensor, b: &AccelTensor) -> Result<AccelTensor, HarnessError>
where
    A: TensorAccelerator + ?Sized,
{
    const STEP: &str = "multiply";

    let mut out = alloc_output(accel, a, STEP)?;
    accel
        .mul(a, b, &mut out)
        .map_err(HarnessError::in_step(STEP))?;
    Ok(out)
}

/// Computes `a <op> b` on the accelerator into a freshly allocated tensor.
pub fn elementwise<A>(
    accel: &A,
    op: ElementwiseOp,
    a: &AccelTensor,
    b: &AccelTensor,
) -> Result<AccelTensor, HarnessError>
where
    A: TensorAccelerator + ?Sized,
{
    if op == ElementwiseOp::Mul {
        return multiply(accel, a, b);
    }

    const STEP: &str = "elementwise";

    let mut out = alloc_output(accel, a, STEP)?;
    accel
        .elementwise(op, a, b, &mut out)
        .map_err(HarnessError::in_step(STEP))?;
    Ok(out)
}

/// Reads a transformed tensor back into a linear host buffer of its
/// pre-transform shape.
pub fn from_accelerator_tensor<A>(
    accel: &A,
    tensor: &AccelTensor,
) -> Result<HostBuffer, HarnessError>
where
    A: TensorAccelerator + ?Sized,
{
    let mut out = HostBuffer::zeros(*tensor.pre_desc().shape()).map_err(host_error)?;
    accel
        .transform_origtensor(tensor, out.as_mut_slice())
        .map_err(HarnessError::in_step("from_accelerator_tensor"))?;
    Ok(out)
}

/// Releases the tensor's device storage.
pub fn release<A>(accel: &A, tensor: AccelTensor) -> Result<(), HarnessError>
where
    A: TensorAccelerator + ?Sized,
{
    accel
        .free_tensor_buffer(tensor)
        .map_err(HarnessError::in_step("release"))
}
