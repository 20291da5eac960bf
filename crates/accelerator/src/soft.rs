// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Software emulation of a stick-based tensor accelerator.
//!
//! [`SoftNnpa`] implements [`TensorAccelerator`] on the host. Transforms
//! scatter host elements into the stick layout described in
//! [`descriptor`](crate::TransformedDesc), element-wise primitives run in
//! plain `f32` over the logical cells, and storage comes from a
//! [`DevicePool`]. Argument and state checks mirror what a hardware
//! binding rejects, each with its own [`StatusCode`].

use crate::{
    AccelTensor, AcceleratorError, ElementwiseOp, PreTransformedDesc, StatusCode,
    TensorAccelerator, TransformedDesc,
};
use device_memory::{DevicePool, MemoryBudget, MemoryError};
use tensor_core::{DType, Shape};

/// Default per-dimension element limit.
pub const DEFAULT_MAX_DIM_IDX_SIZE: u32 = 32_768;

/// Default transformed-tensor size limit (4 GiB).
pub const DEFAULT_MAX_TENSOR_SIZE: u64 = 4 * 1024 * 1024 * 1024;

/// Facility limits reported by a [`SoftNnpa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftNnpaConfig {
    /// When `false`, every operation fails with `UNAVAILABLE_FUNCTION`.
    pub installed: bool,
    pub max_dim_idx_size: u32,
    pub max_tensor_size: u64,
}

impl Default for SoftNnpaConfig {
    fn default() -> Self {
        Self {
            installed: true,
            max_dim_idx_size: DEFAULT_MAX_DIM_IDX_SIZE,
            max_tensor_size: DEFAULT_MAX_TENSOR_SIZE,
        }
    }
}

/// The software accelerator.
///
/// Cloning shares the device pool.
#[derive(Debug, Clone)]
pub struct SoftNnpa {
    config: SoftNnpaConfig,
    pool: DevicePool,
}

impl SoftNnpa {
    /// Creates an installed accelerator with default limits and `budget`
    /// bytes of device storage.
    pub fn new(budget: MemoryBudget) -> Self {
        Self::with_config(SoftNnpaConfig::default(), budget)
    }

    pub fn with_config(config: SoftNnpaConfig, budget: MemoryBudget) -> Self {
        tracing::debug!(?config, %budget, "soft accelerator created");
        Self {
            config,
            pool: DevicePool::new(budget),
        }
    }

    /// Creates an accelerator that reports itself as not installed.
    pub fn disabled(budget: MemoryBudget) -> Self {
        Self::with_config(
            SoftNnpaConfig {
                installed: false,
                ..Default::default()
            },
            budget,
        )
    }

    /// Returns the device pool backing tensor storage.
    pub fn pool(&self) -> &DevicePool {
        &self.pool
    }

    pub fn config(&self) -> &SoftNnpaConfig {
        &self.config
    }

    fn availability(&self) -> StatusCode {
        if self.config.installed {
            StatusCode::Ok
        } else {
            StatusCode::UnavailableFunction
        }
    }

    fn validate_shape(&self, op: &'static str, shape: &Shape) -> Result<(), AcceleratorError> {
        let max = self.config.max_dim_idx_size;
        for (name, dim) in ["N", "C", "H", "W"].into_iter().zip(shape.dims()) {
            if dim == 0 || dim > max {
                return Err(AcceleratorError::new(
                    op,
                    StatusCode::InvalidShape,
                    format!("dimension {name} = {dim} outside 1..={max}"),
                ));
            }
        }
        Ok(())
    }
}

/// Visits every logical element of `shape` as `(n, c, h, w)`.
fn for_each_element(shape: &Shape, mut visit: impl FnMut(u32, u32, u32, u32)) {
    for n in 0..shape.n {
        for h in 0..shape.h {
            for w in 0..shape.w {
                for c in 0..shape.c {
                    visit(n, c, h, w);
                }
            }
        }
    }
}

fn map_pool_error(op: &'static str, err: MemoryError) -> AcceleratorError {
    let status = match err {
        MemoryError::ZeroSizedAllocation => StatusCode::InvalidShape,
        MemoryError::OutOfMemory { .. } | MemoryError::InvalidBudget(_) => {
            StatusCode::AllocationFailure
        }
    };
    AcceleratorError::new(op, status, err.to_string())
}

impl TensorAccelerator for SoftNnpa {
    fn name(&self) -> &str {
        "soft-nnpa"
    }

    fn is_installed(&self) -> bool {
        self.config.installed
    }

    fn max_dim_idx_size(&self) -> u32 {
        self.config.max_dim_idx_size
    }

    fn max_tensor_size(&self) -> u64 {
        self.config.max_tensor_size
    }

    fn generate_transformed_desc(
        &self,
        pre: &PreTransformedDesc,
    ) -> Result<TransformedDesc, AcceleratorError> {
        const OP: &str = "generate_transformed_desc";
        self.availability().check(OP)?;
        if pre.dtype() != DType::Fp32 {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::InvalidType,
                format!("host type {} is not supported", pre.dtype()),
            ));
        }
        self.validate_shape(OP, pre.shape())?;
        Ok(TransformedDesc::for_shape(pre.shape()))
    }

    fn init_tensor_with_malloc(
        &self,
        pre: &PreTransformedDesc,
        tfm: &TransformedDesc,
    ) -> Result<AccelTensor, AcceleratorError> {
        const OP: &str = "init_tensor_with_malloc";
        self.availability().check(OP)?;
        if *tfm != TransformedDesc::for_shape(pre.shape()) {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::InvalidShape,
                "transformed descriptor does not match the pre-transform shape",
            ));
        }

        let size = tfm.size_bytes();
        if size > self.config.max_tensor_size {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::InvalidShape,
                format!(
                    "transformed size {size} exceeds limit {}",
                    self.config.max_tensor_size
                ),
            ));
        }
        let bytes = usize::try_from(size).map_err(|_| {
            AcceleratorError::new(OP, StatusCode::InvalidShape, "size exceeds address space")
        })?;

        let buffer = self.pool.allocate(bytes).map_err(|e| map_pool_error(OP, e))?;
        tracing::debug!(
            shape = %pre.shape(),
            bytes = buffer.size_bytes(),
            "tensor storage allocated"
        );
        Ok(AccelTensor::new(*pre, *tfm, buffer))
    }

    fn transform_tensor(
        &self,
        tensor: &mut AccelTensor,
        data: &[f32],
    ) -> Result<(), AcceleratorError> {
        const OP: &str = "transform_tensor";
        self.availability().check(OP)?;
        if tensor.is_transformed() {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::InvalidState,
                "tensor already holds transformed data",
            ));
        }

        let pre = *tensor.pre_desc();
        let tfm = *tensor.transformed_desc();
        if data.len() != pre.num_elements() {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::InvalidBuffer,
                format!("expected {} elements, got {}", pre.num_elements(), data.len()),
            ));
        }
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::ConvertFailure,
                format!("element {i} ({}) has no native representation", data[i]),
            ));
        }

        let shape = *pre.shape();
        let layout = pre.layout();
        let cells = tensor.cells_mut();
        for_each_element(&shape, |n, c, h, w| {
            cells[tfm.cell_offset(n, h, w, c)] = data[layout.index_of(&shape, n, c, h, w)];
        });
        tensor.set_transformed(true);
        Ok(())
    }

    fn elementwise(
        &self,
        op: ElementwiseOp,
        a: &AccelTensor,
        b: &AccelTensor,
        out: &mut AccelTensor,
    ) -> Result<(), AcceleratorError> {
        let name = op.as_str();
        self.availability().check(name)?;
        if !a.is_transformed() || !b.is_transformed() {
            return Err(AcceleratorError::new(
                name,
                StatusCode::InvalidState,
                "input tensor has not been transformed",
            ));
        }
        let tfm = *a.transformed_desc();
        if *b.transformed_desc() != tfm || *out.transformed_desc() != tfm {
            return Err(AcceleratorError::new(
                name,
                StatusCode::InvalidShape,
                "input and output tensors differ in shape",
            ));
        }

        let shape = *a.pre_desc().shape();
        let (lhs, rhs) = (a.cells(), b.cells());
        let dst = out.cells_mut();
        for_each_element(&shape, |n, c, h, w| {
            let at = tfm.cell_offset(n, h, w, c);
            dst[at] = op.apply(lhs[at], rhs[at]);
        });
        out.set_transformed(true);
        tracing::debug!(op = name, elements = shape.num_elements(), "element-wise op done");
        Ok(())
    }

    fn transform_origtensor(
        &self,
        tensor: &AccelTensor,
        out: &mut [f32],
    ) -> Result<(), AcceleratorError> {
        const OP: &str = "transform_origtensor";
        self.availability().check(OP)?;
        if !tensor.is_transformed() {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::InvalidState,
                "tensor holds no transformed data",
            ));
        }

        let pre = tensor.pre_desc();
        let tfm = tensor.transformed_desc();
        if out.len() != pre.num_elements() {
            return Err(AcceleratorError::new(
                OP,
                StatusCode::InvalidBuffer,
                format!("expected {} elements, got {}", pre.num_elements(), out.len()),
            ));
        }

        let shape = *pre.shape();
        let layout = pre.layout();
        let cells = tensor.cells();
        for_each_element(&shape, |n, c, h, w| {
            out[layout.index_of(&shape, n, c, h, w)] = cells[tfm.cell_offset(n, h, w, c)];
        });
        Ok(())
    }

    fn free_tensor_buffer(&self, tensor: AccelTensor) -> Result<(), AcceleratorError> {
        tracing::debug!(bytes = tensor.size_bytes(), "tensor storage released");
        drop(tensor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{FillPattern, Layout};

    fn accel() -> SoftNnpa {
        SoftNnpa::new(MemoryBudget::from_mb(16))
    }

    fn staged(
        accel: &SoftNnpa,
        layout: Layout,
        shape: Shape,
        data: &[f32],
    ) -> AccelTensor {
        let pre = PreTransformedDesc::from_shape(layout, DType::Fp32, shape);
        let tfm = accel.generate_transformed_desc(&pre).unwrap();
        let mut t = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
        accel.transform_tensor(&mut t, data).unwrap();
        t
    }

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32 * 0.5 - 7.0).collect()
    }

    fn round_trip(layout: Layout, shape: Shape) {
        let accel = accel();
        let data = ramp(shape.num_elements());
        let t = staged(&accel, layout, shape, &data);
        let mut back = vec![0.0; data.len()];
        accel.transform_origtensor(&t, &mut back).unwrap();
        assert_eq!(
            back.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            data.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_round_trip_vector() {
        round_trip(Layout::Nchw, Shape::vector(2048));
    }

    #[test]
    fn test_round_trip_padded_nchw() {
        round_trip(Layout::Nchw, Shape::nchw(2, 70, 3, 33));
    }

    #[test]
    fn test_round_trip_padded_nhwc() {
        round_trip(Layout::Nhwc, Shape::nchw(2, 70, 3, 33));
    }

    #[test]
    fn test_padding_stays_zero() {
        let accel = accel();
        let shape = Shape::nchw(1, 3, 1, 5);
        let t = staged(&accel, Layout::Nchw, shape, &vec![9.0; 15]);
        let nonzero = t.cells().iter().filter(|&&c| c != 0.0).count();
        assert_eq!(nonzero, 15);
    }

    #[test]
    fn test_mul_default_inputs() {
        let accel = accel();
        let shape = Shape::vector(2048);
        let a: Vec<f32> = (0..2048).map(|i| FillPattern::INPUT_A.value_at(i)).collect();
        let b: Vec<f32> = (0..2048).map(|i| FillPattern::INPUT_B.value_at(i)).collect();
        let ta = staged(&accel, Layout::Nchw, shape, &a);
        let tb = staged(&accel, Layout::Nchw, shape, &b);

        let mut out = accel
            .init_tensor_with_malloc(ta.pre_desc(), ta.transformed_desc())
            .unwrap();
        accel.mul(&ta, &tb, &mut out).unwrap();
        assert!(out.is_transformed());

        let mut result = vec![0.0; 2048];
        accel.transform_origtensor(&out, &mut result).unwrap();
        for i in 0..2048 {
            assert_eq!(result[i], a[i] * b[i], "index {i}");
        }
    }

    #[test]
    fn test_every_op_matches_scalar() {
        let accel = accel();
        let shape = Shape::nchw(1, 2, 2, 3);
        let a = ramp(12);
        let b: Vec<f32> = (0..12).map(|i| i as f32 + 1.0).collect();
        let ta = staged(&accel, Layout::Nchw, shape, &a);
        let tb = staged(&accel, Layout::Nchw, shape, &b);

        for op in ElementwiseOp::ALL {
            let mut out = accel
                .init_tensor_with_malloc(ta.pre_desc(), ta.transformed_desc())
                .unwrap();
            accel.elementwise(op, &ta, &tb, &mut out).unwrap();
            let mut result = vec![0.0; 12];
            accel.transform_origtensor(&out, &mut result).unwrap();
            for i in 0..12 {
                assert_eq!(result[i], op.apply(a[i], b[i]), "{op} at {i}");
            }
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 0);
        let err = accel().generate_transformed_desc(&pre).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidShape);
    }

    #[test]
    fn test_oversized_dimension_rejected() {
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 32_769);
        let err = accel().generate_transformed_desc(&pre).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidShape);
        assert!(err.detail.contains("W = 32769"));
    }

    #[test]
    fn test_non_fp32_rejected() {
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp16, 1, 1, 1, 8);
        let err = accel().generate_transformed_desc(&pre).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidType);
    }

    #[test]
    fn test_mismatched_descriptor_rejected() {
        let accel = accel();
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 8);
        let other = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 9);
        let tfm = accel.generate_transformed_desc(&other).unwrap();
        let err = accel.init_tensor_with_malloc(&pre, &tfm).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidShape);
    }

    #[test]
    fn test_transform_twice_is_invalid_state() {
        let accel = accel();
        let mut t = staged(&accel, Layout::Nchw, Shape::vector(4), &[1.0; 4]);
        let err = accel.transform_tensor(&mut t, &[1.0; 4]).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidState);
    }

    #[test]
    fn test_transform_wrong_length() {
        let accel = accel();
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 4);
        let tfm = accel.generate_transformed_desc(&pre).unwrap();
        let mut t = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
        let err = accel.transform_tensor(&mut t, &[1.0; 3]).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidBuffer);
        assert!(!t.is_transformed());
    }

    #[test]
    fn test_transform_non_finite() {
        let accel = accel();
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 3);
        let tfm = accel.generate_transformed_desc(&pre).unwrap();
        let mut t = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
        let err = accel
            .transform_tensor(&mut t, &[1.0, f32::NAN, 2.0])
            .unwrap_err();
        assert_eq!(err.status, StatusCode::ConvertFailure);
        assert!(t.cells().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_elementwise_requires_transformed_inputs() {
        let accel = accel();
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 4);
        let tfm = accel.generate_transformed_desc(&pre).unwrap();
        let a = staged(&accel, Layout::Nchw, Shape::vector(4), &[1.0; 4]);
        let b = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
        let mut out = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
        let err = accel.mul(&a, &b, &mut out).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidState);
        assert_eq!(err.op, "mul");
    }

    #[test]
    fn test_elementwise_shape_mismatch() {
        let accel = accel();
        let a = staged(&accel, Layout::Nchw, Shape::vector(4), &[1.0; 4]);
        let b = staged(&accel, Layout::Nchw, Shape::vector(40), &[1.0; 40]);
        let mut out = accel
            .init_tensor_with_malloc(a.pre_desc(), a.transformed_desc())
            .unwrap();
        let err = accel.mul(&a, &b, &mut out).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidShape);
    }

    #[test]
    fn test_readback_checks() {
        let accel = accel();
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 4);
        let tfm = accel.generate_transformed_desc(&pre).unwrap();
        let fresh = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
        let mut out = [0.0f32; 4];
        let err = accel.transform_origtensor(&fresh, &mut out).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidState);

        let t = staged(&accel, Layout::Nchw, Shape::vector(4), &[1.0; 4]);
        let mut short = [0.0f32; 2];
        let err = accel.transform_origtensor(&t, &mut short).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidBuffer);
    }

    #[test]
    fn test_not_installed() {
        let accel = SoftNnpa::disabled(MemoryBudget::from_mb(1));
        assert!(!accel.is_installed());
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 4);
        let err = accel.generate_transformed_desc(&pre).unwrap_err();
        assert_eq!(err.status, StatusCode::UnavailableFunction);
    }

    #[test]
    fn test_pool_exhaustion_is_allocation_failure() {
        // One 2048-wide vector needs 64 pages; allow only one tensor.
        let accel = SoftNnpa::new(MemoryBudget::from_bytes(64 * 4096));
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 2048);
        let tfm = accel.generate_transformed_desc(&pre).unwrap();
        let _first = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
        let err = accel.init_tensor_with_malloc(&pre, &tfm).unwrap_err();
        assert_eq!(err.status, StatusCode::AllocationFailure);
    }

    #[test]
    fn test_max_tensor_size_enforced() {
        let config = SoftNnpaConfig {
            max_tensor_size: 4096,
            ..Default::default()
        };
        let accel = SoftNnpa::with_config(config, MemoryBudget::from_mb(1));
        let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 64);
        let tfm = accel.generate_transformed_desc(&pre).unwrap();
        let err = accel.init_tensor_with_malloc(&pre, &tfm).unwrap_err();
        assert_eq!(err.status, StatusCode::InvalidShape);
    }

    #[test]
    fn test_free_and_drop_release_storage() {
        let accel = accel();
        let a = staged(&accel, Layout::Nchw, Shape::vector(8), &[1.0; 8]);
        let b = staged(&accel, Layout::Nchw, Shape::vector(8), &[2.0; 8]);
        assert!(accel.pool().allocated_bytes() > 0);

        accel.free_tensor_buffer(a).unwrap();
        drop(b);
        assert_eq!(accel.pool().allocated_bytes(), 0);
        assert!(accel.pool().stats().is_balanced());
    }
}
