// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pre-transform and transformed tensor descriptors.
//!
//! The transformed layout is stick based. A *stick* holds
//! [`ELEMENTS_PER_STICK`] consecutive values of the innermost dimension
//! (`C`); [`STICKS_PER_PAGE`] sticks, one per `W` position, fill a page.
//! `C` is padded up to whole sticks and `W` up to whole pages:
//!
//! ```text
//! offset(n, h, w, c) = (((n·H + h)·c_groups + c/64)·w_pad + w)·64 + c mod 64
//!     c_groups = ceil(C / 64)
//!     w_pad    = ceil(W / 32) · 32
//! ```

use device_memory::{CELLS_PER_PAGE, CELL_BYTES};
use tensor_core::{DType, Layout, Shape};

/// Native elements per stick.
pub const ELEMENTS_PER_STICK: usize = 64;

/// Sticks per device page.
pub const STICKS_PER_PAGE: usize = 32;

const _: () = assert!(ELEMENTS_PER_STICK * STICKS_PER_PAGE == CELLS_PER_PAGE);

/// Describes a tensor as the host sees it, before layout conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreTransformedDesc {
    layout: Layout,
    dtype: DType,
    shape: Shape,
}

impl PreTransformedDesc {
    /// Builds a descriptor from a layout, element type and `N, C, H, W`.
    pub fn new(layout: Layout, dtype: DType, n: u32, c: u32, h: u32, w: u32) -> Self {
        Self::from_shape(layout, dtype, Shape::nchw(n, c, h, w))
    }

    pub fn from_shape(layout: Layout, dtype: DType, shape: Shape) -> Self {
        Self {
            layout,
            dtype,
            shape,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of logical elements.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }
}

/// Accelerator-native dimension order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NativeLayout {
    Nhwc,
}

/// Accelerator-native tensor format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NativeFormat {
    /// 4-D feature tensor.
    Feature,
}

/// Accelerator-native element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NativeType {
    /// 16-bit deep-learning float. Only its width matters for accounting.
    DlFloat16,
}

/// Describes the accelerator-native arrangement of a tensor.
///
/// Dimensions are named innermost-first: `dim1 = C`, `dim2 = W`,
/// `dim3 = H`, `dim4 = N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransformedDesc {
    pub layout: NativeLayout,
    pub format: NativeFormat,
    pub dtype: NativeType,
    pub dim4: u32,
    pub dim3: u32,
    pub dim2: u32,
    pub dim1: u32,
}

impl TransformedDesc {
    /// Derives the native descriptor for a pre-transform shape.
    pub(crate) fn for_shape(shape: &Shape) -> Self {
        Self {
            layout: NativeLayout::Nhwc,
            format: NativeFormat::Feature,
            dtype: NativeType::DlFloat16,
            dim4: shape.n,
            dim3: shape.h,
            dim2: shape.w,
            dim1: shape.c,
        }
    }

    /// Number of sticks needed to cover `dim1`.
    pub fn c_groups(&self) -> u64 {
        (self.dim1 as u64).div_ceil(ELEMENTS_PER_STICK as u64)
    }

    /// `dim2` rounded up to whole pages of sticks.
    pub fn padded_w(&self) -> u64 {
        (self.dim2 as u64).div_ceil(STICKS_PER_PAGE as u64) * STICKS_PER_PAGE as u64
    }

    /// Total cells including padding.
    pub fn num_cells(&self) -> u64 {
        self.dim4 as u64
            * self.dim3 as u64
            * self.c_groups()
            * self.padded_w()
            * ELEMENTS_PER_STICK as u64
    }

    /// Accounted device size in bytes. Always a whole number of pages.
    pub fn size_bytes(&self) -> u64 {
        self.num_cells() * CELL_BYTES as u64
    }

    /// Returns the cell offset of element `(n, h, w, c)`.
    pub fn cell_offset(&self, n: u32, h: u32, w: u32, c: u32) -> usize {
        let stick = ELEMENTS_PER_STICK as u64;
        let row = (n as u64 * self.dim3 as u64 + h as u64) * self.c_groups() + c as u64 / stick;
        ((row * self.padded_w() + w as u64) * stick + c as u64 % stick) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use device_memory::PAGE_SIZE;

    #[test]
    fn test_dims_are_innermost_first() {
        let t = TransformedDesc::for_shape(&Shape::nchw(2, 3, 4, 5));
        assert_eq!((t.dim4, t.dim3, t.dim2, t.dim1), (2, 4, 5, 3));
    }

    #[test]
    fn test_vector_size() {
        let t = TransformedDesc::for_shape(&Shape::vector(2048));
        assert_eq!(t.c_groups(), 1);
        assert_eq!(t.padded_w(), 2048);
        assert_eq!(t.num_cells(), 2048 * 64);
        assert_eq!(t.size_bytes(), 64 * PAGE_SIZE as u64);
    }

    #[test]
    fn test_padding_rounds_up() {
        let t = TransformedDesc::for_shape(&Shape::nchw(1, 65, 1, 33));
        assert_eq!(t.c_groups(), 2);
        assert_eq!(t.padded_w(), 64);
        assert_eq!(t.size_bytes() % PAGE_SIZE as u64, 0);
    }

    #[test]
    fn test_cell_offsets() {
        let t = TransformedDesc::for_shape(&Shape::nchw(1, 70, 2, 3));
        assert_eq!(t.cell_offset(0, 0, 0, 0), 0);
        assert_eq!(t.cell_offset(0, 0, 0, 1), 1);
        assert_eq!(t.cell_offset(0, 0, 1, 0), 64);
        // Second stick group starts after a full padded row of sticks.
        assert_eq!(t.cell_offset(0, 0, 0, 64), 32 * 64);
        // Next H row starts after both stick groups.
        assert_eq!(t.cell_offset(0, 1, 0, 0), 2 * 32 * 64);
        assert!(t.cell_offset(0, 1, 2, 69) < t.num_cells() as usize);
    }

    #[test]
    fn test_pre_desc_accessors() {
        let d = PreTransformedDesc::new(Layout::Nhwc, DType::Fp32, 1, 2, 3, 4);
        assert_eq!(d.layout(), Layout::Nhwc);
        assert_eq!(d.dtype(), DType::Fp32);
        assert_eq!(d.num_elements(), 24);
    }
}
