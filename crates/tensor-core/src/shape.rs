// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Four-dimensional `(N, C, H, W)` shape descriptors.

use crate::{DType, TensorError};
use std::fmt;
use std::str::FromStr;

/// Describes the logical extent of a tensor as `(N, C, H, W)`.
///
/// Dimensions are `u32`, matching what accelerator descriptors carry.
/// A shape with any zero dimension is valid on the host and simply has
/// no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    pub n: u32,
    pub c: u32,
    pub h: u32,
    pub w: u32,
}

impl Shape {
    /// Creates a shape from its four dimensions.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::nchw(1, 1, 1, 2048);
    /// assert_eq!(s.num_elements(), 2048);
    /// ```
    pub fn nchw(n: u32, c: u32, h: u32, w: u32) -> Self {
        Self { n, c, h, w }
    }

    /// Creates a `(1, 1, 1, len)` shape.
    pub fn vector(len: u32) -> Self {
        Self::nchw(1, 1, 1, len)
    }

    /// Returns the dimensions in `[N, C, H, W]` order.
    pub fn dims(&self) -> [u32; 4] {
        [self.n, self.c, self.h, self.w]
    }

    /// Returns the total number of elements, or an error if the product
    /// of the dimensions does not fit in `usize`.
    pub fn checked_num_elements(&self) -> Result<usize, TensorError> {
        self.dims()
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d as usize))
            .ok_or_else(|| {
                TensorError::InvalidShape(format!("{self}: element count overflows usize"))
            })
    }

    /// Returns the total number of elements, saturating at `usize::MAX`.
    ///
    /// Use [`checked_num_elements`](Self::checked_num_elements) for shapes
    /// that come from user input.
    pub fn num_elements(&self) -> usize {
        self.dims()
            .iter()
            .fold(1usize, |acc, &d| acc.saturating_mul(d as usize))
    }

    /// Returns `true` if the shape has no elements.
    pub fn is_empty(&self) -> bool {
        self.dims().contains(&0)
    }

    /// Computes the host memory footprint in bytes for a given [`DType`].
    pub fn checked_size_bytes(&self, dtype: DType) -> Result<usize, TensorError> {
        self.checked_num_elements()?
            .checked_mul(dtype.size_bytes())
            .ok_or_else(|| {
                TensorError::InvalidShape(format!("{self}: {dtype} footprint overflows usize"))
            })
    }

    /// Host memory footprint in bytes, saturating at `usize::MAX`.
    pub fn size_bytes(&self, dtype: DType) -> usize {
        self.num_elements().saturating_mul(dtype.size_bytes())
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::vector(2048)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.n, self.c, self.h, self.w)
    }
}

impl From<[u32; 4]> for Shape {
    fn from(d: [u32; 4]) -> Self {
        Self::nchw(d[0], d[1], d[2], d[3])
    }
}

/// Parses `"N,C,H,W"` (commas or `x` as separators).
impl FromStr for Shape {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|ch| ch == ',' || ch == 'x')
            .map(str::trim)
            .collect();
        if parts.len() != 4 {
            return Err(TensorError::InvalidShape(format!(
                "'{s}': expected four dimensions N,C,H,W"
            )));
        }
        let mut dims = [0u32; 4];
        for (slot, part) in dims.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                TensorError::InvalidShape(format!("'{s}': '{part}' is not a dimension"))
            })?;
        }
        Ok(Self::from(dims))
    }
}
