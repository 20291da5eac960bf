// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned host buffers in linear memory.

use crate::{Shape, TensorError};

/// An owned, contiguous `f32` buffer with a logical [`Shape`].
///
/// `HostBuffer` is what the harness fills, hands to the accelerator's
/// transform, and receives back after the computation. The element order
/// is whatever [`Layout`](crate::Layout) the caller pairs it with.
#[derive(Debug, Clone, PartialEq)]
pub struct HostBuffer {
    shape: Shape,
    data: Vec<f32>,
}

impl HostBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{HostBuffer, Shape};
    /// let b = HostBuffer::zeros(Shape::vector(4)).unwrap();
    /// assert_eq!(b.as_slice(), &[0.0; 4]);
    /// ```
    pub fn zeros(shape: Shape) -> Result<Self, TensorError> {
        Self::filled_with(shape, |_| 0.0)
    }

    /// Allocates a buffer for `shape` and sets element `i` to `fill(i)`.
    ///
    /// Allocation goes through `try_reserve_exact`, so an exhausted host
    /// heap surfaces as [`TensorError::AllocationFailed`] instead of an abort.
    /// A shape whose element count overflows `usize` is
    /// [`TensorError::InvalidShape`].
    pub fn filled_with<F>(shape: Shape, fill: F) -> Result<Self, TensorError>
    where
        F: Fn(usize) -> f32,
    {
        let elements = shape.checked_num_elements()?;
        let mut data = Vec::new();
        data.try_reserve_exact(elements)
            .map_err(|_| TensorError::AllocationFailed { elements })?;
        data.extend((0..elements).map(fill));
        Ok(Self { shape, data })
    }

    /// Wraps an existing vector.
    ///
    /// Returns an error if `data.len()` differs from `shape.num_elements()`.
    pub fn from_vec(shape: Shape, data: Vec<f32>) -> Result<Self, TensorError> {
        let expected = shape.num_elements();
        if data.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the buffer's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the memory footprint of the elements in bytes.
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the buffer and returns the underlying vector.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FillPattern;

    #[test]
    fn test_zeros() {
        let b = HostBuffer::zeros(Shape::nchw(1, 2, 3, 4)).unwrap();
        assert_eq!(b.len(), 24);
        assert_eq!(b.size_bytes(), 96);
        assert!(b.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_filled_with_pattern() {
        let p = FillPattern::INPUT_B;
        let b = HostBuffer::filled_with(Shape::vector(300), |i| p.value_at(i)).unwrap();
        assert_eq!(b.as_slice()[0], 2.0);
        assert_eq!(b.as_slice()[127], 129.0);
        assert_eq!(b.as_slice()[128], 2.0);
        assert_eq!(b.as_slice()[299], (299 % 128) as f32 + 2.0);
    }

    #[test]
    fn test_empty_shape() {
        let b = HostBuffer::filled_with(Shape::nchw(1, 1, 1, 0), |_| 1.0).unwrap();
        assert!(b.is_empty());
        assert_eq!(b.size_bytes(), 0);
    }

    #[test]
    fn test_overflowing_shape_is_invalid() {
        let err = HostBuffer::zeros(Shape::nchw(65536, 65536, 65536, 65536)).unwrap_err();
        assert!(matches!(err, TensorError::InvalidShape(_)));
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let err = HostBuffer::from_vec(Shape::vector(4), vec![1.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_mutation_and_into_vec() {
        let mut b = HostBuffer::from_vec(Shape::vector(3), vec![1.0, 2.0, 3.0]).unwrap();
        b.as_mut_slice()[1] = 20.0;
        assert_eq!(b.into_vec(), vec![1.0, 20.0, 3.0]);
    }
}
