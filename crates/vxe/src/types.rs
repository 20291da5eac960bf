// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The 128-bit vector type and its lane aliases.

use crate::Lane;
use std::ops::{Index, IndexMut};

/// Size of every vector register in bytes.
pub const VECTOR_BYTES: usize = 16;

/// A 16-byte, 16-byte-aligned vector of `N` lanes of `T`.
///
/// Only shapes with `N * size_of::<T>() == 16` can be constructed; any
/// other instantiation fails to compile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(16))]
pub struct Vector<T, const N: usize>([T; N]);

pub type Char8x16 = Vector<i8, 16>;
pub type UChar8x16 = Vector<u8, 16>;
pub type Int8x16 = Vector<i8, 16>;
pub type Int16x8 = Vector<i16, 8>;
pub type Int32x4 = Vector<i32, 4>;
pub type UInt8x16 = Vector<u8, 16>;
pub type UInt16x8 = Vector<u16, 8>;
pub type UInt32x4 = Vector<u32, 4>;
pub type Float32x4 = Vector<f32, 4>;
pub type Double64x2 = Vector<f64, 2>;
pub type Long64x2 = Vector<i64, 2>;
pub type ULong64x2 = Vector<u64, 2>;

const _: () = {
    use std::mem::{align_of, size_of};
    assert!(size_of::<Int8x16>() == VECTOR_BYTES && align_of::<Int8x16>() == 16);
    assert!(size_of::<Int16x8>() == VECTOR_BYTES && align_of::<Int16x8>() == 16);
    assert!(size_of::<Int32x4>() == VECTOR_BYTES && align_of::<Int32x4>() == 16);
    assert!(size_of::<Float32x4>() == VECTOR_BYTES && align_of::<Float32x4>() == 16);
    assert!(size_of::<Double64x2>() == VECTOR_BYTES && align_of::<Double64x2>() == 16);
    assert!(size_of::<ULong64x2>() == VECTOR_BYTES && align_of::<ULong64x2>() == 16);
};

impl<T: Lane, const N: usize> Vector<T, N> {
    /// Number of lanes.
    pub const LANES: usize = N;

    const FILLS_REGISTER: () = assert!(N * T::BYTES == VECTOR_BYTES, "vector must be 16 bytes");

    pub fn new(lanes: [T; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FILLS_REGISTER;
        Self(lanes)
    }

    /// All lanes set to `value`.
    pub fn splat(value: T) -> Self {
        Self::new([value; N])
    }

    pub fn to_array(self) -> [T; N] {
        self.0
    }

    pub fn as_array(&self) -> &[T; N] {
        &self.0
    }

    /// Applies `f` to every lane.
    pub fn map(self, f: impl Fn(T) -> T) -> Self {
        Self(self.0.map(f))
    }

    /// Combines corresponding lanes of `self` and `other` with `f`.
    pub fn zip_with(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut lanes = self.0;
        for (lane, rhs) in lanes.iter_mut().zip(other.0) {
            *lane = f(*lane, rhs);
        }
        Self(lanes)
    }

    /// The register image: lane 0 first, each lane big-endian.
    pub fn to_be_bytes(self) -> [u8; VECTOR_BYTES] {
        let mut bytes = [0u8; VECTOR_BYTES];
        for (chunk, lane) in bytes.chunks_exact_mut(T::BYTES).zip(self.0) {
            lane.write_be(chunk);
        }
        bytes
    }

    /// Inverse of [`to_be_bytes`](Self::to_be_bytes).
    pub fn from_be_bytes(bytes: [u8; VECTOR_BYTES]) -> Self {
        let mut lanes = [T::default(); N];
        for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(T::BYTES)) {
            *lane = T::read_be(chunk);
        }
        Self::new(lanes)
    }
}

impl<T: Lane, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::splat(T::default())
    }
}

impl<T: Lane, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(lanes: [T; N]) -> Self {
        Self::new(lanes)
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, lane: usize) -> &T {
        &self.0[lane]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, lane: usize) -> &mut T {
        &mut self.0[lane]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<UChar8x16>(), 16);
        assert_eq!(std::mem::align_of::<Long64x2>(), 16);
        assert_eq!(Int16x8::LANES, 8);
        assert_eq!(Double64x2::LANES, 2);
    }

    #[test]
    fn test_splat_and_index() {
        let mut v = UInt16x8::splat(7);
        assert_eq!(v[3], 7);
        v[3] = 9;
        assert_eq!(v.to_array(), [7, 7, 7, 9, 7, 7, 7, 7]);
        assert_eq!(Float32x4::default().to_array(), [0.0; 4]);
    }

    #[test]
    fn test_be_bytes() {
        let v = Int32x4::new([1, 2, -1, 0x0102_0304]);
        let bytes = v.to_be_bytes();
        assert_eq!(&bytes[..4], &[0, 0, 0, 1]);
        assert_eq!(&bytes[8..12], &[0xff; 4]);
        assert_eq!(&bytes[12..], &[1, 2, 3, 4]);
        assert_eq!(Int32x4::from_be_bytes(bytes), v);
    }

    #[test]
    fn test_map_and_zip() {
        let a = Int32x4::from([1, 2, 3, 4]);
        let b = Int32x4::splat(10);
        assert_eq!(a.map(|x| x * 2).to_array(), [2, 4, 6, 8]);
        assert_eq!(a.zip_with(b, |x, y| y - x).to_array(), [9, 8, 7, 6]);
    }
}
