// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Scalar lane semantics.
//!
//! Integer arithmetic wraps. Shift counts are reduced modulo the lane width.

use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// A scalar type that can occupy a vector lane.
pub trait Lane: Copy + Default + PartialEq + fmt::Debug + fmt::Display + sealed::Sealed {
    /// Width of one lane in bytes.
    const BYTES: usize;

    fn lane_neg(self) -> Self;
    fn lane_add(self, rhs: Self) -> Self;
    fn lane_sub(self, rhs: Self) -> Self;
    fn lane_mul(self, rhs: Self) -> Self;
    /// # Panics
    /// Integer lanes panic on a zero divisor, as `/` does.
    fn lane_div(self, rhs: Self) -> Self;

    /// Writes the lane big-endian into `out`, which is `BYTES` long.
    fn write_be(self, out: &mut [u8]);
    /// Reads a big-endian lane from `bytes`, which is `BYTES` long.
    fn read_be(bytes: &[u8]) -> Self;
}

/// Integer lanes: shifts and bitwise logic.
pub trait IntLane: Lane {
    fn lane_shl(self, count: Self) -> Self;
    /// Shift right filling with zeros, regardless of signedness.
    fn lane_shr_logical(self, count: Self) -> Self;
    /// Shift right replicating the sign bit, regardless of signedness.
    fn lane_shr_arith(self, count: Self) -> Self;
    fn lane_and(self, rhs: Self) -> Self;
    fn lane_or(self, rhs: Self) -> Self;
    fn lane_xor(self, rhs: Self) -> Self;
}

macro_rules! impl_lane_bytes {
    ($t:ty) => {
        const BYTES: usize = std::mem::size_of::<$t>();

        fn write_be(self, out: &mut [u8]) {
            out.copy_from_slice(&self.to_be_bytes());
        }

        fn read_be(bytes: &[u8]) -> Self {
            let mut buf = [0u8; std::mem::size_of::<$t>()];
            buf.copy_from_slice(bytes);
            <$t>::from_be_bytes(buf)
        }
    };
}

macro_rules! impl_int_lane {
    ($($t:ty => unsigned $u:ty, signed $s:ty;)*) => {$(
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            impl_lane_bytes!($t);

            fn lane_neg(self) -> Self {
                self.wrapping_neg()
            }

            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            fn lane_div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }
        }

        impl IntLane for $t {
            // `wrapping_sh*` masks the count to the lane width.
            fn lane_shl(self, count: Self) -> Self {
                self.wrapping_shl(count as u32)
            }

            fn lane_shr_logical(self, count: Self) -> Self {
                (self as $u).wrapping_shr(count as u32) as $t
            }

            fn lane_shr_arith(self, count: Self) -> Self {
                (self as $s).wrapping_shr(count as u32) as $t
            }

            fn lane_and(self, rhs: Self) -> Self {
                self & rhs
            }

            fn lane_or(self, rhs: Self) -> Self {
                self | rhs
            }

            fn lane_xor(self, rhs: Self) -> Self {
                self ^ rhs
            }
        }
    )*};
}

macro_rules! impl_float_lane {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            impl_lane_bytes!($t);

            fn lane_neg(self) -> Self {
                -self
            }

            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }

            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }
        }
    )*};
}

impl_int_lane! {
    i8 => unsigned u8, signed i8;
    u8 => unsigned u8, signed i8;
    i16 => unsigned u16, signed i16;
    u16 => unsigned u16, signed i16;
    i32 => unsigned u32, signed i32;
    u32 => unsigned u32, signed i32;
    i64 => unsigned u64, signed i64;
    u64 => unsigned u64, signed i64;
}

impl_float_lane!(f32, f64);
