// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Vector operation wrappers.
//!
//! Lane-wise wrappers are generated from [`Lane`] and [`IntLane`] methods.
//! The standard operator traits delegate to the same functions.

use crate::{IntLane, Lane, Vector, VECTOR_BYTES};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Sub};

macro_rules! lanewise {
    ($(#[$doc:meta])* $name:ident($a:ident) => $bound:ident::$method:ident) => {
        $(#[$doc])*
        pub fn $name<T: $bound, const N: usize>($a: Vector<T, N>) -> Vector<T, N> {
            $a.map(T::$method)
        }
    };
    ($(#[$doc:meta])* $name:ident($a:ident, $b:ident) => $bound:ident::$method:ident) => {
        $(#[$doc])*
        pub fn $name<T: $bound, const N: usize>(
            $a: Vector<T, N>,
            $b: Vector<T, N>,
        ) -> Vector<T, N> {
            $a.zip_with($b, T::$method)
        }
    };
}

lanewise!(
    /// Negates every lane.
    vec_neg(a) => Lane::lane_neg
);
lanewise!(
    /// `a + b` per lane.
    vec_add(a, b) => Lane::lane_add
);
lanewise!(
    /// `a - b` per lane.
    vec_sub(a, b) => Lane::lane_sub
);
lanewise!(
    /// `a * b` per lane.
    vec_mul(a, b) => Lane::lane_mul
);
lanewise!(
    /// `a / b` per lane.
    ///
    /// # Panics
    /// Panics if an integer lane of `b` is zero.
    vec_div(a, b) => Lane::lane_div
);
lanewise!(
    /// Shifts each lane of `a` left by the matching lane of `b`.
    vec_sl(a, b) => IntLane::lane_shl
);
lanewise!(
    /// Logical right shift of each lane of `a` by the matching lane of `b`.
    vec_sr(a, b) => IntLane::lane_shr_logical
);
lanewise!(
    /// Arithmetic right shift of each lane of `a` by the matching lane of `b`.
    vec_sra(a, b) => IntLane::lane_shr_arith
);
lanewise!(vec_and(a, b) => IntLane::lane_and);
lanewise!(vec_or(a, b) => IntLane::lane_or);
lanewise!(vec_xor(a, b) => IntLane::lane_xor);

/// Shifts the whole register left by `octets` bytes (mod 16), filling with
/// zeros. Lane 0 is the most significant end.
pub fn vec_slo<T: Lane, const N: usize>(a: Vector<T, N>, octets: u32) -> Vector<T, N> {
    let k = octets as usize % VECTOR_BYTES;
    let src = a.to_be_bytes();
    let mut out = [0u8; VECTOR_BYTES];
    out[..VECTOR_BYTES - k].copy_from_slice(&src[k..]);
    Vector::from_be_bytes(out)
}

/// Shifts the whole register right by `octets` bytes (mod 16), filling
/// with zeros.
pub fn vec_sro<T: Lane, const N: usize>(a: Vector<T, N>, octets: u32) -> Vector<T, N> {
    let k = octets as usize % VECTOR_BYTES;
    let src = a.to_be_bytes();
    let mut out = [0u8; VECTOR_BYTES];
    out[k..].copy_from_slice(&src[..VECTOR_BYTES - k]);
    Vector::from_be_bytes(out)
}

// ── Operator traits ────────────────────────────────────────────

macro_rules! binary_operator {
    ($($trait:ident::$method:ident => $bound:ident, $func:ident;)*) => {$(
        impl<T: $bound, const N: usize> $trait for Vector<T, N> {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                $func(self, rhs)
            }
        }
    )*};
}

binary_operator! {
    Add::add => Lane, vec_add;
    Sub::sub => Lane, vec_sub;
    Mul::mul => Lane, vec_mul;
    Div::div => Lane, vec_div;
    BitAnd::bitand => IntLane, vec_and;
    BitOr::bitor => IntLane, vec_or;
    BitXor::bitxor => IntLane, vec_xor;
}

impl<T: Lane, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        vec_neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Double64x2, Float32x4, Int16x8, Int32x4, Int8x16, UInt32x4, UInt8x16};

    #[test]
    fn test_arithmetic_matches_scalar() {
        let a = Float32x4::new([1.0, -2.5, 3.0, 0.5]);
        let b = Float32x4::new([2.0, 4.0, -1.0, 0.25]);
        for i in 0..4 {
            assert_eq!(vec_add(a, b)[i], a[i] + b[i]);
            assert_eq!(vec_sub(a, b)[i], a[i] - b[i]);
            assert_eq!(vec_mul(a, b)[i], a[i] * b[i]);
            assert_eq!(vec_div(a, b)[i], a[i] / b[i]);
            assert_eq!(vec_neg(a)[i], -a[i]);
        }
        assert_eq!(a + b, vec_add(a, b));
        assert_eq!(-a, vec_neg(a));
    }

    #[test]
    fn test_double_lanes() {
        let a = Double64x2::new([1e300, -3.0]);
        assert_eq!((a * Double64x2::splat(10.0)).to_array(), [1e301, -30.0]);
    }

    #[test]
    fn test_integer_wrap() {
        let a = Int8x16::splat(i8::MAX);
        assert_eq!(vec_add(a, Int8x16::splat(1)), Int8x16::splat(i8::MIN));
        let u = UInt32x4::new([0, 1, 2, 3]);
        assert_eq!(vec_sub(u, UInt32x4::splat(1))[0], u32::MAX);
    }

    #[test]
    #[should_panic]
    fn test_integer_divide_by_zero_panics() {
        let _ = vec_div(Int32x4::splat(1), Int32x4::new([1, 1, 0, 1]));
    }

    #[test]
    fn test_shifts() {
        let a = Int16x8::new([-16, 16, 1, -1, 0, 3, 5, i16::MIN]);
        let by2 = Int16x8::splat(2);
        assert_eq!(vec_sl(a, by2)[1], 64);
        assert_eq!(vec_sra(a, by2)[0], -4);
        assert_eq!(vec_sr(a, by2)[0], 0x3ffc);
        // Count 18 is 2 mod 16.
        assert_eq!(vec_sl(a, Int16x8::splat(18)), vec_sl(a, by2));
    }

    #[test]
    fn test_right_shift_kind_follows_name_not_signedness() {
        let signed = Int32x4::splat(i32::MIN);
        let unsigned = UInt32x4::splat(0x8000_0000);
        let by4 = |v: i32| Int32x4::splat(v);

        assert_eq!(vec_sr(signed, by4(4))[0], 0x0800_0000);
        assert_eq!(vec_sra(signed, by4(4))[0], i32::MIN >> 4);
        assert_eq!(vec_sr(unsigned, UInt32x4::splat(4))[0], 0x0800_0000);
        assert_eq!(vec_sra(unsigned, UInt32x4::splat(4))[0], 0xf800_0000);
    }

    #[test]
    fn test_bitwise() {
        let a = UInt8x16::splat(0b1100);
        let b = UInt8x16::splat(0b1010);
        assert_eq!(vec_and(a, b)[0], 0b1000);
        assert_eq!(vec_or(a, b)[0], 0b1110);
        assert_eq!(vec_xor(a, b)[0], 0b0110);
        assert_eq!(a ^ b, vec_xor(a, b));
    }

    #[test]
    fn test_octet_shifts() {
        let a = Int32x4::new([1, 2, 3, 4]);
        assert_eq!(vec_slo(a, 4).to_array(), [2, 3, 4, 0]);
        assert_eq!(vec_sro(a, 4).to_array(), [0, 1, 2, 3]);
        assert_eq!(vec_slo(a, 0), a);
        assert_eq!(vec_slo(a, 16), a);
        assert_eq!(vec_sro(a, 20), vec_sro(a, 4));

        let bytes = UInt8x16::new([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        assert_eq!(vec_slo(bytes, 15)[0], 16);
        assert_eq!(vec_sro(bytes, 1)[1], 1);
        assert_eq!(vec_sro(bytes, 1)[0], 0);
    }

    #[test]
    fn test_octet_shift_splits_lanes() {
        let a = Int32x4::new([0x0102_0304, 0, 0, 0]);
        assert_eq!(vec_sro(a, 2).to_array(), [0x0000_0102, 0x0304_0000, 0, 0]);
    }
}
