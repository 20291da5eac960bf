// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # vxe
//!
//! Portable 128-bit vector types and lane-wise operations mirroring the
//! s390x vector facility, with a NEON bridge on AArch64.
//!
//! Every vector is 16 bytes, 16-byte aligned. Operations are plain Rust
//! over the lane array, so results are identical on every target.
//! Whole-register octet shifts ([`vec_slo`], [`vec_sro`]) use the s390x
//! register view: lane 0 is most significant and each lane is big-endian.
//!
//! # Example
//! ```
//! use vxe::{vec_add, vec_sl, Float32x4, Int32x4};
//!
//! let a = Float32x4::new([1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(vec_add(a, a).to_array(), [2.0, 4.0, 6.0, 8.0]);
//!
//! let b = Int32x4::new([1, 1, 1, 1]);
//! assert_eq!(vec_sl(b, Int32x4::new([0, 1, 2, 33])).to_array(), [1, 2, 4, 2]);
//!
//! assert!(vxe::hsum(a).is_err());
//! ```

mod arch;
mod error;
mod hsum;
mod lane;
mod ops;
mod print;
mod types;

pub use arch::TargetArch;
pub use error::VxeError;
pub use hsum::hsum;
pub use lane::{IntLane, Lane};
pub use ops::{
    vec_add, vec_and, vec_div, vec_mul, vec_neg, vec_or, vec_sl, vec_slo, vec_sr, vec_sra,
    vec_sro, vec_sub, vec_xor,
};
pub use print::{
    format_f32, format_s16, format_s32, format_s8, format_u16, format_u32, format_u8,
    printv_f32, printv_s16, printv_s32, printv_s8, printv_u16, printv_u32, printv_u8,
};
pub use types::{
    Char8x16, Double64x2, Float32x4, Int16x8, Int32x4, Int8x16, Long64x2, UChar8x16,
    UInt16x8, UInt32x4, UInt8x16, ULong64x2, Vector, VECTOR_BYTES,
};
