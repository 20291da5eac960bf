// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Compilation target detection and the NEON bridge.

use std::fmt;

/// The vector-capable architecture this crate was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetArch {
    S390x,
    Aarch64,
    Other,
}

impl TargetArch {
    /// The architecture of the current build.
    pub const fn current() -> Self {
        if cfg!(target_arch = "s390x") {
            TargetArch::S390x
        } else if cfg!(target_arch = "aarch64") {
            TargetArch::Aarch64
        } else {
            TargetArch::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetArch::S390x => "s390x",
            TargetArch::Aarch64 => "aarch64",
            TargetArch::Other => "other",
        }
    }

    /// Name of the native 128-bit vector facility, if the target has one.
    pub fn vector_facility(self) -> Option<&'static str> {
        match self {
            TargetArch::S390x => Some("z/Architecture vector facility"),
            TargetArch::Aarch64 => Some("NEON"),
            TargetArch::Other => None,
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(target_arch = "aarch64")]
mod neon {
    use crate::Float32x4;
    use std::arch::aarch64::{float32x4_t, vld1q_f32, vst1q_f32};

    impl From<Float32x4> for float32x4_t {
        fn from(v: Float32x4) -> Self {
            // SAFETY: NEON is part of the aarch64 baseline and the source
            // holds four contiguous f32.
            unsafe { vld1q_f32(v.as_array().as_ptr()) }
        }
    }

    impl From<float32x4_t> for Float32x4 {
        fn from(v: float32x4_t) -> Self {
            let mut lanes = [0.0f32; 4];
            // SAFETY: as above; the destination has room for four f32.
            unsafe { vst1q_f32(lanes.as_mut_ptr(), v) };
            Float32x4::new(lanes)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::arch::aarch64::vaddq_f32;

        #[test]
        fn test_neon_round_trip() {
            let v = Float32x4::new([1.0, 2.0, 3.0, 4.0]);
            let native: float32x4_t = v.into();
            // SAFETY: NEON is part of the aarch64 baseline.
            let doubled = unsafe { vaddq_f32(native, native) };
            assert_eq!(Float32x4::from(doubled).to_array(), [2.0, 4.0, 6.0, 8.0]);
        }
    }
}
