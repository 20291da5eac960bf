// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element data types a tensor descriptor can name.

use std::fmt;

/// Enumerates the host element types a pre-transform descriptor can carry.
///
/// The harness itself only produces [`DType::Fp32`] buffers; the other
/// variants exist so descriptors can describe them and accelerators can
/// reject them with a proper status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 32-bit IEEE 754 floating point.
    #[default]
    Fp32,
    /// 16-bit IEEE 754 floating point.
    Fp16,
    /// 16-bit brain floating point.
    Bfloat,
    /// 8-bit signed integer.
    Int8,
}

impl DType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::Fp32 => 4,
            DType::Fp16 => 2,
            DType::Bfloat => 2,
            DType::Int8 => 1,
        }
    }

    /// Returns a human-readable label for this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::Fp32 => "fp32",
            DType::Fp16 => "fp16",
            DType::Bfloat => "bfloat",
            DType::Int8 => "int8",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bytes() {
        assert_eq!(DType::Fp32.size_bytes(), 4);
        assert_eq!(DType::Fp16.size_bytes(), 2);
        assert_eq!(DType::Bfloat.size_bytes(), 2);
        assert_eq!(DType::Int8.size_bytes(), 1);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DType::Bfloat).unwrap();
        assert_eq!(json, "\"bfloat\"");
        let back: DType = serde_json::from_str("\"fp32\"").unwrap();
        assert_eq!(back, DType::Fp32);
    }
}
