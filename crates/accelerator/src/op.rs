// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-wise binary primitives.

use std::fmt;
use std::str::FromStr;

/// The element-wise primitives an accelerator exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementwiseOp {
    Add,
    Sub,
    #[default]
    Mul,
    Div,
    Min,
    Max,
}

impl ElementwiseOp {
    pub const ALL: [ElementwiseOp; 6] = [
        ElementwiseOp::Add,
        ElementwiseOp::Sub,
        ElementwiseOp::Mul,
        ElementwiseOp::Div,
        ElementwiseOp::Min,
        ElementwiseOp::Max,
    ];

    /// Applies the primitive to one pair of scalars in plain `f32` arithmetic.
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            ElementwiseOp::Add => a + b,
            ElementwiseOp::Sub => a - b,
            ElementwiseOp::Mul => a * b,
            ElementwiseOp::Div => a / b,
            ElementwiseOp::Min => a.min(b),
            ElementwiseOp::Max => a.max(b),
        }
    }

    /// Infix symbol used in verification output.
    pub fn symbol(self) -> &'static str {
        match self {
            ElementwiseOp::Add => "+",
            ElementwiseOp::Sub => "-",
            ElementwiseOp::Mul => "*",
            ElementwiseOp::Div => "/",
            ElementwiseOp::Min => "min",
            ElementwiseOp::Max => "max",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementwiseOp::Add => "add",
            ElementwiseOp::Sub => "sub",
            ElementwiseOp::Mul => "mul",
            ElementwiseOp::Div => "div",
            ElementwiseOp::Min => "min",
            ElementwiseOp::Max => "max",
        }
    }
}

impl fmt::Display for ElementwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementwiseOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown op '{s}'; expected one of add, sub, mul, div, min, max")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(ElementwiseOp::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(ElementwiseOp::Sub.apply(2.0, 3.0), -1.0);
        assert_eq!(ElementwiseOp::Mul.apply(2.0, 3.0), 6.0);
        assert_eq!(ElementwiseOp::Div.apply(3.0, 2.0), 1.5);
        assert_eq!(ElementwiseOp::Min.apply(2.0, 3.0), 2.0);
        assert_eq!(ElementwiseOp::Max.apply(2.0, 3.0), 3.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("mul".parse::<ElementwiseOp>().unwrap(), ElementwiseOp::Mul);
        assert_eq!(" MAX ".parse::<ElementwiseOp>().unwrap(), ElementwiseOp::Max);
        assert!("pow".parse::<ElementwiseOp>().is_err());
    }

    #[test]
    fn test_default_is_mul() {
        assert_eq!(ElementwiseOp::default(), ElementwiseOp::Mul);
        assert_eq!(ElementwiseOp::Mul.symbol(), "*");
    }
}
