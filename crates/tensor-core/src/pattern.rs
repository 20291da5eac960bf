// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Deterministic synthetic input pattern.

/// A periodic ramp: value `i` is `(i mod period) + offset`.
///
/// The default inputs use period 128 with offsets 1.0 and 2.0, which keeps
/// every product exactly representable in `f32`.
///
/// # Examples
/// ```
/// use tensor_core::FillPattern;
/// let a = FillPattern::INPUT_A;
/// assert_eq!(a.value_at(0), 1.0);
/// assert_eq!(a.value_at(127), 128.0);
/// assert_eq!(a.value_at(128), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FillPattern {
    pub period: usize,
    pub offset: f32,
}

impl FillPattern {
    /// Default pattern for the first input.
    pub const INPUT_A: FillPattern = FillPattern::new(128, 1.0);
    /// Default pattern for the second input.
    pub const INPUT_B: FillPattern = FillPattern::new(128, 2.0);

    pub const fn new(period: usize, offset: f32) -> Self {
        Self { period, offset }
    }

    /// Returns the value at linear index `i`.
    ///
    /// A zero period degenerates to the constant `offset`.
    pub fn value_at(&self, i: usize) -> f32 {
        if self.period == 0 {
            return self.offset;
        }
        (i % self.period) as f32 + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_patterns() {
        for i in 0..512 {
            assert_eq!(FillPattern::INPUT_A.value_at(i), (i % 128) as f32 + 1.0);
            assert_eq!(FillPattern::INPUT_B.value_at(i), (i % 128) as f32 + 2.0);
        }
    }

    #[test]
    fn test_zero_period() {
        let p = FillPattern::new(0, 3.5);
        assert_eq!(p.value_at(0), 3.5);
        assert_eq!(p.value_at(99), 3.5);
    }
}
