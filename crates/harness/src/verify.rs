// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-by-element verification against scalar arithmetic.
//!
//! The console output is a fixed contract:
//! ```text
//! --- verifying results ---
//! Index    0:  1.00 *  2.00 | Expected     2.00 | Got     2.00 | PASSED
//! ...
//! --- verification summary ---
//! all 2048 test cases passed!
//! ----------------------------
//! ```

use crate::HarnessError;
use accelerator::ElementwiseOp;
use std::fmt;
use std::io::Write;

/// Default absolute tolerance.
pub const DEFAULT_TOLERANCE: f32 = 1e-6;

/// The outcome for one element.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ElementCheck {
    pub index: usize,
    pub lhs: f32,
    pub rhs: f32,
    pub expected: f32,
    pub actual: f32,
    pub passed: bool,
}

impl ElementCheck {
    /// Checks `actual` against `op(lhs, rhs)`.
    ///
    /// An element fails only when `|expected - actual| > tolerance`. A NaN
    /// difference compares false and so passes, as does `inf` against `inf`.
    pub fn evaluate(
        index: usize,
        lhs: f32,
        rhs: f32,
        actual: f32,
        op: ElementwiseOp,
        tolerance: f32,
    ) -> Self {
        let expected = op.apply(lhs, rhs);
        #[allow(clippy::neg_cmp_op_on_partial_ord)]
        let passed = !((expected - actual).abs() > tolerance);
        Self {
            index,
            lhs,
            rhs,
            expected,
            actual,
            passed,
        }
    }

    /// Renders the console line for this element.
    pub fn display(&self, op: ElementwiseOp) -> CheckLine<'_> {
        CheckLine { check: self, op }
    }
}

/// [`fmt::Display`] adapter returned by [`ElementCheck::display`].
pub struct CheckLine<'a> {
    check: &'a ElementCheck,
    op: ElementwiseOp,
}

impl fmt::Display for CheckLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.check;
        write!(
            f,
            "Index {:4}: {:5.2} {} {:5.2} | Expected {:8.2} | Got {:8.2} | {}",
            c.index,
            c.lhs,
            self.op.symbol(),
            c.rhs,
            c.expected,
            c.actual,
            if c.passed { "PASSED" } else { "FAILED" },
        )
    }
}

/// Aggregate verification result.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VerificationReport {
    pub op: ElementwiseOp,
    pub tolerance: f32,
    pub element_count: usize,
    pub passed: usize,
    pub failed: usize,
    /// Index of the first failing element, if any.
    pub first_failure: Option<usize>,
}

impl VerificationReport {
    /// `true` when no element failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// The middle line of the summary block.
    pub fn summary(&self) -> String {
        if self.all_passed() {
            format!("all {} test cases passed!", self.element_count)
        } else {
            format!(
                "{} out of {} test cases failed.",
                self.failed, self.element_count
            )
        }
    }
}

/// Compares accelerator output with scalar results and writes the report.
#[derive(Debug, Clone, Copy)]
pub struct Verifier {
    pub op: ElementwiseOp,
    pub tolerance: f32,
    pub print_elements: bool,
}

impl Verifier {
    pub fn new(op: ElementwiseOp, tolerance: f32) -> Self {
        Self {
            op,
            tolerance,
            print_elements: true,
        }
    }

    /// Suppresses the per-element lines; the summary block is still written.
    pub fn quiet(mut self) -> Self {
        self.print_elements = false;
        self
    }

    /// Verifies `actual[i] == op(lhs[i], rhs[i])` for every index.
    ///
    /// Writes the header, one line per element when enabled, then the
    /// summary block to `out`. Mismatches are counted, not raised; only
    /// length disagreement and write failures are errors.
    pub fn verify<W: Write>(
        &self,
        lhs: &[f32],
        rhs: &[f32],
        actual: &[f32],
        out: &mut W,
    ) -> Result<VerificationReport, HarnessError> {
        if lhs.len() != actual.len() || rhs.len() != actual.len() {
            return Err(HarnessError::ShapeMismatch {
                lhs: lhs.len(),
                rhs: rhs.len(),
                actual: actual.len(),
            });
        }

        writeln!(out, "--- verifying results ---")?;

        let mut report = VerificationReport {
            op: self.op,
            tolerance: self.tolerance,
            element_count: actual.len(),
            passed: 0,
            failed: 0,
            first_failure: None,
        };

        for (i, ((&a, &b), &got)) in lhs.iter().zip(rhs).zip(actual).enumerate() {
            let check = ElementCheck::evaluate(i, a, b, got, self.op, self.tolerance);
            if check.passed {
                report.passed += 1;
            } else {
                report.failed += 1;
                report.first_failure.get_or_insert(i);
                tracing::debug!(
                    "element {i} mismatch: expected {}, got {}",
                    check.expected,
                    check.actual
                );
            }
            if self.print_elements {
                writeln!(out, "{}", check.display(self.op))?;
            }
        }

        writeln!(out, "--- verification summary ---")?;
        writeln!(out, "{}", report.summary())?;
        writeln!(out, "----------------------------")?;

        Ok(report)
    }
}
