// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Operation status codes and the accelerator error type.

use std::fmt;

/// Status returned by an accelerator operation.
///
/// [`StatusCode::Ok`] is the single success sentinel. Codes in the
/// `0x0004_xxxx` range are argument or state errors; `0x0009_xxxx` are
/// facility errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u32)]
pub enum StatusCode {
    Ok = 0x0000_0000,
    InvalidShape = 0x0004_0001,
    InvalidLayout = 0x0004_0002,
    InvalidType = 0x0004_0003,
    InvalidFormat = 0x0004_0004,
    InvalidBuffer = 0x0004_0005,
    InvalidState = 0x0004_0006,
    ConvertFailure = 0x0004_0007,
    AllocationFailure = 0x0004_0008,
    UnavailableFunction = 0x0009_0001,
}

impl StatusCode {
    /// Returns the numeric status value.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::InvalidShape => "INVALID_SHAPE",
            StatusCode::InvalidLayout => "INVALID_LAYOUT",
            StatusCode::InvalidType => "INVALID_TYPE",
            StatusCode::InvalidFormat => "INVALID_FORMAT",
            StatusCode::InvalidBuffer => "INVALID_BUFFER",
            StatusCode::InvalidState => "INVALID_STATE",
            StatusCode::ConvertFailure => "CONVERT_FAILURE",
            StatusCode::AllocationFailure => "ALLOCATION_FAILURE",
            StatusCode::UnavailableFunction => "UNAVAILABLE_FUNCTION",
        }
    }

    /// Compares against the success sentinel.
    ///
    /// # Examples
    /// ```
    /// use accelerator::StatusCode;
    /// assert!(StatusCode::Ok.check("transform").is_ok());
    /// let err = StatusCode::InvalidState.check("transform").unwrap_err();
    /// assert_eq!(err.status, StatusCode::InvalidState);
    /// ```
    pub fn check(self, op: &'static str) -> Result<(), AcceleratorError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(AcceleratorError::new(op, self, self.as_str()))
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:08X})", self.as_str(), self.code())
    }
}

/// A failed accelerator operation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{op} returned {status}: {detail}")]
pub struct AcceleratorError {
    /// The operation that failed.
    pub op: &'static str,
    /// The non-success status it returned.
    pub status: StatusCode,
    /// Human-readable context.
    pub detail: String,
}

impl AcceleratorError {
    pub fn new(op: &'static str, status: StatusCode, detail: impl Into<String>) -> Self {
        debug_assert!(!status.is_ok(), "an error must carry a failing status");
        Self {
            op,
            status,
            detail: detail.into(),
        }
    }
}
