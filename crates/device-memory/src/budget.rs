// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device memory budget and parsing.

use crate::{MemoryError, PAGE_SIZE};
use std::fmt;

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;
const GIB: usize = 1024 * MIB;

/// A hard ceiling on device storage.
///
/// # Parsing
/// `"64M"`/`"64MB"`, `"1G"`/`"1GB"`, `"512K"`/`"512KB"`, `"4096B"` or a raw
/// byte count. Case-insensitive, surrounding whitespace ignored.
///
/// # Examples
/// ```
/// use device_memory::MemoryBudget;
///
/// let b = MemoryBudget::parse("64M").unwrap();
/// assert_eq!(b.as_bytes(), 64 * 1024 * 1024);
/// assert_eq!(b.pages(), 16384);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryBudget {
    bytes: usize,
}

impl MemoryBudget {
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    pub fn from_mb(mb: usize) -> Self {
        Self { bytes: mb * MIB }
    }

    pub fn from_gb(gb: usize) -> Self {
        Self { bytes: gb * GIB }
    }

    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Returns the budget in megabytes (truncated).
    pub fn as_mb(&self) -> usize {
        self.bytes / MIB
    }

    /// Returns the number of whole pages the budget covers.
    pub fn pages(&self) -> usize {
        self.bytes / PAGE_SIZE
    }

    /// Parses a human-readable budget string.
    pub fn parse(s: &str) -> Result<Self, MemoryError> {
        const SUFFIXES: [(&str, usize); 7] = [
            ("GB", GIB),
            ("G", GIB),
            ("MB", MIB),
            ("M", MIB),
            ("KB", KIB),
            ("K", KIB),
            ("B", 1),
        ];

        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let (digits, multiplier) = SUFFIXES
            .iter()
            .find_map(|&(suffix, mult)| {
                upper
                    .strip_suffix(suffix)
                    .map(|rest| (rest.trim().to_string(), mult))
            })
            .unwrap_or((upper.clone(), 1));

        let value: usize = digits.parse().map_err(|_| {
            MemoryError::InvalidBudget(format!(
                "'{trimmed}': expected a number with an optional K, M or G suffix"
            ))
        })?;
        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| MemoryError::InvalidBudget(format!("'{trimmed}' overflows")))?;
        if bytes == 0 {
            return Err(MemoryError::InvalidBudget(format!("'{trimmed}' is zero")));
        }
        Ok(Self { bytes })
    }
}

impl fmt::Display for MemoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bytes {
            b if b >= GIB && b % GIB == 0 => write!(f, "{} GB", b / GIB),
            b if b >= MIB && b % MIB == 0 => write!(f, "{} MB", b / MIB),
            b if b >= KIB && b % KIB == 0 => write!(f, "{} KB", b / KIB),
            b => write!(f, "{b} B"),
        }
    }
}
