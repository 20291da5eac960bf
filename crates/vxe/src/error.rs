// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for vector helpers.

/// Errors returned by vector helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VxeError {
    /// The helper has no defined behaviour on any target.
    #[error("'{helper}' has no defined implementation on this target")]
    Unspecified { helper: &'static str },
}
