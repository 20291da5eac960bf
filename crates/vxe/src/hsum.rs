// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Horizontal reduction.

use crate::{Float32x4, VxeError};

/// Horizontal sum of a [`Float32x4`].
///
/// No reduction order or rounding behaviour is defined for this helper on
/// either s390x or AArch64, so it reports [`VxeError::Unspecified`] on every
/// target rather than picking one.
pub fn hsum(_x: Float32x4) -> Result<f32, VxeError> {
    Err(VxeError::Unspecified { helper: "hsum" })
}
