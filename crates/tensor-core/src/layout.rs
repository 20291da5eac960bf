// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pre-transform memory orders.

use crate::Shape;
use std::fmt;

/// The order in which a host buffer stores its `(N, C, H, W)` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Row-major `N, C, H, W`; `W` varies fastest.
    #[default]
    Nchw,
    /// Row-major `N, H, W, C`; `C` varies fastest.
    Nhwc,
}

impl Layout {
    /// Returns the linear host index of element `(n, c, h, w)`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Layout, Shape};
    /// let s = Shape::nchw(1, 2, 3, 4);
    /// assert_eq!(Layout::Nchw.index_of(&s, 0, 1, 0, 0), 12);
    /// assert_eq!(Layout::Nhwc.index_of(&s, 0, 1, 0, 0), 1);
    /// ```
    pub fn index_of(self, shape: &Shape, n: u32, c: u32, h: u32, w: u32) -> usize {
        let (n, c, h, w) = (n as usize, c as usize, h as usize, w as usize);
        let (cs, hs, ws) = (shape.c as usize, shape.h as usize, shape.w as usize);
        match self {
            Layout::Nchw => ((n * cs + c) * hs + h) * ws + w,
            Layout::Nhwc => ((n * hs + h) * ws + w) * cs + c,
        }
    }

    /// Returns a human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Nchw => "nchw",
            Layout::Nhwc => "nhwc",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
