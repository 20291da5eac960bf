// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lane dump helpers.
//!
//! Each helper renders one line with every lane as `"<helper>: <value> "`,
//! so `printv_s32` of `{1, -2, 3, 4}` prints
//! `printv_s32: 1 printv_s32: -2 printv_s32: 3 printv_s32: 4 `.

use crate::{Float32x4, Int16x8, Int32x4, Int8x16, UInt16x8, UInt32x4, UInt8x16};
use std::fmt::Write;

fn format_lanes<T>(helper: &str, lanes: &[T], fmt_lane: impl Fn(&T) -> String) -> String {
    let mut line = String::new();
    for lane in lanes {
        // Writing into a String cannot fail.
        let _ = write!(line, "{helper}: {} ", fmt_lane(lane));
    }
    line
}

macro_rules! print_helpers {
    ($($print:ident, $format:ident: $ty:ty => $fmt:expr;)*) => {$(
        #[doc = concat!(
            "Renders the lanes of a [`", stringify!($ty), "`] as `",
            stringify!($print), "` would print them."
        )]
        pub fn $format(v: $ty) -> String {
            format_lanes(stringify!($print), v.as_array(), $fmt)
        }

        #[doc = concat!("Prints [`", stringify!($format), "`] followed by a newline.")]
        pub fn $print(v: $ty) {
            println!("{}", $format(v));
        }
    )*};
}

print_helpers! {
    printv_u8, format_u8: UInt8x16 => |x| x.to_string();
    printv_s8, format_s8: Int8x16 => |x| x.to_string();
    printv_u16, format_u16: UInt16x8 => |x| x.to_string();
    printv_s16, format_s16: Int16x8 => |x| x.to_string();
    printv_u32, format_u32: UInt32x4 => |x| x.to_string();
    printv_s32, format_s32: Int32x4 => |x| x.to_string();
    printv_f32, format_f32: Float32x4 => |x| format!("{x:.6}");
}
