// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Host-side tensor types for the accelerator harness.
//!
//! This crate provides:
//! - [`Shape`] — a 4-D `(N, C, H, W)` shape descriptor.
//! - [`DType`] — element data types a descriptor can name (fp32, fp16, bfloat, int8).
//! - [`Layout`] — the pre-transform memory orders understood by the accelerator.
//! - [`HostBuffer`] — a contiguous, owned `f32` buffer tied to a shape.
//! - [`FillPattern`] — the deterministic synthetic input pattern.
//!
//! Host buffers are plain linear memory. Anything accelerator-specific
//! (stick layouts, device pages) lives in the `accelerator` and
//! `device-memory` crates.

mod buffer;
mod dtype;
mod error;
mod layout;
mod pattern;
mod shape;

pub use buffer::HostBuffer;
pub use dtype::DType;
pub use error::TensorError;
pub use layout::Layout;
pub use pattern::FillPattern;
pub use shape::Shape;
