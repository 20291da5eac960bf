// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # accelerator
//!
//! The tensor-acceleration capability the harness drives, expressed as the
//! [`TensorAccelerator`] trait, plus [`SoftNnpa`]: a software emulation of a
//! stick-based neural network processing assist.
//!
//! # Workflow
//! ```text
//! PreTransformedDesc ──generate_transformed_desc──► TransformedDesc
//!          │                                              │
//!          └──────────── init_tensor_with_malloc ─────────┘
//!                                 │
//!                                 ▼
//!     host [f32] ──transform_tensor──► AccelTensor ──elementwise──► AccelTensor
//!                                                                      │
//!     host [f32] ◄──────────────── transform_origtensor ───────────────┘
//! ```
//!
//! Every operation either succeeds or fails with an [`AcceleratorError`]
//! carrying a [`StatusCode`] other than [`StatusCode::Ok`]. There is no
//! partial success.
//!
//! # Example
//! ```
//! use accelerator::{PreTransformedDesc, SoftNnpa, TensorAccelerator};
//! use device_memory::MemoryBudget;
//! use tensor_core::{DType, Layout};
//!
//! let accel = SoftNnpa::new(MemoryBudget::from_mb(4));
//! let pre = PreTransformedDesc::new(Layout::Nchw, DType::Fp32, 1, 1, 1, 4);
//! let tfm = accel.generate_transformed_desc(&pre).unwrap();
//!
//! let mut a = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
//! let mut b = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
//! let mut out = accel.init_tensor_with_malloc(&pre, &tfm).unwrap();
//! accel.transform_tensor(&mut a, &[1.0, 2.0, 3.0, 4.0]).unwrap();
//! accel.transform_tensor(&mut b, &[2.0, 3.0, 4.0, 5.0]).unwrap();
//! accel.mul(&a, &b, &mut out).unwrap();
//!
//! let mut result = [0.0f32; 4];
//! accel.transform_origtensor(&out, &mut result).unwrap();
//! assert_eq!(result, [2.0, 6.0, 12.0, 20.0]);
//! ```

mod capability;
mod descriptor;
mod op;
mod soft;
mod status;
mod tensor;

pub use capability::TensorAccelerator;
pub use descriptor::{
    NativeFormat, NativeLayout, NativeType, PreTransformedDesc, TransformedDesc,
    ELEMENTS_PER_STICK, STICKS_PER_PAGE,
};
pub use op::ElementwiseOp;
pub use soft::{SoftNnpa, SoftNnpaConfig, DEFAULT_MAX_DIM_IDX_SIZE, DEFAULT_MAX_TENSOR_SIZE};
pub use status::{AcceleratorError, StatusCode};
pub use tensor::AccelTensor;
