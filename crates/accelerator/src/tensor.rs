// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Accelerator tensor handles.

use crate::{PreTransformedDesc, TransformedDesc};
use device_memory::PageBuffer;

/// A tensor resident in accelerator storage.
///
/// Wraps exactly one [`PageBuffer`] sized by its [`TransformedDesc`].
/// The storage goes back to the device pool when the handle is passed to
/// [`free_tensor_buffer`](crate::TensorAccelerator::free_tensor_buffer) or
/// simply dropped.
#[derive(Debug)]
pub struct AccelTensor {
    pre: PreTransformedDesc,
    tfm: TransformedDesc,
    buffer: PageBuffer,
    transformed: bool,
}

impl AccelTensor {
    /// Wraps freshly allocated storage. The tensor starts untransformed.
    pub fn new(pre: PreTransformedDesc, tfm: TransformedDesc, buffer: PageBuffer) -> Self {
        Self {
            pre,
            tfm,
            buffer,
            transformed: false,
        }
    }

    pub fn pre_desc(&self) -> &PreTransformedDesc {
        &self.pre
    }

    pub fn transformed_desc(&self) -> &TransformedDesc {
        &self.tfm
    }

    /// Returns `true` once the tensor holds data in native layout.
    pub fn is_transformed(&self) -> bool {
        self.transformed
    }

    pub fn set_transformed(&mut self, transformed: bool) {
        self.transformed = transformed;
    }

    /// Accounted device bytes backing this tensor.
    pub fn size_bytes(&self) -> usize {
        self.buffer.size_bytes()
    }

    pub fn cells(&self) -> &[f32] {
        self.buffer.cells()
    }

    pub fn cells_mut(&mut self) -> &mut [f32] {
        self.buffer.cells_mut()
    }
}
