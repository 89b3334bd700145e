/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! The element-accessor iteration surface.
//!
//! [`Elements`] walks a tensor in row-major order (optionally with a
//! subset of axes held fixed) and yields [`Element`] accessors: the
//! multi-index plus the value, convertible to `f64` regardless of the
//! storage dtype. Kernels never use this path; it exists for inspection
//! and glue code.

use crate::types::dtype::TensorElement;
use crate::types::shape::{MultiIndex, MultiIndexIter};
use crate::types::tensor::Tensor;
use crate::TensorError;

/// A single cell: its multi-index and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element<T> {
    index: MultiIndex,
    value: T,
}

impl<T: TensorElement> Element<T> {
    pub fn indices(&self) -> &[usize] {
        self.index.as_slice()
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// The value widened to double precision.
    pub fn as_f64(&self) -> f64 {
        self.value.to_f64()
    }
}

/// Lazy, finite sequence of [`Element`] accessors over a tensor.
pub struct Elements<'a, T> {
    tensor: &'a Tensor<T>,
    indices: MultiIndexIter,
    empty: bool,
}

impl<'a, T: TensorElement> Elements<'a, T> {
    pub(crate) fn over(
        tensor: &'a Tensor<T>,
        fixed: &[(usize, usize)],
    ) -> Result<Self, TensorError> {
        let indices = tensor.shape_obj().iter_indices(fixed)?;
        Ok(Elements {
            tensor,
            indices,
            empty: tensor.is_empty(),
        })
    }
}

impl<T: TensorElement> Iterator for Elements<'_, T> {
    type Item = Element<T>;

    fn next(&mut self) -> Option<Element<T>> {
        if self.empty {
            return None;
        }
        let index = self.indices.next()?;
        let value = *self
            .tensor
            .get(index.as_slice())
            .expect("elements: index produced by the shape iterator is valid");
        Some(Element { index, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.empty {
            (0, Some(0))
        } else {
            self.indices.size_hint()
        }
    }
}

impl<T: TensorElement> ExactSizeIterator for Elements<'_, T> {}
