/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! The dense tensor value type.
//!
//! A [`Tensor`] owns a dtype tag, a [`Shape`], an element offset plus
//! per-axis strides, and a reference-counted flat buffer. A tensor is
//! *contiguous* when its strides are the canonical row-major strides of
//! its shape, its offset is zero, and the buffer holds exactly
//! `shape.size()` elements; anything else is a strided view produced by
//! `permute_axes`, `slice_view`, or a broadcast. Views share the buffer;
//! in-place mutation unshares it first (copy-on-write), so writing
//! through one handle never changes what a sibling view observes.

mod conv_ops;
mod decomp_ops;
mod elem_ops;
mod fold_ops;
mod linalg_ops;
mod ops_impl;
mod pool_ops;
mod reduction_ops;
mod view_ops;

use crate::types::dtype::{DType, TensorElement};
use crate::types::iterator::Elements;
use crate::types::shape::Shape;
use crate::TensorError;
use robotensor_prim::MAX_RANK;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Tensor<T> {
    dtype: DType,
    shape: Shape,
    strides: Vec<usize>,
    offset: usize,
    buf: Arc<Vec<T>>,
}

impl<T: TensorElement> Tensor<T> {
    /// Builds a contiguous tensor from a flat row-major buffer and a
    /// shape. The buffer length must equal the shape's size.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, TensorError> {
        Self::from_flat(&shape, data)
    }

    /// Wraps an existing flat buffer without copying.
    pub fn from_flat(shape: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        if shape.len() > MAX_RANK {
            return Err(TensorError::InvalidParameter(format!(
                "rank {} exceeds the supported maximum of {MAX_RANK}",
                shape.len()
            )));
        }
        let shape = Shape::from(shape);
        if data.len() != shape.size() {
            return Err(TensorError::ShapeMismatch);
        }
        let strides = shape.canonical_strides();
        Ok(Tensor {
            dtype: T::DTYPE,
            shape,
            strides,
            offset: 0,
            buf: Arc::new(data),
        })
    }

    /// Freshly allocated, contiguous, zero-initialized.
    pub fn zeros(shape: &[usize]) -> Self {
        let sh = Shape::from(shape);
        let strides = sh.canonical_strides();
        Tensor {
            dtype: T::DTYPE,
            shape: sh.clone(),
            strides,
            offset: 0,
            buf: Arc::new(vec![T::zero(); sh.size()]),
        }
    }

    /// The distinguished "no tensor" sentinel: rank zero with an empty
    /// buffer. Used where an optional operand or destination is absent.
    pub fn empty() -> Self {
        Tensor {
            dtype: T::DTYPE,
            shape: Shape::default(),
            strides: Vec::new(),
            offset: 0,
            buf: Arc::new(Vec::new()),
        }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        self.shape.dims()
    }

    pub(crate) fn shape_obj(&self) -> &Shape {
        &self.shape
    }

    /// Rank of the tensor.
    pub fn num_dim(&self) -> usize {
        self.shape.rank()
    }

    /// Number of elements addressed by the shape; `0` for the empty
    /// sentinel.
    pub fn len(&self) -> usize {
        if self.buf.is_empty() && self.shape.rank() == 0 {
            return 0;
        }
        self.shape.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying storage from this view's offset onward, in raw buffer
    /// order (strides are not applied).
    pub fn as_slice(&self) -> &[T] {
        &self.buf[self.offset..]
    }

    /// The dtype tag together with the raw storage.
    pub fn data(&self) -> (DType, &[T]) {
        (self.dtype, self.as_slice())
    }

    pub(crate) fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// True when the layout is canonical row-major with no offset and an
    /// exactly-sized buffer; every operation checks this to pick the
    /// dense kernel over the strided one.
    pub fn is_contiguous(&self) -> bool {
        self.offset == 0
            && self.buf.len() == self.shape.size()
            && self.strides == self.shape.canonical_strides()
    }

    pub(crate) fn from_parts(shape: Shape, strides: Vec<usize>, offset: usize, buf: Arc<Vec<T>>) -> Self {
        Tensor {
            dtype: T::DTYPE,
            shape,
            strides,
            offset,
            buf,
        }
    }

    pub(crate) fn share_buf(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.buf)
    }

    /// Mutable storage from the offset onward; unshares the buffer first.
    pub(crate) fn storage_mut(&mut self) -> &mut [T] {
        let offset = self.offset;
        &mut Arc::make_mut(&mut self.buf)[offset..]
    }

    /// Flat buffer offset of a multi-index, or `None` when the index does
    /// not address this tensor.
    fn offset_of(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.rank() {
            return None;
        }
        let mut off = self.offset;
        for (ax, &i) in index.iter().enumerate() {
            if i >= self.shape.dims()[ax] {
                return None;
            }
            off += i * self.strides[ax];
        }
        if off < self.buf.len() { Some(off) } else { None }
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.offset_of(index).map(|off| &self.buf[off])
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let off = self.offset_of(index)?;
        Some(&mut Arc::make_mut(&mut self.buf)[off])
    }

    /// Dtype-agnostic read: the element converted to `f64`.
    pub fn at(&self, index: &[usize]) -> Result<f64, TensorError> {
        self.get(index)
            .map(|v| v.to_f64())
            .ok_or(TensorError::AxisOutOfBounds)
    }

    /// Dtype-agnostic write from an `f64` value.
    pub fn set_at(&mut self, value: f64, index: &[usize]) -> Result<(), TensorError> {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = T::from_f64(value);
                Ok(())
            }
            None => Err(TensorError::AxisOutOfBounds),
        }
    }

    /// Lazy row-major sequence of element accessors.
    pub fn elements(&self) -> Elements<'_, T> {
        Elements::over(self, &[]).expect("elements: unfixed iteration cannot fail")
    }

    /// Element accessors with the listed axes pinned at fixed values.
    pub fn elements_fixed(&self, fixed: &[(usize, usize)]) -> Result<Elements<'_, T>, TensorError> {
        Elements::over(self, fixed)
    }

    /// Materialized contiguous copy of this view; cheap clone when the
    /// tensor is already contiguous.
    pub(crate) fn compact(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }
        if self.len() == 0 {
            // The empty sentinel and degenerate shapes have no elements
            // to copy.
            return if self.shape.rank() == 0 {
                Self::empty()
            } else {
                Self::zeros(self.shape())
            };
        }
        let mut out = Self::zeros(self.shape());
        let canonical = self.shape.canonical_strides();
        robotensor_prim::elem_copy(
            out.storage_mut(),
            &canonical,
            self.as_slice(),
            &self.strides,
            self.shape.dims(),
        );
        out
    }

    /// Resolves the optional-destination contract: a supplied destination
    /// must be contiguous and match the result shape exactly; otherwise a
    /// fresh contiguous tensor is allocated.
    pub(crate) fn make_dst(dst: Option<Self>, shape: &[usize]) -> Result<Self, TensorError> {
        match dst {
            Some(d) => {
                if d.shape() != shape {
                    return Err(TensorError::ShapeMismatch);
                }
                if !d.is_contiguous() {
                    if d.buf.len() < d.shape.size() {
                        return Err(TensorError::BufferSizeMismatch);
                    }
                    return Err(TensorError::InvalidOperation);
                }
                Ok(d)
            }
            None => Ok(Self::zeros(shape)),
        }
    }

    pub(crate) fn check_same_shape(&self, other: &Self) -> Result<(), TensorError> {
        if self.shape() != other.shape() {
            return Err(TensorError::ShapeMismatch);
        }
        Ok(())
    }
}

impl<T: TensorElement> PartialEq for Tensor<T> {
    /// Logical equality: same shape and the same element at every index,
    /// regardless of layout.
    fn eq(&self, other: &Self) -> bool {
        if self.shape() != other.shape() || self.len() != other.len() {
            return false;
        }
        self.elements()
            .zip(other.elements())
            .all(|(a, b)| a.value() == b.value())
    }
}

impl<T: TensorElement> Default for Tensor<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: TensorElement> From<Vec<T>> for Tensor<T> {
    /// A rank-1 tensor over the vector.
    fn from(data: Vec<T>) -> Self {
        let n = data.len();
        Self::from_flat(&[n], data).expect("from Vec: length always matches")
    }
}

impl<T: TensorElement> From<T> for Tensor<T> {
    /// A rank-0 (scalar) tensor.
    fn from(value: T) -> Self {
        Self::from_flat(&[], vec![value]).expect("from scalar: length always matches")
    }
}

impl<T: TensorElement> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tensor(dtype={}, shape={}, data=[", self.dtype, self.shape)?;
        for (i, e) in self.elements().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", e.value())?;
        }
        write!(f, "])")
    }
}
