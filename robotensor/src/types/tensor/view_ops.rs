/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Shape-changing operations. `reshape`, `ravel`, and `permute_axes`
//! produce views sharing the buffer; `slice`, `slice_range`,
//! `transpose`, `broadcast_to`, and `unpad` materialize their result
//! through the strided copy kernel.

use crate::types::dtype::TensorElement;
use crate::types::shape::Shape;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_prim::elem_copy;

impl<T: TensorElement> Tensor<T> {
    /// Reinterprets the elements under a new shape of the same size.
    /// Shares the buffer when the tensor is contiguous; a strided view is
    /// compacted first.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, TensorError> {
        let new_shape = Shape::from(shape);
        if new_shape.size() != self.len() {
            return Err(TensorError::ShapeMismatch);
        }
        if self.len() == 0 {
            return Ok(Self::zeros(shape));
        }
        if !self.is_contiguous() {
            return self.compact().reshape(shape);
        }
        let strides = new_shape.canonical_strides();
        Ok(Self::from_parts(new_shape, strides, 0, self.share_buf()))
    }

    /// Destination-based reshape: writes the row-major element sequence
    /// into `dst` (or a fresh tensor) under the new shape.
    pub fn reshape_to(&self, dst: Option<Self>, shape: &[usize]) -> Result<Self, TensorError> {
        let new_shape = Shape::from(shape);
        if new_shape.size() != self.len() {
            return Err(TensorError::ShapeMismatch);
        }
        let mut out = Self::make_dst(dst, shape)?;
        let src = self.compact();
        out.storage_mut()[..src.len()].copy_from_slice(&src.as_slice()[..src.len()]);
        Ok(out)
    }

    /// Flattens to rank 1, preserving row-major element order.
    pub fn ravel(&self) -> Self {
        let n = self.len();
        self.reshape(&[n])
            .expect("ravel: flattening cannot change the element count")
    }

    /// The sub-tensor at `index` along `axis`, with that axis removed.
    /// Always materialized.
    pub fn slice(&self, axis: usize, index: usize) -> Result<Self, TensorError> {
        if axis >= self.num_dim() || index >= self.shape()[axis] {
            return Err(TensorError::AxisOutOfBounds);
        }
        let mut out_dims: Vec<usize> = self.shape().to_vec();
        out_dims.remove(axis);
        let mut src_strides: Vec<usize> = self.strides().to_vec();
        let axis_stride = src_strides.remove(axis);
        let mut out = Self::zeros(&out_dims);
        if out.is_empty() {
            return Ok(out);
        }
        let canonical = out.shape_obj().canonical_strides();
        let base = index * axis_stride;
        elem_copy(
            out.storage_mut(),
            &canonical,
            &self.as_slice()[base..],
            &src_strides,
            &out_dims,
        );
        Ok(out)
    }

    /// A contiguous copy of `length` positions along `axis` starting at
    /// `start`; the axis is kept with its new extent.
    pub fn slice_range(
        &self,
        dst: Option<Self>,
        axis: usize,
        start: usize,
        length: usize,
    ) -> Result<Self, TensorError> {
        if axis >= self.num_dim() {
            return Err(TensorError::AxisOutOfBounds);
        }
        if length == 0 {
            return Err(TensorError::InvalidDimension);
        }
        if start + length > self.shape()[axis] {
            return Err(TensorError::AxisOutOfBounds);
        }
        let mut out_dims: Vec<usize> = self.shape().to_vec();
        out_dims[axis] = length;
        let mut out = Self::make_dst(dst, &out_dims)?;
        if out.is_empty() {
            return Ok(out);
        }
        let canonical = out.shape_obj().canonical_strides();
        let base = start * self.strides()[axis];
        elem_copy(
            out.storage_mut(),
            &canonical,
            &self.as_slice()[base..],
            self.strides(),
            &out_dims,
        );
        Ok(out)
    }

    /// Reorders the axes without touching the data: a strided view.
    pub fn permute_axes(&self, order: &[usize]) -> Result<Self, TensorError> {
        let rank = self.num_dim();
        if order.len() != rank {
            return Err(TensorError::RankMismatch);
        }
        let mut seen = vec![false; rank];
        for &ax in order {
            if ax >= rank {
                return Err(TensorError::AxisOutOfBounds);
            }
            if seen[ax] {
                return Err(TensorError::DuplicateAxis);
            }
            seen[ax] = true;
        }
        let new_dims: Vec<usize> = order.iter().map(|&ax| self.shape()[ax]).collect();
        let new_strides: Vec<usize> = order.iter().map(|&ax| self.strides()[ax]).collect();
        Ok(Self::from_parts(
            Shape::from(new_dims),
            new_strides,
            self.offset(),
            self.share_buf(),
        ))
    }

    /// Materialized transpose swapping the last two axes, realized as a
    /// strided copy through the element-wise copy kernel.
    pub fn transpose(&self, dst: Option<Self>) -> Result<Self, TensorError> {
        let rank = self.num_dim();
        if rank < 2 {
            return Err(TensorError::RankMismatch);
        }
        let mut order: Vec<usize> = (0..rank).collect();
        order.swap(rank - 2, rank - 1);
        let view = self.permute_axes(&order)?;
        let mut out = Self::make_dst(dst, view.shape())?;
        let canonical = out.shape_obj().canonical_strides();
        elem_copy(
            out.storage_mut(),
            &canonical,
            view.as_slice(),
            view.strides(),
            view.shape(),
        );
        Ok(out)
    }

    /// Explicit broadcast to `target`: axes are matched right-aligned and
    /// an axis of extent 1 (or a missing leading axis) is repeated. The
    /// result is materialized contiguous.
    pub fn broadcast_to(&self, dst: Option<Self>, target: &[usize]) -> Result<Self, TensorError> {
        if self.is_empty() {
            return Err(TensorError::EmptyTensor);
        }
        let rank = self.num_dim();
        if target.len() < rank {
            return Err(TensorError::ShapeMismatch);
        }
        let lead = target.len() - rank;
        let mut src_strides = vec![0usize; target.len()];
        for ax in 0..rank {
            let dim = self.shape()[ax];
            if dim == target[lead + ax] {
                src_strides[lead + ax] = self.strides()[ax];
            } else if dim == 1 {
                src_strides[lead + ax] = 0;
            } else {
                return Err(TensorError::ShapeMismatch);
            }
        }
        let mut out = Self::make_dst(dst, target)?;
        let canonical = out.shape_obj().canonical_strides();
        elem_copy(
            out.storage_mut(),
            &canonical,
            self.as_slice(),
            &src_strides,
            target,
        );
        Ok(out)
    }

    /// Strips `padding[ax]` positions from both ends of every axis.
    pub fn unpad(&self, dst: Option<Self>, padding: &[usize]) -> Result<Self, TensorError> {
        let rank = self.num_dim();
        if padding.len() != rank {
            return Err(TensorError::RankMismatch);
        }
        let mut out_dims = Vec::with_capacity(rank);
        let mut base = 0usize;
        for ax in 0..rank {
            let dim = self.shape()[ax];
            if dim < 2 * padding[ax] + 1 {
                return Err(TensorError::InvalidDimension);
            }
            out_dims.push(dim - 2 * padding[ax]);
            base += padding[ax] * self.strides()[ax];
        }
        let mut out = Self::make_dst(dst, &out_dims)?;
        if out.is_empty() {
            return Ok(out);
        }
        let canonical = out.shape_obj().canonical_strides();
        elem_copy(
            out.storage_mut(),
            &canonical,
            &self.as_slice()[base..],
            self.strides(),
            &out_dims,
        );
        Ok(out)
    }
}
