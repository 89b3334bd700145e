/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Reductions. An empty axis list reduces over every axis; reduced axes
//! are removed from the result shape, so a full reduction yields a
//! rank-0 tensor.

use crate::types::dtype::TensorElement;
use crate::types::shape::Shape;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::{Numeric, RealField};
use std::cmp::Ordering;

impl<T: TensorElement> Tensor<T> {
    /// Validated reduction layout: the kept dimensions and a per-axis
    /// reduction mask. An empty `axes` list means "reduce all".
    fn reduction_layout(&self, axes: &[usize]) -> Result<(Vec<usize>, Vec<bool>), TensorError> {
        let rank = self.num_dim();
        let mut mask = vec![false; rank];
        if axes.is_empty() {
            mask.iter_mut().for_each(|m| *m = true);
        } else {
            for &ax in self.shape_obj().validate_axes(axes)?.iter() {
                mask[ax] = true;
            }
        }
        let out_dims: Vec<usize> = self
            .shape()
            .iter()
            .enumerate()
            .filter(|(ax, _)| !mask[*ax])
            .map(|(_, &d)| d)
            .collect();
        Ok((out_dims, mask))
    }

    /// Strides into the flat output for every kept axis of `self`
    /// (reduced axes get stride 0, so they collapse).
    fn output_strides(&self, out_dims: &[usize], mask: &[bool]) -> Vec<usize> {
        let out_canonical = Shape::from(out_dims).canonical_strides();
        let mut strides = vec![0usize; self.num_dim()];
        let mut kept = 0;
        for ax in 0..self.num_dim() {
            if !mask[ax] {
                strides[ax] = out_canonical[kept];
                kept += 1;
            }
        }
        strides
    }

    /// Ascending flat-order sort of the element indices. Fails on
    /// unorderable values (NaN).
    pub fn arg_sort(&self) -> Result<Vec<usize>, TensorError> {
        let vals: Vec<T> = self.elements().map(|e| e.value()).collect();
        let mut idx: Vec<usize> = (0..vals.len()).collect();
        let mut unorderable = false;
        idx.sort_by(|&a, &b| {
            vals[a].partial_cmp(&vals[b]).unwrap_or_else(|| {
                unorderable = true;
                Ordering::Equal
            })
        });
        if unorderable {
            return Err(TensorError::UnorderableValue);
        }
        Ok(idx)
    }
}

impl<T: TensorElement + Numeric> Tensor<T> {
    /// Sum over the given axes (all axes when the list is empty).
    pub fn sum_axes(&self, axes: &[usize]) -> Result<Self, TensorError> {
        let (out_dims, mask) = self.reduction_layout(axes)?;
        let strides = self.output_strides(&out_dims, &mask);
        let mut acc = vec![T::ZERO; Shape::from(&out_dims[..]).size()];
        for e in self.elements() {
            let mut o = 0usize;
            for (ax, &i) in e.indices().iter().enumerate() {
                o += i * strides[ax];
            }
            acc[o] += e.value();
        }
        Tensor::new(acc, out_dims)
    }

    /// Maximum over the given axes. Fails with [`TensorError::EmptyTensor`]
    /// when a result cell would aggregate zero elements.
    pub fn max_axes(&self, axes: &[usize]) -> Result<Self, TensorError> {
        self.extremum_axes(axes, |v, cur| v > cur)
    }

    /// Minimum over the given axes.
    pub fn min_axes(&self, axes: &[usize]) -> Result<Self, TensorError> {
        self.extremum_axes(axes, |v, cur| v < cur)
    }

    fn extremum_axes(
        &self,
        axes: &[usize],
        wins: fn(T, T) -> bool,
    ) -> Result<Self, TensorError> {
        let (out_dims, mask) = self.reduction_layout(axes)?;
        let strides = self.output_strides(&out_dims, &mask);
        let size = Shape::from(&out_dims[..]).size();
        let mut acc = vec![T::ZERO; size];
        let mut seen = vec![false; size];
        for e in self.elements() {
            let mut o = 0usize;
            for (ax, &i) in e.indices().iter().enumerate() {
                o += i * strides[ax];
            }
            if !seen[o] || wins(e.value(), acc[o]) {
                acc[o] = e.value();
                seen[o] = true;
            }
        }
        if seen.iter().any(|&s| !s) {
            return Err(TensorError::EmptyTensor);
        }
        Tensor::new(acc, out_dims)
    }

    /// Index of the maximum along `axis`, with that axis removed. Ties
    /// keep the first occurrence.
    pub fn arg_max(&self, axis: usize) -> Result<Self, TensorError> {
        if axis >= self.num_dim() {
            return Err(TensorError::AxisOutOfBounds);
        }
        let (out_dims, mask) = self.reduction_layout(&[axis])?;
        let strides = self.output_strides(&out_dims, &mask);
        let size = Shape::from(&out_dims[..]).size();
        let mut best = vec![T::ZERO; size];
        let mut best_idx = vec![0usize; size];
        let mut seen = vec![false; size];
        for e in self.elements() {
            let mut o = 0usize;
            for (ax, &i) in e.indices().iter().enumerate() {
                o += i * strides[ax];
            }
            let along = e.indices()[axis];
            if !seen[o] || e.value() > best[o] {
                best[o] = e.value();
                best_idx[o] = along;
                seen[o] = true;
            }
        }
        if seen.iter().any(|&s| !s) {
            return Err(TensorError::EmptyTensor);
        }
        let data: Vec<T> = best_idx
            .into_iter()
            .map(|i| T::from_f64(i as f64))
            .collect();
        Tensor::new(data, out_dims)
    }
}

impl<T: TensorElement + RealField> Tensor<T> {
    /// Mean over the given axes: the sum divided by the product of the
    /// reduced extents.
    pub fn mean_axes(&self, axes: &[usize]) -> Result<Self, TensorError> {
        let (_, mask) = self.reduction_layout(axes)?;
        let mut count = 1usize;
        for ax in 0..self.num_dim() {
            if mask[ax] {
                count *= self.shape()[ax];
            }
        }
        if count == 0 {
            return Err(TensorError::InvalidOperation);
        }
        let mut out = self.sum_axes(axes)?;
        out.scale(T::ONE / T::from_usize(count));
        Ok(out)
    }
}
