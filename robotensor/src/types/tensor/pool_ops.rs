/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Pooling dispatchers over `[batch, channels, h, w]` inputs.

use crate::types::dtype::TensorElement;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::RealField;
use robotensor_prim as prim;

fn pool_out(input: usize, k: usize, stride: usize, pad: usize) -> Result<usize, TensorError> {
    if stride == 0 || k == 0 {
        return Err(TensorError::InvalidDimension);
    }
    if input + 2 * pad < k {
        return Err(TensorError::InvalidDimension);
    }
    Ok((input + 2 * pad - k) / stride + 1)
}

impl<T: TensorElement + RealField> Tensor<T> {
    fn pool_dims(
        &self,
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<(usize, usize, usize, usize, usize, usize), TensorError> {
        if self.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, channels, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        let out_h = pool_out(in_h, kernel.0, stride.0, padding.0)?;
        let out_w = pool_out(in_w, kernel.1, stride.1, padding.1)?;
        Ok((batch, channels, in_h, in_w, out_h, out_w))
    }

    /// Max pooling with the given window, stride, and zero-padding.
    pub fn max_pool2d(
        &self,
        dst: Option<Self>,
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        let (batch, channels, in_h, in_w, out_h, out_w) =
            self.pool_dims(kernel, stride, padding)?;
        let input = self.compact();
        let mut out = Self::make_dst(dst, &[batch, channels, out_h, out_w])?;
        prim::max_pool2d(
            out.storage_mut(),
            input.as_slice(),
            batch,
            channels,
            in_h,
            in_w,
            out_h,
            out_w,
            kernel.0,
            kernel.1,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok(out)
    }

    /// Max pooling that also returns, per output cell, the flat input
    /// index of the winning element (the argmax record the backward pass
    /// scatters into).
    pub fn max_pool2d_with_indices(
        &self,
        dst: Option<Self>,
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<(Self, Vec<usize>), TensorError> {
        let (batch, channels, in_h, in_w, out_h, out_w) =
            self.pool_dims(kernel, stride, padding)?;
        let input = self.compact();
        let mut out = Self::make_dst(dst, &[batch, channels, out_h, out_w])?;
        let mut idx = vec![0usize; batch * channels * out_h * out_w];
        prim::max_pool2d_with_indices(
            out.storage_mut(),
            &mut idx,
            input.as_slice(),
            batch,
            channels,
            in_h,
            in_w,
            out_h,
            out_w,
            kernel.0,
            kernel.1,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok((out, idx))
    }

    /// Backward of max pooling: `self` is the output gradient; every
    /// entry is scattered onto its recorded argmax position in a
    /// zero-initialized tensor of `input_shape`.
    pub fn max_pool2d_backward(
        &self,
        dst: Option<Self>,
        indices: &[usize],
        input_shape: &[usize],
    ) -> Result<Self, TensorError> {
        if indices.len() != self.len() {
            return Err(TensorError::ShapeMismatch);
        }
        let input_size: usize = input_shape.iter().product();
        if indices.iter().any(|&i| i >= input_size) {
            return Err(TensorError::AxisOutOfBounds);
        }
        let grad = self.compact();
        let mut out = Self::make_dst(dst, input_shape)?;
        prim::max_pool2d_backward(out.storage_mut(), grad.as_slice(), indices, indices.len());
        Ok(out)
    }

    /// Average pooling; windows clipped by padding divide by the number
    /// of input cells they actually cover.
    pub fn avg_pool2d(
        &self,
        dst: Option<Self>,
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        let (batch, channels, in_h, in_w, out_h, out_w) =
            self.pool_dims(kernel, stride, padding)?;
        let input = self.compact();
        let mut out = Self::make_dst(dst, &[batch, channels, out_h, out_w])?;
        prim::avg_pool2d(
            out.storage_mut(),
            input.as_slice(),
            batch,
            channels,
            in_h,
            in_w,
            out_h,
            out_w,
            kernel.0,
            kernel.1,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok(out)
    }

    /// Backward of average pooling: `self` is the output gradient over
    /// the pooled shape; the result has `input_shape`.
    pub fn avg_pool2d_backward(
        &self,
        dst: Option<Self>,
        input_shape: &[usize],
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 || input_shape.len() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, channels, in_h, in_w) =
            (input_shape[0], input_shape[1], input_shape[2], input_shape[3]);
        let out_h = pool_out(in_h, kernel.0, stride.0, padding.0)?;
        let out_w = pool_out(in_w, kernel.1, stride.1, padding.1)?;
        if self.shape() != [batch, channels, out_h, out_w].as_slice() {
            return Err(TensorError::ShapeMismatch);
        }
        let grad = self.compact();
        let mut out = Self::make_dst(dst, input_shape)?;
        prim::avg_pool2d_backward(
            out.storage_mut(),
            grad.as_slice(),
            batch,
            channels,
            in_h,
            in_w,
            out_h,
            out_w,
            kernel.0,
            kernel.1,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok(out)
    }

    /// Mean over each full spatial plane, shape `[batch, channels]`.
    pub fn global_avg_pool2d(&self, dst: Option<Self>) -> Result<Self, TensorError> {
        if self.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, channels, h, w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        if h * w == 0 {
            return Err(TensorError::EmptyTensor);
        }
        let input = self.compact();
        let mut out = Self::make_dst(dst, &[batch, channels])?;
        prim::global_avg_pool2d(out.storage_mut(), input.as_slice(), batch, channels, h, w);
        Ok(out)
    }

    /// Adaptive average pooling onto an arbitrary output grid.
    pub fn adaptive_avg_pool2d(
        &self,
        dst: Option<Self>,
        out_size: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        if out_size.0 == 0 || out_size.1 == 0 {
            return Err(TensorError::InvalidDimension);
        }
        let (batch, channels, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        if in_h < out_size.0 || in_w < out_size.1 {
            return Err(TensorError::InvalidDimension);
        }
        let input = self.compact();
        let mut out = Self::make_dst(dst, &[batch, channels, out_size.0, out_size.1])?;
        prim::adaptive_avg_pool2d(
            out.storage_mut(),
            input.as_slice(),
            batch,
            channels,
            in_h,
            in_w,
            out_size.0,
            out_size.1,
        );
        Ok(out)
    }
}
