/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Patch folding: `im2col` flattens sliding windows into a matrix so
//! convolution can run as GEMM; `col2im` folds back, summing overlaps.

use crate::types::dtype::TensorElement;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::RealField;
use robotensor_prim as prim;

fn fold_out(input: usize, k: usize, stride: usize, pad: usize) -> Result<usize, TensorError> {
    if stride == 0 || k == 0 {
        return Err(TensorError::InvalidDimension);
    }
    if input + 2 * pad < k {
        return Err(TensorError::InvalidDimension);
    }
    Ok((input + 2 * pad - k) / stride + 1)
}

impl<T: TensorElement + RealField> Tensor<T> {
    /// Lays each sliding window of a `[batch, channels, h, w]` input out
    /// as a row of a `[batch * out_h * out_w, channels * kh * kw]`
    /// matrix.
    pub fn im2col(
        &self,
        dst: Option<Self>,
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, channels, h, w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        let out_h = fold_out(h, kernel.0, stride.0, padding.0)?;
        let out_w = fold_out(w, kernel.1, stride.1, padding.1)?;
        let input = self.compact();
        let mut out = Self::make_dst(
            dst,
            &[batch * out_h * out_w, channels * kernel.0 * kernel.1],
        )?;
        prim::im2col(
            out.storage_mut(),
            input.as_slice(),
            batch,
            channels,
            h,
            w,
            kernel.0,
            kernel.1,
            padding.0,
            padding.1,
            stride.0,
            stride.1,
        );
        Ok(out)
    }

    /// Inverse of [`Tensor::im2col`]: folds a column matrix back onto
    /// `output_shape` (`[batch, channels, h, w]`), summing the
    /// contributions of overlapping windows.
    pub fn col2im(
        &self,
        dst: Option<Self>,
        output_shape: &[usize],
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 2 || output_shape.len() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, channels, h, w) =
            (output_shape[0], output_shape[1], output_shape[2], output_shape[3]);
        let out_h = fold_out(h, kernel.0, stride.0, padding.0)?;
        let out_w = fold_out(w, kernel.1, stride.1, padding.1)?;
        if self.shape() != [batch * out_h * out_w, channels * kernel.0 * kernel.1].as_slice() {
            return Err(TensorError::ShapeMismatch);
        }
        let col = self.compact();
        let mut out = Self::make_dst(dst, output_shape)?;
        prim::col2im(
            out.storage_mut(),
            col.as_slice(),
            batch,
            channels,
            h,
            w,
            kernel.0,
            kernel.1,
            padding.0,
            padding.1,
            stride.0,
            stride.1,
        );
        Ok(out)
    }
}
