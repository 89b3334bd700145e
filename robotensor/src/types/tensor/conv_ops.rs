/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Convolution dispatchers. The tensor layer owns the rank/channel/
//! stride validation and the output-shape computation; the flat-buffer
//! kernels in `robotensor_prim` do the arithmetic.

use crate::types::dtype::TensorElement;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::RealField;
use robotensor_prim as prim;

/// `(input + 2*pad - kernel) / stride + 1` with the validity checks.
fn conv_out(input: usize, k: usize, stride: usize, pad: usize) -> Result<usize, TensorError> {
    if stride == 0 || k == 0 {
        return Err(TensorError::InvalidDimension);
    }
    if input + 2 * pad < k {
        return Err(TensorError::InvalidDimension);
    }
    Ok((input + 2 * pad - k) / stride + 1)
}

fn transposed_out(input: usize, k: usize, stride: usize, pad: usize) -> Result<usize, TensorError> {
    if stride == 0 || k == 0 || input == 0 {
        return Err(TensorError::InvalidDimension);
    }
    let grown = (input - 1) * stride + k;
    if grown < 2 * pad + 1 {
        return Err(TensorError::InvalidDimension);
    }
    Ok(grown - 2 * pad)
}

impl<T: TensorElement + RealField> Tensor<T> {
    fn bias_slice<'a>(bias: Option<&'a Self>, out_c: usize) -> Result<Option<&'a [T]>, TensorError> {
        match bias {
            None => Ok(None),
            Some(b) => {
                if b.num_dim() != 1 {
                    return Err(TensorError::RankMismatch);
                }
                if b.shape()[0] != out_c {
                    return Err(TensorError::ShapeMismatch);
                }
                if !b.is_contiguous() {
                    return Err(TensorError::InvalidOperation);
                }
                Ok(Some(b.as_slice()))
            }
        }
    }

    /// 2-D convolution of a `[batch, in_c, h, w]` input with
    /// `[out_c, in_c, kh, kw]` weights.
    pub fn conv2d(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        self.conv2d_to(None, weights, bias, stride, padding)
    }

    /// [`Tensor::conv2d`] with an optional destination.
    pub fn conv2d_to(
        &self,
        dst: Option<Self>,
        weights: &Self,
        bias: Option<&Self>,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 || weights.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, in_c, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        let (out_c, w_in_c, kh, kw) = (
            weights.shape()[0],
            weights.shape()[1],
            weights.shape()[2],
            weights.shape()[3],
        );
        if w_in_c != in_c {
            return Err(TensorError::ShapeMismatch);
        }
        let out_h = conv_out(in_h, kh, stride.0, padding.0)?;
        let out_w = conv_out(in_w, kw, stride.1, padding.1)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::make_dst(dst, &[batch, out_c, out_h, out_w])?;
        prim::conv2d(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, out_c)?,
            batch,
            in_c,
            out_c,
            in_h,
            in_w,
            out_h,
            out_w,
            kh,
            kw,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok(out)
    }

    /// Transposed 2-D convolution with `[in_c, out_c, kh, kw]` weights.
    pub fn conv2d_transposed(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 || weights.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, in_c, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        let (w_in_c, out_c, kh, kw) = (
            weights.shape()[0],
            weights.shape()[1],
            weights.shape()[2],
            weights.shape()[3],
        );
        if w_in_c != in_c {
            return Err(TensorError::ShapeMismatch);
        }
        let out_h = transposed_out(in_h, kh, stride.0, padding.0)?;
        let out_w = transposed_out(in_w, kw, stride.1, padding.1)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::zeros(&[batch, out_c, out_h, out_w]);
        prim::conv2d_transposed(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, out_c)?,
            batch,
            in_c,
            out_c,
            in_h,
            in_w,
            out_h,
            out_w,
            kh,
            kw,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok(out)
    }

    /// Weight gradient of a 2-D convolution: `self` is the forward input
    /// and `grad_out` the gradient at the output; the result has the
    /// forward weight shape `[out_c, in_c, kh, kw]`.
    pub fn conv2d_kernel_grad(
        &self,
        grad_out: &Self,
        kernel: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 || grad_out.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, in_c, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        let out_h = conv_out(in_h, kernel.0, stride.0, padding.0)?;
        let out_w = conv_out(in_w, kernel.1, stride.1, padding.1)?;
        let out_c = grad_out.shape()[1];
        if grad_out.shape() != [batch, out_c, out_h, out_w].as_slice() {
            return Err(TensorError::ShapeMismatch);
        }
        let input = self.compact();
        let g = grad_out.compact();
        let mut dw = Self::zeros(&[out_c, in_c, kernel.0, kernel.1]);
        prim::conv2d_kernel_grad(
            dw.storage_mut(),
            input.as_slice(),
            g.as_slice(),
            batch,
            in_c,
            out_c,
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
        Ok(dw)
    }

    /// 1-D convolution of a `[batch, in_c, length]` input with
    /// `[out_c, in_c, k]` weights.
    pub fn conv1d(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        stride: usize,
        padding: usize,
    ) -> Result<Self, TensorError> {
        self.conv1d_to(None, weights, bias, stride, padding)
    }

    pub fn conv1d_to(
        &self,
        dst: Option<Self>,
        weights: &Self,
        bias: Option<&Self>,
        stride: usize,
        padding: usize,
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 3 || weights.num_dim() != 3 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, in_c, in_l) = (self.shape()[0], self.shape()[1], self.shape()[2]);
        let (out_c, w_in_c, k) = (weights.shape()[0], weights.shape()[1], weights.shape()[2]);
        if w_in_c != in_c {
            return Err(TensorError::ShapeMismatch);
        }
        let out_l = conv_out(in_l, k, stride, padding)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::make_dst(dst, &[batch, out_c, out_l])?;
        prim::conv1d(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, out_c)?,
            batch,
            in_c,
            out_c,
            in_l,
            out_l,
            k,
            stride,
            padding,
        );
        Ok(out)
    }

    /// Transposed 1-D convolution with `[in_c, out_c, k]` weights.
    pub fn conv1d_transposed(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        stride: usize,
        padding: usize,
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 3 || weights.num_dim() != 3 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, in_c, in_l) = (self.shape()[0], self.shape()[1], self.shape()[2]);
        let (w_in_c, out_c, k) = (weights.shape()[0], weights.shape()[1], weights.shape()[2]);
        if w_in_c != in_c {
            return Err(TensorError::ShapeMismatch);
        }
        let out_l = transposed_out(in_l, k, stride, padding)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::zeros(&[batch, out_c, out_l]);
        prim::conv1d_transposed(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, out_c)?,
            batch,
            in_c,
            out_c,
            in_l,
            out_l,
            k,
            stride,
            padding,
        );
        Ok(out)
    }

    /// Weight gradient of a 1-D convolution.
    pub fn conv1d_kernel_grad(
        &self,
        grad_out: &Self,
        kernel: usize,
        stride: usize,
        padding: usize,
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 3 || grad_out.num_dim() != 3 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, in_c, in_l) = (self.shape()[0], self.shape()[1], self.shape()[2]);
        let out_l = conv_out(in_l, kernel, stride, padding)?;
        let out_c = grad_out.shape()[1];
        if grad_out.shape() != [batch, out_c, out_l].as_slice() {
            return Err(TensorError::ShapeMismatch);
        }
        let input = self.compact();
        let g = grad_out.compact();
        let mut dw = Self::zeros(&[out_c, in_c, kernel]);
        prim::conv1d_kernel_grad(
            dw.storage_mut(),
            input.as_slice(),
            g.as_slice(),
            batch,
            in_c,
            out_c,
            in_l,
            out_l,
            kernel,
            stride,
            padding,
        );
        Ok(dw)
    }

    /// 3-D convolution of a `[batch, in_c, d, h, w]` input with
    /// `[out_c, in_c, kd, kh, kw]` weights.
    pub fn conv3d(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        stride: (usize, usize, usize),
        padding: (usize, usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 5 || weights.num_dim() != 5 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, in_c, in_d, in_h, in_w) = (
            self.shape()[0],
            self.shape()[1],
            self.shape()[2],
            self.shape()[3],
            self.shape()[4],
        );
        let (out_c, w_in_c, kd, kh, kw) = (
            weights.shape()[0],
            weights.shape()[1],
            weights.shape()[2],
            weights.shape()[3],
            weights.shape()[4],
        );
        if w_in_c != in_c {
            return Err(TensorError::ShapeMismatch);
        }
        let out_d = conv_out(in_d, kd, stride.0, padding.0)?;
        let out_h = conv_out(in_h, kh, stride.1, padding.1)?;
        let out_w = conv_out(in_w, kw, stride.2, padding.2)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::zeros(&[batch, out_c, out_d, out_h, out_w]);
        prim::conv3d(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, out_c)?,
            batch,
            in_c,
            out_c,
            in_d,
            in_h,
            in_w,
            out_d,
            out_h,
            out_w,
            kd,
            kh,
            kw,
            stride.0,
            stride.1,
            stride.2,
            padding.0,
            padding.1,
            padding.2,
        );
        Ok(out)
    }

    /// Depthwise 2-D convolution: `[channels, kh, kw]` weights, one
    /// filter per channel.
    pub fn depthwise_conv2d(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 || weights.num_dim() != 3 {
            return Err(TensorError::RankMismatch);
        }
        let (batch, channels, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        if weights.shape()[0] != channels {
            return Err(TensorError::ShapeMismatch);
        }
        let (kh, kw) = (weights.shape()[1], weights.shape()[2]);
        let out_h = conv_out(in_h, kh, stride.0, padding.0)?;
        let out_w = conv_out(in_w, kw, stride.1, padding.1)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::zeros(&[batch, channels, out_h, out_w]);
        prim::depthwise_conv2d(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, channels)?,
            batch,
            channels,
            in_h,
            in_w,
            out_h,
            out_w,
            kh,
            kw,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok(out)
    }

    /// Grouped 2-D convolution; `in_c` and `out_c` must both divide by
    /// `groups`, and the weights carry `in_c / groups` input channels.
    pub fn group_conv2d(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        groups: usize,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 || weights.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        if groups == 0 {
            return Err(TensorError::InvalidDimension);
        }
        let (batch, in_c, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        let (out_c, w_icg, kh, kw) = (
            weights.shape()[0],
            weights.shape()[1],
            weights.shape()[2],
            weights.shape()[3],
        );
        if in_c % groups != 0 || out_c % groups != 0 || w_icg != in_c / groups {
            return Err(TensorError::ShapeMismatch);
        }
        let out_h = conv_out(in_h, kh, stride.0, padding.0)?;
        let out_w = conv_out(in_w, kw, stride.1, padding.1)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::zeros(&[batch, out_c, out_h, out_w]);
        prim::group_conv2d(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, out_c)?,
            batch,
            in_c,
            out_c,
            groups,
            in_h,
            in_w,
            out_h,
            out_w,
            kh,
            kw,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
        );
        Ok(out)
    }

    /// Dilated 2-D convolution; the effective kernel extent is
    /// `(k - 1) * dilation + 1` per axis.
    pub fn dilated_conv2d(
        &self,
        weights: &Self,
        bias: Option<&Self>,
        stride: (usize, usize),
        padding: (usize, usize),
        dilation: (usize, usize),
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 4 || weights.num_dim() != 4 {
            return Err(TensorError::RankMismatch);
        }
        if dilation.0 == 0 || dilation.1 == 0 {
            return Err(TensorError::InvalidDimension);
        }
        let (batch, in_c, in_h, in_w) =
            (self.shape()[0], self.shape()[1], self.shape()[2], self.shape()[3]);
        let (out_c, w_in_c, kh, kw) = (
            weights.shape()[0],
            weights.shape()[1],
            weights.shape()[2],
            weights.shape()[3],
        );
        if w_in_c != in_c {
            return Err(TensorError::ShapeMismatch);
        }
        let ekh = (kh - 1) * dilation.0 + 1;
        let ekw = (kw - 1) * dilation.1 + 1;
        let out_h = conv_out(in_h, ekh, stride.0, padding.0)?;
        let out_w = conv_out(in_w, ekw, stride.1, padding.1)?;
        let input = self.compact();
        let w = weights.compact();
        let mut out = Self::zeros(&[batch, out_c, out_h, out_w]);
        prim::dilated_conv2d(
            out.storage_mut(),
            input.as_slice(),
            w.as_slice(),
            Self::bias_slice(bias, out_c)?,
            batch,
            in_c,
            out_c,
            in_h,
            in_w,
            out_h,
            out_w,
            kh,
            kw,
            stride.0,
            stride.1,
            padding.0,
            padding.1,
            dilation.0,
            dilation.1,
        );
        Ok(out)
    }
}
