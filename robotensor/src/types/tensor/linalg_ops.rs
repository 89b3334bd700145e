/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Linear-algebra operations: the matmul family over GEMM, vector
//! products, norms, and scaled accumulation.

use crate::types::dtype::TensorElement;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::RealField;
use robotensor_prim as prim;

impl<T: TensorElement + RealField> Tensor<T> {
    /// Matrix product. `2D x 2D` runs a single GEMM; a 3-D operand makes
    /// it a batched product via the strided GEMM kernel, and a 2-D
    /// operand on either side is broadcast across the other side's batch
    /// dimension.
    pub fn matmul(&self, other: &Self) -> Result<Self, TensorError> {
        self.matmul_to(other, None)
    }

    /// [`Tensor::matmul`] with an optional destination.
    pub fn matmul_to(&self, other: &Self, dst: Option<Self>) -> Result<Self, TensorError> {
        let a = self.compact();
        let b = other.compact();
        match (a.num_dim(), b.num_dim()) {
            (2, 2) => {
                let (m, k) = (a.shape()[0], a.shape()[1]);
                let (k2, n) = (b.shape()[0], b.shape()[1]);
                if k != k2 {
                    return Err(TensorError::ShapeMismatch);
                }
                let mut out = Self::make_dst(dst, &[m, n])?;
                prim::gemm_nn(
                    out.storage_mut(),
                    a.as_slice(),
                    b.as_slice(),
                    n,
                    k,
                    n,
                    m,
                    n,
                    k,
                    T::ONE,
                    T::ZERO,
                );
                Ok(out)
            }
            (3, 3) | (2, 3) | (3, 2) => {
                let (batch_a, m, k) = if a.num_dim() == 3 {
                    (Some(a.shape()[0]), a.shape()[1], a.shape()[2])
                } else {
                    (None, a.shape()[0], a.shape()[1])
                };
                let (batch_b, k2, n) = if b.num_dim() == 3 {
                    (Some(b.shape()[0]), b.shape()[1], b.shape()[2])
                } else {
                    (None, b.shape()[0], b.shape()[1])
                };
                if k != k2 {
                    return Err(TensorError::ShapeMismatch);
                }
                let batch = match (batch_a, batch_b) {
                    (Some(ba), Some(bb)) => {
                        if ba != bb {
                            return Err(TensorError::ShapeMismatch);
                        }
                        ba
                    }
                    (Some(ba), None) => ba,
                    (None, Some(bb)) => bb,
                    (None, None) => unreachable!(),
                };
                let stride_a = if batch_a.is_some() { m * k } else { 0 };
                let stride_b = if batch_b.is_some() { k * n } else { 0 };
                let mut out = Self::make_dst(dst, &[batch, m, n])?;
                prim::gemm_strided(
                    out.storage_mut(),
                    a.as_slice(),
                    b.as_slice(),
                    n,
                    k,
                    n,
                    m,
                    n,
                    k,
                    T::ONE,
                    T::ZERO,
                    batch,
                    stride_a,
                    stride_b,
                    m * n,
                );
                Ok(out)
            }
            _ => Err(TensorError::RankMismatch),
        }
    }

    /// 2-D matrix product with independently transposed operands,
    /// dispatching to the dedicated GEMM transpose variant.
    pub fn matmul_transposed(
        &self,
        other: &Self,
        transpose_a: bool,
        transpose_b: bool,
        dst: Option<Self>,
    ) -> Result<Self, TensorError> {
        if self.num_dim() != 2 || other.num_dim() != 2 {
            return Err(TensorError::RankMismatch);
        }
        let a = self.compact();
        let b = other.compact();
        let (m, ka) = if transpose_a {
            (a.shape()[1], a.shape()[0])
        } else {
            (a.shape()[0], a.shape()[1])
        };
        let (kb, n) = if transpose_b {
            (b.shape()[1], b.shape()[0])
        } else {
            (b.shape()[0], b.shape()[1])
        };
        if ka != kb {
            return Err(TensorError::ShapeMismatch);
        }
        let lda = a.shape()[1];
        let ldb = b.shape()[1];
        let mut out = Self::make_dst(dst, &[m, n])?;
        let gemm = match (transpose_a, transpose_b) {
            (false, false) => prim::gemm_nn::<T>,
            (false, true) => prim::gemm_nt::<T>,
            (true, false) => prim::gemm_tn::<T>,
            (true, true) => prim::gemm_tt::<T>,
        };
        gemm(
            out.storage_mut(),
            a.as_slice(),
            b.as_slice(),
            n,
            lda,
            ldb,
            m,
            n,
            ka,
            T::ONE,
            T::ZERO,
        );
        Ok(out)
    }

    /// `self = alpha * matrix^T * vector + beta * self`; the receiver is
    /// the length-`n` output of a transposed matrix-vector product.
    pub fn matvec_transposed(
        &mut self,
        matrix: &Self,
        vector: &Self,
        alpha: T,
        beta: T,
    ) -> Result<(), TensorError> {
        if matrix.num_dim() != 2 || vector.num_dim() != 1 || self.num_dim() != 1 {
            return Err(TensorError::RankMismatch);
        }
        let (m, n) = (matrix.shape()[0], matrix.shape()[1]);
        if vector.shape()[0] != m || self.shape()[0] != n {
            return Err(TensorError::ShapeMismatch);
        }
        if !self.is_contiguous() {
            *self = self.compact();
        }
        let a = matrix.compact();
        let x = vector.compact();
        prim::gemv_t(self.storage_mut(), a.as_slice(), x.as_slice(), n, m, n, alpha, beta);
        Ok(())
    }

    /// Inner product of two equal-length rank-1 tensors.
    pub fn dot(&self, other: &Self) -> Result<T, TensorError> {
        if self.num_dim() != 1 || other.num_dim() != 1 {
            return Err(TensorError::RankMismatch);
        }
        if self.shape()[0] != other.shape()[0] {
            return Err(TensorError::ShapeMismatch);
        }
        let n = self.shape()[0];
        let sx = if n > 0 { self.strides()[0] } else { 1 };
        let sy = if n > 0 { other.strides()[0] } else { 1 };
        Ok(prim::dot(self.as_slice(), other.as_slice(), sx, sy, n))
    }

    /// Vector norm over the flattened elements: order `0` is the L1 norm,
    /// `1` the L2 norm, and `2` the Frobenius norm (identical to L2 on
    /// the flat view).
    pub fn norm(&self, ord: usize) -> Result<T, TensorError> {
        let flat = self.compact();
        let n = flat.len();
        match ord {
            0 => Ok(prim::asum(flat.as_slice(), 1, n)),
            1 | 2 => Ok(prim::nrm2(flat.as_slice(), 1, n)),
            _ => Err(TensorError::InvalidParameter(format!(
                "unsupported norm order {ord}"
            ))),
        }
    }

    /// Scales every lane along `axis` to unit L2 norm, in place. Lanes
    /// with zero norm are left unchanged.
    pub fn normalize(&mut self, axis: usize) -> Result<(), TensorError> {
        if axis >= self.num_dim() {
            return Err(TensorError::AxisOutOfBounds);
        }
        let lane_len = self.shape()[axis];
        let lane_stride = self.strides()[axis];
        let strides = self.strides().to_vec();
        let shape = self.shape_obj().clone();
        if lane_len == 0 {
            return Ok(());
        }
        let lanes = shape.iter_indices(&[(axis, 0)])?;
        let buf = self.storage_mut();
        for lane in lanes {
            let mut base = 0usize;
            for (ax, &i) in lane.as_slice().iter().enumerate() {
                base += i * strides[ax];
            }
            let norm = prim::nrm2(&buf[base..], lane_stride, lane_len);
            if norm != T::ZERO {
                prim::scal(&mut buf[base..], lane_stride, lane_len, T::ONE / norm);
            }
        }
        Ok(())
    }

    /// `self += alpha * other`, element-wise over equal shapes.
    pub fn add_scaled(&mut self, other: &Self, alpha: T) -> Result<(), TensorError> {
        self.check_same_shape(other)?;
        let rhs = other.share_buf();
        if self.is_contiguous() && other.is_contiguous() {
            let n = self.len();
            prim::axpy(self.storage_mut(), &rhs[..], 1, 1, n, alpha);
        } else {
            let shape = self.shape().to_vec();
            let sy = self.strides().to_vec();
            let sx = other.strides().to_vec();
            let off = other.offset();
            prim::elem_axpy_mut(self.storage_mut(), &sy, &rhs[off..], &sx, &shape, alpha);
        }
        Ok(())
    }
}
