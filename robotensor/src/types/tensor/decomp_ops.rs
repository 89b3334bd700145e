/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Tensor-level wrappers over the LAPACK-style routines: LU, inverse,
//! QR, SVD, pseudo-inverse, and non-negative least squares.

use crate::types::dtype::TensorElement;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::RealField;
use robotensor_prim as prim;

impl<T: TensorElement + RealField> Tensor<T> {
    fn require_matrix(&self) -> Result<(usize, usize), TensorError> {
        if self.num_dim() != 2 {
            return Err(TensorError::RankMismatch);
        }
        let (m, n) = (self.shape()[0], self.shape()[1]);
        if m == 0 || n == 0 {
            return Err(TensorError::EmptyTensor);
        }
        Ok((m, n))
    }

    /// Partially pivoted LU factorization `P A = L U`.
    ///
    /// Returns the unit-lower `L` (`m x min`), the upper `U` (`min x n`),
    /// and the pivot vector: entry `k` is the row swapped into row `k`.
    pub fn lu(&self) -> Result<(Self, Self, Vec<usize>), TensorError> {
        let (m, n) = self.require_matrix()?;
        let mn = m.min(n);
        let a = self.compact();
        let mut l = Self::zeros(&[m, mn]);
        let mut u = Self::zeros(&[mn, n]);
        let mut ipiv = vec![0usize; mn];
        prim::getrf_split(
            l.storage_mut(),
            u.storage_mut(),
            a.as_slice(),
            m,
            n,
            n,
            &mut ipiv,
        )?;
        Ok((l, u, ipiv))
    }

    /// Inverse of a square matrix through its LU factorization.
    pub fn inverse(&self) -> Result<Self, TensorError> {
        let (m, n) = self.require_matrix()?;
        if m != n {
            return Err(TensorError::ShapeMismatch);
        }
        let work = self.compact();
        let mut lu = work.as_slice()[..n * n].to_vec();
        let mut ipiv = vec![0usize; n];
        prim::getrf(&mut lu, n, n, n, &mut ipiv)?;
        let mut out = Self::zeros(&[n, n]);
        prim::getri(out.storage_mut(), &lu, &ipiv, n, n)?;
        Ok(out)
    }

    /// Thin Householder QR: `A = Q R` with `Q` of shape `m x min(m, n)`
    /// and `R` of shape `min(m, n) x n`.
    pub fn qr(&self) -> Result<(Self, Self), TensorError> {
        let (m, n) = self.require_matrix()?;
        let mn = m.min(n);
        let mut factored = self.compact();
        let mut tau = vec![T::ZERO; mn];
        prim::geqrf(factored.storage_mut(), &mut tau, n, m, n);
        let mut q = Self::zeros(&[m, mn]);
        prim::orgqr(q.storage_mut(), factored.as_slice(), &tau, mn, n, m, mn, mn);
        let mut r = Self::zeros(&[mn, n]);
        {
            let rs = r.storage_mut();
            let fs = factored.as_slice();
            for i in 0..mn {
                for j in i..n {
                    rs[i * n + j] = fs[i * n + j];
                }
            }
        }
        Ok((q, r))
    }

    /// Thin SVD `A = U diag(s) V^T`; singular values descending.
    pub fn svd(&self) -> Result<(Self, Self, Self), TensorError> {
        let (m, n) = self.require_matrix()?;
        let mn = m.min(n);
        let a = self.compact();
        let mut u = Self::zeros(&[m, mn]);
        let mut s = Self::zeros(&[mn]);
        let mut vt = Self::zeros(&[mn, n]);
        prim::gesvd(
            u.storage_mut(),
            s.storage_mut(),
            vt.storage_mut(),
            a.as_slice(),
            n,
            mn,
            n,
            m,
            n,
        )?;
        Ok((u, s, vt))
    }

    /// Moore-Penrose pseudo-inverse (`n x m`) via the SVD.
    pub fn pinverse(&self) -> Result<Self, TensorError> {
        let (m, n) = self.require_matrix()?;
        let a = self.compact();
        let mut out = Self::zeros(&[n, m]);
        prim::gepseu(out.storage_mut(), a.as_slice(), m, n, n, m)?;
        Ok(out)
    }

    /// Non-negative least squares `min ||A x - b||` with `x >= 0`.
    ///
    /// Returns the solution vector and the residual norm.
    pub fn nnls(&self, b: &Self) -> Result<(Self, T), TensorError> {
        let (m, n) = self.require_matrix()?;
        if b.num_dim() != 1 {
            return Err(TensorError::RankMismatch);
        }
        if b.shape()[0] != m {
            return Err(TensorError::ShapeMismatch);
        }
        // The active-set solver destroys its inputs; hand it copies.
        let mut work_a = self.compact().as_slice()[..m * n].to_vec();
        let mut work_b = b.compact().as_slice()[..m].to_vec();
        let mut x = Self::zeros(&[n]);
        let residual = prim::gnnls(x.storage_mut(), &mut work_a, &mut work_b, m, n, n)?;
        Ok((x, residual))
    }
}
