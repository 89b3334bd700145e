/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use crate::NumericalError;
use robotensor_num::RealField;

/// In-place LU factorization with partial pivoting.
///
/// On success `a` holds the unit-lower factor `L` strictly below the
/// diagonal and `U` on and above it. `ipiv[k]` records the row that was
/// swapped into row `k`; `ipiv` must hold `min(m, n)` entries.
pub fn getrf<T: RealField>(
    a: &mut [T],
    m: usize,
    n: usize,
    lda: usize,
    ipiv: &mut [usize],
) -> Result<(), NumericalError> {
    assert!(lda >= n, "getrf: lda must be >= n");
    assert!(m == 0 || a.len() >= (m - 1) * lda + n, "getrf: a buffer too small");
    let mn = m.min(n);
    assert!(ipiv.len() >= mn, "getrf: ipiv buffer too small");
    for k in 0..mn {
        // Partial pivot: the largest magnitude in column k at or below the
        // diagonal.
        let mut p = k;
        let mut best = a[k * lda + k].abs_val();
        for i in k + 1..m {
            let v = a[i * lda + k].abs_val();
            if v > best {
                best = v;
                p = i;
            }
        }
        if best == T::ZERO {
            return Err(NumericalError::SingularMatrix);
        }
        ipiv[k] = p;
        if p != k {
            for j in 0..n {
                a.swap(k * lda + j, p * lda + j);
            }
        }
        let pivot = a[k * lda + k];
        for i in k + 1..m {
            let l = a[i * lda + k] / pivot;
            a[i * lda + k] = l;
            for j in k + 1..n {
                a[i * lda + j] -= l * a[k * lda + j];
            }
        }
    }
    Ok(())
}

/// Out-of-place LU: factors `a` into distinct unit-lower `l` (`m x min`)
/// and upper `u` (`min x n`) buffers, both dense row-major.
pub fn getrf_split<T: RealField>(
    l: &mut [T],
    u: &mut [T],
    a: &[T],
    m: usize,
    n: usize,
    lda: usize,
    ipiv: &mut [usize],
) -> Result<(), NumericalError> {
    assert!(lda >= n, "getrf_split: lda must be >= n");
    let mn = m.min(n);
    assert!(l.len() >= m * mn, "getrf_split: l buffer too small");
    assert!(u.len() >= mn * n, "getrf_split: u buffer too small");
    let mut work = vec![T::ZERO; m * n];
    for i in 0..m {
        work[i * n..i * n + n].copy_from_slice(&a[i * lda..i * lda + n]);
    }
    getrf(&mut work, m, n, n, ipiv)?;
    for i in 0..m {
        for j in 0..mn {
            l[i * mn + j] = if j < i {
                work[i * n + j]
            } else if j == i {
                T::ONE
            } else {
                T::ZERO
            };
        }
    }
    for i in 0..mn {
        for j in 0..n {
            u[i * n + j] = if j >= i { work[i * n + j] } else { T::ZERO };
        }
    }
    Ok(())
}

/// Matrix inverse from an LU factorization produced by [`getrf`].
///
/// Solves `A x = e_j` column by column: the recorded row swaps are applied
/// to the unit column, then a unit-lower forward substitution and an upper
/// back substitution. `a_inv` uses the same leading dimension as `a_lu`.
pub fn getri<T: RealField>(
    a_inv: &mut [T],
    a_lu: &[T],
    ipiv: &[usize],
    n: usize,
    lda: usize,
) -> Result<(), NumericalError> {
    assert!(lda >= n, "getri: lda must be >= n");
    assert!(n == 0 || a_lu.len() >= (n - 1) * lda + n, "getri: a_lu buffer too small");
    assert!(n == 0 || a_inv.len() >= (n - 1) * lda + n, "getri: a_inv buffer too small");
    assert!(ipiv.len() >= n, "getri: ipiv buffer too small");
    for k in 0..n {
        if a_lu[k * lda + k] == T::ZERO {
            return Err(NumericalError::SingularMatrix);
        }
    }
    for j in 0..n {
        for i in 0..n {
            a_inv[i * lda + j] = if i == j { T::ONE } else { T::ZERO };
        }
        for k in 0..n {
            let p = ipiv[k];
            if p != k {
                a_inv.swap(k * lda + j, p * lda + j);
            }
        }
        // L y = P e_j
        for i in 1..n {
            let mut s = a_inv[i * lda + j];
            for p in 0..i {
                s -= a_lu[i * lda + p] * a_inv[p * lda + j];
            }
            a_inv[i * lda + j] = s;
        }
        // U x = y
        for i in (0..n).rev() {
            let mut s = a_inv[i * lda + j];
            for p in i + 1..n {
                s -= a_lu[i * lda + p] * a_inv[p * lda + j];
            }
            a_inv[i * lda + j] = s / a_lu[i * lda + i];
        }
    }
    Ok(())
}
