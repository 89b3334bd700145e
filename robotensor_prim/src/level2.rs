/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! BLAS level-2 kernels: matrix-vector operations. Matrices are row-major
//! `m x n` with leading dimension `lda >= n`.

use robotensor_num::RealField;

/// `y = alpha * A * x + beta * y` for row-major `A` of shape `m x n`.
///
/// `beta == 0` overwrites `y` regardless of its prior contents.
pub fn gemv_n<T: RealField>(
    y: &mut [T],
    a: &[T],
    x: &[T],
    lda: usize,
    m: usize,
    n: usize,
    alpha: T,
    beta: T,
) {
    assert!(lda >= n, "gemv_n: lda must be >= n");
    assert!(y.len() >= m, "gemv_n: y buffer too small");
    assert!(x.len() >= n, "gemv_n: x buffer too small");
    assert!(m == 0 || a.len() >= (m - 1) * lda + n, "gemv_n: a buffer too small");
    for i in 0..m {
        let row = &a[i * lda..i * lda + n];
        let mut acc = T::ZERO;
        for (&aij, &xj) in row.iter().zip(&x[..n]) {
            acc += aij * xj;
        }
        y[i] = if beta == T::ZERO {
            alpha * acc
        } else {
            alpha * acc + beta * y[i]
        };
    }
}

/// `y = alpha * A^T * x + beta * y`; `A` is `m x n`, `x` has length `m`,
/// `y` has length `n`.
pub fn gemv_t<T: RealField>(
    y: &mut [T],
    a: &[T],
    x: &[T],
    lda: usize,
    m: usize,
    n: usize,
    alpha: T,
    beta: T,
) {
    assert!(lda >= n, "gemv_t: lda must be >= n");
    assert!(y.len() >= n, "gemv_t: y buffer too small");
    assert!(x.len() >= m, "gemv_t: x buffer too small");
    assert!(m == 0 || a.len() >= (m - 1) * lda + n, "gemv_t: a buffer too small");
    if beta == T::ZERO {
        for yj in &mut y[..n] {
            *yj = T::ZERO;
        }
    } else {
        for yj in &mut y[..n] {
            *yj *= beta;
        }
    }
    // Row-wise accumulation keeps both A and y accesses contiguous.
    for i in 0..m {
        let t = alpha * x[i];
        if t == T::ZERO {
            continue;
        }
        let row = &a[i * lda..i * lda + n];
        for (yj, &aij) in y[..n].iter_mut().zip(row) {
            *yj += t * aij;
        }
    }
}

/// Rank-1 update `A += alpha * x * y^T`.
pub fn ger<T: RealField>(
    a: &mut [T],
    x: &[T],
    y: &[T],
    lda: usize,
    m: usize,
    n: usize,
    alpha: T,
) {
    assert!(lda >= n, "ger: lda must be >= n");
    assert!(x.len() >= m, "ger: x buffer too small");
    assert!(y.len() >= n, "ger: y buffer too small");
    assert!(m == 0 || a.len() >= (m - 1) * lda + n, "ger: a buffer too small");
    for i in 0..m {
        let t = alpha * x[i];
        if t == T::ZERO {
            continue;
        }
        let row = &mut a[i * lda..i * lda + n];
        for (aij, &yj) in row.iter_mut().zip(&y[..n]) {
            *aij += t * yj;
        }
    }
}

/// Symmetric matrix-vector product `y = alpha * A * x + beta * y`.
///
/// Only the upper triangle of `A` (`n x n`, row-major) is referenced; the
/// strictly lower part is taken from its mirror.
pub fn symv<T: RealField>(
    y: &mut [T],
    a: &[T],
    x: &[T],
    lda: usize,
    n: usize,
    alpha: T,
    beta: T,
) {
    assert!(lda >= n, "symv: lda must be >= n");
    assert!(y.len() >= n, "symv: y buffer too small");
    assert!(x.len() >= n, "symv: x buffer too small");
    assert!(n == 0 || a.len() >= (n - 1) * lda + n, "symv: a buffer too small");
    for i in 0..n {
        let mut acc = T::ZERO;
        for j in 0..n {
            let aij = if i <= j { a[i * lda + j] } else { a[j * lda + i] };
            acc += aij * x[j];
        }
        y[i] = if beta == T::ZERO {
            alpha * acc
        } else {
            alpha * acc + beta * y[i]
        };
    }
}

/// Triangular matrix-vector product `x = A * x` in place.
///
/// `upper` selects the triangle of `A` that is populated; the other
/// triangle is treated as zero. The update order makes the in-place
/// overwrite safe: upper-triangular rows only read components at or after
/// their own index, lower-triangular rows only before.
pub fn trmv<T: RealField>(x: &mut [T], a: &[T], lda: usize, n: usize, upper: bool) {
    assert!(lda >= n, "trmv: lda must be >= n");
    assert!(x.len() >= n, "trmv: x buffer too small");
    assert!(n == 0 || a.len() >= (n - 1) * lda + n, "trmv: a buffer too small");
    if upper {
        for i in 0..n {
            let mut acc = T::ZERO;
            for j in i..n {
                acc += a[i * lda + j] * x[j];
            }
            x[i] = acc;
        }
    } else {
        for i in (0..n).rev() {
            let mut acc = T::ZERO;
            for j in 0..=i {
                acc += a[i * lda + j] * x[j];
            }
            x[i] = acc;
        }
    }
}
