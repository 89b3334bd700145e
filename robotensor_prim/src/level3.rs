/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! BLAS level-3 kernels. The four GEMM transpose variants are separate
//! functions by contract; each computes `C = alpha * op(A) * op(B) +
//! beta * C` on row-major operands, and `beta == 0` overwrites `C` without
//! reading its prior contents.

use robotensor_num::RealField;

fn prepare_c<T: RealField>(c: &mut [T], ldc: usize, m: usize, n: usize, beta: T) {
    if beta == T::ONE {
        return;
    }
    for i in 0..m {
        let row = &mut c[i * ldc..i * ldc + n];
        if beta == T::ZERO {
            for cij in row {
                *cij = T::ZERO;
            }
        } else {
            for cij in row {
                *cij *= beta;
            }
        }
    }
}

fn check_gemm<T>(
    name: &str,
    c: &[T],
    a: &[T],
    b: &[T],
    ldc: usize,
    lda: usize,
    ldb: usize,
    c_rows: usize,
    c_cols: usize,
    a_rows: usize,
    a_cols: usize,
    b_rows: usize,
    b_cols: usize,
) {
    assert!(ldc >= c_cols, "{name}: ldc must be >= result columns");
    assert!(lda >= a_cols, "{name}: lda must be >= a columns");
    assert!(ldb >= b_cols, "{name}: ldb must be >= b columns");
    assert!(
        c_rows == 0 || c.len() >= (c_rows - 1) * ldc + c_cols,
        "{name}: c buffer too small"
    );
    assert!(
        a_rows == 0 || a.len() >= (a_rows - 1) * lda + a_cols,
        "{name}: a buffer too small"
    );
    assert!(
        b_rows == 0 || b.len() >= (b_rows - 1) * ldb + b_cols,
        "{name}: b buffer too small"
    );
}

/// `C = alpha * A * B + beta * C`; `A` is `m x k`, `B` is `k x n`.
pub fn gemm_nn<T: RealField>(
    c: &mut [T],
    a: &[T],
    b: &[T],
    ldc: usize,
    lda: usize,
    ldb: usize,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    beta: T,
) {
    check_gemm("gemm_nn", c, a, b, ldc, lda, ldb, m, n, m, k, k, n);
    prepare_c(c, ldc, m, n, beta);
    if alpha == T::ZERO {
        return;
    }
    // i-p-j order: the inner loop runs over contiguous rows of B and C.
    for i in 0..m {
        for p in 0..k {
            let t = alpha * a[i * lda + p];
            if t == T::ZERO {
                continue;
            }
            let b_row = &b[p * ldb..p * ldb + n];
            let c_row = &mut c[i * ldc..i * ldc + n];
            for (cij, &bpj) in c_row.iter_mut().zip(b_row) {
                *cij += t * bpj;
            }
        }
    }
}

/// `C = alpha * A * B^T + beta * C`; `A` is `m x k`, `B` is `n x k`.
pub fn gemm_nt<T: RealField>(
    c: &mut [T],
    a: &[T],
    b: &[T],
    ldc: usize,
    lda: usize,
    ldb: usize,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    beta: T,
) {
    check_gemm("gemm_nt", c, a, b, ldc, lda, ldb, m, n, m, k, n, k);
    prepare_c(c, ldc, m, n, beta);
    if alpha == T::ZERO {
        return;
    }
    // Each C entry is a dot product of two contiguous rows.
    for i in 0..m {
        let a_row = &a[i * lda..i * lda + k];
        for j in 0..n {
            let b_row = &b[j * ldb..j * ldb + k];
            let mut acc = T::ZERO;
            for (&aip, &bjp) in a_row.iter().zip(b_row) {
                acc += aip * bjp;
            }
            c[i * ldc + j] += alpha * acc;
        }
    }
}

/// `C = alpha * A^T * B + beta * C`; `A` is `k x m`, `B` is `k x n`.
pub fn gemm_tn<T: RealField>(
    c: &mut [T],
    a: &[T],
    b: &[T],
    ldc: usize,
    lda: usize,
    ldb: usize,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    beta: T,
) {
    check_gemm("gemm_tn", c, a, b, ldc, lda, ldb, m, n, k, m, k, n);
    prepare_c(c, ldc, m, n, beta);
    if alpha == T::ZERO {
        return;
    }
    // p outermost: A and B are both walked row-contiguously.
    for p in 0..k {
        let a_row = &a[p * lda..p * lda + m];
        let b_row = &b[p * ldb..p * ldb + n];
        for (i, &api) in a_row.iter().enumerate() {
            let t = alpha * api;
            if t == T::ZERO {
                continue;
            }
            let c_row = &mut c[i * ldc..i * ldc + n];
            for (cij, &bpj) in c_row.iter_mut().zip(b_row) {
                *cij += t * bpj;
            }
        }
    }
}

/// `C = alpha * A^T * B^T + beta * C`; `A` is `k x m`, `B` is `n x k`.
pub fn gemm_tt<T: RealField>(
    c: &mut [T],
    a: &[T],
    b: &[T],
    ldc: usize,
    lda: usize,
    ldb: usize,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    beta: T,
) {
    check_gemm("gemm_tt", c, a, b, ldc, lda, ldb, m, n, k, m, n, k);
    prepare_c(c, ldc, m, n, beta);
    if alpha == T::ZERO {
        return;
    }
    for i in 0..m {
        for j in 0..n {
            let b_row = &b[j * ldb..j * ldb + k];
            let mut acc = T::ZERO;
            for (p, &bjp) in b_row.iter().enumerate() {
                acc += a[p * lda + i] * bjp;
            }
            c[i * ldc + j] += alpha * acc;
        }
    }
}

/// Symmetric rank-k update `C = alpha * A * A^T + beta * C` with `A` of
/// shape `n x k`. The full square of `C` is written.
pub fn syrk<T: RealField>(
    c: &mut [T],
    a: &[T],
    ldc: usize,
    lda: usize,
    n: usize,
    k: usize,
    alpha: T,
    beta: T,
) {
    assert!(ldc >= n, "syrk: ldc must be >= n");
    assert!(lda >= k, "syrk: lda must be >= k");
    assert!(n == 0 || c.len() >= (n - 1) * ldc + n, "syrk: c buffer too small");
    assert!(n == 0 || a.len() >= (n - 1) * lda + k, "syrk: a buffer too small");
    prepare_c(c, ldc, n, n, beta);
    if alpha == T::ZERO {
        return;
    }
    for i in 0..n {
        let a_i = &a[i * lda..i * lda + k];
        for j in i..n {
            let a_j = &a[j * lda..j * lda + k];
            let mut acc = T::ZERO;
            for (&aip, &ajp) in a_i.iter().zip(a_j) {
                acc += aip * ajp;
            }
            let v = alpha * acc;
            c[i * ldc + j] += v;
            if i != j {
                c[j * ldc + i] += v;
            }
        }
    }
}

/// Triangular matrix-matrix product `B = alpha * A * B` in place, with
/// triangular `A` of shape `m x m` applied from the left. The row update
/// order (forward for upper, backward for lower) keeps the overwrite safe.
pub fn trmm<T: RealField>(
    b: &mut [T],
    a: &[T],
    ldb: usize,
    lda: usize,
    m: usize,
    n: usize,
    upper: bool,
    alpha: T,
) {
    assert!(lda >= m, "trmm: lda must be >= m");
    assert!(ldb >= n, "trmm: ldb must be >= n");
    assert!(m == 0 || a.len() >= (m - 1) * lda + m, "trmm: a buffer too small");
    assert!(m == 0 || b.len() >= (m - 1) * ldb + n, "trmm: b buffer too small");
    if upper {
        for i in 0..m {
            for j in 0..n {
                let mut acc = T::ZERO;
                for p in i..m {
                    acc += a[i * lda + p] * b[p * ldb + j];
                }
                b[i * ldb + j] = alpha * acc;
            }
        }
    } else {
        for i in (0..m).rev() {
            for j in 0..n {
                let mut acc = T::ZERO;
                for p in 0..=i {
                    acc += a[i * lda + p] * b[p * ldb + j];
                }
                b[i * ldb + j] = alpha * acc;
            }
        }
    }
}
