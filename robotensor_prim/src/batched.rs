/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Batched GEMM / GEMV. `gemm_strided` advances every operand by a single
//! fixed stride per batch index; `gemm_batched` takes explicit per-matrix
//! offsets into the parent buffers.

use crate::{gemm_nn, gemv_n};
use robotensor_num::RealField;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per batch index `t`: `C[t] = alpha * A[t] * B[t] + beta * C[t]`, where
/// operand `t` starts `t * stride` elements into its parent buffer.
/// `Send + Sync` admits the batch-parallel path behind the `parallel`
/// feature.
pub fn gemm_strided<T: RealField + Send + Sync>(
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
    batch: usize,
    stride_a: usize,
    stride_b: usize,
    stride_c: usize,
) {
    if batch == 0 {
        return;
    }
    // Disjoint C chunks allow the batch loop to run in parallel; with a
    // short stride the matrices overlap and the loop must stay sequential.
    #[cfg(feature = "parallel")]
    {
        let c_span = if m == 0 { 0 } else { (m - 1) * ldc + n };
        if stride_c >= c_span && stride_c > 0 && c.len() >= batch * stride_c {
            c[..batch * stride_c]
                .par_chunks_mut(stride_c)
                .enumerate()
                .for_each(|(t, ct)| {
                    let at = &a[t * stride_a..];
                    let bt = &b[t * stride_b..];
                    gemm_nn(ct, at, bt, ldc, lda, ldb, m, n, k, alpha, beta);
                });
            return;
        }
    }
    for t in 0..batch {
        let ct = &mut c[t * stride_c..];
        let at = &a[t * stride_a..];
        let bt = &b[t * stride_b..];
        gemm_nn(ct, at, bt, ldc, lda, ldb, m, n, k, alpha, beta);
    }
}

/// Batched GEMM with an explicit offset per matrix:
/// `C[off_c[t]..] = alpha * A[off_a[t]..] * B[off_b[t]..] + beta * C[...]`.
pub fn gemm_batched<T: RealField>(
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
    off_a: &[usize],
    off_b: &[usize],
    off_c: &[usize],
) {
    assert!(
        off_a.len() == off_c.len() && off_b.len() == off_c.len(),
        "gemm_batched: offset lists must have equal length"
    );
    for t in 0..off_c.len() {
        let ct = &mut c[off_c[t]..];
        let at = &a[off_a[t]..];
        let bt = &b[off_b[t]..];
        gemm_nn(ct, at, bt, ldc, lda, ldb, m, n, k, alpha, beta);
    }
}

/// Per batch index `t`: `y[t] = alpha * A[t] * x[t] + beta * y[t]`.
pub fn gemv_batched<T: RealField>(
    y: &mut [T],
    a: &[T],
    x: &[T],
    lda: usize,
    m: usize,
    n: usize,
    alpha: T,
    beta: T,
    batch: usize,
    stride_a: usize,
    stride_x: usize,
    stride_y: usize,
) {
    for t in 0..batch {
        let yt = &mut y[t * stride_y..];
        let at = &a[t * stride_a..];
        let xt = &x[t * stride_x..];
        gemv_n(yt, at, xt, lda, m, n, alpha, beta);
    }
}
