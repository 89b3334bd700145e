/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use crate::lapack::{h1, h2};
use robotensor_num::RealField;

/// Denominator cap handed to the Householder primitives.
fn reflector_range<T: RealField>() -> T {
    T::from_f64(1.0e30)
}

/// Householder QR factorization.
///
/// On return the upper triangle of `a` (diagonal included) holds `R`; the
/// entries below the diagonal hold the reflector tails and `tau[k]` the
/// scalar factor of reflector `k` (`tau` has `min(m, n)` entries).
pub fn geqrf<T: RealField>(a: &mut [T], tau: &mut [T], lda: usize, m: usize, n: usize) {
    assert!(lda >= n, "geqrf: lda must be >= n");
    assert!(m == 0 || a.len() >= (m - 1) * lda + n, "geqrf: a buffer too small");
    let mn = m.min(n);
    assert!(tau.len() >= mn, "geqrf: tau buffer too small");
    let range = reflector_range::<T>();
    let mut uu = vec![T::ZERO; m];
    for k in 0..mn {
        let up = h1(k, k + 1, m, &mut a[k..], lda, range);
        tau[k] = up;
        if k + 1 == n {
            continue;
        }
        // The reflector column aliases the matrix; stage it in scratch
        // before sweeping the trailing columns.
        for i in k..m {
            uu[i] = a[i * lda + k];
        }
        for j in k + 1..n {
            h2(k, k + 1, m, &uu, 1, up, &mut a[j..], lda, range);
        }
    }
}

/// Materialize the orthogonal factor from a [`geqrf`] result.
///
/// `q` is `m x n` (`n <= m`) and receives the product of the first `k`
/// reflectors applied to the identity.
pub fn orgqr<T: RealField>(
    q: &mut [T],
    a: &[T],
    tau: &[T],
    ldq: usize,
    lda: usize,
    m: usize,
    n: usize,
    k: usize,
) {
    assert!(n <= m, "orgqr: q must have at most m columns");
    assert!(ldq >= n, "orgqr: ldq must be >= n");
    assert!(m == 0 || q.len() >= (m - 1) * ldq + n, "orgqr: q buffer too small");
    assert!(tau.len() >= k, "orgqr: tau buffer too small");
    let range = reflector_range::<T>();
    for i in 0..m {
        for j in 0..n {
            q[i * ldq + j] = if i == j { T::ONE } else { T::ZERO };
        }
    }
    let mut uu = vec![T::ZERO; m];
    for kk in (0..k).rev() {
        for i in kk..m {
            uu[i] = a[i * lda + kk];
        }
        for j in 0..n {
            h2(kk, kk + 1, m, &uu, 1, tau[kk], &mut q[j..], ldq, range);
        }
    }
}
