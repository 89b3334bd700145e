/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use robotensor_prim::gepseu;

fn matmul(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec<f64> {
    let mut c = vec![0.0f64; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut acc = 0.0;
            for p in 0..k {
                acc += a[i * k + p] * b[p * n + j];
            }
            c[i * n + j] = acc;
        }
    }
    c
}

fn assert_close(a: &[f64], b: &[f64], tol: f64) {
    for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        assert!((x - y).abs() <= tol, "index {i}: {x} != {y}");
    }
}

#[test]
fn test_pinv_square_invertible() {
    // For an invertible matrix, the pseudo-inverse is the inverse.
    let a = vec![4.0f64, 7.0, 2.0, 6.0];
    let mut pinv = vec![0.0f64; 4];
    gepseu(&mut pinv, &a, 2, 2, 2, 2).unwrap();
    assert_close(&pinv, &[0.6, -0.7, -0.2, 0.4], 1e-10);
}

#[test]
fn test_pinv_moore_penrose_properties() {
    // A A+ A == A and A+ A A+ == A+ for a random tall matrix.
    let mut rng = SmallRng::seed_from_u64(17);
    let (m, n) = (5, 3);
    let a: Vec<f64> = (0..m * n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let mut pinv = vec![0.0f64; n * m];
    gepseu(&mut pinv, &a, m, n, n, m).unwrap();

    let a_pa = matmul(&matmul(&a, &pinv, m, n, m), &a, m, m, n);
    assert_close(&a_pa, &a, 1e-9);

    let p_ap = matmul(&matmul(&pinv, &a, n, m, n), &pinv, n, n, m);
    assert_close(&p_ap, &pinv, 1e-9);
}

#[test]
fn test_pinv_rank_deficient() {
    // Rank-1 matrix: the small singular value is dropped by the
    // tolerance, and the Moore-Penrose identities must still hold.
    let a = vec![1.0f64, 2.0, 2.0, 4.0];
    let mut pinv = vec![0.0f64; 4];
    gepseu(&mut pinv, &a, 2, 2, 2, 2).unwrap();
    let a_pa = matmul(&matmul(&a, &pinv, 2, 2, 2), &a, 2, 2, 2);
    assert_close(&a_pa, &a, 1e-9);
}
