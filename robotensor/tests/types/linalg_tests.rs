/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor::{Tensor, TensorError};

fn assert_approx_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(diff < epsilon, "{a} is not approximately equal to {b}");
}

#[test]
fn test_matmul_2x3_3x2() {
    // A = [[1, 2, 3], [4, 5, 6]], B = [[1, 2], [3, 4], [5, 6]]
    // -> [[22, 28], [49, 64]]
    let a = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), &[2, 2]);
    assert_eq!(c.as_slice(), &[22.0, 28.0, 49.0, 64.0]);
}

#[test]
fn test_matmul_inner_dim_mismatch() {
    let a = Tensor::<f32>::zeros(&[2, 3]);
    let b = Tensor::<f32>::zeros(&[2, 2]);
    assert_eq!(a.matmul(&b).unwrap_err(), TensorError::ShapeMismatch);
}

#[test]
fn test_matmul_rank_requirements() {
    let a = Tensor::<f32>::zeros(&[3]);
    let b = Tensor::<f32>::zeros(&[3, 2]);
    assert_eq!(a.matmul(&b).unwrap_err(), TensorError::RankMismatch);
}

#[test]
fn test_matmul_batched() {
    // Batch 0 multiplies by I, batch 1 by 2I.
    let a = Tensor::new(
        vec![
            1.0f32, 0.0, 0.0, 1.0, //
            2.0, 0.0, 0.0, 2.0, //
        ],
        vec![2, 2, 2],
    )
    .unwrap();
    let b = Tensor::new(
        vec![
            1.0f32, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
        ],
        vec![2, 2, 2],
    )
    .unwrap();
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), &[2, 2, 2]);
    assert_eq!(
        c.as_slice(),
        &[1.0, 2.0, 3.0, 4.0, 10.0, 12.0, 14.0, 16.0]
    );
}

#[test]
fn test_matmul_broadcasts_2d_side() {
    // [M, K] x [B, K, N]: the left matrix is reused for every batch.
    let a = Tensor::new(vec![2.0f32, 0.0, 0.0, 2.0], vec![2, 2]).unwrap();
    let b = Tensor::new(
        vec![
            1.0f32, 0.0, 0.0, 1.0, //
            3.0, 0.0, 0.0, 3.0, //
        ],
        vec![2, 2, 2],
    )
    .unwrap();
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), &[2, 2, 2]);
    assert_eq!(c.as_slice(), &[2.0, 0.0, 0.0, 2.0, 6.0, 0.0, 0.0, 6.0]);

    // [B, M, K] x [K, N]: the right matrix is reused.
    let c2 = b.matmul(&a).unwrap();
    assert_eq!(c2.shape(), &[2, 2, 2]);
    assert_eq!(c2.as_slice(), &[2.0, 0.0, 0.0, 2.0, 6.0, 0.0, 0.0, 6.0]);
}

#[test]
fn test_matmul_batch_count_mismatch() {
    let a = Tensor::<f32>::zeros(&[2, 2, 2]);
    let b = Tensor::<f32>::zeros(&[3, 2, 2]);
    assert_eq!(a.matmul(&b).unwrap_err(), TensorError::ShapeMismatch);
}

#[test]
fn test_matmul_associativity_on_integers() {
    // Small integers stored as f32: (A B) C == A (B C) exactly.
    let a = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![2.0f32, 0.0, 1.0, 2.0], vec![2, 2]).unwrap();
    let c = Tensor::new(vec![1.0f32, 1.0, 0.0, 1.0], vec![2, 2]).unwrap();
    let left = a.matmul(&b).unwrap().matmul(&c).unwrap();
    let right = a.matmul(&b.matmul(&c).unwrap()).unwrap();
    assert_eq!(left.as_slice(), right.as_slice());
}

#[test]
fn test_matmul_transposed_variants_agree() {
    let a = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
    let reference = a.matmul(&b).unwrap();

    // gemm_nt on B^T equals gemm_nn on B.
    let bt = b.transpose(None).unwrap();
    let via_nt = a.matmul_transposed(&bt, false, true, None).unwrap();
    assert_eq!(via_nt, reference);

    // gemm_tn on A^T equals gemm_nn on A.
    let at = a.transpose(None).unwrap();
    let via_tn = at.matmul_transposed(&b, true, false, None).unwrap();
    assert_eq!(via_tn, reference);

    // gemm_tt on both transposes.
    let via_tt = at.matmul_transposed(&bt, true, true, None).unwrap();
    assert_eq!(via_tt, reference);
}

#[test]
fn test_matvec_transposed() {
    // y = A^T x with A = [[1, 2, 3], [4, 5, 6]], x = [1, 2].
    let a = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let x = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
    let mut y = Tensor::<f32>::zeros(&[3]);
    y.matvec_transposed(&a, &x, 1.0, 0.0).unwrap();
    assert_eq!(y.as_slice(), &[9.0, 12.0, 15.0]);
}

#[test]
fn test_dot() {
    let a = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![3]).unwrap();
    let b = Tensor::new(vec![4.0f32, 5.0, 6.0], vec![3]).unwrap();
    assert_eq!(a.dot(&b).unwrap(), 32.0);
    let short = Tensor::new(vec![1.0f32], vec![1]).unwrap();
    assert_eq!(a.dot(&short).unwrap_err(), TensorError::ShapeMismatch);
}

#[test]
fn test_norm() {
    // L2 norm of [3, 4, 0] is 5.
    let t = Tensor::new(vec![3.0f32, 4.0, 0.0], vec![3]).unwrap();
    assert_eq!(t.norm(1).unwrap(), 5.0);
    // Order 0 is the L1 norm.
    assert_eq!(t.norm(0).unwrap(), 7.0);
    // Order 2 (Frobenius) matches L2 on the flat view.
    assert_eq!(t.norm(2).unwrap(), 5.0);
    assert!(matches!(
        t.norm(3),
        Err(TensorError::InvalidParameter(_))
    ));
}

#[test]
fn test_normalize_axis() {
    // Normalize each row of [[3, 4], [0, 5]] to unit length.
    let mut t = Tensor::new(vec![3.0f32, 4.0, 0.0, 5.0], vec![2, 2]).unwrap();
    t.normalize(1).unwrap();
    assert_approx_eq(*t.get(&[0, 0]).unwrap(), 0.6, 1e-6);
    assert_approx_eq(*t.get(&[0, 1]).unwrap(), 0.8, 1e-6);
    assert_approx_eq(*t.get(&[1, 0]).unwrap(), 0.0, 1e-6);
    assert_approx_eq(*t.get(&[1, 1]).unwrap(), 1.0, 1e-6);
}

#[test]
fn test_normalize_zero_lane_unchanged() {
    let mut t = Tensor::new(vec![0.0f32, 0.0], vec![1, 2]).unwrap();
    t.normalize(1).unwrap();
    assert_eq!(t.as_slice(), &[0.0, 0.0]);
}

#[test]
fn test_add_scaled() {
    let mut y = Tensor::new(vec![1.0f32, 1.0, 1.0], vec![3]).unwrap();
    let x = Tensor::new(vec![10.0f32, 20.0, 30.0], vec![3]).unwrap();
    y.add_scaled(&x, 2.0).unwrap();
    assert_eq!(y.as_slice(), &[21.0, 41.0, 61.0]);
}
