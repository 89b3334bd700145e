/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use robotensor::{NumericalError, Tensor, TensorError};

fn random_matrix(m: usize, n: usize, seed: u64) -> Tensor<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..m * n).map(|_| rng.random_range(-1.0..1.0)).collect();
    Tensor::new(data, vec![m, n]).unwrap()
}

fn assert_tensor_close(a: &Tensor<f64>, b: &Tensor<f64>, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.elements().zip(b.elements()) {
        assert!(
            (x.value() - y.value()).abs() <= tol,
            "{} != {}",
            x.value(),
            y.value()
        );
    }
}

#[test]
fn test_lu_reconstructs_permuted_matrix() {
    let a = random_matrix(4, 4, 31);
    let (l, u, ipiv) = a.lu().unwrap();
    assert_eq!(l.shape(), &[4, 4]);
    assert_eq!(u.shape(), &[4, 4]);

    // Apply the recorded swaps to a copy of A, then compare with L U.
    let mut pa = a.as_slice().to_vec();
    for k in 0..4 {
        if ipiv[k] != k {
            for j in 0..4 {
                pa.swap(k * 4 + j, ipiv[k] * 4 + j);
            }
        }
    }
    let pa = Tensor::new(pa, vec![4, 4]).unwrap();
    let lu = l.matmul(&u).unwrap();
    assert_tensor_close(&lu, &pa, 1e-10);
}

#[test]
fn test_inverse() {
    let a = Tensor::new(vec![4.0f64, 7.0, 2.0, 6.0], vec![2, 2]).unwrap();
    let inv = a.inverse().unwrap();
    let expected = Tensor::new(vec![0.6f64, -0.7, -0.2, 0.4], vec![2, 2]).unwrap();
    assert_tensor_close(&inv, &expected, 1e-12);
}

#[test]
fn test_inverse_singular() {
    let a = Tensor::new(vec![1.0f64, 2.0, 2.0, 4.0], vec![2, 2]).unwrap();
    assert_eq!(
        a.inverse().unwrap_err(),
        TensorError::Numerical(NumericalError::SingularMatrix)
    );
}

#[test]
fn test_inverse_requires_square() {
    let a = Tensor::<f64>::zeros(&[2, 3]);
    assert_eq!(a.inverse().unwrap_err(), TensorError::ShapeMismatch);
}

#[test]
fn test_qr_orthogonality_and_reconstruction() {
    let a = random_matrix(5, 3, 37);
    let (q, r) = a.qr().unwrap();
    assert_eq!(q.shape(), &[5, 3]);
    assert_eq!(r.shape(), &[3, 3]);

    // Q^T Q == I within 1e-5.
    let qtq = q.matmul_transposed(&q, true, false, None).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((qtq.get(&[i, j]).unwrap() - expected).abs() < 1e-5);
        }
    }

    // Q R == A within 1e-5.
    let qr = q.matmul(&r).unwrap();
    assert_tensor_close(&qr, &a, 1e-5);

    // R is upper triangular.
    for i in 0..3 {
        for j in 0..i {
            assert_eq!(*r.get(&[i, j]).unwrap(), 0.0);
        }
    }
}

#[test]
fn test_svd_reconstruction() {
    let a = random_matrix(4, 3, 41);
    let (u, s, vt) = a.svd().unwrap();
    assert_eq!(u.shape(), &[4, 3]);
    assert_eq!(s.shape(), &[3]);
    assert_eq!(vt.shape(), &[3, 3]);

    // Singular values descending.
    let sv = s.as_slice();
    assert!(sv[0] >= sv[1] && sv[1] >= sv[2]);

    // U diag(s) V^T == A within 1e-4 Frobenius-relative error.
    let mut us = u.clone();
    for i in 0..4 {
        for k in 0..3 {
            let v = us.at(&[i, k]).unwrap() * sv[k];
            us.set_at(v, &[i, k]).unwrap();
        }
    }
    let recon = us.matmul(&vt).unwrap();
    let diff = recon.sub_to(&a, None).unwrap();
    let rel = diff.norm(2).unwrap() / a.norm(2).unwrap();
    assert!(rel < 1e-4, "relative error {rel}");
}

#[test]
fn test_pinverse_properties() {
    let a = random_matrix(5, 3, 43);
    let p = a.pinverse().unwrap();
    assert_eq!(p.shape(), &[3, 5]);

    // A A+ A == A
    let apa = a.matmul(&p).unwrap().matmul(&a).unwrap();
    assert_tensor_close(&apa, &a, 1e-8);
    // A+ A A+ == A+
    let pap = p.matmul(&a).unwrap().matmul(&p).unwrap();
    assert_tensor_close(&pap, &p, 1e-8);
}

#[test]
fn test_nnls_feasible() {
    let a = Tensor::new(vec![1.0f64, 0.0, 0.0, 1.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![-1.0f64, 2.0], vec![2]).unwrap();
    let (x, residual) = a.nnls(&b).unwrap();
    assert_eq!(x.shape(), &[2]);
    assert_eq!(*x.get(&[0]).unwrap(), 0.0);
    assert!((x.get(&[1]).unwrap() - 2.0).abs() < 1e-10);
    assert!((residual - 1.0).abs() < 1e-10);
    // Feasibility: every component non-negative.
    assert!(x.as_slice().iter().all(|&v| v >= 0.0));
}

#[test]
fn test_nnls_shape_checks() {
    let a = Tensor::<f64>::zeros(&[3, 2]);
    let b = Tensor::<f64>::zeros(&[2]);
    assert_eq!(a.nnls(&b).unwrap_err(), TensorError::ShapeMismatch);
}

#[test]
fn test_decomp_requires_matrix() {
    let v = Tensor::<f64>::zeros(&[4]);
    assert_eq!(v.lu().unwrap_err(), TensorError::RankMismatch);
    assert_eq!(v.qr().unwrap_err(), TensorError::RankMismatch);
    assert_eq!(v.svd().unwrap_err(), TensorError::RankMismatch);
    assert_eq!(v.pinverse().unwrap_err(), TensorError::RankMismatch);
}
