/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor_prim::{asum, axpy, copy, dot, iamax, nrm2, scal, swap};

#[test]
fn test_axpy_contiguous() {
    // y = [1, 1, 1], x = [10, 20, 30], alpha = 2 -> y = [21, 41, 61]
    let mut y = vec![1.0f32, 1.0, 1.0];
    let x = vec![10.0f32, 20.0, 30.0];
    axpy(&mut y, &x, 1, 1, 3, 2.0);
    assert_eq!(y, vec![21.0, 41.0, 61.0]);
}

#[test]
fn test_axpy_strided() {
    // Every second element of y, every element of x.
    let mut y = vec![1.0f32, 9.0, 1.0, 9.0, 1.0];
    let x = vec![10.0f32, 20.0, 30.0];
    axpy(&mut y, &x, 2, 1, 3, 1.0);
    assert_eq!(y, vec![11.0, 9.0, 21.0, 9.0, 31.0]);
}

#[test]
fn test_axpy_alpha_zero_is_identity() {
    let mut y = vec![1.0f32, 2.0, 3.0];
    let x = vec![5.0f32, 6.0, 7.0];
    axpy(&mut y, &x, 1, 1, 3, 0.0);
    assert_eq!(y, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_dot() {
    let x = vec![1.0f32, 2.0, 3.0];
    let y = vec![4.0f32, 5.0, 6.0];
    assert_eq!(dot(&x, &y, 1, 1, 3), 32.0);
    // Strided: x with stride 2 picks 1 and 3.
    let x2 = vec![1.0f32, 0.0, 3.0];
    let y2 = vec![2.0f32, 4.0];
    assert_eq!(dot(&x2, &y2, 2, 1, 2), 14.0);
}

#[test]
fn test_nrm2() {
    let x = vec![3.0f32, 4.0, 0.0];
    assert_eq!(nrm2(&x, 1, 3), 5.0);
}

#[test]
fn test_nrm2_no_overflow() {
    // Components around 1e20 overflow a naive sum of squares in f32.
    let x = vec![3.0e20f32, 4.0e20];
    let n = nrm2(&x, 1, 2);
    assert!(n.is_finite());
    assert!((n - 5.0e20).abs() < 1.0e15);
}

#[test]
fn test_asum() {
    let x = vec![1.0f32, -2.0, 3.0, -4.0];
    assert_eq!(asum(&x, 1, 4), 10.0);
}

#[test]
fn test_scal() {
    let mut x = vec![1.0f32, 2.0, 3.0];
    scal(&mut x, 1, 3, 2.0);
    assert_eq!(x, vec![2.0, 4.0, 6.0]);
}

#[test]
fn test_scal_alpha_one_is_identity() {
    let mut x = vec![1.5f32, -2.5, 3.5];
    scal(&mut x, 1, 3, 1.0);
    assert_eq!(x, vec![1.5, -2.5, 3.5]);
}

#[test]
fn test_copy_polymorphic_and_idempotent() {
    let x = vec![1i32, 2, 3];
    let mut y = vec![0i32; 3];
    copy(&mut y, &x, 1, 1, 3);
    assert_eq!(y, x);
    // A second copy changes nothing.
    copy(&mut y, &x, 1, 1, 3);
    assert_eq!(y, x);
}

#[test]
fn test_copy_strided() {
    let x = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    let mut y = vec![0.0f64; 3];
    // Column 0 of a 3x2 row-major matrix.
    copy(&mut y, &x, 1, 2, 3);
    assert_eq!(y, vec![1.0, 3.0, 5.0]);
}

#[test]
fn test_swap() {
    let mut x = vec![1i64, 2, 3];
    let mut y = vec![4i64, 5, 6];
    swap(&mut x, &mut y, 1, 1, 3);
    assert_eq!(x, vec![4, 5, 6]);
    assert_eq!(y, vec![1, 2, 3]);
}

#[test]
fn test_iamax() {
    let x = vec![1.0f32, -7.0, 3.0, 7.0];
    // Ties keep the first occurrence.
    assert_eq!(iamax(&x, 1, 4), 1);
    let y = vec![0.0f32, 0.0];
    assert_eq!(iamax(&y, 1, 2), 0);
}
