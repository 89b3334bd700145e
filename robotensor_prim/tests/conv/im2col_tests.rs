/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor_prim as prim;

#[test]
fn test_im2col_2x2_kernel_on_2x2_input() {
    // Single window: the whole input flattens to one row [1, 2, 3, 4].
    let im = vec![1.0f32, 2.0, 3.0, 4.0];
    let mut col = vec![0.0f32; 4];
    prim::im2col(&mut col, &im, 1, 1, 2, 2, 2, 2, 0, 0, 1, 1);
    assert_eq!(col, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_im2col_overlapping_windows() {
    // 3x3 input, 2x2 kernel, stride 1: four rows of four taps.
    let im: Vec<f32> = (1..=9).map(|v| v as f32).collect();
    let mut col = vec![0.0f32; 16];
    prim::im2col(&mut col, &im, 1, 1, 3, 3, 2, 2, 0, 0, 1, 1);
    assert_eq!(
        col,
        vec![
            1.0, 2.0, 4.0, 5.0, //
            2.0, 3.0, 5.0, 6.0, //
            4.0, 5.0, 7.0, 8.0, //
            5.0, 6.0, 8.0, 9.0, //
        ]
    );
}

#[test]
fn test_im2col_padding_reads_zero() {
    // 1x1 input, 2x2 kernel, pad 1, stride 1: each window holds the
    // pixel in a different tap position.
    let im = vec![5.0f32];
    let mut col = vec![0.0f32; 16];
    prim::im2col(&mut col, &im, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1);
    assert_eq!(
        col,
        vec![
            0.0, 0.0, 0.0, 5.0, //
            0.0, 0.0, 5.0, 0.0, //
            0.0, 5.0, 0.0, 0.0, //
            5.0, 0.0, 0.0, 0.0, //
        ]
    );
}

#[test]
fn test_col2im_sums_overlaps() {
    // Fold back the stride-1 im2col of a 3x3 input: every position is
    // reproduced multiplied by how many windows covered it.
    let im: Vec<f32> = (1..=9).map(|v| v as f32).collect();
    let mut col = vec![0.0f32; 16];
    prim::im2col(&mut col, &im, 1, 1, 3, 3, 2, 2, 0, 0, 1, 1);
    let mut back = vec![0.0f32; 9];
    prim::col2im(&mut back, &col, 1, 1, 3, 3, 2, 2, 0, 0, 1, 1);
    // Coverage counts: corners 1, edges 2, center 4.
    let coverage = [1.0f32, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0];
    let expected: Vec<f32> = im.iter().zip(coverage.iter()).map(|(&v, &c)| v * c).collect();
    assert_eq!(back, expected);
}

#[test]
fn test_col2im_roundtrip_when_stride_covers_kernel() {
    // Non-overlapping windows: col2im(im2col(x)) == x.
    let im: Vec<f32> = (1..=16).map(|v| v as f32).collect();
    let mut col = vec![0.0f32; 16];
    prim::im2col(&mut col, &im, 1, 1, 4, 4, 2, 2, 0, 0, 2, 2);
    let mut back = vec![0.0f32; 16];
    prim::col2im(&mut back, &col, 1, 1, 4, 4, 2, 2, 0, 0, 2, 2);
    assert_eq!(back, im);
}

#[test]
fn test_conv_equals_im2col_gemm() {
    // conv2d(input, kernel) == im2col(input) @ flattened kernel.
    let input: Vec<f32> = (1..=9).map(|v| v as f32).collect();
    let weights = vec![1.0f32, 0.0, 0.0, -1.0];

    let mut direct = vec![0.0f32; 4];
    prim::conv2d(
        &mut direct,
        &input,
        &weights,
        None,
        1,
        1,
        1,
        3,
        3,
        2,
        2,
        2,
        2,
        1,
        1,
        0,
        0,
    );

    let mut col = vec![0.0f32; 16];
    prim::im2col(&mut col, &input, 1, 1, 3, 3, 2, 2, 0, 0, 1, 1);
    // col is [4, 4]; weights flattened are [4, 1]: C = col * w.
    let mut viagemm = vec![0.0f32; 4];
    prim::gemm_nn(&mut viagemm, &col, &weights, 1, 4, 1, 4, 1, 4, 1.0, 0.0);

    assert_eq!(direct, viagemm);
}
