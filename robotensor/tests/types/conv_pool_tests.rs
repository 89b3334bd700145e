/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor::{Tensor, TensorError};

#[test]
fn test_conv2d_literal() {
    // Input [1, 1, 3, 3] = [[1..9]], kernel [[1, 0], [0, -1]],
    // stride 1, pad 0 -> [1, 1, 2, 2] all -4.
    let input = Tensor::new((1..=9).map(|v| v as f32).collect(), vec![1, 1, 3, 3]).unwrap();
    let kernel = Tensor::new(vec![1.0f32, 0.0, 0.0, -1.0], vec![1, 1, 2, 2]).unwrap();
    let out = input.conv2d(&kernel, None, (1, 1), (0, 0)).unwrap();
    assert_eq!(out.shape(), &[1, 1, 2, 2]);
    assert_eq!(out.as_slice(), &[-4.0, -4.0, -4.0, -4.0]);
}

#[test]
fn test_conv2d_rank_and_channel_checks() {
    let input = Tensor::<f32>::zeros(&[1, 2, 3, 3]);
    let bad_rank = Tensor::<f32>::zeros(&[2, 2, 2]);
    assert_eq!(
        input.conv2d(&bad_rank, None, (1, 1), (0, 0)).unwrap_err(),
        TensorError::RankMismatch
    );
    let bad_channels = Tensor::<f32>::zeros(&[1, 3, 2, 2]);
    assert_eq!(
        input
            .conv2d(&bad_channels, None, (1, 1), (0, 0))
            .unwrap_err(),
        TensorError::ShapeMismatch
    );
    let kernel = Tensor::<f32>::zeros(&[1, 2, 2, 2]);
    assert_eq!(
        input.conv2d(&kernel, None, (0, 1), (0, 0)).unwrap_err(),
        TensorError::InvalidDimension
    );
}

#[test]
fn test_conv_equals_im2col_matmul() {
    // conv2d(input, k) == (im2col(input) @ reshape(kernel)).reshape(out).
    let input = Tensor::new((1..=9).map(|v| v as f32).collect(), vec![1, 1, 3, 3]).unwrap();
    let kernel = Tensor::new(vec![1.0f32, 0.0, 0.0, -1.0], vec![1, 1, 2, 2]).unwrap();

    let direct = input.conv2d(&kernel, None, (1, 1), (0, 0)).unwrap();

    let col = input.im2col(None, (2, 2), (1, 1), (0, 0)).unwrap();
    assert_eq!(col.shape(), &[4, 4]);
    let kflat = kernel.reshape(&[4, 1]).unwrap();
    let via_gemm = col
        .matmul(&kflat)
        .unwrap()
        .reshape(&[1, 1, 2, 2])
        .unwrap();
    assert_eq!(direct, via_gemm);
}

#[test]
fn test_conv1d_and_grad() {
    let input = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![1, 1, 4]).unwrap();
    let kernel = Tensor::new(vec![1.0f32, -1.0], vec![1, 1, 2]).unwrap();
    let out = input.conv1d(&kernel, None, 1, 0).unwrap();
    assert_eq!(out.shape(), &[1, 1, 3]);
    assert_eq!(out.as_slice(), &[-1.0, -1.0, -1.0]);

    let dout = Tensor::new(vec![1.0f32, 1.0, 1.0], vec![1, 1, 3]).unwrap();
    let dw = input.conv1d_kernel_grad(&dout, 2, 1, 0).unwrap();
    assert_eq!(dw.shape(), &[1, 1, 2]);
    assert_eq!(dw.as_slice(), &[6.0, 9.0]);
}

#[test]
fn test_conv2d_transposed_shape() {
    let input = Tensor::<f32>::zeros(&[1, 1, 2, 2]);
    let kernel = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![1, 1, 2, 2]).unwrap();
    let out = input.conv2d_transposed(&kernel, None, (1, 1), (0, 0)).unwrap();
    assert_eq!(out.shape(), &[1, 1, 3, 3]);
}

#[test]
fn test_depthwise_and_group_conv() {
    let input = Tensor::new(
        (1..=8).map(|v| v as f32).collect(),
        vec![1, 2, 2, 2],
    )
    .unwrap();
    let dw_kernel = Tensor::new(vec![10.0f32, 100.0], vec![2, 1, 1]).unwrap();
    let dw_out = input.depthwise_conv2d(&dw_kernel, None, (1, 1), (0, 0)).unwrap();
    assert_eq!(dw_out.shape(), &[1, 2, 2, 2]);
    assert_eq!(
        dw_out.as_slice(),
        &[10.0, 20.0, 30.0, 40.0, 500.0, 600.0, 700.0, 800.0]
    );

    let g_kernel = Tensor::new(vec![2.0f32, 3.0], vec![2, 1, 1, 1]).unwrap();
    let g_out = input.group_conv2d(&g_kernel, None, 2, (1, 1), (0, 0)).unwrap();
    assert_eq!(g_out.shape(), &[1, 2, 2, 2]);
    assert_eq!(
        g_out.as_slice(),
        &[2.0, 4.0, 6.0, 8.0, 15.0, 18.0, 21.0, 24.0]
    );

    // in_c % groups != 0 is rejected.
    assert_eq!(
        input
            .group_conv2d(&g_kernel, None, 3, (1, 1), (0, 0))
            .unwrap_err(),
        TensorError::ShapeMismatch
    );
}

#[test]
fn test_dilated_conv2d() {
    let input = Tensor::new((1..=9).map(|v| v as f32).collect(), vec![1, 1, 3, 3]).unwrap();
    let kernel = Tensor::new(vec![1.0f32; 4], vec![1, 1, 2, 2]).unwrap();
    let out = input.dilated_conv2d(&kernel, None, (1, 1), (0, 0), (2, 2)).unwrap();
    assert_eq!(out.shape(), &[1, 1, 1, 1]);
    assert_eq!(out.as_slice(), &[20.0]);
}

#[test]
fn test_conv3d() {
    let input = Tensor::new(vec![1.0f32; 8], vec![1, 1, 2, 2, 2]).unwrap();
    let kernel = Tensor::new(vec![1.0f32; 8], vec![1, 1, 2, 2, 2]).unwrap();
    let out = input.conv3d(&kernel, None, (1, 1, 1), (0, 0, 0)).unwrap();
    assert_eq!(out.shape(), &[1, 1, 1, 1, 1]);
    assert_eq!(out.as_slice(), &[8.0]);
}

#[test]
fn test_max_pool2d_literal() {
    // 4x4 ascending grid, 2x2 window, stride 2 -> [[6, 8], [14, 16]].
    let input = Tensor::new((1..=16).map(|v| v as f32).collect(), vec![1, 1, 4, 4]).unwrap();
    let out = input.max_pool2d(None, (2, 2), (2, 2), (0, 0)).unwrap();
    assert_eq!(out.shape(), &[1, 1, 2, 2]);
    assert_eq!(out.as_slice(), &[6.0, 8.0, 14.0, 16.0]);
}

#[test]
fn test_max_pool2d_backward_roundtrip() {
    let input = Tensor::new((1..=16).map(|v| v as f32).collect(), vec![1, 1, 4, 4]).unwrap();
    let (out, idx) = input
        .max_pool2d_with_indices(None, (2, 2), (2, 2), (0, 0))
        .unwrap();
    assert_eq!(out.as_slice(), &[6.0, 8.0, 14.0, 16.0]);
    let grad = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![1, 1, 2, 2]).unwrap();
    let din = grad
        .max_pool2d_backward(None, &idx, &[1, 1, 4, 4])
        .unwrap();
    assert_eq!(din.shape(), &[1, 1, 4, 4]);
    assert_eq!(din.at(&[0, 0, 1, 1]).unwrap(), 1.0);
    assert_eq!(din.at(&[0, 0, 3, 3]).unwrap(), 4.0);
    assert_eq!(din.at(&[0, 0, 0, 0]).unwrap(), 0.0);
}

#[test]
fn test_avg_and_global_and_adaptive_pool() {
    let input = Tensor::new((1..=16).map(|v| v as f32).collect(), vec![1, 1, 4, 4]).unwrap();
    let avg = input.avg_pool2d(None, (2, 2), (2, 2), (0, 0)).unwrap();
    assert_eq!(avg.as_slice(), &[3.5, 5.5, 11.5, 13.5]);

    let global = input.global_avg_pool2d(None).unwrap();
    assert_eq!(global.shape(), &[1, 1]);
    assert_eq!(global.as_slice(), &[8.5]);

    let adaptive = input.adaptive_avg_pool2d(None, (2, 2)).unwrap();
    assert_eq!(adaptive.as_slice(), &[3.5, 5.5, 11.5, 13.5]);
}

#[test]
fn test_pool_rank_check() {
    let input = Tensor::<f32>::zeros(&[4, 4]);
    assert_eq!(
        input.max_pool2d(None, (2, 2), (2, 2), (0, 0)).unwrap_err(),
        TensorError::RankMismatch
    );
}

#[test]
fn test_im2col_literal() {
    // [1, 1, 2, 2] = [[1, 2], [3, 4]], 2x2 kernel, stride 1, pad 0
    // -> single row [1, 2, 3, 4].
    let input = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![1, 1, 2, 2]).unwrap();
    let col = input.im2col(None, (2, 2), (1, 1), (0, 0)).unwrap();
    assert_eq!(col.shape(), &[1, 4]);
    assert_eq!(col.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_col2im_overlap_count() {
    // col2im(im2col(t)) == t * coverage for stride-1 overlapping folds,
    // and exactly t when the stride covers the kernel.
    let input = Tensor::new((1..=16).map(|v| v as f32).collect(), vec![1, 1, 4, 4]).unwrap();
    let col = input.im2col(None, (2, 2), (2, 2), (0, 0)).unwrap();
    let back = col
        .col2im(None, &[1, 1, 4, 4], (2, 2), (2, 2), (0, 0))
        .unwrap();
    assert_eq!(back, input);
}
