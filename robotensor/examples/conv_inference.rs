/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! A miniature inference pipeline: convolution, pooling, and a dense
//! head, all on the CPU tensor core.

use robotensor::{Tensor, TensorError};

fn main() -> Result<(), TensorError> {
    // One 6x6 input image, single channel.
    let image = Tensor::new(
        (0..36).map(|v| (v % 7) as f32).collect(),
        vec![1, 1, 6, 6],
    )?;

    // Two 3x3 edge filters.
    let filters = Tensor::new(
        vec![
            // horizontal
            1.0f32, 1.0, 1.0, //
            0.0, 0.0, 0.0, //
            -1.0, -1.0, -1.0, //
            // vertical
            1.0, 0.0, -1.0, //
            1.0, 0.0, -1.0, //
            1.0, 0.0, -1.0, //
        ],
        vec![2, 1, 3, 3],
    )?;
    let bias = Tensor::new(vec![0.1f32, -0.1], vec![2])?;

    let features = image.conv2d(&filters, Some(&bias), (1, 1), (0, 0))?;
    println!("conv out shape: {:?}", features.shape());

    let pooled = features.max_pool2d(None, (2, 2), (2, 2), (0, 0))?;
    println!("pooled shape:   {:?}", pooled.shape());

    // Flatten and apply a dense head via GEMM.
    let flat = pooled.reshape(&[1, pooled.len()])?;
    let weights = Tensor::new(vec![0.05f32; flat.len() * 3], vec![flat.len(), 3])?;
    let logits = flat.matmul(&weights)?;
    println!("logits:         {logits}");

    let class = logits.reshape(&[3])?.arg_max(0)?;
    println!("predicted:      {class}");

    Ok(())
}
