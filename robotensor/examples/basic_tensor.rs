/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Tour of the dense tensor surface: construction, element-wise math,
//! reductions, views, and a matrix product.

use robotensor::{Tensor, TensorError};

fn main() -> Result<(), TensorError> {
    // A 2x3 matrix from a flat row-major buffer.
    let a = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    println!("a       = {a}");

    // Element-wise math mutates in place; the `_to` variants do not.
    let mut b = a.clone();
    b.scale(10.0);
    println!("a * 10  = {b}");
    let sum = (&a + &b)?;
    println!("a + b   = {sum}");

    // Reductions drop the reduced axes.
    println!("col sums = {}", a.sum_axes(&[0])?);
    println!("row mean = {}", a.mean_axes(&[1])?);
    println!("argmax(1) = {}", a.arg_max(1)?);

    // Transpose and matrix product: a (2x3) x a^T (3x2) -> 2x2.
    let at = a.transpose(None)?;
    let gram = a.matmul(&at)?;
    println!("a a^T   = {gram}");
    println!("|a|_2   = {}", a.norm(1)?);

    Ok(())
}
