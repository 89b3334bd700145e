/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor::{Tensor, TensorError};

#[test]
fn test_elements_row_major() {
    let tensor = Tensor::new(vec![1, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
    let values: Vec<i32> = tensor.elements().map(|e| e.value()).collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);

    let indices: Vec<Vec<usize>> = tensor.elements().map(|e| e.indices().to_vec()).collect();
    assert_eq!(indices[0], vec![0, 0]);
    assert_eq!(indices[5], vec![1, 2]);
}

#[test]
fn test_elements_respects_strides() {
    let tensor = Tensor::new(vec![1, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
    let view = tensor.permute_axes(&[1, 0]).unwrap();
    let values: Vec<i32> = view.elements().map(|e| e.value()).collect();
    // Transposed logical order.
    assert_eq!(values, vec![1, 4, 2, 5, 3, 6]);
}

#[test]
fn test_elements_fixed_axes() {
    let tensor = Tensor::new((0..24).collect(), vec![2, 3, 4]).unwrap();
    // Pin axis 0 at 1 and axis 2 at 0: four... no, three elements, one
    // per position on axis 1.
    let values: Vec<i32> = tensor
        .elements_fixed(&[(0, 1), (2, 0)])
        .unwrap()
        .map(|e| e.value())
        .collect();
    assert_eq!(values, vec![12, 16, 20]);
}

#[test]
fn test_elements_fixed_axis_errors() {
    let tensor = Tensor::new(vec![1, 2], vec![2]).unwrap();
    assert!(matches!(
        tensor.elements_fixed(&[(1, 0)]),
        Err(TensorError::AxisOutOfBounds)
    ));
}

#[test]
fn test_element_as_f64() {
    let tensor = Tensor::new(vec![1i16, -3], vec![2]).unwrap();
    let doubles: Vec<f64> = tensor.elements().map(|e| e.as_f64()).collect();
    assert_eq!(doubles, vec![1.0, -3.0]);
}

#[test]
fn test_elements_of_empty_tensor() {
    let empty = Tensor::<f32>::empty();
    assert_eq!(empty.elements().count(), 0);
    let degenerate = Tensor::<f32>::new(vec![], vec![0, 2]).unwrap();
    assert_eq!(degenerate.elements().count(), 0);
}

#[test]
fn test_elements_is_finite_and_exact() {
    let tensor = Tensor::new(vec![1.0f32; 12], vec![3, 4]).unwrap();
    let iter = tensor.elements();
    assert_eq!(iter.len(), 12);
    assert_eq!(iter.count(), 12);
}
