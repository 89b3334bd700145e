/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor::{NumericalError, TensorError};
use std::error::Error;

#[test]
fn test_error_display_and_debug() {
    let test_cases = [
        (
            TensorError::ShapeMismatch,
            "TensorError: Shape mismatch error",
            "ShapeMismatch",
        ),
        (
            TensorError::RankMismatch,
            "TensorError: Rank mismatch error",
            "RankMismatch",
        ),
        (
            TensorError::AxisOutOfBounds,
            "TensorError: Axis out of bounds error",
            "AxisOutOfBounds",
        ),
        (
            TensorError::DuplicateAxis,
            "TensorError: Duplicate axis error",
            "DuplicateAxis",
        ),
        (
            TensorError::DTypeUnsupported,
            "TensorError: Data type unsupported error",
            "DTypeUnsupported",
        ),
        (
            TensorError::InvalidDimension,
            "TensorError: Invalid dimension error",
            "InvalidDimension",
        ),
        (
            TensorError::BufferSizeMismatch,
            "TensorError: Buffer size mismatch error",
            "BufferSizeMismatch",
        ),
        (
            TensorError::EmptyTensor,
            "TensorError: Empty tensor error",
            "EmptyTensor",
        ),
        (
            TensorError::InvalidOperation,
            "TensorError: Invalid operation error",
            "InvalidOperation",
        ),
        (
            TensorError::UnorderableValue,
            "TensorError: Unorderable value encountered",
            "UnorderableValue",
        ),
        (
            TensorError::InvalidParameter("bad input".to_string()),
            "TensorError: Invalid parameter: bad input",
            "InvalidParameter(\"bad input\")",
        ),
        (
            TensorError::Numerical(NumericalError::SingularMatrix),
            "TensorError: NumericalError: Singular matrix",
            "Numerical(SingularMatrix)",
        ),
        (
            TensorError::Numerical(NumericalError::DidNotConverge),
            "TensorError: NumericalError: Iteration did not converge",
            "Numerical(DidNotConverge)",
        ),
    ];

    for (err, display_msg, debug_msg) in &test_cases {
        assert_eq!(err.to_string(), *display_msg);
        assert_eq!(format!("{:?}", err), *debug_msg);
    }
}

#[test]
fn test_error_equality() {
    assert_eq!(TensorError::ShapeMismatch, TensorError::ShapeMismatch);
    assert_ne!(TensorError::ShapeMismatch, TensorError::RankMismatch);
    assert_eq!(
        TensorError::InvalidParameter("a".to_string()),
        TensorError::InvalidParameter("a".to_string())
    );
    assert_ne!(
        TensorError::InvalidParameter("a".to_string()),
        TensorError::InvalidParameter("b".to_string())
    );
    assert_eq!(
        TensorError::Numerical(NumericalError::BadCondition),
        TensorError::Numerical(NumericalError::BadCondition)
    );
}

#[test]
fn test_error_from_numerical() {
    let err: TensorError = NumericalError::SingularMatrix.into();
    assert_eq!(err, TensorError::Numerical(NumericalError::SingularMatrix));
}

#[test]
fn test_error_trait_source() {
    let errors = [
        TensorError::ShapeMismatch,
        TensorError::EmptyTensor,
        TensorError::Numerical(NumericalError::DidNotConverge),
    ];
    for err in &errors {
        assert!(err.source().is_none());
    }
}
