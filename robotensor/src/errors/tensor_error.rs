/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor_prim::NumericalError;
use std::error::Error;
use std::fmt;

/// Error type of the tensor operation surface.
///
/// Precondition violations (shape, rank, axis, dtype, dimension) are
/// caller bugs and not recoverable; numerical failures carry the
/// underlying [`NumericalError`] and leave any output in a defined but
/// unspecified state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    ShapeMismatch,
    RankMismatch,
    AxisOutOfBounds,
    DuplicateAxis,
    DTypeUnsupported,
    InvalidDimension,
    BufferSizeMismatch,
    EmptyTensor,
    InvalidOperation,
    UnorderableValue,
    InvalidParameter(String),
    Numerical(NumericalError),
}

impl Error for TensorError {}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ShapeMismatch => write!(f, "TensorError: Shape mismatch error"),
            Self::RankMismatch => write!(f, "TensorError: Rank mismatch error"),
            Self::AxisOutOfBounds => write!(f, "TensorError: Axis out of bounds error"),
            Self::DuplicateAxis => write!(f, "TensorError: Duplicate axis error"),
            Self::DTypeUnsupported => write!(f, "TensorError: Data type unsupported error"),
            Self::InvalidDimension => write!(f, "TensorError: Invalid dimension error"),
            Self::BufferSizeMismatch => write!(f, "TensorError: Buffer size mismatch error"),
            Self::EmptyTensor => write!(f, "TensorError: Empty tensor error"),
            Self::InvalidOperation => write!(f, "TensorError: Invalid operation error"),
            Self::UnorderableValue => write!(f, "TensorError: Unorderable value encountered"),
            Self::InvalidParameter(msg) => write!(f, "TensorError: Invalid parameter: {msg}"),
            Self::Numerical(err) => write!(f, "TensorError: {err}"),
        }
    }
}

impl From<NumericalError> for TensorError {
    fn from(err: NumericalError) -> Self {
        TensorError::Numerical(err)
    }
}
