/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Dense row-major tensors for CPU inference workloads.
//!
//! [`Tensor`] is a value-semantic handle over a reference-shared flat
//! buffer: reshape, permute, and slice produce views that share storage,
//! and in-place operations go through copy-on-write so a mutation never
//! bleeds into a sibling view. Every operation validates shapes up front
//! and returns a [`TensorError`] instead of silently tolerating bad
//! input; the numeric work itself is delegated to the flat-buffer kernels
//! in `robotensor_prim`, taking the contiguous fast path whenever the
//! operands allow it.

mod errors;
mod types;

pub use errors::TensorError;
pub use robotensor_prim::NumericalError;
pub use types::dtype::{DType, TensorElement};
pub use types::iterator::{Element, Elements};
pub use types::shape::{MultiIndex, MultiIndexIter, Shape};
pub use types::tensor::Tensor;
