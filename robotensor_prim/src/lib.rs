/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

// BLAS-style kernels take their dimensions, strides, and scalars as
// positional parameters by contract.
#![allow(clippy::too_many_arguments)]

//! Primitive numerical kernels over flat buffers.
//!
//! Everything in this crate is a pure function: explicit output buffer(s)
//! in, input buffer(s) in, dimension counts, element strides / leading
//! dimensions, and scalars. Matrices are row-major throughout; a leading
//! dimension is the element distance between the starts of successive rows
//! and satisfies `ld >= number_of_columns`.
//!
//! Contracts:
//! - The BLAS-1/2/3, element-wise, convolution and pooling kernels never
//!   allocate. The LAPACK-style factorizations may allocate O(n) scratch.
//! - Buffer-size and dimension preconditions are enforced with `assert!`
//!   naming the kernel; a violated precondition is a caller bug.
//! - Numerical failures (singular pivot, no convergence) are reported as
//!   [`NumericalError`] values, never panics.
//! - Output and input buffers must not overlap unless the kernel is
//!   documented as in-place.

mod batched;
mod conv;
mod elem;
mod error;
mod im2col;
mod lapack;
mod level1;
mod level2;
mod level3;
mod pool;

pub use batched::*;
pub use conv::*;
pub use elem::*;
pub use error::NumericalError;
pub use im2col::*;
pub use lapack::*;
pub use level1::*;
pub use level2::*;
pub use level3::*;
pub use pool::*;

/// Maximum tensor rank the strided element-wise kernels traverse.
///
/// The odometer state lives on the stack so the kernels stay
/// allocation-free; eight axes covers every layout the tensor layer
/// produces.
pub const MAX_RANK: usize = 8;
