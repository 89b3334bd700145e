/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! LAPACK-style factorization and decomposition routines.
//!
//! Unlike the BLAS and convolution kernels these may allocate O(m + n)
//! scratch; they are setup-time routines, not hot-path kernels. Numerical
//! failure is reported through [`crate::NumericalError`].

mod householder;
mod lu;
mod nnls;
mod pinv;
mod qr;
mod svd;

pub use householder::{h1, h2, h3};
pub use lu::{getrf, getrf_split, getri};
pub use nnls::gnnls;
pub use pinv::gepseu;
pub use qr::{geqrf, orgqr};
pub use svd::gesvd;
