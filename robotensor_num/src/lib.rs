/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! Numeric traits shared by the robotensor kernel and tensor crates.
//!
//! Two traits cover the whole surface: [`Numeric`] for anything that can be
//! stored, compared, and combined with ring arithmetic, and [`RealField`]
//! for element types the floating-point kernels (GEMM, SVD, NNLS, the
//! transcendental element-wise family) operate on.

mod float;
mod numeric;

pub use float::RealField;
pub use numeric::Numeric;
