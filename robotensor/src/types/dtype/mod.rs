/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use std::fmt;

/// Element-kind tag carried by every tensor.
///
/// Only `Fp32` is fully supported by the whole kernel roster; the other
/// kinds are supported for storage, copy/swap/fill, sign/negation, and
/// the comparison kernels. The enum is non-exhaustive so packed 4-bit
/// variants can be added without breaking downstream matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DType {
    Unknown,
    Fp16,
    Fp32,
    Fp64,
    Int8,
    Int16,
    Int32,
    Int64,
    IntNative,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size_of(&self) -> usize {
        match self {
            DType::Unknown => 0,
            DType::Fp16 | DType::Int16 => 2,
            DType::Fp32 | DType::Int32 => 4,
            DType::Fp64 | DType::Int64 => 8,
            DType::Int8 => 1,
            DType::IntNative => core::mem::size_of::<isize>(),
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DType::Fp16 | DType::Fp32 | DType::Fp64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DType::Unknown => "UNKNOWN",
            DType::Fp16 => "FP16",
            DType::Fp32 => "FP32",
            DType::Fp64 => "FP64",
            DType::Int8 => "INT8",
            DType::Int16 => "INT16",
            DType::Int32 => "INT32",
            DType::Int64 => "INT64",
            DType::IntNative => "INT",
        };
        write!(f, "{name}")
    }
}

/// Compile-time binding of a storage type to its [`DType`] tag, plus the
/// double-precision conversions the dtype-agnostic accessors use.
pub trait TensorElement:
    Copy + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static
{
    const DTYPE: DType;

    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_element_int {
    ($t:ty, $tag:expr) => {
        impl TensorElement for $t {
            const DTYPE: DType = $tag;

            fn zero() -> Self {
                0
            }
            fn one() -> Self {
                1
            }
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

macro_rules! impl_element_float {
    ($t:ty, $tag:expr) => {
        impl TensorElement for $t {
            const DTYPE: DType = $tag;

            fn zero() -> Self {
                0.0
            }
            fn one() -> Self {
                1.0
            }
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_element_int!(i8, DType::Int8);
impl_element_int!(i16, DType::Int16);
impl_element_int!(i32, DType::Int32);
impl_element_int!(i64, DType::Int64);
impl_element_int!(isize, DType::IntNative);
impl_element_float!(f32, DType::Fp32);
impl_element_float!(f64, DType::Fp64);

impl TensorElement for half::f16 {
    const DTYPE: DType = DType::Fp16;

    fn zero() -> Self {
        half::f16::ZERO
    }
    fn one() -> Self {
        half::f16::ONE
    }
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}
