/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! `std::ops` sugar over the element-wise operations. Tensor-tensor
//! arithmetic requires exactly equal shapes (broadcasting stays
//! explicit); the scalar forms apply the scalar to every element. All
//! overloads return `Result`, so `(&a + &b)?` reads naturally.

use crate::types::dtype::TensorElement;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::Numeric;
use std::ops::{Add, Div, Mul, Sub};

macro_rules! tensor_tensor_op {
    ($trait:ident, $method:ident, $delegate:ident) => {
        impl<T: TensorElement + Numeric> $trait<&Tensor<T>> for &Tensor<T> {
            type Output = Result<Tensor<T>, TensorError>;

            fn $method(self, rhs: &Tensor<T>) -> Self::Output {
                self.$delegate(rhs, None)
            }
        }

        impl<T: TensorElement + Numeric> $trait<Tensor<T>> for &Tensor<T> {
            type Output = Result<Tensor<T>, TensorError>;

            fn $method(self, rhs: Tensor<T>) -> Self::Output {
                self.$delegate(&rhs, None)
            }
        }

        impl<T: TensorElement + Numeric> $trait<&Tensor<T>> for Tensor<T> {
            type Output = Result<Tensor<T>, TensorError>;

            fn $method(self, rhs: &Tensor<T>) -> Self::Output {
                self.$delegate(rhs, None)
            }
        }

        impl<T: TensorElement + Numeric> $trait<Tensor<T>> for Tensor<T> {
            type Output = Result<Tensor<T>, TensorError>;

            fn $method(self, rhs: Tensor<T>) -> Self::Output {
                self.$delegate(&rhs, None)
            }
        }
    };
}

tensor_tensor_op!(Add, add, add_to);
tensor_tensor_op!(Sub, sub, sub_to);
tensor_tensor_op!(Mul, mul, mul_to);
tensor_tensor_op!(Div, div, div_to);

macro_rules! tensor_scalar_op {
    ($trait:ident, $method:ident, $delegate:ident) => {
        impl<T: TensorElement + Numeric> $trait<T> for &Tensor<T> {
            type Output = Result<Tensor<T>, TensorError>;

            fn $method(self, rhs: T) -> Self::Output {
                let mut filled = Tensor::zeros(self.shape());
                filled.fill(rhs);
                self.$delegate(&filled, None)
            }
        }

        impl<T: TensorElement + Numeric> $trait<T> for Tensor<T> {
            type Output = Result<Tensor<T>, TensorError>;

            fn $method(self, rhs: T) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

tensor_scalar_op!(Add, add, add_to);
tensor_scalar_op!(Sub, sub, sub_to);
tensor_scalar_op!(Mul, mul, mul_to);
tensor_scalar_op!(Div, div, div_to);
