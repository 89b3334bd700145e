/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Element-wise operations.
//!
//! Bare names mutate the receiver in place; `_to` variants leave the
//! receiver untouched and write into the optional destination (or a
//! fresh tensor). Binary operations require exactly equal shapes —
//! broadcasting only ever happens through the explicit `broadcast_to`.
//! Contiguous operands run the dense kernels; anything else goes through
//! the strided `elem_*` family.

use crate::types::dtype::TensorElement;
use crate::types::tensor::Tensor;
use crate::TensorError;
use robotensor_num::{Numeric, RealField};
use robotensor_prim as prim;

macro_rules! binary_inplace {
    ($(#[$meta:meta])* $name:ident, $contig:path, $strided:path) => {
        $(#[$meta])*
        pub fn $name(&mut self, other: &Self) -> Result<(), TensorError> {
            self.check_same_shape(other)?;
            let rhs = other.share_buf();
            if self.is_contiguous() && other.is_contiguous() {
                let n = self.len();
                $contig(self.storage_mut(), &rhs[..], n);
            } else {
                let shape = self.shape().to_vec();
                let sy = self.strides().to_vec();
                let sx = other.strides().to_vec();
                let off = other.offset();
                $strided(self.storage_mut(), &sy, &rhs[off..], &sx, &shape);
            }
            Ok(())
        }
    };
}

macro_rules! binary_to {
    ($(#[$meta:meta])* $name:ident, $contig:path, $strided:path) => {
        $(#[$meta])*
        pub fn $name(&self, other: &Self, dst: Option<Self>) -> Result<Self, TensorError> {
            self.check_same_shape(other)?;
            let mut out = Self::make_dst(dst, self.shape())?;
            if self.is_contiguous() && other.is_contiguous() {
                let n = self.len();
                $contig(out.storage_mut(), self.as_slice(), other.as_slice(), n);
            } else {
                let canonical = out.shape_obj().canonical_strides();
                $strided(
                    out.storage_mut(),
                    &canonical,
                    self.as_slice(),
                    self.strides(),
                    other.as_slice(),
                    other.strides(),
                    self.shape(),
                );
            }
            Ok(out)
        }
    };
}

macro_rules! unary_inplace {
    ($(#[$meta:meta])* $name:ident, $contig:path, $strided:path) => {
        $(#[$meta])*
        pub fn $name(&mut self) {
            if self.is_contiguous() {
                let n = self.len();
                $contig(self.storage_mut(), n);
            } else {
                let shape = self.shape().to_vec();
                let sy = self.strides().to_vec();
                $strided(self.storage_mut(), &sy, &shape);
            }
        }
    };
}

macro_rules! unary_to {
    ($(#[$meta:meta])* $name:ident, $contig:path, $strided:path) => {
        $(#[$meta])*
        pub fn $name(&self, dst: Option<Self>) -> Result<Self, TensorError> {
            let mut out = Self::make_dst(dst, self.shape())?;
            if self.is_contiguous() {
                let n = self.len();
                $contig(out.storage_mut(), self.as_slice(), n);
            } else {
                let canonical = out.shape_obj().canonical_strides();
                $strided(
                    out.storage_mut(),
                    &canonical,
                    self.as_slice(),
                    self.strides(),
                    self.shape(),
                );
            }
            Ok(out)
        }
    };
}

impl<T: TensorElement + Numeric> Tensor<T> {
    binary_inplace!(
        /// `self += other`, element-wise.
        add, prim::add_mut, prim::elem_add_mut);
    binary_inplace!(
        /// `self -= other`, element-wise.
        sub, prim::sub_mut, prim::elem_sub_mut);
    binary_inplace!(
        /// `self *= other`, element-wise (Hadamard).
        mul, prim::mul_mut, prim::elem_mul_mut);
    binary_inplace!(
        /// `self /= other`, element-wise.
        div, prim::div_mut, prim::elem_div_mut);

    binary_to!(
        /// Non-mutating element-wise sum.
        add_to, prim::add, prim::elem_add);
    binary_to!(
        /// Non-mutating element-wise difference.
        sub_to, prim::sub, prim::elem_sub);
    binary_to!(
        /// Non-mutating element-wise product.
        mul_to, prim::mul, prim::elem_mul);
    binary_to!(
        /// Non-mutating element-wise quotient.
        div_to, prim::div, prim::elem_div);

    /// `self *= alpha`.
    pub fn scale(&mut self, alpha: T) {
        if self.is_contiguous() {
            let n = self.len();
            prim::scale_mut(self.storage_mut(), n, alpha);
        } else {
            let shape = self.shape().to_vec();
            let sy = self.strides().to_vec();
            prim::elem_scale_mut(self.storage_mut(), &sy, &shape, alpha);
        }
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        if self.is_contiguous() {
            let n = self.len();
            prim::fill(self.storage_mut(), n, value);
        } else {
            let shape = self.shape().to_vec();
            let sy = self.strides().to_vec();
            prim::elem_fill(self.storage_mut(), &sy, &shape, value);
        }
    }

    unary_inplace!(
        /// Squares every element in place.
        square, prim::square_mut, prim::elem_square_mut);
    unary_inplace!(
        /// Replaces every element by its magnitude.
        abs, prim::abs_mut, prim::elem_abs_mut);
    unary_inplace!(
        /// Replaces every element by `-1`, `0`, or `1` according to sign.
        sign, prim::sign_mut, prim::elem_sign_mut);
    unary_inplace!(
        /// Negates every element in place.
        negative, prim::negative_mut, prim::elem_negative_mut);

    unary_to!(
        /// Non-mutating element-wise square.
        square_to, prim::square, prim::elem_square);
    unary_to!(abs_to, prim::abs, prim::elem_abs);
    unary_to!(sign_to, prim::sign, prim::elem_sign);
    unary_to!(negative_to, prim::negative, prim::elem_negative);

    /// `1` where the elements are equal, `0` elsewhere.
    pub fn equal(&self, other: &Self) -> Result<Self, TensorError> {
        self.compare_with(other, prim::equal, prim::elem_equal)
    }

    /// `1` where `self > other`, `0` elsewhere.
    pub fn greater(&self, other: &Self) -> Result<Self, TensorError> {
        self.compare_with(other, prim::greater, prim::elem_greater)
    }

    /// Alias of [`Tensor::greater`]; both names are part of the surface
    /// and behave identically.
    pub fn greater_than(&self, other: &Self) -> Result<Self, TensorError> {
        self.greater(other)
    }

    /// `1` where `self < other`, `0` elsewhere.
    pub fn less(&self, other: &Self) -> Result<Self, TensorError> {
        self.compare_with(other, prim::less, prim::elem_less)
    }

    #[allow(clippy::type_complexity)]
    fn compare_with(
        &self,
        other: &Self,
        contig: fn(&mut [T], &[T], &[T], usize),
        strided: fn(&mut [T], &[usize], &[T], &[usize], &[T], &[usize], &[usize]),
    ) -> Result<Self, TensorError> {
        self.check_same_shape(other)?;
        let mut out = Self::zeros(self.shape());
        if self.is_contiguous() && other.is_contiguous() {
            let n = self.len();
            contig(out.storage_mut(), self.as_slice(), other.as_slice(), n);
        } else {
            let canonical = out.shape_obj().canonical_strides();
            strided(
                out.storage_mut(),
                &canonical,
                self.as_slice(),
                self.strides(),
                other.as_slice(),
                other.strides(),
                self.shape(),
            );
        }
        Ok(out)
    }

    /// Element-wise selection: `a` where `condition != 0`, else `b`.
    pub fn where_cond(condition: &Self, a: &Self, b: &Self) -> Result<Self, TensorError> {
        condition.check_same_shape(a)?;
        condition.check_same_shape(b)?;
        let mut out = Self::zeros(condition.shape());
        if condition.is_contiguous() && a.is_contiguous() && b.is_contiguous() {
            let n = condition.len();
            prim::select(
                out.storage_mut(),
                condition.as_slice(),
                a.as_slice(),
                b.as_slice(),
                n,
            );
        } else {
            let canonical = out.shape_obj().canonical_strides();
            prim::elem_select(
                out.storage_mut(),
                &canonical,
                condition.as_slice(),
                condition.strides(),
                a.as_slice(),
                a.strides(),
                b.as_slice(),
                b.strides(),
                condition.shape(),
            );
        }
        Ok(out)
    }
}

impl<T: TensorElement + RealField> Tensor<T> {
    unary_inplace!(
        /// Element-wise square root in place.
        sqrt, prim::sqrt_mut, prim::elem_sqrt_mut);
    unary_inplace!(
        /// Element-wise natural exponential in place.
        exp, prim::exp_mut, prim::elem_exp_mut);
    unary_inplace!(
        /// Element-wise natural logarithm in place.
        log, prim::log_mut, prim::elem_log_mut);
    unary_inplace!(cos, prim::cos_mut, prim::elem_cos_mut);
    unary_inplace!(sin, prim::sin_mut, prim::elem_sin_mut);

    unary_to!(sqrt_to, prim::sqrt, prim::elem_sqrt);
    unary_to!(exp_to, prim::exp, prim::elem_exp);
    unary_to!(log_to, prim::log, prim::elem_log);
    unary_to!(cos_to, prim::cos, prim::elem_cos);
    unary_to!(sin_to, prim::sin, prim::elem_sin);

    /// Raises every element to the power `p` in place.
    pub fn pow(&mut self, p: T) {
        if self.is_contiguous() {
            let n = self.len();
            prim::pow_mut(self.storage_mut(), n, p);
        } else {
            let shape = self.shape().to_vec();
            let sy = self.strides().to_vec();
            prim::elem_pow_mut(self.storage_mut(), &sy, &shape, p);
        }
    }

    /// Non-mutating element-wise power.
    pub fn pow_to(&self, dst: Option<Self>, p: T) -> Result<Self, TensorError> {
        let mut out = Self::make_dst(dst, self.shape())?;
        if self.is_contiguous() {
            let n = self.len();
            prim::pow(out.storage_mut(), self.as_slice(), n, p);
        } else {
            let canonical = out.shape_obj().canonical_strides();
            prim::elem_pow(
                out.storage_mut(),
                &canonical,
                self.as_slice(),
                self.strides(),
                self.shape(),
                p,
            );
        }
        Ok(out)
    }

    /// `self[index[k]] += values[k]` over the flat buffer; the receiver
    /// must be contiguous.
    pub fn scatter_add(&mut self, index: &[usize], values: &Self) -> Result<(), TensorError> {
        if !self.is_contiguous() || !values.is_contiguous() {
            return Err(TensorError::InvalidOperation);
        }
        if index.len() != values.len() {
            return Err(TensorError::ShapeMismatch);
        }
        let n = self.len();
        if index.iter().any(|&i| i >= n) {
            return Err(TensorError::AxisOutOfBounds);
        }
        let vals = values.share_buf();
        prim::scatter_add(self.storage_mut(), index, &vals[..index.len()]);
        Ok(())
    }
}
