/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Element-wise kernels.
//!
//! Bare names are the contiguous variants over `(dst, input(s), n)` with
//! tight loops; the `_mut` forms mutate a single buffer in place. The
//! `elem_*` prefix marks the strided variants, which take a shape plus
//! independent row-major strides for every operand and traverse all of
//! them in lockstep.

use crate::MAX_RANK;
use robotensor_num::{Numeric, RealField};

// ---------------------------------------------------------------------
// Strided traversal
// ---------------------------------------------------------------------

/// Row-major odometer over `shape`, yielding flat offsets for `K` operands
/// walking their own stride vectors. Stack-only state; rank is capped at
/// [`MAX_RANK`].
fn for_each_lockstep<const K: usize, F>(shape: &[usize], strides: [&[usize]; K], mut f: F)
where
    F: FnMut([usize; K]),
{
    let rank = shape.len();
    assert!(rank <= MAX_RANK, "elem: rank exceeds MAX_RANK");
    for s in strides.iter() {
        assert!(s.len() == rank, "elem: stride rank mismatch");
    }
    let size: usize = shape.iter().product();
    if size == 0 {
        return;
    }
    let mut idx = [0usize; MAX_RANK];
    let mut offs = [0usize; K];
    for _ in 0..size {
        f(offs);
        for ax in (0..rank).rev() {
            idx[ax] += 1;
            for (k, s) in strides.iter().enumerate() {
                offs[k] += s[ax];
            }
            if idx[ax] < shape[ax] {
                break;
            }
            for (k, s) in strides.iter().enumerate() {
                offs[k] -= s[ax] * shape[ax];
            }
            idx[ax] = 0;
        }
    }
}

// ---------------------------------------------------------------------
// Contiguous binary kernels
// ---------------------------------------------------------------------

macro_rules! check_bin {
    ($name:literal, $dst:expr, $lhs:expr, $rhs:expr, $n:expr) => {
        assert!($dst.len() >= $n, concat!($name, ": dst buffer too small"));
        assert!($lhs.len() >= $n, concat!($name, ": lhs buffer too small"));
        assert!($rhs.len() >= $n, concat!($name, ": rhs buffer too small"));
    };
}

pub fn add<T: Numeric>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize) {
    check_bin!("add", dst, lhs, rhs, n);
    for i in 0..n {
        dst[i] = lhs[i] + rhs[i];
    }
}

pub fn sub<T: Numeric>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize) {
    check_bin!("sub", dst, lhs, rhs, n);
    for i in 0..n {
        dst[i] = lhs[i] - rhs[i];
    }
}

pub fn mul<T: Numeric>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize) {
    check_bin!("mul", dst, lhs, rhs, n);
    for i in 0..n {
        dst[i] = lhs[i] * rhs[i];
    }
}

pub fn div<T: Numeric>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize) {
    check_bin!("div", dst, lhs, rhs, n);
    for i in 0..n {
        dst[i] = lhs[i] / rhs[i];
    }
}

pub fn add_mut<T: Numeric>(y: &mut [T], x: &[T], n: usize) {
    assert!(y.len() >= n && x.len() >= n, "add_mut: buffer too small");
    for (yi, &xi) in y[..n].iter_mut().zip(&x[..n]) {
        *yi += xi;
    }
}

pub fn sub_mut<T: Numeric>(y: &mut [T], x: &[T], n: usize) {
    assert!(y.len() >= n && x.len() >= n, "sub_mut: buffer too small");
    for (yi, &xi) in y[..n].iter_mut().zip(&x[..n]) {
        *yi -= xi;
    }
}

pub fn mul_mut<T: Numeric>(y: &mut [T], x: &[T], n: usize) {
    assert!(y.len() >= n && x.len() >= n, "mul_mut: buffer too small");
    for (yi, &xi) in y[..n].iter_mut().zip(&x[..n]) {
        *yi *= xi;
    }
}

pub fn div_mut<T: Numeric>(y: &mut [T], x: &[T], n: usize) {
    assert!(y.len() >= n && x.len() >= n, "div_mut: buffer too small");
    for (yi, &xi) in y[..n].iter_mut().zip(&x[..n]) {
        *yi /= xi;
    }
}

// ---------------------------------------------------------------------
// Contiguous scalar / fill kernels
// ---------------------------------------------------------------------

/// `dst[i] = src[i] * alpha`.
pub fn scale<T: Numeric>(dst: &mut [T], src: &[T], n: usize, alpha: T) {
    assert!(dst.len() >= n && src.len() >= n, "scale: buffer too small");
    for i in 0..n {
        dst[i] = src[i] * alpha;
    }
}

pub fn scale_mut<T: Numeric>(x: &mut [T], n: usize, alpha: T) {
    assert!(x.len() >= n, "scale_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi *= alpha;
    }
}

/// Polymorphic constant fill.
pub fn fill<T: Copy>(dst: &mut [T], n: usize, value: T) {
    assert!(dst.len() >= n, "fill: buffer too small");
    for d in &mut dst[..n] {
        *d = value;
    }
}

// ---------------------------------------------------------------------
// Contiguous unary kernels
// ---------------------------------------------------------------------

macro_rules! check_un {
    ($name:literal, $dst:expr, $src:expr, $n:expr) => {
        assert!($dst.len() >= $n, concat!($name, ": dst buffer too small"));
        assert!($src.len() >= $n, concat!($name, ": src buffer too small"));
    };
}

pub fn square<T: Numeric>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("square", dst, src, n);
    for i in 0..n {
        dst[i] = src[i] * src[i];
    }
}

pub fn square_mut<T: Numeric>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "square_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi *= *xi;
    }
}

pub fn sqrt<T: RealField>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("sqrt", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].sqrt();
    }
}

pub fn sqrt_mut<T: RealField>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "sqrt_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.sqrt();
    }
}

pub fn exp<T: RealField>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("exp", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].exp();
    }
}

pub fn exp_mut<T: RealField>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "exp_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.exp();
    }
}

pub fn log<T: RealField>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("log", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].ln();
    }
}

pub fn log_mut<T: RealField>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "log_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.ln();
    }
}

pub fn pow<T: RealField>(dst: &mut [T], src: &[T], n: usize, p: T) {
    check_un!("pow", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].powf(p);
    }
}

pub fn pow_mut<T: RealField>(x: &mut [T], n: usize, p: T) {
    assert!(x.len() >= n, "pow_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.powf(p);
    }
}

pub fn abs<T: Numeric>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("abs", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].abs_val();
    }
}

pub fn abs_mut<T: Numeric>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "abs_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.abs_val();
    }
}

/// `-1`, `0`, `1` by sign. Polymorphic.
pub fn sign<T: Numeric>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("sign", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].sign_val();
    }
}

pub fn sign_mut<T: Numeric>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "sign_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.sign_val();
    }
}

/// Polymorphic negation.
pub fn negative<T: Numeric>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("negative", dst, src, n);
    for i in 0..n {
        dst[i] = -src[i];
    }
}

pub fn negative_mut<T: Numeric>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "negative_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = -*xi;
    }
}

pub fn cos<T: RealField>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("cos", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].cos();
    }
}

pub fn cos_mut<T: RealField>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "cos_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.cos();
    }
}

pub fn sin<T: RealField>(dst: &mut [T], src: &[T], n: usize) {
    check_un!("sin", dst, src, n);
    for i in 0..n {
        dst[i] = src[i].sin();
    }
}

pub fn sin_mut<T: RealField>(x: &mut [T], n: usize) {
    assert!(x.len() >= n, "sin_mut: buffer too small");
    for xi in &mut x[..n] {
        *xi = xi.sin();
    }
}

// ---------------------------------------------------------------------
// Contiguous comparison / conditional kernels
// ---------------------------------------------------------------------

/// Numeric boolean result: `ONE` where equal, `ZERO` elsewhere.
pub fn equal<T: Numeric>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize) {
    check_bin!("equal", dst, lhs, rhs, n);
    for i in 0..n {
        dst[i] = if lhs[i] == rhs[i] { T::ONE } else { T::ZERO };
    }
}

pub fn greater<T: Numeric>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize) {
    check_bin!("greater", dst, lhs, rhs, n);
    for i in 0..n {
        dst[i] = if lhs[i] > rhs[i] { T::ONE } else { T::ZERO };
    }
}

pub fn less<T: Numeric>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize) {
    check_bin!("less", dst, lhs, rhs, n);
    for i in 0..n {
        dst[i] = if lhs[i] < rhs[i] { T::ONE } else { T::ZERO };
    }
}

/// `dst[i] = a[i]` where `cond[i] != 0`, else `b[i]`.
pub fn select<T: Numeric>(dst: &mut [T], cond: &[T], a: &[T], b: &[T], n: usize) {
    assert!(
        dst.len() >= n && cond.len() >= n && a.len() >= n && b.len() >= n,
        "select: buffer too small"
    );
    for i in 0..n {
        dst[i] = if cond[i] != T::ZERO { a[i] } else { b[i] };
    }
}

// ---------------------------------------------------------------------
// Strided variants
// ---------------------------------------------------------------------

pub fn elem_copy<T: Copy>(dst: &mut [T], sd: &[usize], src: &[T], ss: &[usize], shape: &[usize]) {
    for_each_lockstep(shape, [sd, ss], |[od, os]| dst[od] = src[os]);
}

pub fn elem_fill<T: Copy>(dst: &mut [T], sd: &[usize], shape: &[usize], value: T) {
    for_each_lockstep(shape, [sd], |[od]| dst[od] = value);
}

macro_rules! strided_binary {
    ($(#[$meta:meta])* $name:ident, $bound:ident, $op:tt) => {
        $(#[$meta])*
        pub fn $name<T: $bound>(
            dst: &mut [T],
            sd: &[usize],
            lhs: &[T],
            sl: &[usize],
            rhs: &[T],
            sr: &[usize],
            shape: &[usize],
        ) {
            for_each_lockstep(shape, [sd, sl, sr], |[od, ol, or]| {
                dst[od] = lhs[ol] $op rhs[or];
            });
        }
    };
}

strided_binary!(elem_add, Numeric, +);
strided_binary!(elem_sub, Numeric, -);
strided_binary!(elem_mul, Numeric, *);
strided_binary!(elem_div, Numeric, /);

pub fn elem_scale<T: Numeric>(
    dst: &mut [T],
    sd: &[usize],
    src: &[T],
    ss: &[usize],
    shape: &[usize],
    alpha: T,
) {
    for_each_lockstep(shape, [sd, ss], |[od, os]| dst[od] = src[os] * alpha);
}

macro_rules! strided_unary {
    ($(#[$meta:meta])* $name:ident, $bound:ident, |$v:ident| $expr:expr) => {
        $(#[$meta])*
        pub fn $name<T: $bound>(
            dst: &mut [T],
            sd: &[usize],
            src: &[T],
            ss: &[usize],
            shape: &[usize],
        ) {
            for_each_lockstep(shape, [sd, ss], |[od, os]| {
                let $v = src[os];
                dst[od] = $expr;
            });
        }
    };
}

strided_unary!(elem_square, Numeric, |v| v * v);
strided_unary!(elem_sqrt, RealField, |v| v.sqrt());
strided_unary!(elem_exp, RealField, |v| v.exp());
strided_unary!(elem_log, RealField, |v| v.ln());
strided_unary!(elem_abs, Numeric, |v| v.abs_val());
strided_unary!(elem_sign, Numeric, |v| v.sign_val());
strided_unary!(elem_negative, Numeric, |v| -v);
strided_unary!(elem_cos, RealField, |v| v.cos());
strided_unary!(elem_sin, RealField, |v| v.sin());

pub fn elem_pow<T: RealField>(
    dst: &mut [T],
    sd: &[usize],
    src: &[T],
    ss: &[usize],
    shape: &[usize],
    p: T,
) {
    for_each_lockstep(shape, [sd, ss], |[od, os]| dst[od] = src[os].powf(p));
}

macro_rules! strided_compare {
    ($name:ident, $op:tt) => {
        pub fn $name<T: Numeric>(
            dst: &mut [T],
            sd: &[usize],
            lhs: &[T],
            sl: &[usize],
            rhs: &[T],
            sr: &[usize],
            shape: &[usize],
        ) {
            for_each_lockstep(shape, [sd, sl, sr], |[od, ol, or]| {
                dst[od] = if lhs[ol] $op rhs[or] { T::ONE } else { T::ZERO };
            });
        }
    };
}

strided_compare!(elem_equal, ==);
strided_compare!(elem_greater, >);
strided_compare!(elem_less, <);

// Strided in-place forms: `y` keeps its own stride vector, so a strided
// view can be updated without first compacting it.

macro_rules! strided_binary_mut {
    ($name:ident, $op:tt) => {
        pub fn $name<T: Numeric>(
            y: &mut [T],
            sy: &[usize],
            x: &[T],
            sx: &[usize],
            shape: &[usize],
        ) {
            for_each_lockstep(shape, [sy, sx], |[oy, ox]| {
                y[oy] $op x[ox];
            });
        }
    };
}

strided_binary_mut!(elem_add_mut, +=);
strided_binary_mut!(elem_sub_mut, -=);
strided_binary_mut!(elem_mul_mut, *=);
strided_binary_mut!(elem_div_mut, /=);

macro_rules! strided_unary_mut {
    ($name:ident, $bound:ident, |$v:ident| $expr:expr) => {
        pub fn $name<T: $bound>(y: &mut [T], sy: &[usize], shape: &[usize]) {
            for_each_lockstep(shape, [sy], |[oy]| {
                let $v = y[oy];
                y[oy] = $expr;
            });
        }
    };
}

strided_unary_mut!(elem_square_mut, Numeric, |v| v * v);
strided_unary_mut!(elem_sqrt_mut, RealField, |v| v.sqrt());
strided_unary_mut!(elem_exp_mut, RealField, |v| v.exp());
strided_unary_mut!(elem_log_mut, RealField, |v| v.ln());
strided_unary_mut!(elem_abs_mut, Numeric, |v| v.abs_val());
strided_unary_mut!(elem_sign_mut, Numeric, |v| v.sign_val());
strided_unary_mut!(elem_negative_mut, Numeric, |v| -v);
strided_unary_mut!(elem_cos_mut, RealField, |v| v.cos());
strided_unary_mut!(elem_sin_mut, RealField, |v| v.sin());

pub fn elem_scale_mut<T: Numeric>(y: &mut [T], sy: &[usize], shape: &[usize], alpha: T) {
    for_each_lockstep(shape, [sy], |[oy]| y[oy] *= alpha);
}

pub fn elem_pow_mut<T: RealField>(y: &mut [T], sy: &[usize], shape: &[usize], p: T) {
    for_each_lockstep(shape, [sy], |[oy]| y[oy] = y[oy].powf(p));
}

/// Strided in-place `y += alpha * x` over a full shape.
pub fn elem_axpy_mut<T: Numeric>(
    y: &mut [T],
    sy: &[usize],
    x: &[T],
    sx: &[usize],
    shape: &[usize],
    alpha: T,
) {
    for_each_lockstep(shape, [sy, sx], |[oy, ox]| {
        y[oy] += alpha * x[ox];
    });
}

pub fn elem_select<T: Numeric>(
    dst: &mut [T],
    sd: &[usize],
    cond: &[T],
    sc: &[usize],
    a: &[T],
    sa: &[usize],
    b: &[T],
    sb: &[usize],
    shape: &[usize],
) {
    for_each_lockstep(shape, [sd, sc, sa, sb], |[od, oc, oa, ob]| {
        dst[od] = if cond[oc] != T::ZERO { a[oa] } else { b[ob] };
    });
}
