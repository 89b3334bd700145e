/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Householder reflector primitives in the Lawson-Hanson style, shared by
//! the QR and NNLS routines.
//!
//! A reflector is defined by a pivot index `p`, the element range
//! `[l, m)` it zeroes, the stored vector `u`, and the scalar `up` returned
//! by [`h1`]. The `range` parameter caps quotient magnitudes so a nearly
//! vanished denominator cannot blow up the update; `1e30` is the suggested
//! value for `f32`.

use robotensor_num::RealField;

/// Quotient with its magnitude capped at `range`.
fn capped_div<T: RealField>(num: T, den: T, range: T) -> T {
    if num == T::ZERO {
        return T::ZERO;
    }
    if den.abs_val() * range > num.abs_val() {
        num / den
    } else {
        num.sign_val() * den.sign_val() * range
    }
}

/// Construct a Householder reflector from the pivot column.
///
/// `u` is the column with element stride `su`; entry `i` is `u[i * su]`.
/// The reflector zeroes entries `[l, m)` while updating the pivot entry
/// `p` (`p < l`). On return the pivot slot holds the new leading value and
/// the entries `[l, m)` hold the reflector vector; the returned `up` is
/// the scalar needed to apply the reflector with [`h2`] / [`h3`].
pub fn h1<T: RealField>(p: usize, l: usize, m: usize, u: &mut [T], su: usize, range: T) -> T {
    assert!(p < l, "h1: pivot must precede the zeroed range");
    assert!(m == 0 || u.len() > (m - 1) * su, "h1: u buffer too small");
    let mut cl = u[p * su].abs_val();
    for i in l..m {
        cl = cl.max_val(u[i * su].abs_val());
    }
    if cl <= T::ZERO {
        return T::ZERO;
    }
    // Scale before squaring to dodge overflow.
    let clinv = capped_div(T::ONE, cl, range);
    let mut sm = (u[p * su] * clinv) * (u[p * su] * clinv);
    for i in l..m {
        sm += (u[i * su] * clinv) * (u[i * su] * clinv);
    }
    let mut new_pivot = cl * sm.sqrt();
    if u[p * su] > T::ZERO {
        new_pivot = -new_pivot;
    }
    let up = u[p * su] - new_pivot;
    u[p * su] = new_pivot;
    up
}

/// Apply the reflector `(u, up)` to the vector `c` with stride `sc`.
pub fn h2<T: RealField>(
    p: usize,
    l: usize,
    m: usize,
    u: &[T],
    su: usize,
    up: T,
    c: &mut [T],
    sc: usize,
    range: T,
) {
    assert!(p < l, "h2: pivot must precede the zeroed range");
    assert!(m == 0 || u.len() > (m - 1) * su, "h2: u buffer too small");
    assert!(m == 0 || c.len() > (m - 1) * sc, "h2: c buffer too small");
    let b = up * u[p * su];
    // b must be strictly negative for a proper reflector.
    if b >= T::ZERO {
        return;
    }
    let mut sm = c[p * sc] * up;
    for i in l..m {
        sm += c[i * sc] * u[i * su];
    }
    if sm == T::ZERO {
        return;
    }
    let sm = capped_div(sm, b, range);
    c[p * sc] += sm * up;
    for i in l..m {
        c[i * sc] += sm * u[i * su];
    }
}

/// Apply the reflector `(u, up)` to column `col` of the row-major matrix
/// `a` with leading dimension `lda`.
pub fn h3<T: RealField>(
    p: usize,
    l: usize,
    m: usize,
    u: &[T],
    su: usize,
    up: T,
    a: &mut [T],
    lda: usize,
    col: usize,
    range: T,
) {
    assert!(col < lda, "h3: column index outside leading dimension");
    h2(p, l, m, u, su, up, &mut a[col..], lda, range);
}
