/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Non-negative least squares, the Lawson-Hanson active-set algorithm.
//!
//! Minimizes `||A x - b||_2` subject to `x >= 0`. Columns move between the
//! passive set `P` and the active (zero) set `Z`; each admission applies a
//! Householder reflector, each removal restores triangularity with Givens
//! rotations.

use crate::lapack::{h1, h2, h3};
use crate::NumericalError;
use robotensor_num::RealField;

/// Givens rotation `(c, s, r)` with `c*a + s*b = r` and `-s*a + c*b = 0`.
fn givens<T: RealField>(a: T, b: T) -> (T, T, T) {
    if a.abs_val() > b.abs_val() {
        let xr = b / a;
        let yr = (T::ONE + xr * xr).sqrt();
        let c = fcopysign(T::ONE / yr, a);
        (c, c * xr, a.abs_val() * yr)
    } else if b != T::ZERO {
        let xr = a / b;
        let yr = (T::ONE + xr * xr).sqrt();
        let s = fcopysign(T::ONE / yr, b);
        (s * xr, s, b.abs_val() * yr)
    } else {
        (T::ZERO, T::ONE, T::ZERO)
    }
}

fn fcopysign<T: RealField>(a: T, b: T) -> T {
    if b >= T::ZERO { a.abs_val() } else { -a.abs_val() }
}

/// Back substitution on the triangularized passive columns: solves
/// `R z = zz[..nsetp]` in place, with `R[p][q] = a[p][index[q]]`.
fn solve_passive<T: RealField>(zz: &mut [T], a: &[T], lda: usize, index: &[usize], nsetp: usize) {
    for p in (0..nsetp).rev() {
        let mut s = zz[p];
        for q in p + 1..nsetp {
            s -= a[p * lda + index[q]] * zz[q];
        }
        zz[p] = s / a[p * lda + index[p]];
    }
}

/// Lawson-Hanson NNLS. Returns the residual norm `||A x - b||_2`.
///
/// `a` (`m x n`, leading dimension `lda`) and `b` are working storage and
/// are destroyed; `x` receives the non-negative solution.
pub fn gnnls<T: RealField>(
    x: &mut [T],
    a: &mut [T],
    b: &mut [T],
    m: usize,
    n: usize,
    lda: usize,
) -> Result<T, NumericalError> {
    assert!(lda >= n, "gnnls: lda must be >= n");
    assert!(x.len() >= n, "gnnls: x buffer too small");
    assert!(b.len() >= m, "gnnls: b buffer too small");
    assert!(m == 0 || a.len() >= (m - 1) * lda + n, "gnnls: a buffer too small");
    let range = T::from_f64(1.0e30);
    let factor = T::from_f64(0.01);
    let two = T::from_f64(2.0);

    for xi in x[..n].iter_mut() {
        *xi = T::ZERO;
    }
    if m == 0 || n == 0 {
        return Ok(T::ZERO);
    }

    let mut index: Vec<usize> = (0..n).collect();
    let mut w = vec![T::ZERO; n];
    let mut zz = vec![T::ZERO; m];
    let mut uu = vec![T::ZERO; m];
    let mut iz1 = 0usize; // index[iz1..n] is the active set Z
    let mut nsetp = 0usize; // index[..nsetp] is the passive set P
    let itmax = 3 * n;
    let mut iter = 0usize;

    'main: while iz1 < n && nsetp < m {
        // Dual vector for the active columns.
        for iz in iz1..n {
            let j = index[iz];
            let mut sm = T::ZERO;
            for l in nsetp..m {
                sm += a[l * lda + j] * b[l];
            }
            w[j] = sm;
        }

        // Pick the steepest admissible column; reject those that would be
        // numerically dependent on the passive set.
        let (j, izmax, up) = loop {
            let mut wmax = T::ZERO;
            let mut best = iz1;
            for iz in iz1..n {
                let jj = index[iz];
                if w[jj] > wmax {
                    wmax = w[jj];
                    best = iz;
                }
            }
            if wmax <= T::ZERO {
                break 'main; // KKT conditions satisfied
            }
            let cand = index[best];
            let asave = a[nsetp * lda + cand];
            let cand_up = h1(nsetp, nsetp + 1, m, &mut a[cand..], lda, range);
            let mut unorm = T::ZERO;
            for l in 0..nsetp {
                unorm += a[l * lda + cand] * a[l * lda + cand];
            }
            unorm = unorm.sqrt();
            if (unorm + a[nsetp * lda + cand].abs_val() * factor) - unorm > T::ZERO {
                zz[..m].copy_from_slice(&b[..m]);
                h2(nsetp, nsetp + 1, m, &a[cand..], lda, cand_up, &mut zz, 1, range);
                if zz[nsetp] / a[nsetp * lda + cand] > T::ZERO {
                    break (cand, best, cand_up);
                }
            }
            a[nsetp * lda + cand] = asave;
            w[cand] = T::ZERO;
        };

        // Admit column j into P and apply its reflector to b and to the
        // remaining active columns.
        b[..m].copy_from_slice(&zz[..m]);
        index[izmax] = index[iz1];
        index[iz1] = j;
        iz1 += 1;
        nsetp += 1;
        if iz1 < n {
            for i in nsetp - 1..m {
                uu[i] = a[i * lda + j];
            }
            for jz in iz1..n {
                let jj = index[jz];
                h3(nsetp - 1, nsetp, m, &uu, 1, up, a, lda, jj, range);
            }
        }
        if nsetp != m {
            for l in nsetp..m {
                a[l * lda + j] = T::ZERO;
            }
        }
        w[j] = T::ZERO;

        zz[..nsetp].copy_from_slice(&b[..nsetp]);
        solve_passive(&mut zz, a, lda, &index, nsetp);

        // Inner loop: interpolate toward zz until it is feasible, moving
        // variables that hit zero back to Z.
        loop {
            iter += 1;
            if iter > itmax {
                return Err(NumericalError::DidNotConverge);
            }
            let mut alpha = two;
            let mut hit = 0usize;
            for ip in 0..nsetp {
                if zz[ip] <= T::ZERO {
                    let l = index[ip];
                    let t = -x[l] / (zz[ip] - x[l]);
                    if alpha > t {
                        alpha = t;
                        hit = ip;
                    }
                }
            }
            if alpha == two {
                break; // all candidates positive
            }
            for ip in 0..nsetp {
                let l = index[ip];
                x[l] += alpha * (zz[ip] - x[l]);
            }

            let mut removed = index[hit];
            let mut pp = hit;
            loop {
                x[removed] = T::ZERO;
                if pp + 1 != nsetp {
                    // Shift the later passive columns down and restore the
                    // triangular form with Givens rotations.
                    for ji in pp + 1..nsetp {
                        let ii = index[ji];
                        index[ji - 1] = ii;
                        let (c, s, r) = givens(a[(ji - 1) * lda + ii], a[ji * lda + ii]);
                        a[(ji - 1) * lda + ii] = r;
                        a[ji * lda + ii] = T::ZERO;
                        for col in 0..n {
                            if col != ii {
                                let y = a[(ji - 1) * lda + col];
                                let z = a[ji * lda + col];
                                a[(ji - 1) * lda + col] = c * y + s * z;
                                a[ji * lda + col] = -s * y + c * z;
                            }
                        }
                        let y = b[ji - 1];
                        let z = b[ji];
                        b[ji - 1] = c * y + s * z;
                        b[ji] = -s * y + c * z;
                    }
                }
                nsetp -= 1;
                iz1 -= 1;
                index[iz1] = removed;

                // All passive coefficients should be positive now; any that
                // are not are also moved out.
                let mut again = false;
                for ip in 0..nsetp {
                    let l = index[ip];
                    if x[l] <= T::ZERO {
                        removed = l;
                        pp = ip;
                        again = true;
                        break;
                    }
                }
                if !again {
                    break;
                }
            }

            zz[..nsetp].copy_from_slice(&b[..nsetp]);
            solve_passive(&mut zz, a, lda, &index, nsetp);
        }

        for ip in 0..nsetp {
            x[index[ip]] = zz[ip];
        }
    }

    let mut sm = T::ZERO;
    for l in nsetp..m {
        sm += b[l] * b[l];
    }
    Ok(sm.sqrt())
}
