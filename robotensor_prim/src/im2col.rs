/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Patch flattening: `im2col` lays every sliding convolution window out
//! as a row of a `[batch * out_h * out_w, channels * kh * kw]` matrix so
//! that convolution becomes GEMM; `col2im` folds the matrix back, summing
//! overlapping contributions.

use robotensor_num::RealField;

fn out_dims(h: usize, w: usize, kh: usize, kw: usize, ph: usize, pw: usize, sh: usize, sw: usize) -> (usize, usize) {
    assert!(sh > 0 && sw > 0, "im2col: stride must be positive");
    assert!(h + 2 * ph >= kh && w + 2 * pw >= kw, "im2col: kernel larger than padded input");
    ((h + 2 * ph - kh) / sh + 1, (w + 2 * pw - kw) / sw + 1)
}

pub fn im2col<T: RealField>(
    col: &mut [T],
    im: &[T],
    batch: usize,
    channels: usize,
    h: usize,
    w: usize,
    kh: usize,
    kw: usize,
    ph: usize,
    pw: usize,
    sh: usize,
    sw: usize,
) {
    let (out_h, out_w) = out_dims(h, w, kh, kw, ph, pw, sh, sw);
    let row_len = channels * kh * kw;
    assert!(
        col.len() >= batch * out_h * out_w * row_len,
        "im2col: col buffer too small"
    );
    assert!(im.len() >= batch * channels * h * w, "im2col: im buffer too small");
    for b in 0..batch {
        for oh in 0..out_h {
            for ow in 0..out_w {
                let row = ((b * out_h + oh) * out_w + ow) * row_len;
                for c in 0..channels {
                    for ki in 0..kh {
                        let ih = (oh * sh + ki) as isize - ph as isize;
                        for kj in 0..kw {
                            let iw = (ow * sw + kj) as isize - pw as isize;
                            let q = (c * kh + ki) * kw + kj;
                            col[row + q] = if ih < 0
                                || ih >= h as isize
                                || iw < 0
                                || iw >= w as isize
                            {
                                T::ZERO
                            } else {
                                im[((b * channels + c) * h + ih as usize) * w + iw as usize]
                            };
                        }
                    }
                }
            }
        }
    }
}

/// Inverse of [`im2col`]: `im` is zeroed, then every column entry is added
/// back to the input position it was sampled from.
pub fn col2im<T: RealField>(
    im: &mut [T],
    col: &[T],
    batch: usize,
    channels: usize,
    h: usize,
    w: usize,
    kh: usize,
    kw: usize,
    ph: usize,
    pw: usize,
    sh: usize,
    sw: usize,
) {
    let (out_h, out_w) = out_dims(h, w, kh, kw, ph, pw, sh, sw);
    let row_len = channels * kh * kw;
    assert!(
        col.len() >= batch * out_h * out_w * row_len,
        "col2im: col buffer too small"
    );
    assert!(im.len() >= batch * channels * h * w, "col2im: im buffer too small");
    for v in im[..batch * channels * h * w].iter_mut() {
        *v = T::ZERO;
    }
    for b in 0..batch {
        for oh in 0..out_h {
            for ow in 0..out_w {
                let row = ((b * out_h + oh) * out_w + ow) * row_len;
                for c in 0..channels {
                    for ki in 0..kh {
                        let ih = (oh * sh + ki) as isize - ph as isize;
                        if ih < 0 || ih >= h as isize {
                            continue;
                        }
                        for kj in 0..kw {
                            let iw = (ow * sw + kj) as isize - pw as isize;
                            if iw < 0 || iw >= w as isize {
                                continue;
                            }
                            let q = (c * kh + ki) * kw + kj;
                            im[((b * channels + c) * h + ih as usize) * w + iw as usize] +=
                                col[row + q];
                        }
                    }
                }
            }
        }
    }
}
