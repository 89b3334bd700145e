/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Pooling kernels over NCHW flat buffers. Windows clipped by padding
//! only consider the cells that fall inside the input; average pooling
//! divides by the number of cells actually visited.

use robotensor_num::RealField;

fn pool_out(name: &str, input: usize, k: usize, stride: usize, pad: usize) -> usize {
    assert!(stride > 0, "{name}: stride must be positive");
    assert!(k > 0, "{name}: kernel must be positive");
    assert!(input + 2 * pad >= k, "{name}: kernel larger than padded input");
    (input + 2 * pad - k) / stride + 1
}

pub fn max_pool2d<T: RealField>(
    out: &mut [T],
    inp: &[T],
    batch: usize,
    channels: usize,
    in_h: usize,
    in_w: usize,
    out_h: usize,
    out_w: usize,
    kh: usize,
    kw: usize,
    sh: usize,
    sw: usize,
    ph: usize,
    pw: usize,
) {
    assert_eq!(out_h, pool_out("max_pool2d", in_h, kh, sh, ph));
    assert_eq!(out_w, pool_out("max_pool2d", in_w, kw, sw, pw));
    assert!(out.len() >= batch * channels * out_h * out_w, "max_pool2d: out buffer too small");
    for b in 0..batch {
        for c in 0..channels {
            for oh in 0..out_h {
                for ow in 0..out_w {
                    let mut best = T::NEG_INFINITY;
                    for ki in 0..kh {
                        let ih = (oh * sh + ki) as isize - ph as isize;
                        if ih < 0 || ih >= in_h as isize {
                            continue;
                        }
                        for kj in 0..kw {
                            let iw = (ow * sw + kj) as isize - pw as isize;
                            if iw < 0 || iw >= in_w as isize {
                                continue;
                            }
                            let v = inp
                                [((b * channels + c) * in_h + ih as usize) * in_w + iw as usize];
                            if v > best {
                                best = v;
                            }
                        }
                    }
                    out[((b * channels + c) * out_h + oh) * out_w + ow] = best;
                }
            }
        }
    }
}

/// Max pooling that also records, per output cell, the flat index of the
/// winning input element; the indices drive [`max_pool2d_backward`].
pub fn max_pool2d_with_indices<T: RealField>(
    out: &mut [T],
    idx: &mut [usize],
    inp: &[T],
    batch: usize,
    channels: usize,
    in_h: usize,
    in_w: usize,
    out_h: usize,
    out_w: usize,
    kh: usize,
    kw: usize,
    sh: usize,
    sw: usize,
    ph: usize,
    pw: usize,
) {
    assert_eq!(out_h, pool_out("max_pool2d_with_indices", in_h, kh, sh, ph));
    assert_eq!(out_w, pool_out("max_pool2d_with_indices", in_w, kw, sw, pw));
    let n = batch * channels * out_h * out_w;
    assert!(out.len() >= n, "max_pool2d_with_indices: out buffer too small");
    assert!(idx.len() >= n, "max_pool2d_with_indices: idx buffer too small");
    for b in 0..batch {
        for c in 0..channels {
            for oh in 0..out_h {
                for ow in 0..out_w {
                    let mut best = T::NEG_INFINITY;
                    let mut best_idx = 0usize;
                    for ki in 0..kh {
                        let ih = (oh * sh + ki) as isize - ph as isize;
                        if ih < 0 || ih >= in_h as isize {
                            continue;
                        }
                        for kj in 0..kw {
                            let iw = (ow * sw + kj) as isize - pw as isize;
                            if iw < 0 || iw >= in_w as isize {
                                continue;
                            }
                            let fi =
                                ((b * channels + c) * in_h + ih as usize) * in_w + iw as usize;
                            if inp[fi] > best {
                                best = inp[fi];
                                best_idx = fi;
                            }
                        }
                    }
                    let o = ((b * channels + c) * out_h + oh) * out_w + ow;
                    out[o] = best;
                    idx[o] = best_idx;
                }
            }
        }
    }
}

/// Scatter of the output gradient back to the recorded argmax positions.
/// `din` is zeroed first; `n` is the number of output cells.
pub fn max_pool2d_backward<T: RealField>(din: &mut [T], dout: &[T], idx: &[usize], n: usize) {
    assert!(dout.len() >= n, "max_pool2d_backward: dout buffer too small");
    assert!(idx.len() >= n, "max_pool2d_backward: idx buffer too small");
    for v in din.iter_mut() {
        *v = T::ZERO;
    }
    scatter_add(din, &idx[..n], &dout[..n]);
}

pub fn avg_pool2d<T: RealField>(
    out: &mut [T],
    inp: &[T],
    batch: usize,
    channels: usize,
    in_h: usize,
    in_w: usize,
    out_h: usize,
    out_w: usize,
    kh: usize,
    kw: usize,
    sh: usize,
    sw: usize,
    ph: usize,
    pw: usize,
) {
    assert_eq!(out_h, pool_out("avg_pool2d", in_h, kh, sh, ph));
    assert_eq!(out_w, pool_out("avg_pool2d", in_w, kw, sw, pw));
    assert!(out.len() >= batch * channels * out_h * out_w, "avg_pool2d: out buffer too small");
    for b in 0..batch {
        for c in 0..channels {
            for oh in 0..out_h {
                for ow in 0..out_w {
                    let mut acc = T::ZERO;
                    let mut count = 0usize;
                    for ki in 0..kh {
                        let ih = (oh * sh + ki) as isize - ph as isize;
                        if ih < 0 || ih >= in_h as isize {
                            continue;
                        }
                        for kj in 0..kw {
                            let iw = (ow * sw + kj) as isize - pw as isize;
                            if iw < 0 || iw >= in_w as isize {
                                continue;
                            }
                            acc += inp
                                [((b * channels + c) * in_h + ih as usize) * in_w + iw as usize];
                            count += 1;
                        }
                    }
                    out[((b * channels + c) * out_h + oh) * out_w + ow] = if count == 0 {
                        T::ZERO
                    } else {
                        acc / T::from_usize(count)
                    };
                }
            }
        }
    }
}

/// Backward of [`avg_pool2d`]: each output gradient is distributed evenly
/// over the input cells its window covered. `din` is zeroed first.
pub fn avg_pool2d_backward<T: RealField>(
    din: &mut [T],
    dout: &[T],
    batch: usize,
    channels: usize,
    in_h: usize,
    in_w: usize,
    out_h: usize,
    out_w: usize,
    kh: usize,
    kw: usize,
    sh: usize,
    sw: usize,
    ph: usize,
    pw: usize,
) {
    assert!(din.len() >= batch * channels * in_h * in_w, "avg_pool2d_backward: din buffer too small");
    for v in din[..batch * channels * in_h * in_w].iter_mut() {
        *v = T::ZERO;
    }
    for b in 0..batch {
        for c in 0..channels {
            for oh in 0..out_h {
                for ow in 0..out_w {
                    let mut count = 0usize;
                    for ki in 0..kh {
                        let ih = (oh * sh + ki) as isize - ph as isize;
                        if ih < 0 || ih >= in_h as isize {
                            continue;
                        }
                        for kj in 0..kw {
                            let iw = (ow * sw + kj) as isize - pw as isize;
                            if iw >= 0 && iw < in_w as isize {
                                count += 1;
                            }
                        }
                    }
                    if count == 0 {
                        continue;
                    }
                    let g = dout[((b * channels + c) * out_h + oh) * out_w + ow]
                        / T::from_usize(count);
                    for ki in 0..kh {
                        let ih = (oh * sh + ki) as isize - ph as isize;
                        if ih < 0 || ih >= in_h as isize {
                            continue;
                        }
                        for kj in 0..kw {
                            let iw = (ow * sw + kj) as isize - pw as isize;
                            if iw < 0 || iw >= in_w as isize {
                                continue;
                            }
                            din[((b * channels + c) * in_h + ih as usize) * in_w + iw as usize] +=
                                g;
                        }
                    }
                }
            }
        }
    }
}

/// Mean over each full spatial plane; `out` has one value per
/// `(batch, channel)` pair.
pub fn global_avg_pool2d<T: RealField>(
    out: &mut [T],
    inp: &[T],
    batch: usize,
    channels: usize,
    h: usize,
    w: usize,
) {
    assert!(h * w > 0, "global_avg_pool2d: empty spatial plane");
    assert!(out.len() >= batch * channels, "global_avg_pool2d: out buffer too small");
    let plane = h * w;
    let inv = T::ONE / T::from_usize(plane);
    for bc in 0..batch * channels {
        let mut acc = T::ZERO;
        for &v in &inp[bc * plane..(bc + 1) * plane] {
            acc += v;
        }
        out[bc] = acc * inv;
    }
}

/// Adaptive average pooling to an arbitrary `out_h x out_w` grid; window
/// `oh` covers input rows `[floor(oh * h / out_h), ceil((oh + 1) * h /
/// out_h))`, likewise for columns.
pub fn adaptive_avg_pool2d<T: RealField>(
    out: &mut [T],
    inp: &[T],
    batch: usize,
    channels: usize,
    in_h: usize,
    in_w: usize,
    out_h: usize,
    out_w: usize,
) {
    assert!(out_h > 0 && out_w > 0, "adaptive_avg_pool2d: output dims must be positive");
    assert!(
        out.len() >= batch * channels * out_h * out_w,
        "adaptive_avg_pool2d: out buffer too small"
    );
    for b in 0..batch {
        for c in 0..channels {
            for oh in 0..out_h {
                let h0 = oh * in_h / out_h;
                let h1 = ((oh + 1) * in_h).div_ceil(out_h);
                for ow in 0..out_w {
                    let w0 = ow * in_w / out_w;
                    let w1 = ((ow + 1) * in_w).div_ceil(out_w);
                    let mut acc = T::ZERO;
                    for ih in h0..h1 {
                        for iw in w0..w1 {
                            acc += inp[((b * channels + c) * in_h + ih) * in_w + iw];
                        }
                    }
                    let count = (h1 - h0) * (w1 - w0);
                    out[((b * channels + c) * out_h + oh) * out_w + ow] =
                        acc / T::from_usize(count);
                }
            }
        }
    }
}

/// `dst[index[k]] += value[k]` for every `k`.
pub fn scatter_add<T: RealField>(dst: &mut [T], index: &[usize], value: &[T]) {
    assert_eq!(index.len(), value.len(), "scatter_add: index/value length mismatch");
    for (&i, &v) in index.iter().zip(value.iter()) {
        assert!(i < dst.len(), "scatter_add: index out of range");
        dst[i] += v;
    }
}
