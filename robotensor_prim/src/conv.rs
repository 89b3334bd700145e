/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */

//! Convolution kernels over NCHW-ordered flat buffers.
//!
//! Layouts: inputs `[batch, channels, spatial...]`, forward weights
//! `[out_c, in_c, kernel...]`, transposed-convolution weights
//! `[in_c, out_c, kernel...]`. Output spatial dims follow
//! `(in + 2*pad - kernel) / stride + 1` (effective kernel
//! `(k - 1) * dilation + 1` for the dilated variant) and the transposed
//! form `(in - 1) * stride - 2*pad + kernel`. All kernels are direct
//! loops; padding reads contribute nothing.

use robotensor_num::RealField;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Checked output extent `(in + 2*pad - k) / stride + 1`.
fn out_extent(name: &str, input: usize, k: usize, stride: usize, pad: usize) -> usize {
    assert!(stride > 0, "{name}: stride must be positive");
    assert!(k > 0, "{name}: kernel must be positive");
    assert!(input + 2 * pad >= k, "{name}: kernel larger than padded input");
    (input + 2 * pad - k) / stride + 1
}

fn conv2d_one_batch<T: RealField>(
    out_b: &mut [T],
    in_b: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    in_c: usize,
    out_c: usize,
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
    for oc in 0..out_c {
        let base = bias.map_or(T::ZERO, |bb| bb[oc]);
        for oh in 0..out_h {
            for ow in 0..out_w {
                let mut acc = base;
                for ic in 0..in_c {
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
                            let iv = in_b[(ic * in_h + ih as usize) * in_w + iw as usize];
                            let wv = weights[((oc * in_c + ic) * kh + ki) * kw + kj];
                            acc += iv * wv;
                        }
                    }
                }
                out_b[(oc * out_h + oh) * out_w + ow] = acc;
            }
        }
    }
}

/// 2-D convolution. `bias`, when present, has one entry per output
/// channel. `Send + Sync` admits the batch-parallel path behind the
/// `parallel` feature.
pub fn conv2d<T: RealField + Send + Sync>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    batch: usize,
    in_c: usize,
    out_c: usize,
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
    assert_eq!(out_h, out_extent("conv2d", in_h, kh, sh, ph), "conv2d: bad out_h");
    assert_eq!(out_w, out_extent("conv2d", in_w, kw, sw, pw), "conv2d: bad out_w");
    assert!(input.len() >= batch * in_c * in_h * in_w, "conv2d: input buffer too small");
    assert!(weights.len() >= out_c * in_c * kh * kw, "conv2d: weights buffer too small");
    assert!(output.len() >= batch * out_c * out_h * out_w, "conv2d: output buffer too small");
    if let Some(bb) = bias {
        assert!(bb.len() >= out_c, "conv2d: bias buffer too small");
    }
    let in_sz = in_c * in_h * in_w;
    let out_sz = out_c * out_h * out_w;
    if batch == 0 || out_sz == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    {
        output[..batch * out_sz]
            .par_chunks_mut(out_sz)
            .enumerate()
            .for_each(|(b, out_b)| {
                conv2d_one_batch(
                    out_b,
                    &input[b * in_sz..(b + 1) * in_sz],
                    weights,
                    bias,
                    in_c,
                    out_c,
                    in_h,
                    in_w,
                    out_h,
                    out_w,
                    kh,
                    kw,
                    sh,
                    sw,
                    ph,
                    pw,
                )
            });
        return;
    }

    #[cfg(not(feature = "parallel"))]
    for b in 0..batch {
        conv2d_one_batch(
            &mut output[b * out_sz..(b + 1) * out_sz],
            &input[b * in_sz..(b + 1) * in_sz],
            weights,
            bias,
            in_c,
            out_c,
            in_h,
            in_w,
            out_h,
            out_w,
            kh,
            kw,
            sh,
            sw,
            ph,
            pw,
        );
    }
}

/// Transposed 2-D convolution; weight layout `[in_c, out_c, kh, kw]`.
pub fn conv2d_transposed<T: RealField>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    batch: usize,
    in_c: usize,
    out_c: usize,
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
    assert!(sh > 0 && sw > 0, "conv2d_transposed: stride must be positive");
    assert!(
        in_h >= 1 && (in_h - 1) * sh + kh >= 2 * ph,
        "conv2d_transposed: negative out_h"
    );
    assert_eq!(out_h, (in_h - 1) * sh + kh - 2 * ph, "conv2d_transposed: bad out_h");
    assert_eq!(out_w, (in_w - 1) * sw + kw - 2 * pw, "conv2d_transposed: bad out_w");
    assert!(
        weights.len() >= in_c * out_c * kh * kw,
        "conv2d_transposed: weights buffer too small"
    );
    assert!(
        output.len() >= batch * out_c * out_h * out_w,
        "conv2d_transposed: output buffer too small"
    );
    for b in 0..batch {
        for oc in 0..out_c {
            let base = bias.map_or(T::ZERO, |bb| bb[oc]);
            let out_plane = &mut output
                [(b * out_c + oc) * out_h * out_w..(b * out_c + oc + 1) * out_h * out_w];
            for v in out_plane.iter_mut() {
                *v = base;
            }
        }
        for ic in 0..in_c {
            for ih in 0..in_h {
                for iw in 0..in_w {
                    let iv = input[((b * in_c + ic) * in_h + ih) * in_w + iw];
                    if iv == T::ZERO {
                        continue;
                    }
                    for oc in 0..out_c {
                        for ki in 0..kh {
                            let oh = (ih * sh + ki) as isize - ph as isize;
                            if oh < 0 || oh >= out_h as isize {
                                continue;
                            }
                            for kj in 0..kw {
                                let ow = (iw * sw + kj) as isize - pw as isize;
                                if ow < 0 || ow >= out_w as isize {
                                    continue;
                                }
                                let wv = weights[((ic * out_c + oc) * kh + ki) * kw + kj];
                                output[((b * out_c + oc) * out_h + oh as usize) * out_w
                                    + ow as usize] += iv * wv;
                            }
                        }
                    }
                }
            }
        }
    }
}

/// 1-D convolution over `[batch, channels, length]` input.
pub fn conv1d<T: RealField>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    batch: usize,
    in_c: usize,
    out_c: usize,
    in_l: usize,
    out_l: usize,
    k: usize,
    stride: usize,
    pad: usize,
) {
    assert_eq!(out_l, out_extent("conv1d", in_l, k, stride, pad), "conv1d: bad out_l");
    assert!(weights.len() >= out_c * in_c * k, "conv1d: weights buffer too small");
    assert!(output.len() >= batch * out_c * out_l, "conv1d: output buffer too small");
    for b in 0..batch {
        for oc in 0..out_c {
            let base = bias.map_or(T::ZERO, |bb| bb[oc]);
            for ol in 0..out_l {
                let mut acc = base;
                for ic in 0..in_c {
                    for kk in 0..k {
                        let il = (ol * stride + kk) as isize - pad as isize;
                        if il < 0 || il >= in_l as isize {
                            continue;
                        }
                        acc += input[(b * in_c + ic) * in_l + il as usize]
                            * weights[(oc * in_c + ic) * k + kk];
                    }
                }
                output[(b * out_c + oc) * out_l + ol] = acc;
            }
        }
    }
}

/// Transposed 1-D convolution; weight layout `[in_c, out_c, k]`.
pub fn conv1d_transposed<T: RealField>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    batch: usize,
    in_c: usize,
    out_c: usize,
    in_l: usize,
    out_l: usize,
    k: usize,
    stride: usize,
    pad: usize,
) {
    assert!(stride > 0, "conv1d_transposed: stride must be positive");
    assert_eq!(out_l, (in_l - 1) * stride + k - 2 * pad, "conv1d_transposed: bad out_l");
    assert!(weights.len() >= in_c * out_c * k, "conv1d_transposed: weights buffer too small");
    assert!(output.len() >= batch * out_c * out_l, "conv1d_transposed: output buffer too small");
    for b in 0..batch {
        for oc in 0..out_c {
            let base = bias.map_or(T::ZERO, |bb| bb[oc]);
            for v in
                output[(b * out_c + oc) * out_l..(b * out_c + oc + 1) * out_l].iter_mut()
            {
                *v = base;
            }
        }
        for ic in 0..in_c {
            for il in 0..in_l {
                let iv = input[(b * in_c + ic) * in_l + il];
                if iv == T::ZERO {
                    continue;
                }
                for oc in 0..out_c {
                    for kk in 0..k {
                        let ol = (il * stride + kk) as isize - pad as isize;
                        if ol < 0 || ol >= out_l as isize {
                            continue;
                        }
                        output[(b * out_c + oc) * out_l + ol as usize] +=
                            iv * weights[(ic * out_c + oc) * k + kk];
                    }
                }
            }
        }
    }
}

/// 3-D convolution over `[batch, channels, depth, height, width]` input;
/// weight layout `[out_c, in_c, kd, kh, kw]`.
pub fn conv3d<T: RealField>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    batch: usize,
    in_c: usize,
    out_c: usize,
    in_d: usize,
    in_h: usize,
    in_w: usize,
    out_d: usize,
    out_h: usize,
    out_w: usize,
    kd: usize,
    kh: usize,
    kw: usize,
    sd: usize,
    sh: usize,
    sw: usize,
    pd: usize,
    ph: usize,
    pw: usize,
) {
    assert_eq!(out_d, out_extent("conv3d", in_d, kd, sd, pd), "conv3d: bad out_d");
    assert_eq!(out_h, out_extent("conv3d", in_h, kh, sh, ph), "conv3d: bad out_h");
    assert_eq!(out_w, out_extent("conv3d", in_w, kw, sw, pw), "conv3d: bad out_w");
    assert!(
        weights.len() >= out_c * in_c * kd * kh * kw,
        "conv3d: weights buffer too small"
    );
    assert!(
        output.len() >= batch * out_c * out_d * out_h * out_w,
        "conv3d: output buffer too small"
    );
    for b in 0..batch {
        for oc in 0..out_c {
            let base = bias.map_or(T::ZERO, |bb| bb[oc]);
            for od in 0..out_d {
                for oh in 0..out_h {
                    for ow in 0..out_w {
                        let mut acc = base;
                        for ic in 0..in_c {
                            for kz in 0..kd {
                                let id = (od * sd + kz) as isize - pd as isize;
                                if id < 0 || id >= in_d as isize {
                                    continue;
                                }
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
                                        let ii = (((b * in_c + ic) * in_d + id as usize) * in_h
                                            + ih as usize)
                                            * in_w
                                            + iw as usize;
                                        let wi = (((oc * in_c + ic) * kd + kz) * kh + ki) * kw
                                            + kj;
                                        acc += input[ii] * weights[wi];
                                    }
                                }
                            }
                        }
                        output[(((b * out_c + oc) * out_d + od) * out_h + oh) * out_w + ow] =
                            acc;
                    }
                }
            }
        }
    }
}

/// Depthwise 2-D convolution: one filter per channel, weight layout
/// `[channels, kh, kw]`, channel count preserved.
pub fn depthwise_conv2d<T: RealField>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
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
    assert_eq!(out_h, out_extent("depthwise_conv2d", in_h, kh, sh, ph));
    assert_eq!(out_w, out_extent("depthwise_conv2d", in_w, kw, sw, pw));
    assert!(
        weights.len() >= channels * kh * kw,
        "depthwise_conv2d: weights buffer too small"
    );
    assert!(
        output.len() >= batch * channels * out_h * out_w,
        "depthwise_conv2d: output buffer too small"
    );
    for b in 0..batch {
        for c in 0..channels {
            let base = bias.map_or(T::ZERO, |bb| bb[c]);
            for oh in 0..out_h {
                for ow in 0..out_w {
                    let mut acc = base;
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
                            acc += input
                                [((b * channels + c) * in_h + ih as usize) * in_w + iw as usize]
                                * weights[(c * kh + ki) * kw + kj];
                        }
                    }
                    output[((b * channels + c) * out_h + oh) * out_w + ow] = acc;
                }
            }
        }
    }
}

/// Grouped 2-D convolution; weight layout `[out_c, in_c / groups, kh, kw]`.
pub fn group_conv2d<T: RealField>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    batch: usize,
    in_c: usize,
    out_c: usize,
    groups: usize,
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
    assert!(groups > 0, "group_conv2d: groups must be positive");
    assert!(in_c % groups == 0, "group_conv2d: in_c must divide by groups");
    assert!(out_c % groups == 0, "group_conv2d: out_c must divide by groups");
    assert_eq!(out_h, out_extent("group_conv2d", in_h, kh, sh, ph));
    assert_eq!(out_w, out_extent("group_conv2d", in_w, kw, sw, pw));
    let icg = in_c / groups;
    let ocg = out_c / groups;
    assert!(
        weights.len() >= out_c * icg * kh * kw,
        "group_conv2d: weights buffer too small"
    );
    for b in 0..batch {
        for g in 0..groups {
            for ocl in 0..ocg {
                let oc = g * ocg + ocl;
                let base = bias.map_or(T::ZERO, |bb| bb[oc]);
                for oh in 0..out_h {
                    for ow in 0..out_w {
                        let mut acc = base;
                        for icl in 0..icg {
                            let ic = g * icg + icl;
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
                                    acc += input[((b * in_c + ic) * in_h + ih as usize) * in_w
                                        + iw as usize]
                                        * weights[((oc * icg + icl) * kh + ki) * kw + kj];
                                }
                            }
                        }
                        output[((b * out_c + oc) * out_h + oh) * out_w + ow] = acc;
                    }
                }
            }
        }
    }
}

/// Dilated 2-D convolution; effective kernel `(k - 1) * dilation + 1`.
pub fn dilated_conv2d<T: RealField>(
    output: &mut [T],
    input: &[T],
    weights: &[T],
    bias: Option<&[T]>,
    batch: usize,
    in_c: usize,
    out_c: usize,
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
    dh: usize,
    dw: usize,
) {
    assert!(dh > 0 && dw > 0, "dilated_conv2d: dilation must be positive");
    let ekh = (kh - 1) * dh + 1;
    let ekw = (kw - 1) * dw + 1;
    assert_eq!(out_h, out_extent("dilated_conv2d", in_h, ekh, sh, ph));
    assert_eq!(out_w, out_extent("dilated_conv2d", in_w, ekw, sw, pw));
    for b in 0..batch {
        for oc in 0..out_c {
            let base = bias.map_or(T::ZERO, |bb| bb[oc]);
            for oh in 0..out_h {
                for ow in 0..out_w {
                    let mut acc = base;
                    for ic in 0..in_c {
                        for ki in 0..kh {
                            let ih = (oh * sh + ki * dh) as isize - ph as isize;
                            if ih < 0 || ih >= in_h as isize {
                                continue;
                            }
                            for kj in 0..kw {
                                let iw = (ow * sw + kj * dw) as isize - pw as isize;
                                if iw < 0 || iw >= in_w as isize {
                                    continue;
                                }
                                acc += input[((b * in_c + ic) * in_h + ih as usize) * in_w
                                    + iw as usize]
                                    * weights[((oc * in_c + ic) * kh + ki) * kw + kj];
                            }
                        }
                    }
                    output[((b * out_c + oc) * out_h + oh) * out_w + ow] = acc;
                }
            }
        }
    }
}

/// Weight gradient of [`conv2d`]: accumulates
/// `dw[oc][ic][ki][kj] = sum input * dout` over batch and output
/// positions. `dw` is overwritten.
pub fn conv2d_kernel_grad<T: RealField>(
    dw: &mut [T],
    input: &[T],
    dout: &[T],
    batch: usize,
    in_c: usize,
    out_c: usize,
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
    assert!(dw.len() >= out_c * in_c * kh * kw, "conv2d_kernel_grad: dw buffer too small");
    for v in dw[..out_c * in_c * kh * kw].iter_mut() {
        *v = T::ZERO;
    }
    for b in 0..batch {
        for oc in 0..out_c {
            for oh in 0..out_h {
                for ow in 0..out_w {
                    let g = dout[((b * out_c + oc) * out_h + oh) * out_w + ow];
                    if g == T::ZERO {
                        continue;
                    }
                    for ic in 0..in_c {
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
                                dw[((oc * in_c + ic) * kh + ki) * kw + kj] += g
                                    * input[((b * in_c + ic) * in_h + ih as usize) * in_w
                                        + iw as usize];
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Weight gradient of [`conv1d`].
pub fn conv1d_kernel_grad<T: RealField>(
    dw: &mut [T],
    input: &[T],
    dout: &[T],
    batch: usize,
    in_c: usize,
    out_c: usize,
    in_l: usize,
    out_l: usize,
    k: usize,
    stride: usize,
    pad: usize,
) {
    assert!(dw.len() >= out_c * in_c * k, "conv1d_kernel_grad: dw buffer too small");
    for v in dw[..out_c * in_c * k].iter_mut() {
        *v = T::ZERO;
    }
    for b in 0..batch {
        for oc in 0..out_c {
            for ol in 0..out_l {
                let g = dout[(b * out_c + oc) * out_l + ol];
                if g == T::ZERO {
                    continue;
                }
                for ic in 0..in_c {
                    for kk in 0..k {
                        let il = (ol * stride + kk) as isize - pad as isize;
                        if il < 0 || il >= in_l as isize {
                            continue;
                        }
                        dw[(oc * in_c + ic) * k + kk] +=
                            g * input[(b * in_c + ic) * in_l + il as usize];
                    }
                }
            }
        }
    }
}
