/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The RoboTensor Authors and Contributors. All Rights Reserved.
 */
use robotensor_num::Numeric;

#[test]
fn test_identities_int() {
    assert_eq!(<i32 as Numeric>::ZERO, 0);
    assert_eq!(<i32 as Numeric>::ONE, 1);
    assert_eq!(<i64 as Numeric>::ZERO, 0);
    assert_eq!(<isize as Numeric>::ONE, 1);
}

#[test]
fn test_identities_float() {
    assert_eq!(<f32 as Numeric>::ZERO, 0.0);
    assert_eq!(<f32 as Numeric>::ONE, 1.0);
    assert_eq!(<f64 as Numeric>::ZERO, 0.0);
    assert_eq!(<f64 as Numeric>::ONE, 1.0);
}

#[test]
fn test_abs_val() {
    assert_eq!((-3i32).abs_val(), 3);
    assert_eq!(3i32.abs_val(), 3);
    assert_eq!(0i32.abs_val(), 0);
    assert_eq!((-2.5f32).abs_val(), 2.5);
    assert_eq!(2.5f64.abs_val(), 2.5);
}

#[test]
fn test_sign_val() {
    assert_eq!((-7i32).sign_val(), -1);
    assert_eq!(7i32.sign_val(), 1);
    assert_eq!(0i32.sign_val(), 0);
    assert_eq!((-0.5f32).sign_val(), -1.0);
    assert_eq!(0.5f32.sign_val(), 1.0);
    assert_eq!(0.0f32.sign_val(), 0.0);
}

#[test]
fn test_generic_ring_ops() {
    fn dot<T: Numeric>(xs: &[T], ys: &[T]) -> T {
        let mut acc = T::ZERO;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            acc += x * y;
        }
        acc
    }

    assert_eq!(dot(&[1, 2, 3], &[4, 5, 6]), 32);
    assert_eq!(dot(&[1.0f32, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
}
