// SPDX-License-Identifier: Apache-2.0

//! Tests for the arithmetic builtins.

use verdict_core::{Heap, json};

use crate::arithmetic;

#[test]
fn integer_fast_paths() {
    let mut heap = Heap::new();

    let a = heap.number_int(7);
    let b = heap.number_int(3);

    let r = arithmetic::plus(&mut heap, a, b).unwrap();
    assert_eq!(heap.number_try_int(r), Some(10));
    let r = arithmetic::minus(&mut heap, a, b).unwrap();
    assert_eq!(heap.number_try_int(r), Some(4));
    let r = arithmetic::multiply(&mut heap, a, b).unwrap();
    assert_eq!(heap.number_try_int(r), Some(21));
    let r = arithmetic::rem(&mut heap, a, b).unwrap();
    assert_eq!(heap.number_try_int(r), Some(1));
}

#[test]
fn overflow_falls_back_to_decimals() {
    let mut heap = Heap::new();

    let a = heap.number_int(i64::MAX);
    let b = heap.number_int(1);
    let r = arithmetic::plus(&mut heap, a, b).unwrap();
    assert_eq!(heap.number_ref_str(r), Some("9223372036854775808"));
}

#[test]
fn decimal_arithmetic() {
    let mut heap = Heap::new();

    let a = json::parse(&mut heap, "0.1").unwrap();
    let b = json::parse(&mut heap, "0.2").unwrap();
    let r = arithmetic::plus(&mut heap, a, b).unwrap();
    assert_eq!(heap.number_ref_str(r), Some("0.3"));

    let three = heap.number_int(3);
    let two = heap.number_int(2);
    let r = arithmetic::divide(&mut heap, three, two).unwrap();
    assert_eq!(heap.number_ref_str(r), Some("1.5"));
}

#[test]
fn division_and_rem_by_zero_are_undefined() {
    let mut heap = Heap::new();

    let a = heap.number_int(1);
    let zero = heap.number_int(0);
    assert!(arithmetic::divide(&mut heap, a, zero).is_none());
    assert!(arithmetic::rem(&mut heap, a, zero).is_none());

    // Remainder requires integer operands.
    let frac = json::parse(&mut heap, "1.5").unwrap();
    let two = heap.number_int(2);
    assert!(arithmetic::rem(&mut heap, frac, two).is_none());
}

#[test]
fn rounding_family() {
    let mut heap = Heap::new();

    let cases = [
        ("2.5", 3, 3, 2),   // round half-up, ceil, floor
        ("-2.5", -3, -2, -3),
        ("2.4", 2, 3, 2),
        ("7", 7, 7, 7),
    ];
    for (text, rounded, ceiled, floored) in cases {
        let v = json::parse(&mut heap, text).unwrap();
        let r = arithmetic::round(&mut heap, v).unwrap();
        assert_eq!(heap.number_try_int(r), Some(rounded), "round {text}");
        let r = arithmetic::ceil(&mut heap, v).unwrap();
        assert_eq!(heap.number_try_int(r), Some(ceiled), "ceil {text}");
        let r = arithmetic::floor(&mut heap, v).unwrap();
        assert_eq!(heap.number_try_int(r), Some(floored), "floor {text}");
    }
}

#[test]
fn abs_and_neg() {
    let mut heap = Heap::new();

    let v = json::parse(&mut heap, "-3.5").unwrap();
    let r = arithmetic::abs(&mut heap, v).unwrap();
    assert_eq!(heap.number_ref_str(r), Some("3.5"));

    let v = heap.number_int(4);
    let r = arithmetic::neg(&mut heap, v).unwrap();
    assert_eq!(heap.number_try_int(r), Some(-4));
}

#[test]
fn minus_on_sets_is_difference() {
    let mut heap = Heap::new();

    let a = json::parse_extended(&mut heap, "{1,2,3}").unwrap();
    let b = json::parse_extended(&mut heap, "{2}").unwrap();
    let r = arithmetic::minus(&mut heap, a, b).unwrap();
    let expected = json::parse_extended(&mut heap, "{1,3}").unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn type_mismatches_are_undefined() {
    let mut heap = Heap::new();

    let n = heap.number_int(1);
    let s = heap.string("1");
    assert!(arithmetic::plus(&mut heap, n, s).is_none());
    assert!(arithmetic::minus(&mut heap, s, n).is_none());
}
