// SPDX-License-Identifier: Apache-2.0

//! Tests for the numeric bridge.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::heap::Heap;
use crate::json;
use crate::num;

#[test]
fn int_converts_both_ways() {
    let mut heap = Heap::new();

    let v = heap.number_int(-42);
    let d = num::to_decimal(&heap, v).unwrap();
    assert_eq!(d, BigDecimal::from(-42));

    let back = num::from_decimal(&mut heap, &d);
    assert_eq!(heap.number_try_int(back), Some(-42));
}

#[test]
fn ref_converts_to_decimal() {
    let mut heap = Heap::new();

    let v = json::parse(&mut heap, "2.5e2").unwrap();
    let d = num::to_decimal(&heap, v).unwrap();
    assert_eq!(d, BigDecimal::from_str("250").unwrap());
}

#[test]
fn non_numbers_are_absent() {
    let mut heap = Heap::new();

    let s = heap.string("1");
    assert!(num::to_decimal(&heap, s).is_none());
}

#[test]
fn narrowing_prefers_integers() {
    let mut heap = Heap::new();

    let d = BigDecimal::from_str("250").unwrap();
    let v = num::from_decimal(&mut heap, &d);
    assert_eq!(heap.number_try_int(v), Some(250));

    // Integral but out of i64 range: stored as a decimal string.
    let huge = BigDecimal::from_str("92233720368547758080").unwrap();
    let v = num::from_decimal(&mut heap, &huge);
    assert_eq!(heap.number_try_int(v), None);
    let roundtrip = num::to_decimal(&heap, v).unwrap();
    assert_eq!(roundtrip, huge);
}

#[test]
fn fractions_store_normalized_text() {
    let mut heap = Heap::new();

    let d = BigDecimal::from_str("2.50").unwrap();
    let v = num::from_decimal(&mut heap, &d);
    assert_eq!(heap.number_ref_str(v), Some("2.5"));
}

#[test]
fn bigint_roundtrip() {
    let mut heap = Heap::new();

    let d = BigDecimal::from_str("12345678901234567890").unwrap();
    let i = num::to_bigint(&d);
    let v = num::from_bigint(&mut heap, &i);
    let back = num::to_decimal(&heap, v).unwrap();
    assert_eq!(back, d);
}
