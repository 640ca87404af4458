// SPDX-License-Identifier: Apache-2.0

//! Tests for the encoding builtins.

use verdict_core::{Heap, json};

use crate::encoding;

#[test]
fn base64_roundtrip() {
    let mut heap = Heap::new();

    let plain = heap.string("hello world");
    let enc = encoding::base64_encode(&mut heap, plain).unwrap();
    assert_eq!(heap.str_str(enc), "aGVsbG8gd29ybGQ=");

    let dec = encoding::base64_decode(&mut heap, enc).unwrap();
    assert_eq!(heap.str_str(dec), "hello world");

    // Unpadded input decodes too.
    let unpadded = heap.string("aGVsbG8gd29ybGQ");
    let dec = encoding::base64_decode(&mut heap, unpadded).unwrap();
    assert_eq!(heap.str_str(dec), "hello world");
}

#[test]
fn base64_url_alphabet() {
    let mut heap = Heap::new();

    // Bytes that differ between the two alphabets.
    let plain = heap.string("\u{3ff}\u{fff}");
    let enc = encoding::base64_url_encode(&mut heap, plain).unwrap();
    let text = heap.str_str(enc).to_string();
    assert!(!text.contains('+') && !text.contains('/'));

    let dec = encoding::base64_url_decode(&mut heap, enc).unwrap();
    assert!(heap.compare(dec, plain).is_eq());
}

#[test]
fn base64_validity() {
    let mut heap = Heap::new();

    let good = heap.string("aGk=");
    let r = encoding::base64_is_valid(&mut heap, good).unwrap();
    assert!(heap.bool_value(r));

    let bad = heap.string("a!!b");
    let r = encoding::base64_is_valid(&mut heap, bad).unwrap();
    assert!(!heap.bool_value(r));

    let n = heap.number_int(1);
    let r = encoding::base64_is_valid(&mut heap, n).unwrap();
    assert!(!heap.bool_value(r));
}

#[test]
fn json_marshal_unmarshal() {
    let mut heap = Heap::new();

    let v = json::parse(&mut heap, r#"{"a":[1,2]}"#).unwrap();
    let text = encoding::json_marshal(&mut heap, v).unwrap();
    assert_eq!(heap.str_str(text), r#"{"a":[1,2]}"#);

    let back = encoding::json_unmarshal(&mut heap, text).unwrap();
    assert!(heap.compare(v, back).is_eq());

    let bad = heap.string("{");
    assert!(encoding::json_unmarshal(&mut heap, bad).is_none());
}

#[test]
fn json_validity() {
    let mut heap = Heap::new();

    let good = heap.string("[1,2,3]");
    let r = encoding::json_is_valid(&mut heap, good).unwrap();
    assert!(heap.bool_value(r));

    let bad = heap.string("[1,");
    let r = encoding::json_is_valid(&mut heap, bad).unwrap();
    assert!(!heap.bool_value(r));

    let n = heap.number_int(1);
    let r = encoding::json_is_valid(&mut heap, n).unwrap();
    assert!(!heap.bool_value(r));
}
