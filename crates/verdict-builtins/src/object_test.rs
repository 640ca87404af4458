// SPDX-License-Identifier: Apache-2.0

//! Tests for the object and JSON-path builtins.

use verdict_core::{Heap, json};

use crate::object;

#[test]
fn filter_keeps_listed_keys() {
    let mut heap = Heap::new();

    let obj = json::parse(&mut heap, r#"{"a":1,"b":2,"c":3}"#).unwrap();
    let keys = json::parse_extended(&mut heap, r#"{"a","c","x"}"#).unwrap();
    let r = object::filter(&mut heap, obj, keys).unwrap();
    let expected = json::parse(&mut heap, r#"{"a":1,"c":3}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());

    // Arrays of keys work too.
    let keys = json::parse(&mut heap, r#"["b"]"#).unwrap();
    let r = object::filter(&mut heap, obj, keys).unwrap();
    let expected = json::parse(&mut heap, r#"{"b":2}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn get_with_default_and_path() {
    let mut heap = Heap::new();

    let obj = json::parse(&mut heap, r#"{"a":{"b":[10,20]},"k":1}"#).unwrap();
    let fallback = heap.string("fallback");

    let k = heap.string("k");
    let r = object::get(&mut heap, obj, k, fallback).unwrap();
    assert_eq!(heap.number_try_int(r), Some(1));

    let missing = heap.string("zz");
    let r = object::get(&mut heap, obj, missing, fallback).unwrap();
    assert!(heap.compare(r, fallback).is_eq());

    // Path lookup crosses arrays by numeric segment.
    let path = json::parse(&mut heap, r#"["a","b",1]"#).unwrap();
    let r = object::get(&mut heap, obj, path, fallback).unwrap();
    assert_eq!(heap.number_try_int(r), Some(20));

    // The empty path returns the object itself.
    let empty = heap.array();
    let r = object::get(&mut heap, obj, empty, fallback).unwrap();
    assert!(heap.compare(r, obj).is_eq());

    let broken = json::parse(&mut heap, r#"["a","zz"]"#).unwrap();
    let r = object::get(&mut heap, obj, broken, fallback).unwrap();
    assert!(heap.compare(r, fallback).is_eq());
}

#[test]
fn keys_returns_a_set() {
    let mut heap = Heap::new();

    let obj = json::parse(&mut heap, r#"{"a":1,"b":2}"#).unwrap();
    let r = object::keys(&mut heap, obj).unwrap();
    let expected = json::parse_extended(&mut heap, r#"{"a","b"}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn remove_drops_listed_keys() {
    let mut heap = Heap::new();

    let obj = json::parse(&mut heap, r#"{"a":1,"b":2,"c":3}"#).unwrap();
    let keys = json::parse(&mut heap, r#"["a","x"]"#).unwrap();
    let r = object::remove(&mut heap, obj, keys).unwrap();
    let expected = json::parse(&mut heap, r#"{"b":2,"c":3}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn union_recurses_right_biased() {
    let mut heap = Heap::new();

    let a = json::parse(&mut heap, r#"{"x":{"y":1,"k":1},"s":1}"#).unwrap();
    let b = json::parse(&mut heap, r#"{"x":{"y":2,"z":3},"t":2}"#).unwrap();
    let r = object::union(&mut heap, a, b).unwrap();
    let expected =
        json::parse(&mut heap, r#"{"x":{"y":2,"k":1,"z":3},"s":1,"t":2}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn json_remove_by_string_paths() {
    let mut heap = Heap::new();

    let obj = json::parse(&mut heap, r#"{"a":{"b":1,"c":2},"d":3}"#).unwrap();
    let paths = json::parse(&mut heap, r#"["a/b"]"#).unwrap();
    let r = object::json_remove(&mut heap, obj, paths).unwrap();
    let expected = json::parse(&mut heap, r#"{"a":{"c":2},"d":3}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());

    // Missing paths are ignored; `~1` unescapes to a slash.
    let obj = json::parse(&mut heap, r#"{"a/b":1,"c":2}"#).unwrap();
    let paths = json::parse(&mut heap, r#"["a~1b","nope/x"]"#).unwrap();
    let r = object::json_remove(&mut heap, obj, paths).unwrap();
    let expected = json::parse(&mut heap, r#"{"c":2}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn json_remove_array_indices() {
    let mut heap = Heap::new();

    let obj = json::parse(&mut heap, r#"{"a":[1,2,3]}"#).unwrap();
    let paths = json::parse(&mut heap, r#"["a/1"]"#).unwrap();
    let r = object::json_remove(&mut heap, obj, paths).unwrap();
    let expected = json::parse(&mut heap, r#"{"a":[1,3]}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn json_filter_keeps_addressed_subtrees() {
    let mut heap = Heap::new();

    let obj = json::parse(&mut heap, r#"{"a":{"b":1,"c":2},"d":3}"#).unwrap();
    let paths = json::parse(&mut heap, r#"["a/b"]"#).unwrap();
    let r = object::json_filter(&mut heap, obj, paths).unwrap();
    let expected = json::parse(&mut heap, r#"{"a":{"b":1}}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());

    // A whole-subtree path keeps everything below it.
    let paths = json::parse(&mut heap, r#"["a"]"#).unwrap();
    let r = object::json_filter(&mut heap, obj, paths).unwrap();
    let expected = json::parse(&mut heap, r#"{"a":{"b":1,"c":2}}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());

    // Segment arrays address like strings.
    let paths = json::parse(&mut heap, r#"[["a","c"]]"#).unwrap();
    let r = object::json_filter(&mut heap, obj, paths).unwrap();
    let expected = json::parse(&mut heap, r#"{"a":{"c":2}}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());
}

#[test]
fn non_objects_are_undefined() {
    let mut heap = Heap::new();

    let arr = json::parse(&mut heap, "[1]").unwrap();
    let keys = json::parse(&mut heap, r#"["a"]"#).unwrap();
    assert!(object::filter(&mut heap, arr, keys).is_none());
    assert!(object::keys(&mut heap, arr).is_none());
    assert!(object::json_remove(&mut heap, arr, keys).is_none());
}
