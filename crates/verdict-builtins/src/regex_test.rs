// SPDX-License-Identifier: Apache-2.0

//! Tests for the regex builtins.

use verdict_core::{Heap, json};

use crate::cache::BuiltinCache;
use crate::regex;

#[test]
fn validity() {
    let mut heap = Heap::new();

    let good = heap.string("a+b*");
    let r = regex::is_valid(&mut heap, good).unwrap();
    assert!(heap.bool_value(r));

    let bad = heap.string("a(");
    let r = regex::is_valid(&mut heap, bad).unwrap();
    assert!(!heap.bool_value(r));

    let n = heap.number_int(1);
    let r = regex::is_valid(&mut heap, n).unwrap();
    assert!(!heap.bool_value(r));
}

#[test]
fn match_is_unanchored() {
    let mut heap = Heap::new();
    let mut cache = BuiltinCache::new();

    let pattern = heap.string("b+c");
    let text = heap.string("abbbcd");
    let r = regex::is_match(&mut heap, &mut cache, pattern, text).unwrap();
    assert!(heap.bool_value(r));

    let miss = heap.string("xyz");
    let r = regex::is_match(&mut heap, &mut cache, pattern, miss).unwrap();
    assert!(!heap.bool_value(r));

    // The compiled pattern is cached.
    assert_eq!(cache.regex.len(), 1);
    let r = regex::is_match(&mut heap, &mut cache, pattern, text).unwrap();
    assert!(heap.bool_value(r));
    assert_eq!(cache.regex.len(), 1);

    let invalid = heap.string("a(");
    assert!(regex::is_match(&mut heap, &mut cache, invalid, text).is_none());
}

#[test]
fn find_all_submatches() {
    let mut heap = Heap::new();
    let mut cache = BuiltinCache::new();

    let pattern = heap.string("([a-z]+)=([0-9]+)");
    let text = heap.string("a=1, bc=22, d=3");
    let all = heap.number_int(-1);
    let r = regex::find_all_string_submatch(&mut heap, &mut cache, pattern, text, all)
        .unwrap();
    assert_eq!(
        json::dump(&heap, r),
        r#"[["a=1","a","1"],["bc=22","bc","22"],["d=3","d","3"]]"#
    );

    // A positive limit truncates.
    let two = heap.number_int(2);
    let r = regex::find_all_string_submatch(&mut heap, &mut cache, pattern, text, two)
        .unwrap();
    assert_eq!(heap.array_len(r), 2);
}

#[test]
fn unmatched_groups_are_empty_strings() {
    let mut heap = Heap::new();
    let mut cache = BuiltinCache::new();

    let pattern = heap.string("a(x)?b");
    let text = heap.string("ab axb");
    let all = heap.number_int(-1);
    let r = regex::find_all_string_submatch(&mut heap, &mut cache, pattern, text, all)
        .unwrap();
    assert_eq!(json::dump(&heap, r), r#"[["ab",""],["axb","x"]]"#);
}

#[test]
fn empty_matches_advance_by_code_point() {
    let mut heap = Heap::new();
    let mut cache = BuiltinCache::new();

    let pattern = heap.string("x?");
    let text = heap.string("éz");
    let all = heap.number_int(-1);
    let r = regex::find_all_string_submatch(&mut heap, &mut cache, pattern, text, all)
        .unwrap();
    // One empty match per code point plus one at the end.
    assert_eq!(json::dump(&heap, r), r#"[[""],[""],[""]]"#);
}
