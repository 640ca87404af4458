// SPDX-License-Identifier: Apache-2.0

//! Tests for glob translation and matching.

use verdict_core::{Heap, json};

use crate::cache::BuiltinCache;
use crate::glob::{glob_match, translate};

fn delims(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn literal_text() {
    assert_eq!(translate("abc", &[]).unwrap(), "^abc$");
    assert_eq!(translate("a.c", &[]).unwrap(), "^a\\.c$");
}

#[test]
fn wildcards_without_delimiters() {
    assert_eq!(translate("a*", &[]).unwrap(), "^a.*$");
    assert_eq!(translate("a**", &[]).unwrap(), "^a.*$");
    assert_eq!(translate("a?", &[]).unwrap(), "^a.$");
}

#[test]
fn wildcards_with_delimiters() {
    assert_eq!(translate("a*", &delims(&["/"])).unwrap(), "^a[^/]*$");
    assert_eq!(translate("a**", &delims(&["/"])).unwrap(), "^a.*$");
    assert_eq!(translate("a?", &delims(&["/"])).unwrap(), "^a[^/]$");
}

#[test]
fn alternation_translates_to_group() {
    assert_eq!(
        translate("{a,b}/*", &delims(&["/"])).unwrap(),
        "^(a|b)/[^/]*$"
    );
    assert_eq!(translate("{a,{b,c}}", &[]).unwrap(), "^(a|(b|c))$");
}

#[test]
fn classes_and_ranges() {
    assert_eq!(translate("[abc]", &[]).unwrap(), "^[abc]$");
    assert_eq!(translate("[!abc]", &[]).unwrap(), "^[^abc]$");
    assert_eq!(translate("[a-z]", &[]).unwrap(), "^[a-z]$");
    assert_eq!(translate("[!0-9]x", &[]).unwrap(), "^[^0-9]x$");
}

#[test]
fn escapes_keep_literals() {
    assert_eq!(translate(r"a\*b", &[]).unwrap(), "^a\\*b$");
    assert_eq!(translate(r"a\{b", &[]).unwrap(), "^a\\{b$");
}

#[test]
fn translation_errors() {
    assert!(translate("[abc", &[]).is_err());
    assert!(translate("{a,b", &[]).is_err());
    assert!(translate("[z-a]", &[]).is_err());
    assert!(translate("a", &delims(&["ab"])).is_err());
}

#[test]
fn match_builtin_respects_delimiters() {
    let mut heap = Heap::new();
    let mut cache = BuiltinCache::new();

    let pattern = heap.string("{a,b}/*");
    let ds = json::parse(&mut heap, r#"["/"]"#).unwrap();

    let hit = heap.string("a/x");
    let r = glob_match(&mut heap, &mut cache, pattern, ds, hit).unwrap();
    assert!(heap.bool_value(r));

    // `*` must not cross the delimiter.
    let miss = heap.string("a/x/y");
    let r = glob_match(&mut heap, &mut cache, pattern, ds, miss).unwrap();
    assert!(!heap.bool_value(r));

    let miss = heap.string("c/x");
    let r = glob_match(&mut heap, &mut cache, pattern, ds, miss).unwrap();
    assert!(!heap.bool_value(r));

    // The translation is cached; a second call goes through the cache.
    let hit = heap.string("b/zz");
    let r = glob_match(&mut heap, &mut cache, pattern, ds, hit).unwrap();
    assert!(heap.bool_value(r));
    assert_eq!(cache.glob.len(), 1);
}

#[test]
fn super_crosses_delimiters() {
    let mut heap = Heap::new();
    let mut cache = BuiltinCache::new();

    let pattern = heap.string("a/**");
    let ds = json::parse(&mut heap, r#"["/"]"#).unwrap();
    let deep = heap.string("a/x/y/z");
    let r = glob_match(&mut heap, &mut cache, pattern, ds, deep).unwrap();
    assert!(heap.bool_value(r));
}
