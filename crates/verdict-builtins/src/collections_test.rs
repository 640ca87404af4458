// SPDX-License-Identifier: Apache-2.0

//! Tests for the array, set, graph, range, comparison, conversion and
//! template builtins.

use verdict_core::{Heap, Type, json};

use crate::{array, comparisons, conversions, graphs, numbers, sets, template, types};

#[test]
fn array_concat_slice_reverse() {
    let mut heap = Heap::new();

    let a = json::parse(&mut heap, "[1,2]").unwrap();
    let b = json::parse(&mut heap, "[3]").unwrap();
    let r = array::concat(&mut heap, a, b).unwrap();
    assert_eq!(json::dump(&heap, r), "[1,2,3]");

    let arr = json::parse(&mut heap, "[0,1,2,3,4]").unwrap();
    let one = heap.number_int(1);
    let three = heap.number_int(3);
    let r = array::slice(&mut heap, arr, one, three).unwrap();
    assert_eq!(json::dump(&heap, r), "[1,2]");

    // Out-of-range bounds clamp.
    let minus = heap.number_int(-2);
    let ten = heap.number_int(10);
    let r = array::slice(&mut heap, arr, minus, ten).unwrap();
    assert_eq!(json::dump(&heap, r), "[0,1,2,3,4]");
    let r = array::slice(&mut heap, arr, three, one).unwrap();
    assert_eq!(json::dump(&heap, r), "[]");

    let r = array::reverse(&mut heap, arr).unwrap();
    assert_eq!(json::dump(&heap, r), "[4,3,2,1,0]");

    let not_array = heap.set();
    assert!(array::reverse(&mut heap, not_array).is_none());
}

#[test]
fn set_algebra() {
    let mut heap = Heap::new();

    let a = json::parse_extended(&mut heap, "{1,2,3}").unwrap();
    let b = json::parse_extended(&mut heap, "{2,3,4}").unwrap();

    let r = sets::diff(&mut heap, a, b).unwrap();
    let expected = json::parse_extended(&mut heap, "{1}").unwrap();
    assert!(heap.compare(r, expected).is_eq());

    let r = sets::intersection(&mut heap, a, b).unwrap();
    let expected = json::parse_extended(&mut heap, "{2,3}").unwrap();
    assert!(heap.compare(r, expected).is_eq());

    let r = sets::union(&mut heap, a, b).unwrap();
    let expected = json::parse_extended(&mut heap, "{1,2,3,4}").unwrap();
    assert!(heap.compare(r, expected).is_eq());

    let arr = json::parse(&mut heap, "[1]").unwrap();
    assert!(sets::diff(&mut heap, a, arr).is_none());
}

#[test]
fn set_of_sets_folds() {
    let mut heap = Heap::new();

    let xs = json::parse_extended(&mut heap, "{{1,2,3},{2,3},{3,4}}").unwrap();
    let r = sets::intersection_of(&mut heap, xs).unwrap();
    let expected = json::parse_extended(&mut heap, "{3}").unwrap();
    assert!(heap.compare(r, expected).is_eq());

    let r = sets::union_of(&mut heap, xs).unwrap();
    let expected = json::parse_extended(&mut heap, "{1,2,3,4}").unwrap();
    assert!(heap.compare(r, expected).is_eq());

    let empty = json::parse_extended(&mut heap, "set( )").unwrap();
    let r = sets::intersection_of(&mut heap, empty).unwrap();
    assert_eq!(heap.length(r), 0);
    let r = sets::union_of(&mut heap, empty).unwrap();
    assert_eq!(heap.length(r), 0);
}

#[test]
fn graph_reachability() {
    let mut heap = Heap::new();

    let graph = json::parse_extended(
        &mut heap,
        r#"{"a":["b"],"b":{"c"},"c":[],"d":["a"]}"#,
    )
    .unwrap();
    let initial = json::parse(&mut heap, r#"["a"]"#).unwrap();

    let r = graphs::reachable(&mut heap, graph, initial).unwrap();
    let expected = json::parse_extended(&mut heap, r#"{"a","b","c"}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());

    // Cycles terminate.
    let graph = json::parse(&mut heap, r#"{"a":["b"],"b":["a"]}"#).unwrap();
    let initial = json::parse(&mut heap, r#"["a"]"#).unwrap();
    let r = graphs::reachable(&mut heap, graph, initial).unwrap();
    let expected = json::parse_extended(&mut heap, r#"{"a","b"}"#).unwrap();
    assert!(heap.compare(r, expected).is_eq());

    let n = heap.number_int(1);
    assert!(graphs::reachable(&mut heap, n, initial).is_none());
}

#[test]
fn numbers_range_is_inclusive() {
    let mut heap = Heap::new();

    let a = heap.number_int(2);
    let b = heap.number_int(5);
    let r = numbers::range(&mut heap, a, b).unwrap();
    assert_eq!(json::dump(&heap, r), "[2,3,4,5]");

    // Descending steps down.
    let r = numbers::range(&mut heap, b, a).unwrap();
    assert_eq!(json::dump(&heap, r), "[5,4,3,2]");

    let r = numbers::range(&mut heap, a, a).unwrap();
    assert_eq!(json::dump(&heap, r), "[2]");

    let frac = json::parse(&mut heap, "1.5").unwrap();
    assert!(numbers::range(&mut heap, a, frac).is_none());
}

#[test]
fn comparisons_follow_total_order() {
    let mut heap = Heap::new();

    let a = heap.number_int(1);
    let b = heap.number_int(2);

    let r = comparisons::lt(&mut heap, a, b).unwrap();
    assert!(heap.bool_value(r));
    let r = comparisons::gte(&mut heap, a, b).unwrap();
    assert!(!heap.bool_value(r));
    let r = comparisons::neq(&mut heap, a, b).unwrap();
    assert!(heap.bool_value(r));

    // Cross-type comparisons are defined.
    let s = heap.string("x");
    let r = comparisons::lt(&mut heap, a, s).unwrap();
    assert!(heap.bool_value(r));
}

#[test]
fn to_number_coercions() {
    let mut heap = Heap::new();

    let null = heap.null();
    let r = conversions::to_number(&mut heap, null).unwrap();
    assert_eq!(heap.number_try_int(r), Some(0));

    let t = heap.boolean(true);
    let r = conversions::to_number(&mut heap, t).unwrap();
    assert_eq!(heap.number_try_int(r), Some(1));

    let n = heap.number_int(7);
    let r = conversions::to_number(&mut heap, n).unwrap();
    assert_eq!(heap.number_try_int(r), Some(7));

    let s = heap.string("-1.5e1");
    let r = conversions::to_number(&mut heap, s).unwrap();
    let expected = json::parse(&mut heap, "-15").unwrap();
    assert!(heap.compare(r, expected).is_eq());

    let bad = heap.string("12x");
    assert!(conversions::to_number(&mut heap, bad).is_none());
    let arr = heap.array();
    assert!(conversions::to_number(&mut heap, arr).is_none());
}

#[test]
fn type_predicates() {
    let mut heap = Heap::new();

    let n = heap.number_int(1);
    let r = types::is_number(&mut heap, n).unwrap();
    assert!(heap.bool_value(r));
    // Predicates are undefined rather than false.
    assert!(types::is_string(&mut heap, n).is_none());

    let r = types::name(&mut heap, n).unwrap();
    assert_eq!(heap.str_str(r), "number");
    let set = heap.set();
    let r = types::name(&mut heap, set).unwrap();
    assert_eq!(heap.str_str(r), "set");
}

#[test]
fn template_string_rendering() {
    let mut heap = Heap::new();

    let parts = json::parse_extended(&mut heap, r#"["n=",{1},", u=",set( )]"#).unwrap();
    let r = template::template_string(&mut heap, parts).unwrap();
    assert_eq!(heap.str_str(r), "n=1, u=<undefined>");

    // Non-string scalars render through the extended dumper.
    let parts = json::parse(&mut heap, r#"["v:",[1,2]]"#).unwrap();
    let r = template::template_string(&mut heap, parts).unwrap();
    assert_eq!(heap.str_str(r), "v:[1,2]");

    // A set with more than one element is undefined.
    let parts = json::parse_extended(&mut heap, r#"[{1,2}]"#).unwrap();
    assert!(template::template_string(&mut heap, parts).is_none());

    let not_array = heap.string("x");
    assert!(template::template_string(&mut heap, not_array).is_none());
    assert_eq!(heap.ty(not_array), Type::String);
}
