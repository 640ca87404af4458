// SPDX-License-Identifier: Apache-2.0

//! Set-algebra builtins.

use verdict_core::{Heap, Type, Value};

fn require_set(heap: &Heap, v: Value) -> Option<Value> {
    if heap.ty(v) == Type::Set { Some(v) } else { None }
}

/// Elements of `a` not in `b`.
pub fn diff(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    require_set(heap, a)?;
    require_set(heap, b)?;

    let r = heap.set();
    for elem in heap.iter_keys(a) {
        if heap.set_get(b, elem).is_none() {
            heap.set_add(r, elem);
        }
    }
    Some(r)
}

/// Elements common to `a` and `b`.
pub fn intersection(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    require_set(heap, a)?;
    require_set(heap, b)?;

    let r = heap.set();
    for elem in heap.iter_keys(a) {
        if heap.set_get(b, elem).is_some() {
            heap.set_add(r, elem);
        }
    }
    Some(r)
}

/// Elements of either `a` or `b`.
pub fn union(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    require_set(heap, a)?;
    require_set(heap, b)?;

    let r = heap.set();
    for src in [a, b] {
        for elem in heap.iter_keys(src) {
            heap.set_add(r, elem);
        }
    }
    Some(r)
}

/// Intersection of a set of sets; the empty input is the empty set.
pub fn intersection_of(heap: &mut Heap, xs: Value) -> Option<Value> {
    require_set(heap, xs)?;

    let mut acc: Option<Value> = None;
    for s in heap.iter_keys(xs) {
        require_set(heap, s)?;
        acc = Some(match acc {
            None => s,
            Some(prev) => intersection(heap, prev, s)?,
        });
    }
    match acc {
        Some(r) => Some(heap.shallow_copy(r)),
        None => Some(heap.set()),
    }
}

/// Union of a set of sets.
pub fn union_of(heap: &mut Heap, xs: Value) -> Option<Value> {
    require_set(heap, xs)?;

    let r = heap.set();
    for s in heap.iter_keys(xs) {
        require_set(heap, s)?;
        for elem in heap.iter_keys(s) {
            heap.set_add(r, elem);
        }
    }
    Some(r)
}
