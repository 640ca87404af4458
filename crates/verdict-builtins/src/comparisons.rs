// SPDX-License-Identifier: Apache-2.0

//! Order-based comparison builtins over the total order.

use verdict_core::{Heap, Value};

pub fn eq(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let r = heap.compare(a, b).is_eq();
    Some(heap.boolean(r))
}

pub fn neq(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let r = heap.compare(a, b).is_ne();
    Some(heap.boolean(r))
}

pub fn lt(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let r = heap.compare(a, b).is_lt();
    Some(heap.boolean(r))
}

pub fn lte(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let r = heap.compare(a, b).is_le();
    Some(heap.boolean(r))
}

pub fn gt(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let r = heap.compare(a, b).is_gt();
    Some(heap.boolean(r))
}

pub fn gte(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let r = heap.compare(a, b).is_ge();
    Some(heap.boolean(r))
}
