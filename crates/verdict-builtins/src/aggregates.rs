// SPDX-License-Identifier: Apache-2.0

//! Aggregate builtins: count, sum, product, max, min, sort, all, any.

use bigdecimal::BigDecimal;
use num_traits::{One, Zero};

use verdict_core::{Heap, Type, Value, num};

use crate::collection_elements;

/// Size of a container, or the code-point count of a string.
pub fn count(heap: &mut Heap, v: Value) -> Option<Value> {
    match heap.ty(v) {
        Type::String | Type::Array | Type::Object | Type::Set => {
            let n = heap.length(v);
            Some(heap.number_int(i64::from(n)))
        }
        _ => None,
    }
}

fn fold(
    heap: &mut Heap,
    v: Value,
    init: BigDecimal,
    op: impl Fn(BigDecimal, BigDecimal) -> BigDecimal,
) -> Option<Value> {
    let elems = collection_elements(heap, v)?;
    let mut acc = init;
    for elem in elems {
        let d = num::to_decimal(heap, elem)?;
        acc = op(acc, d);
    }
    Some(num::from_decimal(heap, &acc))
}

/// Sum of an array or set of numbers; mixed content is absent.
pub fn sum(heap: &mut Heap, v: Value) -> Option<Value> {
    fold(heap, v, BigDecimal::zero(), |a, b| a + b)
}

/// Product of an array or set of numbers; mixed content is absent.
pub fn product(heap: &mut Heap, v: Value) -> Option<Value> {
    fold(heap, v, BigDecimal::one(), |a, b| a * b)
}

/// Maximum element under the total order; empty input is absent.
pub fn max(heap: &mut Heap, v: Value) -> Option<Value> {
    let elems = collection_elements(heap, v)?;
    let mut best: Option<Value> = None;
    for elem in elems {
        match best {
            Some(b) if heap.compare(b, elem).is_ge() => {}
            _ => best = Some(elem),
        }
    }
    best
}

/// Minimum element under the total order; empty input is absent.
pub fn min(heap: &mut Heap, v: Value) -> Option<Value> {
    let elems = collection_elements(heap, v)?;
    let mut best: Option<Value> = None;
    for elem in elems {
        match best {
            Some(b) if heap.compare(b, elem).is_le() => {}
            _ => best = Some(elem),
        }
    }
    best
}

/// Sorted array of the elements of an array or set.
pub fn sort(heap: &mut Heap, v: Value) -> Option<Value> {
    match heap.ty(v) {
        Type::Array => {
            let copy = heap.shallow_copy(v);
            heap.array_sort(copy);
            Some(copy)
        }
        Type::Set => {
            let values = heap.set_values(v);
            let arr = heap.array_with_cap(values.len() as u32);
            for elem in values {
                heap.array_append(arr, elem);
            }
            Some(arr)
        }
        _ => None,
    }
}

/// True when every element is boolean `true`.
pub fn all(heap: &mut Heap, v: Value) -> Option<Value> {
    let elems = collection_elements(heap, v)?;
    for elem in elems {
        if heap.ty(elem) != Type::Boolean || !heap.bool_value(elem) {
            return Some(heap.boolean(false));
        }
    }
    Some(heap.boolean(true))
}

/// True when some element is boolean `true`. Sets answer with a
/// membership query instead of a scan.
pub fn any(heap: &mut Heap, v: Value) -> Option<Value> {
    match heap.ty(v) {
        Type::Array => {
            for i in 0..heap.array_len(v) {
                let elem = heap.array_get(v, i)?;
                if heap.ty(elem) == Type::Boolean && heap.bool_value(elem) {
                    return Some(heap.boolean(true));
                }
            }
            Some(heap.boolean(false))
        }
        Type::Set => {
            if heap.length(v) == 0 {
                return Some(heap.boolean(false));
            }
            let t = heap.boolean(true);
            let found = heap.set_get(v, t).is_some();
            Some(heap.boolean(found))
        }
        _ => None,
    }
}
