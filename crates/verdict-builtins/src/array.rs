// SPDX-License-Identifier: Apache-2.0

//! Array builtins.

use verdict_core::{Heap, Type, Value};

/// Concatenation of two arrays.
pub fn concat(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    if heap.ty(a) != Type::Array || heap.ty(b) != Type::Array {
        return None;
    }

    let r = heap.array_with_cap(heap.array_len(a) + heap.array_len(b));
    for src in [a, b] {
        for i in 0..heap.array_len(src) {
            let elem = heap.array_get(src, i)?;
            heap.array_append(r, elem);
        }
    }
    Some(r)
}

/// Subarray `[i, j)` with both bounds clamped to the valid range.
pub fn slice(heap: &mut Heap, a: Value, i: Value, j: Value) -> Option<Value> {
    if heap.ty(a) != Type::Array {
        return None;
    }

    let len = i64::from(heap.array_len(a));
    let start = heap.number_try_int(i)?;
    let stop = heap.number_try_int(j)?;

    let stop = stop.clamp(0, len);
    let start = start.clamp(0, stop);

    let r = heap.array_with_cap((stop - start) as u32);
    for idx in start..stop {
        let elem = heap.array_get(a, idx as u32)?;
        heap.array_append(r, elem);
    }
    Some(r)
}

/// Elements in reverse order.
pub fn reverse(heap: &mut Heap, a: Value) -> Option<Value> {
    if heap.ty(a) != Type::Array {
        return None;
    }

    let n = heap.array_len(a);
    let r = heap.array_with_cap(n);
    for i in (0..n).rev() {
        let elem = heap.array_get(a, i)?;
        heap.array_append(r, elem);
    }
    Some(r)
}
