// SPDX-License-Identifier: Apache-2.0

//! Number-sequence builtins.

use verdict_core::{Heap, Value};

/// Inclusive integer range from `a` to `b`, stepping towards `b`.
pub fn range(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let from = heap.number_try_int(a)?;
    let to = heap.number_try_int(b)?;

    let len = from.abs_diff(to) + 1;
    let arr = heap.array_with_cap(u32::try_from(len).ok()?);

    let step = if from <= to { 1 } else { -1 };
    let mut curr = from;
    loop {
        let n = heap.number_int(curr);
        heap.array_append(arr, n);
        if curr == to {
            break;
        }
        curr += step;
    }

    Some(arr)
}
