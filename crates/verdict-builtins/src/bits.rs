// SPDX-License-Identifier: Apache-2.0

//! Bitwise builtins over arbitrary-width two's-complement integers.
//!
//! Operands must be integral numbers; anything else is absent. `BigInt`
//! carries the two's-complement semantics directly: `negate(x) == -x-1`,
//! and right shifts of negatives round towards negative infinity.

use num_bigint::BigInt;

use verdict_core::{Heap, Value, num};

fn to_int(heap: &Heap, v: Value) -> Option<BigInt> {
    let d = num::to_decimal(heap, v)?;
    if !d.is_integer() {
        return None;
    }
    Some(num::to_bigint(&d))
}

/// Bitwise OR.
pub fn or(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let x = to_int(heap, a)?;
    let y = to_int(heap, b)?;
    Some(num::from_bigint(heap, &(x | y)))
}

/// Bitwise AND.
pub fn and(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let x = to_int(heap, a)?;
    let y = to_int(heap, b)?;
    Some(num::from_bigint(heap, &(x & y)))
}

/// Bitwise XOR.
pub fn xor(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let x = to_int(heap, a)?;
    let y = to_int(heap, b)?;
    Some(num::from_bigint(heap, &(x ^ y)))
}

/// Bitwise complement: `~x == -x-1`.
pub fn negate(heap: &mut Heap, v: Value) -> Option<Value> {
    let x = to_int(heap, v)?;
    Some(num::from_bigint(heap, &(-(x + 1i32))))
}

fn shift_amount(heap: &Heap, v: Value) -> Option<usize> {
    let n = heap.number_try_int(v)?;
    usize::try_from(n).ok()
}

/// Left shift by a non-negative amount.
pub fn shiftleft(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let x = to_int(heap, a)?;
    let n = shift_amount(heap, b)?;
    Some(num::from_bigint(heap, &(x << n)))
}

/// Arithmetic right shift by a non-negative amount.
pub fn shiftright(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let x = to_int(heap, a)?;
    let n = shift_amount(heap, b)?;
    Some(num::from_bigint(heap, &(x >> n)))
}
