// SPDX-License-Identifier: Apache-2.0

//! Arithmetic builtins.
//!
//! Binary operations take an integer fast path when both operands are
//! 64-bit integers and the result does not overflow; everything else runs
//! over arbitrary-precision decimals with half-up rounding. Division and
//! remainder by zero are soft failures, not traps.

use bigdecimal::RoundingMode;
use num_traits::Zero;

use verdict_core::{Heap, Type, Value, num};

use crate::sets;

/// Absolute value.
pub fn abs(heap: &mut Heap, v: Value) -> Option<Value> {
    let d = num::to_decimal(heap, v)?;
    Some(num::from_decimal(heap, &d.abs()))
}

/// Round to the nearest integer, halves away from zero.
pub fn round(heap: &mut Heap, v: Value) -> Option<Value> {
    let d = num::to_decimal(heap, v)?;
    let r = d.with_scale_round(0, RoundingMode::HalfUp);
    Some(num::from_decimal(heap, &r))
}

/// Round towards positive infinity.
pub fn ceil(heap: &mut Heap, v: Value) -> Option<Value> {
    let d = num::to_decimal(heap, v)?;
    let r = d.with_scale_round(0, RoundingMode::Ceiling);
    Some(num::from_decimal(heap, &r))
}

/// Round towards negative infinity.
pub fn floor(heap: &mut Heap, v: Value) -> Option<Value> {
    let d = num::to_decimal(heap, v)?;
    let r = d.with_scale_round(0, RoundingMode::Floor);
    Some(num::from_decimal(heap, &r))
}

fn both_ints(heap: &Heap, a: Value, b: Value) -> Option<(i64, i64)> {
    if heap.ty(a) != Type::Number || heap.ty(b) != Type::Number {
        return None;
    }
    Some((heap.number_try_int(a)?, heap.number_try_int(b)?))
}

/// Addition.
pub fn plus(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    if let Some((x, y)) = both_ints(heap, a, b) {
        if let Some(r) = x.checked_add(y) {
            return Some(heap.number_int(r));
        }
    }
    let x = num::to_decimal(heap, a)?;
    let y = num::to_decimal(heap, b)?;
    Some(num::from_decimal(heap, &(x + y)))
}

/// Subtraction on numbers, difference on sets.
pub fn minus(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    if heap.ty(a) == Type::Set && heap.ty(b) == Type::Set {
        return sets::diff(heap, a, b);
    }
    if let Some((x, y)) = both_ints(heap, a, b) {
        if let Some(r) = x.checked_sub(y) {
            return Some(heap.number_int(r));
        }
    }
    let x = num::to_decimal(heap, a)?;
    let y = num::to_decimal(heap, b)?;
    Some(num::from_decimal(heap, &(x - y)))
}

/// Multiplication.
pub fn multiply(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    if let Some((x, y)) = both_ints(heap, a, b) {
        if let Some(r) = x.checked_mul(y) {
            return Some(heap.number_int(r));
        }
    }
    let x = num::to_decimal(heap, a)?;
    let y = num::to_decimal(heap, b)?;
    Some(num::from_decimal(heap, &(x * y)))
}

/// Division. A zero divisor yields an undefined result.
pub fn divide(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let x = num::to_decimal(heap, a)?;
    let y = num::to_decimal(heap, b)?;
    if y.is_zero() {
        return None;
    }
    Some(num::from_decimal(heap, &(x / y)))
}

/// Remainder. Defined only for integer operands and a non-zero divisor;
/// the result carries the dividend's sign.
pub fn rem(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let x = num::to_decimal(heap, a)?;
    let y = num::to_decimal(heap, b)?;
    if !x.is_integer() || !y.is_integer() || y.is_zero() {
        return None;
    }
    let r = num::to_bigint(&x) % num::to_bigint(&y);
    Some(num::from_bigint(heap, &r))
}

/// Arithmetic negation.
pub fn neg(heap: &mut Heap, v: Value) -> Option<Value> {
    let d = num::to_decimal(heap, v)?;
    Some(num::from_decimal(heap, &(-d)))
}
