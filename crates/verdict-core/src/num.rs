// SPDX-License-Identifier: Apache-2.0

//! Bridge between number cells and arbitrary-precision decimals.
//!
//! Arithmetic never runs on the stored representation: operands convert to
//! [`BigDecimal`], the operation runs there, and results narrow back to a
//! 64-bit integer when exactly representable or to an owned decimal string
//! otherwise. Integer inputs that fit the fast path never touch the
//! decimal layer at all; the builtins check that themselves.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::abort;
use crate::heap::Heap;
use crate::value::{Type, Value};

/// Convert a number value to a decimal. Absent for non-numbers.
#[must_use]
pub fn to_decimal(heap: &Heap, v: Value) -> Option<BigDecimal> {
    if heap.ty(v) != Type::Number {
        return None;
    }
    if let Some(s) = heap.number_ref_str(v) {
        match s.parse() {
            Ok(d) => return Some(d),
            // Refs come from the lexer or from narrowing; both validate.
            Err(_) => abort("number: invalid decimal ref"),
        }
    }
    heap.number_try_int(v).map(BigDecimal::from)
}

/// Narrow a decimal into a number cell: an `i64` when the value is an
/// integer in range, otherwise an owned normalised decimal string.
pub fn from_decimal(heap: &mut Heap, d: &BigDecimal) -> Value {
    if d.is_integer() {
        if let Some(i) = d.to_i64() {
            return heap.number_int(i);
        }
    }
    let normalized = d.normalized();
    heap.number_str(&normalized.to_string())
}

/// Integer part of a decimal that is known to be an integer.
#[must_use]
pub fn to_bigint(d: &BigDecimal) -> BigInt {
    d.with_scale(0).into_bigint_and_exponent().0
}

/// Store a big integer as a number cell, narrowing when possible.
pub fn from_bigint(heap: &mut Heap, i: &BigInt) -> Value {
    match i.to_i64() {
        Some(n) => heap.number_int(n),
        None => heap.number_str(&i.to_string()),
    }
}
