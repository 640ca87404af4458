// SPDX-License-Identifier: Apache-2.0

//! Type-predicate builtins.
//!
//! Predicates answer `true` or stay undefined; they never return `false`,
//! matching the language's truth model.

use verdict_core::{Heap, Type, Value};

fn is(heap: &mut Heap, v: Value, ty: Type) -> Option<Value> {
    if heap.ty(v) == ty {
        Some(heap.boolean(true))
    } else {
        None
    }
}

pub fn is_number(heap: &mut Heap, v: Value) -> Option<Value> {
    is(heap, v, Type::Number)
}

pub fn is_string(heap: &mut Heap, v: Value) -> Option<Value> {
    is(heap, v, Type::String)
}

pub fn is_boolean(heap: &mut Heap, v: Value) -> Option<Value> {
    is(heap, v, Type::Boolean)
}

pub fn is_array(heap: &mut Heap, v: Value) -> Option<Value> {
    is(heap, v, Type::Array)
}

pub fn is_set(heap: &mut Heap, v: Value) -> Option<Value> {
    is(heap, v, Type::Set)
}

pub fn is_object(heap: &mut Heap, v: Value) -> Option<Value> {
    is(heap, v, Type::Object)
}

pub fn is_null(heap: &mut Heap, v: Value) -> Option<Value> {
    is(heap, v, Type::Null)
}

/// Name of the value's type.
pub fn name(heap: &mut Heap, v: Value) -> Option<Value> {
    let name = heap.ty(v).name();
    Some(heap.string(name))
}
