// SPDX-License-Identifier: Apache-2.0

//! # Verdict builtins
//!
//! The pure builtin library of the Verdict policy engine's Wasm core:
//! aggregates, comparisons, arithmetic and bitwise operations, string and
//! collection manipulation, regex and glob matching, graph reachability,
//! CIDR checks, encodings and conversions.
//!
//! Every builtin maps values to an optional value; an absent result means
//! "undefined" and the caller propagates it. Type mismatches are soft
//! failures, broken internal invariants abort (trap).

pub mod aggregates;
pub mod arithmetic;
pub mod array;
pub mod bits;
pub mod cache;
pub mod cidr;
pub mod comparisons;
pub mod conversions;
pub mod encoding;
pub mod glob;
pub mod graphs;
pub mod numbers;
pub mod object;
pub mod regex;
pub mod sets;
pub mod strings;
pub mod template;
pub mod types;

#[cfg(test)]
mod arithmetic_test;
#[cfg(test)]
mod collections_test;
#[cfg(test)]
mod encoding_test;
#[cfg(test)]
mod object_test;
#[cfg(test)]
mod regex_test;

pub use cache::BuiltinCache;

use verdict_core::{Heap, Type, Value};

/// Elements of an array (in index order) or a set (in set order).
/// Absent for any other type.
pub(crate) fn collection_elements(heap: &Heap, v: Value) -> Option<Vec<Value>> {
    match heap.ty(v) {
        Type::Array => Some((0..heap.array_len(v)).filter_map(|i| heap.array_get(v, i)).collect()),
        Type::Set => Some(heap.iter_keys(v)),
        _ => None,
    }
}

/// Key-like elements of a collection argument: objects and sets contribute
/// their keys, arrays contribute their element values.
pub(crate) fn key_elements(heap: &Heap, v: Value) -> Option<Vec<Value>> {
    match heap.ty(v) {
        Type::Object | Type::Set => Some(heap.iter_keys(v)),
        Type::Array => Some((0..heap.array_len(v)).filter_map(|i| heap.array_get(v, i)).collect()),
        _ => None,
    }
}
