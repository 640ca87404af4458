// SPDX-License-Identifier: Apache-2.0

//! Builtin-id mapping table.
//!
//! The policy compiler embeds a JSON object mapping dotted builtin paths
//! to integer function ids. It is parsed once at module start; lookups
//! walk the tree with a path array and return the id at the leaf, or 0
//! when the path resolves to nothing numeric.

use crate::heap::Heap;
use crate::json;
use crate::value::{Span, Type, Value};

/// Parsed mapping state.
#[derive(Default)]
pub struct Mapping {
    root: Option<Value>,
}

impl Mapping {
    /// Parse the mapping JSON at the given heap span. Later calls are
    /// ignored; the first mapping wins.
    pub fn init(&mut self, heap: &mut Heap, input: Span) {
        if self.root.is_some() {
            return;
        }
        match json::parse_span(heap, input) {
            Ok(v) => {
                log::debug!("mapping initialized ({} bytes)", input.len);
                self.root = Some(v);
            }
            Err(err) => log::error!("mapping: {err}"),
        }
    }

    /// Walk `path` (an array of keys) and return the integer leaf, or 0.
    #[must_use]
    pub fn lookup(&self, heap: &Heap, path: Value) -> i32 {
        let Some(root) = self.root else {
            return 0;
        };
        lookup_in(heap, root, path)
    }
}

/// Path lookup over any mapping value; exposed for generated code that
/// carries its own table.
#[must_use]
pub fn lookup_in(heap: &Heap, mapping: Value, path: Value) -> i32 {
    if heap.ty(path) != Type::Array || heap.array_len(path) == 0 {
        return 0;
    }

    let mut curr = mapping;
    for i in 0..heap.array_len(path) {
        let Some(key) = heap.array_get(path, i) else {
            return 0;
        };
        match heap.get(curr, key) {
            Some(next) => curr = next,
            None => return 0,
        }
    }

    if heap.ty(curr) == Type::Number {
        if let Some(id) = heap.number_try_int(curr) {
            return i32::try_from(id).unwrap_or(0);
        }
    }
    0
}
