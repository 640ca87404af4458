// SPDX-License-Identifier: Apache-2.0

//! Template-string rendering.

use verdict_core::{Heap, Type, Value, json};

/// Concatenate template parts. Strings pass through; a singleton set is
/// unwrapped; an empty set renders the literal `<undefined>`; a set with
/// more than one element is absent. Everything else renders through the
/// extended dumper.
pub fn template_string(heap: &mut Heap, parts: Value) -> Option<Value> {
    if heap.ty(parts) != Type::Array {
        return None;
    }

    let mut out = String::new();
    for i in 0..heap.array_len(parts) {
        let part = heap.array_get(parts, i)?;
        out.push_str(&render(heap, part)?);
    }
    Some(heap.string(&out))
}

fn render(heap: &Heap, v: Value) -> Option<String> {
    let v = if heap.ty(v) == Type::Set {
        match heap.length(v) {
            0 => return Some("<undefined>".to_string()),
            1 => heap.iter_keys(v).pop()?,
            _ => return None,
        }
    } else {
        v
    };

    if heap.ty(v) == Type::String {
        return Some(heap.str_str(v).to_string());
    }
    Some(json::dump_extended(heap, v))
}
