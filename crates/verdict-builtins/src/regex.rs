// SPDX-License-Identifier: Apache-2.0

//! Regex builtins.
//!
//! Patterns compile through the linear-time `regex` engine and stay in the
//! per-instance cache keyed by pattern source. Submatch iteration follows
//! Go-style `FindAllStringSubmatch` semantics: a global unanchored scan
//! where unmatched groups contribute empty strings and empty matches
//! advance by one code point.

use verdict_core::{Heap, Type, Value};

use crate::cache::BuiltinCache;

/// Whether the pattern compiles. Always defined.
pub fn is_valid(heap: &mut Heap, pattern: Value) -> Option<Value> {
    let valid = heap.ty(pattern) == Type::String
        && ::regex::Regex::new(heap.str_str(pattern)).is_ok();
    Some(heap.boolean(valid))
}

/// Unanchored match test.
pub fn is_match(
    heap: &mut Heap,
    cache: &mut BuiltinCache,
    pattern: Value,
    value: Value,
) -> Option<Value> {
    if heap.ty(pattern) != Type::String || heap.ty(value) != Type::String {
        return None;
    }

    let pat = heap.str_str(pattern).to_string();
    let text = heap.str_str(value).to_string();
    let re = cache.compile(&pat)?;
    let matched = re.is_match(&text);
    Some(heap.boolean(matched))
}

/// All submatches of the pattern in the value, at most `number` of them
/// (-1 for unlimited). Each match is an array of the full match followed
/// by its capture groups; unmatched groups are empty strings.
pub fn find_all_string_submatch(
    heap: &mut Heap,
    cache: &mut BuiltinCache,
    pattern: Value,
    value: Value,
    number: Value,
) -> Option<Value> {
    if heap.ty(pattern) != Type::String || heap.ty(value) != Type::String {
        return None;
    }
    let n = heap.number_try_int(number)?;

    let limit = match n {
        -1 => usize::MAX,
        _ if n < 0 => 0,
        _ => n as usize,
    };

    let pat = heap.str_str(pattern).to_string();
    let text = heap.str_str(value).to_string();
    let re = cache.compile(&pat)?;

    let mut groups: Vec<Vec<String>> = Vec::new();
    for caps in re.captures_iter(&text).take(limit) {
        let row = (0..caps.len())
            .map(|i| caps.get(i).map_or(String::new(), |m| m.as_str().to_string()))
            .collect();
        groups.push(row);
    }

    let result = heap.array_with_cap(groups.len() as u32);
    for row in groups {
        let arr = heap.array_with_cap(row.len() as u32);
        for group in row {
            let s = heap.string(&group);
            heap.array_append(arr, s);
        }
        heap.array_append(result, arr);
    }
    Some(result)
}
