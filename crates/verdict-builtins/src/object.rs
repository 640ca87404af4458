// SPDX-License-Identifier: Apache-2.0

//! Object builtins and JSON-path filtering.
//!
//! `json.remove` and `json.filter` compile their path lists into a nested
//! object whose `null` leaves mark the addressed nodes, then walk the
//! subject and the path tree together. Paths are `/`-separated strings
//! (with `~0` → `~` and `~1` → `/` unescaping) or arrays of segments;
//! array elements are addressed by their decimal index as a string.

use verdict_core::{Heap, Type, Value};

use crate::key_elements;

/// Keep only the listed keys.
pub fn filter(heap: &mut Heap, obj: Value, keys: Value) -> Option<Value> {
    if heap.ty(obj) != Type::Object {
        return None;
    }
    let keys = key_elements(heap, keys)?;

    let r = heap.object();
    for k in keys {
        if let Some(v) = heap.object_get(obj, k) {
            heap.object_insert(r, k, v);
        }
    }
    Some(r)
}

/// Lookup with a default. A non-array key addresses one entry; an array
/// key is a path walked through nested containers, with the empty path
/// returning the object itself.
pub fn get(heap: &mut Heap, obj: Value, key: Value, default: Value) -> Option<Value> {
    if heap.ty(obj) != Type::Object {
        return None;
    }

    if heap.ty(key) != Type::Array {
        return Some(heap.get(obj, key).unwrap_or(default));
    }

    let len = heap.array_len(key);
    if len == 0 {
        return Some(obj);
    }

    let mut curr = obj;
    for i in 0..len {
        let seg = heap.array_get(key, i)?;
        match heap.get(curr, seg) {
            Some(next) => curr = next,
            None => return Some(default),
        }
    }
    Some(curr)
}

/// The keys of an object, as a set.
pub fn keys(heap: &mut Heap, obj: Value) -> Option<Value> {
    if heap.ty(obj) != Type::Object {
        return None;
    }

    let ks = heap.object_keys(obj);
    let r = heap.set_with_cap(ks.len() as u32);
    for k in ks {
        heap.set_add(r, k);
    }
    Some(r)
}

/// Drop the listed keys.
pub fn remove(heap: &mut Heap, obj: Value, keys: Value) -> Option<Value> {
    if heap.ty(obj) != Type::Object {
        return None;
    }
    let drop = key_elements(heap, keys)?;

    let drop_set = heap.set();
    for k in drop {
        heap.set_add(drop_set, k);
    }

    let r = heap.object();
    for k in heap.object_keys(obj) {
        if heap.set_get(drop_set, k).is_none() {
            let v = heap.object_get(obj, k)?;
            heap.object_insert(r, k, v);
        }
    }
    Some(r)
}

/// Recursive union; `b` wins on scalar conflicts.
pub fn union(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    if heap.ty(a) != Type::Object || heap.ty(b) != Type::Object {
        return None;
    }
    Some(merge_right(heap, a, b))
}

fn merge_right(heap: &mut Heap, a: Value, b: Value) -> Value {
    let merged = heap.object();

    for key in heap.object_keys(a) {
        let va = heap.object_get(a, key).unwrap_or_else(|| heap.null());
        match heap.object_get(b, key) {
            None => heap.object_insert(merged, key, va),
            Some(vb) => {
                let v = if heap.ty(va) == Type::Object && heap.ty(vb) == Type::Object {
                    merge_right(heap, va, vb)
                } else {
                    vb
                };
                heap.object_insert(merged, key, v);
            }
        }
    }

    for key in heap.object_keys(b) {
        if heap.object_get(a, key).is_none() {
            let vb = heap.object_get(b, key).unwrap_or_else(|| heap.null());
            heap.object_insert(merged, key, vb);
        }
    }

    merged
}

/// Remove the addressed nodes; missing paths are ignored.
pub fn json_remove(heap: &mut Heap, obj: Value, paths: Value) -> Option<Value> {
    if heap.ty(obj) != Type::Object {
        return None;
    }
    if heap.ty(paths) != Type::Array && heap.ty(paths) != Type::Set {
        return None;
    }

    let marker = paths_to_marker(heap, paths)?;
    remove_walk(heap, obj, Some(marker))
}

/// Keep only the addressed nodes; missing paths are ignored.
pub fn json_filter(heap: &mut Heap, obj: Value, paths: Value) -> Option<Value> {
    if heap.ty(obj) != Type::Object {
        return None;
    }
    if heap.ty(paths) != Type::Array && heap.ty(paths) != Type::Set {
        return None;
    }

    let marker = paths_to_marker(heap, paths)?;
    filter_walk(heap, obj, Some(marker))
}

/// Parse every path of the collection into segment lists and fold them
/// into a nested marker object with `null` leaves.
fn paths_to_marker(heap: &mut Heap, paths: Value) -> Option<Value> {
    let mut parsed: Vec<Vec<Value>> = Vec::new();
    for p in key_elements(heap, paths)? {
        parsed.push(parse_path(heap, p)?);
    }

    let root = heap.object();
    for terms in parsed {
        if terms.is_empty() {
            continue;
        }

        let mut node = root;
        let mut covered = false;
        for &k in &terms[..terms.len() - 1] {
            let child = match heap.object_get(node, k) {
                Some(child) => child,
                None => {
                    let child = heap.object();
                    heap.object_insert(node, k, child);
                    child
                }
            };
            match heap.ty(child) {
                // A shorter path already addresses this whole subtree.
                Type::Null => {
                    covered = true;
                    break;
                }
                Type::Object => node = child,
                _ => {}
            }
        }

        if !covered {
            let leaf = heap.null();
            let last = terms[terms.len() - 1];
            heap.object_insert(node, last, leaf);
        }
    }
    Some(root)
}

/// A path is an array of segments, or a `/`-separated string with JSON
/// pointer unescaping.
fn parse_path(heap: &mut Heap, p: Value) -> Option<Vec<Value>> {
    match heap.ty(p) {
        Type::Array => {
            Some((0..heap.array_len(p)).filter_map(|i| heap.array_get(p, i)).collect())
        }
        Type::String => {
            let s = heap.str_str(p).to_string();
            let trimmed = s.trim_start_matches('/');
            if trimmed.is_empty() {
                return Some(Vec::new());
            }
            let mut segments = Vec::new();
            for part in trimmed.split('/') {
                let unescaped = part.replace("~1", "/").replace("~0", "~");
                segments.push(heap.string(&unescaped));
            }
            Some(segments)
        }
        _ => None,
    }
}

fn index_key(heap: &mut Heap, i: u32) -> Value {
    heap.string(&i.to_string())
}

/// `marker` is the path tree: `None` keeps the node, a `null` leaf drops
/// it, an object recurses, anything else keeps the node.
fn remove_walk(heap: &mut Heap, v: Value, marker: Option<Value>) -> Option<Value> {
    let Some(marker) = marker else {
        return Some(v);
    };

    match heap.ty(marker) {
        Type::Null => return None,
        Type::Object => {}
        _ => return Some(v),
    }

    match heap.ty(v) {
        Type::Object => {
            let r = heap.object();
            for key in heap.object_keys(v) {
                let val = heap.object_get(v, key)?;
                let sub = heap.object_get(marker, key);
                if let Some(kept) = remove_walk(heap, val, sub) {
                    heap.object_insert(r, key, kept);
                }
            }
            Some(r)
        }
        Type::Set => {
            let r = heap.set();
            for elem in heap.iter_keys(v) {
                let sub = heap.object_get(marker, elem);
                if let Some(kept) = remove_walk(heap, elem, sub) {
                    heap.set_add(r, kept);
                }
            }
            Some(r)
        }
        Type::Array => {
            let r = heap.array();
            for i in 0..heap.array_len(v) {
                let elem = heap.array_get(v, i)?;
                let key = index_key(heap, i);
                let sub = heap.object_get(marker, key);
                if let Some(kept) = remove_walk(heap, elem, sub) {
                    heap.array_append(r, kept);
                }
            }
            Some(r)
        }
        _ => Some(v),
    }
}

/// `marker` selects what stays: a `null` leaf keeps the whole subtree, an
/// object keeps the intersection it spells out.
fn filter_walk(heap: &mut Heap, v: Value, marker: Option<Value>) -> Option<Value> {
    let marker = marker?;

    if heap.ty(marker) == Type::Null {
        return Some(v);
    }
    if heap.ty(marker) != Type::Object {
        return None;
    }

    match heap.ty(v) {
        Type::Object => {
            let r = heap.object();
            for key in heap.object_keys(v) {
                if heap.object_get(marker, key).is_some() {
                    let val = heap.object_get(v, key)?;
                    let sub = heap.object_get(marker, key);
                    if let Some(kept) = filter_walk(heap, val, sub) {
                        heap.object_insert(r, key, kept);
                    }
                }
            }
            Some(r)
        }
        Type::Set => {
            let r = heap.set();
            for elem in heap.iter_keys(v) {
                let sub = heap.object_get(marker, elem);
                if let Some(kept) = filter_walk(heap, elem, sub) {
                    heap.set_add(r, kept);
                }
            }
            Some(r)
        }
        Type::Array => {
            let r = heap.array();
            for i in 0..heap.array_len(v) {
                let elem = heap.array_get(v, i)?;
                let key = index_key(heap, i);
                let sub = heap.object_get(marker, key);
                if let Some(kept) = filter_walk(heap, elem, sub) {
                    heap.array_append(r, kept);
                }
            }
            Some(r)
        }
        _ => Some(v),
    }
}
