// SPDX-License-Identifier: Apache-2.0

//! String builtins.
//!
//! Strings are UTF-8 byte sequences; each operation states its unit.
//! Searching and delimiter matching work on bytes, indexing and slicing
//! work on code points. Invalid UTF-8 encountered while walking code
//! points aborts; pure byte operations never decode.

use bigdecimal::RoundingMode;

use verdict_core::error::abort;
use verdict_core::{Heap, Type, Value, num, unicode};

use crate::collection_elements;

fn str_vec(heap: &Heap, v: Value) -> Option<Vec<u8>> {
    if heap.ty(v) != Type::String {
        return None;
    }
    Some(heap.str_bytes(v).to_vec())
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from.min(haystack.len()));
    }
    if haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| &haystack[i..i + needle.len()] == needle)
}

/// Number of code points in `bytes[..end]`.
fn units_until(bytes: &[u8], end: usize) -> i64 {
    let mut units = 0;
    let mut i = 0;
    while i < end {
        let Some((_, n)) = unicode::decode_utf8(bytes, i) else {
            abort("string: invalid unicode");
        };
        i += n;
        units += 1;
    }
    units
}

/// Join an array or set of strings with a separator. Set elements are
/// emitted in set iteration order.
pub fn concat(heap: &mut Heap, sep: Value, coll: Value) -> Option<Value> {
    let sep = str_vec(heap, sep)?;
    let elems = collection_elements(heap, coll)?;

    let mut parts: Vec<Vec<u8>> = Vec::with_capacity(elems.len());
    for elem in elems {
        parts.push(str_vec(heap, elem)?);
    }

    let mut out = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(&sep);
        }
        out.extend_from_slice(part);
    }
    Some(heap.string_raw(&out))
}

/// Substring containment, by bytes.
pub fn contains(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let sub = str_vec(heap, b)?;
    let found = find(&s, &sub, 0).is_some();
    Some(heap.boolean(found))
}

/// Prefix test.
pub fn startswith(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let prefix = str_vec(heap, b)?;
    Some(heap.boolean(s.starts_with(&prefix)))
}

/// Suffix test.
pub fn endswith(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let suffix = str_vec(heap, b)?;
    Some(heap.boolean(s.ends_with(&suffix)))
}

/// Prefix test where either side may be a string or a collection of
/// strings; one level flattens per side and any match wins.
pub fn any_prefix_match(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    any_match(heap, a, b, |s, p| s.starts_with(p))
}

/// Suffix variant of [`any_prefix_match`].
pub fn any_suffix_match(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    any_match(heap, a, b, |s, p| s.ends_with(p))
}

fn any_match(
    heap: &mut Heap,
    a: Value,
    b: Value,
    pred: impl Fn(&[u8], &[u8]) -> bool + Copy,
) -> Option<Value> {
    match heap.ty(a) {
        Type::String => {}
        Type::Array | Type::Set => {
            for elem in collection_elements(heap, a)? {
                if heap.ty(elem) != Type::String {
                    return None;
                }
                let r = any_match(heap, elem, b, pred)?;
                if heap.bool_value(r) {
                    return Some(r);
                }
            }
            return Some(heap.boolean(false));
        }
        _ => return None,
    }

    match heap.ty(b) {
        Type::String => {}
        Type::Array | Type::Set => {
            for elem in collection_elements(heap, b)? {
                if heap.ty(elem) != Type::String {
                    return None;
                }
                let r = any_match(heap, a, elem, pred)?;
                if heap.bool_value(r) {
                    return Some(r);
                }
            }
            return Some(heap.boolean(false));
        }
        _ => return None,
    }

    let s = str_vec(heap, a)?;
    let probe = str_vec(heap, b)?;
    Some(heap.boolean(pred(&s, &probe)))
}

/// Code-point index of the first occurrence of `b` in `a`, or -1.
pub fn indexof(heap: &mut Heap, a: Value, b: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let sub = str_vec(heap, b)?;

    match find(&s, &sub, 0) {
        None => Some(heap.number_int(-1)),
        Some(pos) => {
            let units = units_until(&s, pos);
            Some(heap.number_int(units))
        }
    }
}

fn replace_bytes(s: &[u8], old: &[u8], new: &[u8]) -> Vec<u8> {
    if old.is_empty() {
        return s.to_vec();
    }
    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while let Some(pos) = find(s, old, i) {
        out.extend_from_slice(&s[i..pos]);
        out.extend_from_slice(new);
        i = pos + old.len();
    }
    out.extend_from_slice(&s[i..]);
    out
}

/// Replace all occurrences of `old` with `new`.
pub fn replace(heap: &mut Heap, a: Value, old: Value, new: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let old = str_vec(heap, old)?;
    let new = str_vec(heap, new)?;
    let out = replace_bytes(&s, &old, &new);
    Some(heap.string_raw(&out))
}

/// Apply an object of `{old: new}` replacements in iteration order, each
/// one running over the previous result.
pub fn replace_n(heap: &mut Heap, pairs: Value, a: Value) -> Option<Value> {
    if heap.ty(pairs) != Type::Object {
        return None;
    }
    let mut s = str_vec(heap, a)?;

    for key in heap.iter_keys(pairs) {
        let val = heap.object_get(pairs, key)?;
        let old = str_vec(heap, key)?;
        let new = str_vec(heap, val)?;
        s = replace_bytes(&s, &old, &new);
    }
    Some(heap.string_raw(&s))
}

/// Reverse by code points.
pub fn reverse(heap: &mut Heap, a: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;

    let mut out = vec![0u8; s.len()];
    let mut i = 0;
    while i < s.len() {
        let Some((_, n)) = unicode::decode_utf8(&s, i) else {
            abort("string: invalid unicode");
        };
        let at = s.len() - i - n;
        out[at..at + n].copy_from_slice(&s[i..i + n]);
        i += n;
    }
    Some(heap.string_raw(&out))
}

/// Split on a delimiter. The empty delimiter splits into code points; a
/// non-empty one splits on byte matches.
pub fn split(heap: &mut Heap, a: Value, d: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let delim = str_vec(heap, d)?;
    let arr = heap.array();

    if delim.is_empty() {
        let mut i = 0;
        while i < s.len() {
            let Some((_, n)) = unicode::decode_utf8(&s, i) else {
                abort("string: invalid unicode");
            };
            let part = heap.string_raw(&s[i..i + n]);
            heap.array_append(arr, part);
            i += n;
        }
        return Some(arr);
    }

    let mut start = 0;
    let mut i = 0;
    while s.len() >= delim.len() && i <= s.len() - delim.len() {
        if &s[i..i + delim.len()] == delim.as_slice() {
            let part = heap.string_raw(&s[start..i]);
            heap.array_append(arr, part);
            i += delim.len();
            start = i;
        } else {
            i += 1;
        }
    }
    let part = heap.string_raw(&s[start..]);
    heap.array_append(arr, part);
    Some(arr)
}

/// Substring by code points. A negative length means "to the end"; a
/// negative start is absent; zero length is the empty string.
pub fn substring(heap: &mut Heap, a: Value, start: Value, length: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let start = heap.number_try_int(start)?;
    let length = heap.number_try_int(length)?;

    if start < 0 {
        return None;
    }
    if length == 0 {
        return Some(heap.string(""));
    }

    let mut spos = s.len();
    let mut epos = s.len();
    let mut units: i64 = 0;
    let mut i = 0;
    while i < s.len() {
        if units == start {
            spos = i;
        }
        let Some((_, n)) = unicode::decode_utf8(&s, i) else {
            abort("string: invalid unicode");
        };
        if units >= start && length >= 0 && length == units - start {
            epos = i;
            break;
        }
        i += n;
        units += 1;
    }

    Some(heap.string_raw(&s[spos..epos]))
}

/// Code points of the cutset, for trim scans.
fn cutset_points(cut: &[u8]) -> Vec<(usize, usize)> {
    let mut points = Vec::new();
    let mut i = 0;
    while i < cut.len() {
        let Some((_, n)) = unicode::decode_utf8(cut, i) else {
            abort("string: invalid unicode");
        };
        points.push((i, n));
        i += n;
    }
    points
}

fn trim_left_offset(s: &[u8], cut: &[u8]) -> usize {
    let points = cutset_points(cut);
    let mut j = 0;
    'outer: while j < s.len() {
        for &(start, n) in &points {
            if j + n <= s.len() && s[j..j + n] == cut[start..start + n] {
                j += n;
                continue 'outer;
            }
        }
        break;
    }
    j
}

fn trim_right_offset(s: &[u8], cut: &[u8]) -> usize {
    let points = cutset_points(cut);
    let mut j = s.len();
    'outer: while j > 0 {
        let Some(last) = unicode::last_utf8(s, 0, j) else {
            abort("string: invalid unicode");
        };
        let n = j - last;
        for &(start, pn) in &points {
            if pn == n && s[last..j] == cut[start..start + pn] {
                j = last;
                continue 'outer;
            }
        }
        break;
    }
    j
}

/// Trim code points in the cutset from both ends.
pub fn trim(heap: &mut Heap, a: Value, cut: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let cut = str_vec(heap, cut)?;
    let from = trim_left_offset(&s, &cut);
    let to = trim_right_offset(&s[from..], &cut) + from;
    Some(heap.string_raw(&s[from..to]))
}

/// Trim code points in the cutset from the left.
pub fn trim_left(heap: &mut Heap, a: Value, cut: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let cut = str_vec(heap, cut)?;
    let from = trim_left_offset(&s, &cut);
    Some(heap.string_raw(&s[from..]))
}

/// Trim code points in the cutset from the right.
pub fn trim_right(heap: &mut Heap, a: Value, cut: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let cut = str_vec(heap, cut)?;
    let to = trim_right_offset(&s, &cut);
    Some(heap.string_raw(&s[..to]))
}

/// Remove an exact prefix if present.
pub fn trim_prefix(heap: &mut Heap, a: Value, pre: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let pre = str_vec(heap, pre)?;
    let rest = if s.starts_with(&pre) { &s[pre.len()..] } else { &s[..] };
    Some(heap.string_raw(rest))
}

/// Remove an exact suffix if present.
pub fn trim_suffix(heap: &mut Heap, a: Value, suf: Value) -> Option<Value> {
    let s = str_vec(heap, a)?;
    let suf = str_vec(heap, suf)?;
    let rest = if s.ends_with(&suf) { &s[..s.len() - suf.len()] } else { &s[..] };
    Some(heap.string_raw(rest))
}

/// Trim Unicode whitespace from both ends.
pub fn trim_space(heap: &mut Heap, a: Value) -> Option<Value> {
    if heap.ty(a) != Type::String {
        return None;
    }
    let trimmed = heap.str_str(a).trim().to_string();
    Some(heap.string(&trimmed))
}

/// Lower-case, ASCII fast path first.
pub fn lower(heap: &mut Heap, a: Value) -> Option<Value> {
    case_map(heap, a, |s| s.to_ascii_lowercase(), str::to_lowercase)
}

/// Upper-case, ASCII fast path first.
pub fn upper(heap: &mut Heap, a: Value) -> Option<Value> {
    case_map(heap, a, |s| s.to_ascii_uppercase(), str::to_uppercase)
}

fn case_map(
    heap: &mut Heap,
    a: Value,
    ascii: impl Fn(&[u8]) -> Vec<u8>,
    full: impl Fn(&str) -> String,
) -> Option<Value> {
    let s = str_vec(heap, a)?;
    if s.is_ascii() {
        let out = ascii(&s);
        return Some(heap.string_raw(&out));
    }
    let Ok(text) = core::str::from_utf8(&s) else {
        abort("string: invalid unicode");
    };
    let out = full(text);
    Some(heap.string(&out))
}

/// Format the integer part of a number in base 2, 8, 10 or 16.
pub fn format_int(heap: &mut Heap, a: Value, base: Value) -> Option<Value> {
    let base = heap.number_try_int(base)?;
    if !matches!(base, 2 | 8 | 10 | 16) {
        return None;
    }

    let d = num::to_decimal(heap, a)?;
    let truncated = d.with_scale_round(0, RoundingMode::Down);
    let i = num::to_bigint(&truncated);
    let text = i.to_str_radix(base as u32);
    Some(heap.string(&text))
}
