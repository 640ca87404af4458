// SPDX-License-Identifier: Apache-2.0

//! Canonical value printer.
//!
//! Containers are emitted in iteration order, so the output is a function
//! of contents alone. Standard mode serialises sets as arrays and
//! non-string object keys as nested JSON strings; extended mode emits
//! `set( )`, set braces, and raw keys.

use core::fmt::Write;

use crate::heap::Heap;
use crate::value::{Cell, NumberRepr, Value};

#[derive(Clone, Copy)]
struct Options {
    set_literals: bool,
    non_string_keys: bool,
}

/// Serialise as standard JSON.
#[must_use]
pub fn dump(heap: &Heap, v: Value) -> String {
    let mut out = String::new();
    emit_value(heap, v, Options { set_literals: false, non_string_keys: false }, &mut out);
    out
}

/// Serialise in extended-value form.
#[must_use]
pub fn dump_extended(heap: &Heap, v: Value) -> String {
    let mut out = String::new();
    emit_value(heap, v, Options { set_literals: true, non_string_keys: true }, &mut out);
    out
}

/// Serialise into a NUL-terminated heap buffer; returns its address.
pub fn dump_into_heap(heap: &mut Heap, v: Value, extended: bool) -> u32 {
    let text = if extended { dump_extended(heap, v) } else { dump(heap, v) };
    let addr = heap.malloc(text.len() as u32 + 1);
    heap.write_bytes(addr, text.as_bytes());
    heap.set_u8(addr + text.len() as u32, 0);
    addr
}

fn emit_value(heap: &Heap, v: Value, opts: Options, out: &mut String) {
    match heap.load(v) {
        Cell::Null => out.push_str("null"),
        Cell::Boolean(true) => out.push_str("true"),
        Cell::Boolean(false) => out.push_str("false"),
        Cell::Number(NumberRepr::Int(i)) => {
            let _ = write!(out, "{i}");
        }
        Cell::Number(NumberRepr::Ref(span)) => {
            // Number refs hold validated ASCII decimal text.
            for &b in heap.bytes(span.addr, span.len) {
                out.push(b as char);
            }
        }
        Cell::String(span) => emit_string(heap.bytes(span.addr, span.len), out),
        Cell::Array(_) => {
            out.push('[');
            emit_elements(heap, v, opts, out, |heap, key, opts, out| {
                let elem = heap.get(v, key).unwrap_or_else(|| heap.null());
                emit_value(heap, elem, opts, out);
            });
            out.push(']');
        }
        Cell::Set(hdr) => {
            if opts.set_literals {
                if hdr.len == 0 {
                    out.push_str("set()");
                    return;
                }
                out.push('{');
                emit_elements(heap, v, opts, out, |heap, key, opts, out| {
                    emit_value(heap, key, opts, out);
                });
                out.push('}');
            } else {
                out.push('[');
                emit_elements(heap, v, opts, out, |heap, key, opts, out| {
                    emit_value(heap, key, opts, out);
                });
                out.push(']');
            }
        }
        Cell::Object(_) => {
            out.push('{');
            emit_elements(heap, v, opts, out, |heap, key, opts, out| {
                emit_object_key(heap, key, opts, out);
                out.push(':');
                let val = heap.get(v, key).unwrap_or_else(|| heap.null());
                emit_value(heap, val, opts, out);
            });
            out.push('}');
        }
    }
}

fn emit_elements<F>(heap: &Heap, v: Value, opts: Options, out: &mut String, emit: F)
where
    F: Fn(&Heap, Value, Options, &mut String),
{
    let mut it = heap.iter_value(v);
    let mut first = true;
    while let Some(key) = heap.iter_next(&mut it) {
        if !first {
            out.push(',');
        }
        first = false;
        emit(heap, key, opts, out);
    }
}

/// Keys of any type are allowed in extended mode; in standard mode a
/// non-string key is serialised once and emitted as a JSON string.
fn emit_object_key(heap: &Heap, key: Value, opts: Options, out: &mut String) {
    if opts.non_string_keys || matches!(heap.load(key), Cell::String(_)) {
        emit_value(heap, key, opts, out);
    } else {
        let nested = dump(heap, key);
        emit_string(nested.as_bytes(), out);
    }
}

/// Escape `\n`, `\r`, `\t`, `\\` and `"`; other control bytes become
/// `\u00XX`. Everything else is emitted verbatim as UTF-8.
fn emit_string(bytes: &[u8], out: &mut String) {
    out.push('"');
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0..=0x1f => {
                let _ = write!(out, "\\u{b:04x}");
            }
            0..=0x7f => out.push(b as char),
            _ => {
                // Copy one UTF-8 sequence through unchanged.
                match crate::unicode::decode_utf8(bytes, i) {
                    Some((cp, n)) => {
                        if let Some(c) = char::from_u32(cp) {
                            out.push(c);
                        }
                        i += n;
                        continue;
                    }
                    None => crate::error::abort("json: illegal utf-8"),
                }
            }
        }
        i += 1;
    }
    out.push('"');
}
