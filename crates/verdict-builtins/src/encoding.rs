// SPDX-License-Identifier: Apache-2.0

//! Encoding builtins: base64, base64url and JSON.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use verdict_core::{Cell, Heap, Type, Value, json};

const PAD: GeneralPurposeConfig = GeneralPurposeConfig::new();

// Decoding accepts both padded and unpadded input.
const INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STD_ENCODE: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PAD);
const STD_DECODE: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, INDIFFERENT);
const URL_ENCODE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PAD);
const URL_DECODE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, INDIFFERENT);

pub fn base64_encode(heap: &mut Heap, v: Value) -> Option<Value> {
    if heap.ty(v) != Type::String {
        return None;
    }
    let enc = STD_ENCODE.encode(heap.str_bytes(v));
    Some(heap.string(&enc))
}

pub fn base64_decode(heap: &mut Heap, v: Value) -> Option<Value> {
    if heap.ty(v) != Type::String {
        return None;
    }
    let dec = STD_DECODE.decode(heap.str_bytes(v)).ok()?;
    Some(heap.string_raw(&dec))
}

/// Whether the string is decodable base64. Always defined.
pub fn base64_is_valid(heap: &mut Heap, v: Value) -> Option<Value> {
    let valid =
        heap.ty(v) == Type::String && STD_DECODE.decode(heap.str_bytes(v)).is_ok();
    Some(heap.boolean(valid))
}

pub fn base64_url_encode(heap: &mut Heap, v: Value) -> Option<Value> {
    if heap.ty(v) != Type::String {
        return None;
    }
    let enc = URL_ENCODE.encode(heap.str_bytes(v));
    Some(heap.string(&enc))
}

pub fn base64_url_decode(heap: &mut Heap, v: Value) -> Option<Value> {
    if heap.ty(v) != Type::String {
        return None;
    }
    let dec = URL_DECODE.decode(heap.str_bytes(v)).ok()?;
    Some(heap.string_raw(&dec))
}

/// Serialise any value to a JSON string.
pub fn json_marshal(heap: &mut Heap, v: Value) -> Option<Value> {
    let text = json::dump(heap, v);
    Some(heap.string(&text))
}

/// Parse a JSON string into a value.
pub fn json_unmarshal(heap: &mut Heap, v: Value) -> Option<Value> {
    let Cell::String(span) = heap.load(v) else {
        return None;
    };
    json::parse_span(heap, span).ok()
}

/// Whether the string parses as JSON. Always defined.
pub fn json_is_valid(heap: &mut Heap, v: Value) -> Option<Value> {
    let Cell::String(span) = heap.load(v) else {
        return Some(heap.boolean(false));
    };
    let valid = json::parse_span(heap, span).is_ok();
    Some(heap.boolean(valid))
}
