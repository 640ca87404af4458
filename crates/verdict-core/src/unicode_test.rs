// SPDX-License-Identifier: Apache-2.0

//! Tests for the UTF-8/UTF-16 helpers.

use crate::unicode::{
    decode_surrogate, decode_unit, decode_utf8, encode_utf8, is_space, last_utf8,
};

#[test]
fn decode_ascii_and_multibyte() {
    assert_eq!(decode_utf8(b"a", 0), Some((0x61, 1)));
    assert_eq!(decode_utf8("é".as_bytes(), 0), Some((0xe9, 2)));
    assert_eq!(decode_utf8("€".as_bytes(), 0), Some((0x20ac, 3)));
    assert_eq!(decode_utf8("\u{1f600}".as_bytes(), 0), Some((0x1f600, 4)));
}

#[test]
fn decode_rejects_malformed_input() {
    // Bare continuation byte.
    assert_eq!(decode_utf8(&[0x80], 0), None);
    // Truncated sequence.
    assert_eq!(decode_utf8(&[0xc3], 0), None);
    // Overlong encoding of '/'.
    assert_eq!(decode_utf8(&[0xc0, 0xaf], 0), None);
    // Encoded surrogate half.
    assert_eq!(decode_utf8(&[0xed, 0xa0, 0x80], 0), None);
    // Beyond U+10FFFF.
    assert_eq!(decode_utf8(&[0xf7, 0xbf, 0xbf, 0xbf], 0), None);
}

#[test]
fn encode_inverts_decode() {
    let mut buf = [0u8; 4];
    for cp in [0x61u32, 0xe9, 0x20ac, 0x1f600] {
        let n = encode_utf8(cp, &mut buf);
        assert_eq!(decode_utf8(&buf[..n], 0), Some((cp, n)));
    }
}

#[test]
fn last_utf8_finds_final_code_point() {
    let s = "aé€".as_bytes();
    assert_eq!(last_utf8(s, 0, s.len()), Some(3));
    assert_eq!(last_utf8(s, 0, 3), Some(1));
    assert_eq!(last_utf8(s, 0, 1), Some(0));
    assert_eq!(last_utf8(s, 0, 0), None);
}

#[test]
fn unit_and_surrogate_decoding() {
    assert_eq!(decode_unit(br"\u00e9", 0), Some(0xe9));
    assert_eq!(decode_unit(br"\uD83D", 0), Some(0xd83d));
    assert_eq!(decode_unit(br"\uxyzw", 0), None);
    assert_eq!(decode_unit(br"\n", 0), None);

    assert_eq!(decode_surrogate(0xd83d, 0xde00), Some(0x1f600));
    assert_eq!(decode_surrogate(0xde00, 0xd83d), None);
}

#[test]
fn whitespace_covers_unicode_property() {
    assert!(is_space(0x20));
    assert!(is_space(0x09));
    assert!(is_space(0xa0)); // NO-BREAK SPACE
    assert!(is_space(0x2028)); // LINE SEPARATOR
    assert!(!is_space(0x61));
}
