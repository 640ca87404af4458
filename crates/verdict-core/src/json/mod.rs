// SPDX-License-Identifier: Apache-2.0

//! JSON and extended-value serialization.
//!
//! The parser recursive-descends over the lexer's tokens and builds values
//! on the heap. Standard mode accepts RFC 8259; extended mode additionally
//! accepts `set( )` for the empty set, `{…}` with a non-key first element
//! as a set literal, and arbitrary values as object keys. The writer emits
//! the matching canonical forms.


mod lexer;
mod writer;

pub use lexer::{Lexer, Token};
pub use writer::{dump, dump_extended, dump_into_heap};

use core::fmt;

use crate::error::abort;
use crate::heap::Heap;
use crate::unicode;
use crate::value::{Span, Value};

/// Parse failure. The cursor is not reported; the host treats any failure
/// as a rejected document.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParseError {
    /// The lexer hit an invalid byte sequence.
    Lex,
    /// Token stream does not form a value.
    Syntax,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex => write!(f, "invalid input"),
            Self::Syntax => write!(f, "unexpected token"),
        }
    }
}

/// Parse standard JSON from a heap byte span.
pub fn parse_span(heap: &mut Heap, input: Span) -> Result<Value, ParseError> {
    parse_with(heap, input, false)
}

/// Parse extended values (set literals, any-value keys) from a heap span.
pub fn parse_span_extended(heap: &mut Heap, input: Span) -> Result<Value, ParseError> {
    parse_with(heap, input, true)
}

/// Copy `s` into the heap and parse it as standard JSON.
pub fn parse(heap: &mut Heap, s: &str) -> Result<Value, ParseError> {
    let span = stage(heap, s);
    parse_span(heap, span)
}

/// Copy `s` into the heap and parse it as an extended value.
pub fn parse_extended(heap: &mut Heap, s: &str) -> Result<Value, ParseError> {
    let span = stage(heap, s);
    parse_span_extended(heap, span)
}

fn stage(heap: &mut Heap, s: &str) -> Span {
    let addr = heap.malloc(s.len() as u32);
    heap.write_bytes(addr, s.as_bytes());
    Span { addr, len: s.len() as u32 }
}

fn parse_with(heap: &mut Heap, input: Span, extended: bool) -> Result<Value, ParseError> {
    let mut lexer = Lexer::new(input.addr, input.len, extended);
    let token = lexer.read(heap);
    parse_token(heap, &mut lexer, token, extended)
}

fn parse_token(
    heap: &mut Heap,
    lexer: &mut Lexer,
    token: Token,
    extended: bool,
) -> Result<Value, ParseError> {
    match token {
        Token::Null => Ok(heap.null()),
        Token::True => Ok(heap.boolean(true)),
        Token::False => Ok(heap.boolean(false)),
        Token::Number(span) => {
            let bytes = heap.bytes(span.addr, span.len).to_vec();
            Ok(heap.number_raw(&bytes))
        }
        Token::String(span) => {
            let bytes = heap.bytes(span.addr, span.len).to_vec();
            Ok(heap.string_raw(&bytes))
        }
        Token::StringEscaped(span) => parse_escaped_string(heap, span),
        Token::ArrayStart => parse_array(heap, lexer, extended),
        Token::ObjectStart => parse_object_or_set(heap, lexer, extended),
        Token::EmptySet => Ok(heap.set()),
        Token::Error => Err(ParseError::Lex),
        _ => Err(ParseError::Syntax),
    }
}

/// Decode a string containing escapes or non-ASCII bytes. The lexer has
/// already vetted escape shapes; invalid UTF-8 in the raw bytes aborts.
fn parse_escaped_string(heap: &mut Heap, span: Span) -> Result<Value, ParseError> {
    let bytes = heap.bytes(span.addr, span.len).to_vec();
    let mut out = Vec::with_capacity(bytes.len());
    let mut buf = [0u8; 4];

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];

        if b != b'\\' {
            if b < b' ' || b == b'"' {
                abort("json: illegal unescaped character");
            }
            if b < 0x80 {
                out.push(b);
                i += 1;
            } else {
                let Some((cp, n)) = unicode::decode_utf8(&bytes, i) else {
                    abort("json: illegal utf-8");
                };
                i += n;
                let n = unicode::encode_utf8(cp, &mut buf);
                out.extend_from_slice(&buf[..n]);
            }
            continue;
        }

        match bytes[i + 1] {
            b'"' | b'\\' | b'/' => {
                out.push(bytes[i + 1]);
                i += 2;
            }
            b'b' => {
                out.push(0x08);
                i += 2;
            }
            b'f' => {
                out.push(0x0c);
                i += 2;
            }
            b'n' => {
                out.push(b'\n');
                i += 2;
            }
            b'r' => {
                out.push(b'\r');
                i += 2;
            }
            b't' => {
                out.push(b'\t');
                i += 2;
            }
            b'u' => {
                // UTF-16: one unit, or a surrogate pair spanning two
                // consecutive escapes.
                let Some(unit) = unicode::decode_unit(&bytes, i) else {
                    abort("json: illegal string escape");
                };
                i += 6;
                let cp = if unicode::is_surrogate(unit) {
                    let Some(lo) = unicode::decode_unit(&bytes, i) else {
                        abort("json: illegal string escape");
                    };
                    i += 6;
                    match unicode::decode_surrogate(unit, lo) {
                        Some(cp) => cp,
                        None => abort("json: illegal surrogate pair"),
                    }
                } else {
                    unit
                };
                let n = unicode::encode_utf8(cp, &mut buf);
                out.extend_from_slice(&buf[..n]);
            }
            _ => abort("json: illegal string escape"),
        }
    }

    Ok(heap.string_raw(&out))
}

fn parse_array(
    heap: &mut Heap,
    lexer: &mut Lexer,
    extended: bool,
) -> Result<Value, ParseError> {
    let arr = heap.array();
    let mut sep = false;

    loop {
        let token = lexer.read(heap);

        match token {
            Token::ArrayEnd => return Ok(arr),
            Token::Comma if sep => {
                sep = false;
                continue;
            }
            _ => {}
        }

        let elem = parse_token(heap, lexer, token, extended)?;
        heap.array_append(arr, elem);
        sep = true;
    }
}

/// After `{`: an empty object, an object (first element followed by `:`),
/// or a set literal in extended mode.
fn parse_object_or_set(
    heap: &mut Heap,
    lexer: &mut Lexer,
    extended: bool,
) -> Result<Value, ParseError> {
    let token = lexer.read(heap);

    if token == Token::ObjectEnd {
        return Ok(heap.object());
    }

    let head = parse_token(heap, lexer, token, extended)?;

    match lexer.read(heap) {
        Token::Colon => parse_object(heap, lexer, head, extended),
        tok @ (Token::ObjectEnd | Token::Comma) if extended => {
            parse_set(heap, lexer, head, tok, extended)
        }
        _ => Err(ParseError::Syntax),
    }
}

fn parse_object(
    heap: &mut Heap,
    lexer: &mut Lexer,
    key: Value,
    extended: bool,
) -> Result<Value, ParseError> {
    let obj = heap.object();

    let token = lexer.read(heap);
    let val = parse_token(heap, lexer, token, extended)?;
    heap.object_insert(obj, key, val);

    loop {
        match lexer.read(heap) {
            Token::ObjectEnd => return Ok(obj),
            Token::Comma => {}
            _ => return Err(ParseError::Syntax),
        }

        let token = lexer.read(heap);
        let key = parse_token(heap, lexer, token, extended)?;

        if lexer.read(heap) != Token::Colon {
            return Err(ParseError::Syntax);
        }

        let token = lexer.read(heap);
        let val = parse_token(heap, lexer, token, extended)?;
        heap.object_insert(obj, key, val);
    }
}

fn parse_set(
    heap: &mut Heap,
    lexer: &mut Lexer,
    head: Value,
    token: Token,
    extended: bool,
) -> Result<Value, ParseError> {
    let set = heap.set();
    heap.set_add(set, head);

    if token == Token::ObjectEnd {
        return Ok(set);
    }

    loop {
        let token = lexer.read(heap);
        let elem = parse_token(heap, lexer, token, extended)?;
        heap.set_add(set, elem);

        match lexer.read(heap) {
            Token::ObjectEnd => return Ok(set),
            Token::Comma => {}
            _ => return Err(ParseError::Syntax),
        }
    }
}
