// SPDX-License-Identifier: Apache-2.0

//! Conversion builtins.

use verdict_core::json::{Lexer, Token};
use verdict_core::{Cell, Heap, Type, Value};

/// Coerce to a number: null is 0, booleans are 0/1, numbers pass through,
/// strings parse under the JSON number grammar. Everything else is absent.
pub fn to_number(heap: &mut Heap, v: Value) -> Option<Value> {
    match heap.load(v) {
        Cell::Null => Some(heap.number_int(0)),
        Cell::Boolean(b) => Some(heap.number_int(i64::from(b))),
        Cell::String(span) => {
            // Lex the string in place; it must be exactly one number token.
            let mut lexer = Lexer::new(span.addr, span.len, false);
            let Token::Number(num_span) = lexer.read(heap) else {
                return None;
            };
            if lexer.read(heap) != Token::Eof {
                return None;
            }
            let bytes = heap.bytes(num_span.addr, num_span.len).to_vec();
            Some(heap.number_raw(&bytes))
        }
        _ if heap.ty(v) == Type::Number => Some(v),
        _ => None,
    }
}
