// SPDX-License-Identifier: Apache-2.0

//! Glob-to-regex compiler.
//!
//! Emits an anchored regex source string for a pattern tree. `?` compiles
//! to the single mark (`.` without delimiters, `[^<delims>]` with), `*` to
//! the single mark starred, `**` to `.*`, and alternation to a group.

use super::parser::Node;

/// Regex metacharacters escaped in literal text.
const SPECIAL: &str = ".,:\"=<>[]^\\{}|*+?";

/// Escape special regex characters in a literal.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Compile a pattern tree into an anchored regex source.
pub(crate) fn compile(root: &Node, single_mark: &str) -> String {
    let mut out = String::from("^");
    emit(root, single_mark, &mut out);
    out.push('$');
    out
}

fn emit(node: &Node, single_mark: &str, out: &mut String) {
    match node {
        Node::Pattern(children) => {
            for child in children {
                emit(child, single_mark, out);
            }
        }
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Any => {
            out.push_str(single_mark);
            out.push('*');
        }
        Node::Super => out.push_str(".*"),
        Node::Single => out.push_str(single_mark),
        Node::List { chars, negated } => {
            out.push('[');
            if *negated {
                out.push('^');
            }
            out.push_str(&escape(chars));
            out.push(']');
        }
        Node::Range { lo, hi, negated } => {
            out.push('[');
            if *negated {
                out.push('^');
            }
            out.push(*lo);
            out.push('-');
            out.push(*hi);
            out.push(']');
        }
        Node::AnyOf(alternatives) => {
            out.push('(');
            for (i, alt) in alternatives.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                emit(alt, single_mark, out);
            }
            out.push(')');
        }
    }
}
