// SPDX-License-Identifier: Apache-2.0

//! Glob matching.
//!
//! Patterns compile in three stages (lexer, parser, regex compiler) and
//! the translated source is cached keyed by `(pattern, delimiters)`. The
//! compiled regex then goes through the shared regex cache like any other
//! pattern.

#[cfg(test)]
mod glob_test;

mod compiler;
mod lexer;
mod parser;

pub use parser::GlobError;

use verdict_core::{Heap, Type, Value};

use crate::cache::BuiltinCache;

/// Translate a glob pattern into an anchored regex source. Delimiters
/// must each be a single code point; an empty list means any character
/// can fill a `?`.
pub fn translate(pattern: &str, delimiters: &[String]) -> Result<String, GlobError> {
    let root = parser::parse(lexer::tokenize(pattern))?;

    let single_mark = if delimiters.is_empty() {
        String::from(".")
    } else {
        let mut mark = String::from("[^");
        for d in delimiters {
            if d.chars().count() != 1 {
                return Err(GlobError("delimiter is not a single character"));
            }
            mark.push_str(&compiler::escape(d));
        }
        mark.push(']');
        mark
    };

    Ok(compiler::compile(&root, &single_mark))
}

/// `glob.match(pattern, delimiters, value)`.
pub fn glob_match(
    heap: &mut Heap,
    cache: &mut BuiltinCache,
    pattern: Value,
    delimiters: Value,
    value: Value,
) -> Option<Value> {
    if heap.ty(pattern) != Type::String
        || heap.ty(delimiters) != Type::Array
        || heap.ty(value) != Type::String
    {
        return None;
    }

    let mut delims = Vec::with_capacity(heap.array_len(delimiters) as usize);
    for i in 0..heap.array_len(delimiters) {
        let d = heap.array_get(delimiters, i)?;
        if heap.ty(d) != Type::String {
            return None;
        }
        delims.push(heap.str_str(d).to_string());
    }

    let pat = heap.str_str(pattern).to_string();
    let key = (pat, delims);

    let source = match cache.glob.get(&key) {
        Some(source) => source.clone(),
        None => {
            let source = translate(&key.0, &key.1).ok()?;
            log::debug!("glob cache: translated {:?} -> {source:?}", key.0);
            cache.glob.insert(key, source.clone());
            source
        }
    };

    let text = heap.str_str(value).to_string();
    let re = cache.compile(&source)?;
    let matched = re.is_match(&text);
    Some(heap.boolean(matched))
}
