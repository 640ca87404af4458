// SPDX-License-Identifier: Apache-2.0

//! Builtin-local caches.
//!
//! Regex compilation and glob translation are cached unbounded for the
//! lifetime of the module instance. The caches live outside the value
//! heap, so checkpoint restores do not invalidate them.

use std::collections::HashMap;

use ::regex::Regex;

/// Per-instance caches threaded into the builtins that need them.
#[derive(Default)]
pub struct BuiltinCache {
    /// Compiled regexes keyed by pattern source.
    pub(crate) regex: HashMap<String, Regex>,
    /// Translated glob patterns keyed by `(pattern, delimiters)`.
    pub(crate) glob: HashMap<(String, Vec<String>), String>,
}

impl BuiltinCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or compile a regex. `None` when the pattern is invalid.
    pub(crate) fn compile(&mut self, pattern: &str) -> Option<&Regex> {
        if !self.regex.contains_key(pattern) {
            let re = Regex::new(pattern).ok()?;
            log::debug!("regex cache: compiled {pattern:?}");
            self.regex.insert(pattern.to_string(), re);
        }
        self.regex.get(pattern)
    }
}
