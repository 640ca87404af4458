// SPDX-License-Identifier: Apache-2.0

//! Module-wide instance state.
//!
//! One instance per module: the heap, the memoization stack, the builtin
//! mapping table and the builtin caches. A module instance is owned by a
//! single host thread during a call; the mutex only carries that
//! discipline into safe Rust, it is never contended.

use std::sync::{Mutex, PoisonError};

use verdict_builtins::BuiltinCache;
use verdict_core::{Heap, Mapping, Memoize};

/// The mutable state behind every export.
pub struct Instance {
    pub heap: Heap,
    pub memoize: Memoize,
    pub mapping: Mapping,
    pub cache: BuiltinCache,
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

impl Instance {
    #[must_use]
    pub fn new() -> Self {
        let mut heap = Heap::new();
        let mut memoize = Memoize::default();
        memoize.init(&mut heap);
        Self {
            heap,
            memoize,
            mapping: Mapping::default(),
            cache: BuiltinCache::new(),
        }
    }
}

static INSTANCE: Mutex<Option<Instance>> = Mutex::new(None);

/// Run `f` against the instance, creating it on first use.
pub fn with<R>(f: impl FnOnce(&mut Instance) -> R) -> R {
    let mut guard = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
    let instance = guard.get_or_insert_with(Instance::new);
    f(instance)
}
