// SPDX-License-Identifier: Apache-2.0

//! Rule memoization.
//!
//! Generated code brackets memoized rule invocations with push/pop; each
//! frame maps integer rule ids to result values. Frames are heap objects,
//! so popping never frees anything: the heap checkpoint taken around the
//! whole evaluation reclaims the lot.

use crate::heap::Heap;
use crate::value::Value;

/// Stack of memoization frames.
#[derive(Default)]
pub struct Memoize {
    frames: Vec<Value>,
}

impl Memoize {
    /// Reset to a single empty frame.
    pub fn init(&mut self, heap: &mut Heap) {
        self.frames.clear();
        let table = heap.object();
        self.frames.push(table);
    }

    /// Open a nested frame.
    pub fn push(&mut self, heap: &mut Heap) {
        let table = heap.object();
        self.frames.push(table);
    }

    /// Drop the top frame.
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Record a result for `id` in the top frame.
    pub fn insert(&mut self, heap: &mut Heap, id: i32, v: Value) {
        let Some(table) = self.frames.last().copied() else {
            return;
        };
        let key = heap.number_int(i64::from(id));
        heap.object_insert(table, key, v);
    }

    /// Recall the result for `id` from the top frame.
    #[must_use]
    pub fn get(&self, heap: &mut Heap, id: i32) -> Option<Value> {
        let table = self.frames.last().copied()?;
        let key = heap.number_int(i64::from(id));
        heap.object_get(table, key)
    }
}
