// SPDX-License-Identifier: Apache-2.0

//! Container iteration.
//!
//! [`ValueIter`] is a stateful cursor: arrays walk their index sidecar,
//! objects and sets walk buckets in order and each bucket's sorted chain.
//! The order is a function of contents and bucket count only, never of
//! insertion history, so structurally equal composites iterate identically.
//!
//! [`Heap::iter_after`] is the `prev`-keyed variant kept for the compiler
//! ABI; it re-finds `prev` by hash and steps once.

use crate::heap::Heap;
use crate::value::{Cell, MapHdr, Type, Value};

enum State {
    Done,
    Array { arr: Value, next: u32 },
    Map { hdr: MapHdr, set: bool, bucket: u32, elem: u32 },
}

/// Cursor over the keys of a container: index numbers for arrays, keys for
/// objects, elements for sets.
pub struct ValueIter {
    state: State,
}

impl Heap {
    /// Start iterating `v`. Non-containers yield nothing.
    #[must_use]
    pub fn iter_value(&self, v: Value) -> ValueIter {
        let state = match self.load(v) {
            Cell::Array(_) => State::Array { arr: v, next: 0 },
            Cell::Object(hdr) => State::Map { hdr, set: false, bucket: 0, elem: 0 },
            Cell::Set(hdr) => State::Map { hdr, set: true, bucket: 0, elem: 0 },
            _ => State::Done,
        };
        ValueIter { state }
    }

    /// Advance the cursor, returning the next key.
    #[must_use]
    pub fn iter_next(&self, it: &mut ValueIter) -> Option<Value> {
        match &mut it.state {
            State::Done => None,
            State::Array { arr, next } => {
                let key = self.array_index_value(*arr, *next)?;
                *next += 1;
                Some(key)
            }
            State::Map { hdr, set, bucket, elem } => {
                let next_off = if *set { 4 } else { 8 };
                if *elem != 0 {
                    *elem = self.u32_at(*elem + next_off);
                }
                while *elem == 0 {
                    if *bucket >= hdr.n {
                        it.state = State::Done;
                        return None;
                    }
                    *elem = self.u32_at(hdr.buckets + *bucket * 4);
                    *bucket += 1;
                }
                Some(Value::from_addr(self.u32_at(*elem)))
            }
        }
    }

    /// Collect all keys of a container in iteration order.
    #[must_use]
    pub fn iter_keys(&self, v: Value) -> Vec<Value> {
        let mut it = self.iter_value(v);
        let mut keys = Vec::new();
        while let Some(k) = self.iter_next(&mut it) {
            keys.push(k);
        }
        keys
    }

    /// Key following `prev`, or the first key when `prev` is absent.
    /// Objects and sets locate `prev` with a hash-and-chain lookup.
    #[must_use]
    pub fn iter_after(&self, v: Value, prev: Option<Value>) -> Option<Value> {
        let Some(prev) = prev else {
            let mut it = self.iter_value(v);
            return self.iter_next(&mut it);
        };

        match self.ty(v) {
            Type::Array => {
                let i = self.number_try_int(prev)?;
                let next = u32::try_from(i.checked_add(1)?).ok()?;
                self.array_index_value(v, next)
            }
            Type::Object | Type::Set => {
                let (hdr, next_off) = match self.load(v) {
                    Cell::Object(hdr) => (hdr, 8),
                    Cell::Set(hdr) => (hdr, 4),
                    _ => return None,
                };
                let i = self.hash(prev) % hdr.n;
                let mut elem = self.u32_at(hdr.buckets + i * 4);
                while elem != 0 {
                    if self.compare(Value::from_addr(self.u32_at(elem)), prev).is_eq() {
                        break;
                    }
                    elem = self.u32_at(elem + next_off);
                }
                if elem == 0 {
                    return None;
                }
                let next = self.u32_at(elem + next_off);
                if next != 0 {
                    return Some(Value::from_addr(self.u32_at(next)));
                }
                // First element of the next non-empty bucket.
                for b in i + 1..hdr.n {
                    let head = self.u32_at(hdr.buckets + b * 4);
                    if head != 0 {
                        return Some(Value::from_addr(self.u32_at(head)));
                    }
                }
                None
            }
            _ => None,
        }
    }
}
