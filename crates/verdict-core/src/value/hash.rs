// SPDX-License-Identifier: Apache-2.0

//! Value hashing.
//!
//! FNV-1a-32 over the byte content. Numbers hash their floating-point
//! projection so that different representations of the same value collide
//! deliberately; composite values sum their element hashes, making the
//! hash independent of iteration order. Equal values hash equal.

use crate::heap::Heap;
use crate::value::{Cell, Value};

const FNV32_INIT: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

fn fnv1a32(mut hash: u32, data: &[u8]) -> u32 {
    for &b in data {
        hash = hash.wrapping_mul(FNV32_PRIME);
        hash ^= u32::from(b);
    }
    hash
}

impl Heap {
    /// Hash a value. Stable under equality: `compare(a, b) == Equal`
    /// implies `hash(a) == hash(b)`.
    #[must_use]
    pub fn hash(&self, v: Value) -> u32 {
        match self.load(v) {
            Cell::Null => 0,
            Cell::Boolean(b) => u32::from(!b),
            Cell::Number(_) => {
                let f = self.number_as_f64(v);
                fnv1a32(FNV32_INIT, &f.to_le_bytes())
            }
            Cell::String(span) => fnv1a32(FNV32_INIT, self.bytes(span.addr, span.len)),
            Cell::Array(hdr) => {
                let mut hash = 0u32;
                for i in 0..hdr.len {
                    let elem = Value::from_addr(self.u32_at(hdr.elems + i * 8));
                    hash = hash.wrapping_add(self.hash(elem));
                }
                hash
            }
            Cell::Object(hdr) => {
                let mut hash = 0u32;
                for i in 0..hdr.n {
                    let mut elem = self.u32_at(hdr.buckets + i * 4);
                    while elem != 0 {
                        let k = Value::from_addr(self.u32_at(elem));
                        let v = Value::from_addr(self.u32_at(elem + 4));
                        hash = hash.wrapping_add(self.hash(k));
                        hash = hash.wrapping_add(self.hash(v));
                        elem = self.u32_at(elem + 8);
                    }
                }
                hash
            }
            Cell::Set(hdr) => {
                let mut hash = 0u32;
                for i in 0..hdr.n {
                    let mut elem = self.u32_at(hdr.buckets + i * 4);
                    while elem != 0 {
                        let e = Value::from_addr(self.u32_at(elem));
                        hash = hash.wrapping_add(self.hash(e));
                        elem = self.u32_at(elem + 4);
                    }
                }
                hash
            }
        }
    }
}
