// SPDX-License-Identifier: Apache-2.0

//! Evaluation context.
//!
//! A heap-resident record of four words: input, data, result and the
//! entrypoint id. Compiler-generated code receives the context address,
//! reads input and data, and writes its result; the host reads the result
//! back after evaluation.

use crate::heap::Heap;
use crate::value::Value;

/// Handle to a context record in the heap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EvalCtx(u32);

impl EvalCtx {
    /// Allocate a context with no input, no data and entrypoint 0.
    pub fn new(heap: &mut Heap) -> Self {
        let addr = heap.malloc(16);
        for i in 0..4 {
            heap.set_u32(addr + i * 4, 0);
        }
        Self(addr)
    }

    /// Heap address of the record.
    #[inline]
    #[must_use]
    pub const fn addr(self) -> u32 {
        self.0
    }

    /// Reconstruct a handle from a heap address.
    #[inline]
    #[must_use]
    pub const fn from_addr(addr: u32) -> Self {
        Self(addr)
    }

    pub fn set_input(self, heap: &mut Heap, v: Value) {
        heap.set_u32(self.0, v.addr());
    }

    #[must_use]
    pub fn input(self, heap: &Heap) -> Option<Value> {
        nonzero(heap.u32_at(self.0))
    }

    pub fn set_data(self, heap: &mut Heap, v: Value) {
        heap.set_u32(self.0 + 4, v.addr());
    }

    #[must_use]
    pub fn data(self, heap: &Heap) -> Option<Value> {
        nonzero(heap.u32_at(self.0 + 4))
    }

    pub fn set_result(self, heap: &mut Heap, v: Value) {
        heap.set_u32(self.0 + 8, v.addr());
    }

    #[must_use]
    pub fn result(self, heap: &Heap) -> Option<Value> {
        nonzero(heap.u32_at(self.0 + 8))
    }

    pub fn set_entrypoint(self, heap: &mut Heap, entrypoint: i32) {
        heap.set_u32(self.0 + 12, entrypoint as u32);
    }

    #[must_use]
    pub fn entrypoint(self, heap: &Heap) -> i32 {
        heap.u32_at(self.0 + 12) as i32
    }
}

fn nonzero(addr: u32) -> Option<Value> {
    if addr == 0 { None } else { Some(Value::from_addr(addr)) }
}
