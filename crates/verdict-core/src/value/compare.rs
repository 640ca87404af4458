// SPDX-License-Identifier: Apache-2.0

//! Total order over values.
//!
//! Cross-type order follows the tag numbers (null < boolean < number <
//! string < array < object < set); intra-type order is structural. The
//! order is what bucket chains, sorting and the comparison builtins run on.

use core::cmp::Ordering;

use crate::error::abort;
use crate::heap::Heap;
use crate::num;
use crate::value::{Cell, Value};

impl Heap {
    /// Compare two values under the total order.
    #[must_use]
    pub fn compare(&self, a: Value, b: Value) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let ta = self.ty(a);
        let tb = self.ty(b);
        if ta != tb {
            return ta.cmp(&tb);
        }

        match (self.load(a), self.load(b)) {
            (Cell::Null, Cell::Null) => Ordering::Equal,
            (Cell::Boolean(x), Cell::Boolean(y)) => x.cmp(&y),
            (Cell::Number(_), Cell::Number(_)) => self.compare_numbers(a, b),
            (Cell::String(x), Cell::String(y)) => {
                self.bytes(x.addr, x.len).cmp(self.bytes(y.addr, y.len))
            }
            (Cell::Array(x), Cell::Array(y)) => {
                let min = x.len.min(y.len);
                for i in 0..min {
                    let e1 = Value::from_addr(self.u32_at(x.elems + i * 8));
                    let e2 = Value::from_addr(self.u32_at(y.elems + i * 8));
                    let cmp = self.compare(e1, e2);
                    if cmp.is_ne() {
                        return cmp;
                    }
                }
                x.len.cmp(&y.len)
            }
            (Cell::Object(_), Cell::Object(_)) => {
                let a_keys = self.object_keys(a);
                let b_keys = self.object_keys(b);
                for (ka, kb) in a_keys.iter().zip(b_keys.iter()) {
                    let cmp = self.compare(*ka, *kb);
                    if cmp.is_ne() {
                        return cmp;
                    }
                    let va = self.object_get(a, *ka).unwrap_or_else(|| self.null());
                    let vb = self.object_get(b, *kb).unwrap_or_else(|| self.null());
                    let cmp = self.compare(va, vb);
                    if cmp.is_ne() {
                        return cmp;
                    }
                }
                a_keys.len().cmp(&b_keys.len())
            }
            (Cell::Set(_), Cell::Set(_)) => {
                let va = self.set_values(a);
                let vb = self.set_values(b);
                for (x, y) in va.iter().zip(vb.iter()) {
                    let cmp = self.compare(*x, *y);
                    if cmp.is_ne() {
                        return cmp;
                    }
                }
                va.len().cmp(&vb.len())
            }
            _ => abort("value: illegal comparison"),
        }
    }

    /// Numeric comparison on the mathematical value: integer fast path
    /// first, big-decimal otherwise.
    fn compare_numbers(&self, a: Value, b: Value) -> Ordering {
        if let (Some(x), Some(y)) = (self.number_try_int(a), self.number_try_int(b)) {
            return x.cmp(&y);
        }

        let (Some(x), Some(y)) = (num::to_decimal(self, a), num::to_decimal(self, b))
        else {
            abort("value: number comparison");
        };
        x.cmp(&y)
    }

    /// Identity of the two trees under the total order.
    #[must_use]
    pub fn equal(&self, a: Value, b: Value) -> bool {
        self.compare(a, b).is_eq()
    }
}
