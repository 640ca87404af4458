// SPDX-License-Identifier: Apache-2.0

//! Structural operations: merge, shallow copy, transitive closure and
//! in-place path mutation.

use crate::error::Errc;
use crate::heap::Heap;
use crate::value::{Cell, NumberRepr, Type, Value};

impl Heap {
    /// Recursive object union. Conflicting leaves keep `a`'s value;
    /// non-object inputs return `a` unchanged.
    pub fn merge(&mut self, a: Value, b: Value) -> Value {
        if self.ty(a) != Type::Object || self.ty(b) != Type::Object {
            return a;
        }

        let result = self.object();

        for key in self.object_keys(a) {
            let va = self.object_get(a, key).unwrap_or_else(|| self.null());
            match self.object_get(b, key) {
                None => self.object_insert(result, key, va),
                Some(vb) => {
                    let merged = self.merge(va, vb);
                    self.object_insert(result, key, merged);
                }
            }
        }

        for key in self.object_keys(b) {
            if self.object_get(a, key).is_none() {
                let vb = self.object_get(b, key).unwrap_or_else(|| self.null());
                self.object_insert(result, key, vb);
            }
        }

        result
    }

    /// Duplicate the header only; composites get fresh slot and bucket
    /// storage referencing the same children, strings and number refs
    /// reshare their byte payloads.
    pub fn shallow_copy(&mut self, v: Value) -> Value {
        if self.interned(v) {
            return v;
        }
        match self.load(v) {
            Cell::Null => v,
            Cell::Boolean(b) => self.boolean(b),
            Cell::Number(NumberRepr::Int(i)) => self.number_int(i),
            Cell::Number(NumberRepr::Ref(span)) => self.number_ref(span),
            Cell::String(span) => self.string_ref(span),
            Cell::Array(hdr) => {
                let copy = self.array_with_cap(hdr.cap.max(hdr.len));
                if hdr.len > 0 {
                    let dst = self.u32_at(copy.addr() + 12);
                    self.copy_bytes(hdr.elems, dst, hdr.len * 8);
                }
                self.set_u32(copy.addr() + 4, hdr.len);
                copy
            }
            Cell::Object(hdr) => {
                let copy = self.map_clone_buckets(Type::Object, hdr.n);
                let mut it = self.iter_value(v);
                while let Some(k) = self.iter_next(&mut it) {
                    let val = self.object_get(v, k).unwrap_or_else(|| self.null());
                    self.object_insert(copy, k, val);
                }
                copy
            }
            Cell::Set(hdr) => {
                let copy = self.map_clone_buckets(Type::Set, hdr.n);
                let mut it = self.iter_value(v);
                while let Some(e) = self.iter_next(&mut it) {
                    self.set_add(copy, e);
                }
                copy
            }
        }
    }

    fn map_clone_buckets(&mut self, ty: Type, n: u32) -> Value {
        let v = match ty {
            Type::Object => self.object(),
            _ => self.set(),
        };
        // Rebuild with the source bucket count so iteration order carries
        // over unchanged.
        let hdr = self.map_hdr(v);
        if hdr.n != n {
            let buckets = self.malloc(n * 4);
            for i in 0..n {
                self.set_u32(buckets + i * 4, 0);
            }
            self.free(hdr.buckets);
            self.set_u32(v.addr() + 8, n);
            self.set_u32(v.addr() + 12, buckets);
        }
        v
    }

    /// Emit `[path, subtree]` tuples for every node reached depth-first.
    pub fn transitive_closure(&mut self, v: Value) -> Value {
        let result = self.array();
        let path = self.array();
        self.closure_walk(result, path, v);
        result
    }

    fn closure_walk(&mut self, result: Value, path: Value, node: Value) {
        let tuple = self.array_with_cap(2);
        self.array_append(tuple, path);
        self.array_append(tuple, node);
        self.array_append(result, tuple);

        for key in self.iter_keys(node) {
            let extended = self.shallow_copy(path);
            self.array_append(extended, key);
            let child = self.get(node, key).unwrap_or_else(|| self.null());
            self.closure_walk(result, extended, child);
        }
    }

    /// Require an array of segments with all but the last being strings.
    fn validate_path(&self, path: Value) -> Option<u32> {
        if self.ty(path) != Type::Array {
            return None;
        }
        let len = self.array_len(path);
        if len == 0 {
            return None;
        }
        for i in 0..len - 1 {
            let seg = self.array_get(path, i)?;
            if self.ty(seg) != Type::String {
                return None;
            }
        }
        Some(len)
    }

    /// Set `v` at `path` inside `data`, creating intermediate objects.
    /// Replaced values are freed.
    pub fn add_path(&mut self, data: Value, path: Value, v: Value) -> Errc {
        let Some(len) = self.validate_path(path) else {
            return Errc::InvalidPath;
        };

        let mut curr = data;
        for i in 0..len - 1 {
            let k = self.array_get(path, i).unwrap_or_else(|| self.null());
            match self.get(curr, k) {
                Some(next) => curr = next,
                None => {
                    if self.ty(curr) != Type::Object {
                        return Errc::InvalidType;
                    }
                    let next = self.object();
                    self.object_insert(curr, k, next);
                    curr = next;
                }
            }
        }

        let k = self.array_get(path, len - 1).unwrap_or_else(|| self.null());
        if self.ty(curr) != Type::Object {
            return Errc::InvalidType;
        }
        let old = self.object_get(curr, k);
        self.object_insert(curr, k, v);
        if let Some(old) = old {
            if old != v {
                self.free_value(old);
            }
        }
        Errc::Ok
    }

    /// Delete the entry at `path` inside `data`. A path that cannot be
    /// followed counts as already deleted.
    pub fn remove_path(&mut self, data: Value, path: Value) -> Errc {
        let Some(len) = self.validate_path(path) else {
            return Errc::InvalidPath;
        };

        let mut curr = data;
        for i in 0..len - 1 {
            let k = self.array_get(path, i).unwrap_or_else(|| self.null());
            match self.get(curr, k) {
                Some(next) => curr = next,
                None => return Errc::Ok,
            }
        }

        if self.ty(curr) != Type::Object {
            return Errc::InvalidType;
        }
        let k = self.array_get(path, len - 1).unwrap_or_else(|| self.null());
        self.object_remove(curr, k);
        Errc::Ok
    }
}
