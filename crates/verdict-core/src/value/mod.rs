// SPDX-License-Identifier: Apache-2.0

//! Value representation for policy evaluation.
//!
//! A [`Value`] is a 32-bit handle to a cell in the linear heap. The cell
//! header decodes into [`Cell`], an enum with one payload struct per public
//! type. Composite payloads (string bytes, array slots, bucket arrays,
//! chain elements) are separate heap blocks referenced by address, so a
//! checkpoint restore reclaims entire trees at once.
//!
//! A storage-class flag marks interned cells whose backing store must never
//! be freed; they are observed as ordinary values of their type.


mod compare;
mod hash;
mod iter;
mod paths;

pub use iter::ValueIter;

use crate::error::abort;
use crate::heap::Heap;

// Cell tags. Cross-type ordering compares these numerically.
const TAG_NULL: u8 = 1;
const TAG_BOOLEAN: u8 = 2;
const TAG_NUMBER: u8 = 3;
const TAG_STRING: u8 = 4;
const TAG_ARRAY: u8 = 5;
const TAG_OBJECT: u8 = 6;
const TAG_SET: u8 = 7;

// Storage-class flags.
const FLAG_INTERNED: u8 = 1;
const FLAG_OWNED: u8 = 2;

// Number representations.
const REPR_INT: u8 = 1;
const REPR_REF: u8 = 2;

// Interned singletons written below the heap base.
const NULL_ADDR: u32 = 4;
const FALSE_ADDR: u32 = 8;
const TRUE_ADDR: u32 = 12;

/// Initial capacity of a growing array.
const ARRAY_INITIAL_CAP: u32 = 10;

/// Minimum bucket count of objects and sets.
const MIN_BUCKETS: u32 = 8;

/// Bucket chains double when the element count exceeds this share.
const LOAD_FACTOR: f64 = 0.7;

/// Handle to a heap cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Value(u32);

impl Value {
    /// Heap address of the cell.
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
}

/// Public type of a value. The discriminants define the cross-type order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Type {
    Null = TAG_NULL,
    Boolean = TAG_BOOLEAN,
    Number = TAG_NUMBER,
    String = TAG_STRING,
    Array = TAG_ARRAY,
    Object = TAG_OBJECT,
    Set = TAG_SET,
}

impl Type {
    /// Name used by error messages and the `type_name` builtin.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Set => "set",
        }
    }
}

/// A byte span in the heap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Span {
    pub addr: u32,
    pub len: u32,
}

/// Number payload: a 64-bit integer or a decimal string span.
#[derive(Clone, Copy, Debug)]
pub enum NumberRepr {
    Int(i64),
    Ref(Span),
}

/// Array header: `cap` slots of `{value, index-number}` pairs.
#[derive(Clone, Copy, Debug)]
pub struct ArrayHdr {
    pub elems: u32,
    pub len: u32,
    pub cap: u32,
}

/// Object/set header: `n` bucket slots holding sorted chains.
#[derive(Clone, Copy, Debug)]
pub struct MapHdr {
    pub buckets: u32,
    pub n: u32,
    pub len: u32,
}

/// Decoded cell header.
#[derive(Clone, Copy, Debug)]
pub enum Cell {
    Null,
    Boolean(bool),
    Number(NumberRepr),
    String(Span),
    Array(ArrayHdr),
    Object(MapHdr),
    Set(MapHdr),
}

/// Write the interned `null`, `false` and `true` singletons below the heap
/// base. Called once from `Heap::new`.
pub(crate) fn write_interned(heap: &mut Heap) {
    heap.set_u8(NULL_ADDR, TAG_NULL);
    heap.set_u8(NULL_ADDR + 1, FLAG_INTERNED);
    heap.set_u8(FALSE_ADDR, TAG_BOOLEAN);
    heap.set_u8(FALSE_ADDR + 1, FLAG_INTERNED);
    heap.set_u8(FALSE_ADDR + 2, 0);
    heap.set_u8(TRUE_ADDR, TAG_BOOLEAN);
    heap.set_u8(TRUE_ADDR + 1, FLAG_INTERNED);
    heap.set_u8(TRUE_ADDR + 2, 1);
}

impl Heap {
    // --- Constructors ---

    /// The interned null value.
    #[must_use]
    pub fn null(&self) -> Value {
        Value(NULL_ADDR)
    }

    /// An interned boolean.
    #[must_use]
    pub fn boolean(&self, v: bool) -> Value {
        Value(if v { TRUE_ADDR } else { FALSE_ADDR })
    }

    /// A number holding a 64-bit integer.
    pub fn number_int(&mut self, v: i64) -> Value {
        let cell = self.malloc(12);
        self.set_u8(cell, TAG_NUMBER);
        self.set_u8(cell + 1, 0);
        self.set_u8(cell + 2, REPR_INT);
        self.set_i64(cell + 4, v);
        Value(cell)
    }

    /// A number borrowing a decimal string already in the heap.
    pub fn number_ref(&mut self, span: Span) -> Value {
        let cell = self.malloc(12);
        self.set_u8(cell, TAG_NUMBER);
        self.set_u8(cell + 1, 0);
        self.set_u8(cell + 2, REPR_REF);
        self.set_u32(cell + 4, span.addr);
        self.set_u32(cell + 8, span.len);
        Value(cell)
    }

    /// A number owning a copy of a decimal byte string.
    pub fn number_raw(&mut self, bytes: &[u8]) -> Value {
        let data = self.malloc(bytes.len() as u32);
        self.write_bytes(data, bytes);
        let cell = self.malloc(12);
        self.set_u8(cell, TAG_NUMBER);
        self.set_u8(cell + 1, FLAG_OWNED);
        self.set_u8(cell + 2, REPR_REF);
        self.set_u32(cell + 4, data);
        self.set_u32(cell + 8, bytes.len() as u32);
        Value(cell)
    }

    /// A number owning a copy of a decimal string.
    pub fn number_str(&mut self, s: &str) -> Value {
        self.number_raw(s.as_bytes())
    }

    /// A string borrowing bytes already in the heap (e.g. parser input).
    pub fn string_ref(&mut self, span: Span) -> Value {
        let cell = self.malloc(12);
        self.set_u8(cell, TAG_STRING);
        self.set_u8(cell + 1, 0);
        self.set_u32(cell + 4, span.len);
        self.set_u32(cell + 8, span.addr);
        Value(cell)
    }

    /// A string owning a copy of the given bytes.
    pub fn string_raw(&mut self, bytes: &[u8]) -> Value {
        let data = self.malloc(bytes.len() as u32);
        self.write_bytes(data, bytes);
        let cell = self.malloc(12);
        self.set_u8(cell, TAG_STRING);
        self.set_u8(cell + 1, FLAG_OWNED);
        self.set_u32(cell + 4, bytes.len() as u32);
        self.set_u32(cell + 8, data);
        Value(cell)
    }

    /// A string owning a copy of `s`.
    pub fn string(&mut self, s: &str) -> Value {
        self.string_raw(s.as_bytes())
    }

    /// An empty array with no slot storage.
    pub fn array(&mut self) -> Value {
        self.array_with_cap(0)
    }

    /// An array with `cap` preallocated slots.
    pub fn array_with_cap(&mut self, cap: u32) -> Value {
        let elems = if cap == 0 { 0 } else { self.malloc(cap * 8) };
        let cell = self.malloc(16);
        self.set_u8(cell, TAG_ARRAY);
        self.set_u8(cell + 1, 0);
        self.set_u32(cell + 4, 0);
        self.set_u32(cell + 8, cap);
        self.set_u32(cell + 12, elems);
        Value(cell)
    }

    fn map_with_buckets(&mut self, tag: u8, n: u32) -> Value {
        let buckets = self.malloc(n * 4);
        for i in 0..n {
            self.set_u32(buckets + i * 4, 0);
        }
        let cell = self.malloc(16);
        self.set_u8(cell, tag);
        self.set_u8(cell + 1, 0);
        self.set_u32(cell + 4, 0);
        self.set_u32(cell + 8, n);
        self.set_u32(cell + 12, buckets);
        Value(cell)
    }

    /// An empty object.
    pub fn object(&mut self) -> Value {
        self.map_with_buckets(TAG_OBJECT, MIN_BUCKETS)
    }

    /// An empty set.
    pub fn set(&mut self) -> Value {
        self.map_with_buckets(TAG_SET, MIN_BUCKETS)
    }

    /// An empty set sized for `n` elements.
    pub fn set_with_cap(&mut self, n: u32) -> Value {
        let mut buckets = MIN_BUCKETS;
        while n as f64 > buckets as f64 * LOAD_FACTOR {
            buckets *= 2;
        }
        self.map_with_buckets(TAG_SET, buckets)
    }

    // --- Decoding ---

    /// Public type of a value.
    #[must_use]
    pub fn ty(&self, v: Value) -> Type {
        match self.u8_at(v.0) {
            TAG_NULL => Type::Null,
            TAG_BOOLEAN => Type::Boolean,
            TAG_NUMBER => Type::Number,
            TAG_STRING => Type::String,
            TAG_ARRAY => Type::Array,
            TAG_OBJECT => Type::Object,
            TAG_SET => Type::Set,
            _ => abort("value: illegal tag"),
        }
    }

    fn interned(&self, v: Value) -> bool {
        self.u8_at(v.0 + 1) & FLAG_INTERNED != 0
    }

    fn owned(&self, v: Value) -> bool {
        self.u8_at(v.0 + 1) & FLAG_OWNED != 0
    }

    /// Decode the cell header.
    #[must_use]
    pub fn load(&self, v: Value) -> Cell {
        let a = v.0;
        match self.u8_at(a) {
            TAG_NULL => Cell::Null,
            TAG_BOOLEAN => Cell::Boolean(self.u8_at(a + 2) != 0),
            TAG_NUMBER => match self.u8_at(a + 2) {
                REPR_INT => Cell::Number(NumberRepr::Int(self.i64_at(a + 4))),
                REPR_REF => Cell::Number(NumberRepr::Ref(Span {
                    addr: self.u32_at(a + 4),
                    len: self.u32_at(a + 8),
                })),
                _ => abort("value: illegal number repr"),
            },
            TAG_STRING => Cell::String(Span {
                addr: self.u32_at(a + 8),
                len: self.u32_at(a + 4),
            }),
            TAG_ARRAY => Cell::Array(ArrayHdr {
                len: self.u32_at(a + 4),
                cap: self.u32_at(a + 8),
                elems: self.u32_at(a + 12),
            }),
            TAG_OBJECT => Cell::Object(MapHdr {
                len: self.u32_at(a + 4),
                n: self.u32_at(a + 8),
                buckets: self.u32_at(a + 12),
            }),
            TAG_SET => Cell::Set(MapHdr {
                len: self.u32_at(a + 4),
                n: self.u32_at(a + 8),
                buckets: self.u32_at(a + 12),
            }),
            _ => abort("value: illegal tag"),
        }
    }

    /// Boolean payload; aborts on other types.
    #[must_use]
    pub fn bool_value(&self, v: Value) -> bool {
        match self.load(v) {
            Cell::Boolean(b) => b,
            _ => abort("value: not a boolean"),
        }
    }

    /// String bytes; aborts on other types.
    #[must_use]
    pub fn str_bytes(&self, v: Value) -> &[u8] {
        match self.load(v) {
            Cell::String(span) => self.bytes(span.addr, span.len),
            _ => abort("value: not a string"),
        }
    }

    /// String contents as UTF-8; aborts when the bytes are not valid.
    #[must_use]
    pub fn str_str(&self, v: Value) -> &str {
        match core::str::from_utf8(self.str_bytes(v)) {
            Ok(s) => s,
            Err(_) => abort("string: invalid unicode"),
        }
    }

    /// Integer payload of a number when exactly representable.
    #[must_use]
    pub fn number_try_int(&self, v: Value) -> Option<i64> {
        match self.load(v) {
            Cell::Number(NumberRepr::Int(i)) => Some(i),
            Cell::Number(NumberRepr::Ref(span)) => {
                parse_int(self.bytes(span.addr, span.len))
            }
            _ => None,
        }
    }

    /// Floating-point projection of a number; used for hashing.
    #[must_use]
    pub fn number_as_f64(&self, v: Value) -> f64 {
        match self.load(v) {
            Cell::Number(NumberRepr::Int(i)) => i as f64,
            Cell::Number(NumberRepr::Ref(span)) => {
                let bytes = self.bytes(span.addr, span.len);
                match core::str::from_utf8(bytes).ok().and_then(|s| s.parse().ok()) {
                    Some(f) => f,
                    None => abort("number: illegal ref"),
                }
            }
            _ => abort("value: not a number"),
        }
    }

    /// Decimal text of a number ref; `None` for integer representation.
    #[must_use]
    pub fn number_ref_str(&self, v: Value) -> Option<&str> {
        match self.load(v) {
            Cell::Number(NumberRepr::Ref(span)) => {
                core::str::from_utf8(self.bytes(span.addr, span.len)).ok()
            }
            _ => None,
        }
    }

    // --- Arrays ---

    /// Element count of an array.
    #[must_use]
    pub fn array_len(&self, arr: Value) -> u32 {
        match self.load(arr) {
            Cell::Array(hdr) => hdr.len,
            _ => abort("value: not an array"),
        }
    }

    /// Element at `i`, or `None` out of bounds.
    #[must_use]
    pub fn array_get(&self, arr: Value, i: u32) -> Option<Value> {
        match self.load(arr) {
            Cell::Array(hdr) if i < hdr.len => {
                Some(Value(self.u32_at(hdr.elems + i * 8)))
            }
            _ => None,
        }
    }

    /// Pre-built index number for slot `i`.
    #[must_use]
    pub fn array_index_value(&self, arr: Value, i: u32) -> Option<Value> {
        match self.load(arr) {
            Cell::Array(hdr) if i < hdr.len => {
                Some(Value(self.u32_at(hdr.elems + i * 8 + 4)))
            }
            _ => None,
        }
    }

    /// Append an element, growing the slot storage geometrically.
    pub fn array_append(&mut self, arr: Value, v: Value) {
        let Cell::Array(hdr) = self.load(arr) else {
            abort("value: not an array");
        };

        let mut hdr = hdr;
        if hdr.len >= hdr.cap {
            let new_cap = if hdr.cap == 0 { ARRAY_INITIAL_CAP } else { hdr.cap * 2 };
            let new_elems = self.malloc(new_cap * 8);
            if hdr.len > 0 {
                self.copy_bytes(hdr.elems, new_elems, hdr.len * 8);
            }
            if hdr.elems != 0 {
                self.free(hdr.elems);
            }
            hdr.elems = new_elems;
            hdr.cap = new_cap;
            self.set_u32(arr.0 + 8, new_cap);
            self.set_u32(arr.0 + 12, new_elems);
        }

        let idx = self.number_int(i64::from(hdr.len));
        self.set_u32(hdr.elems + hdr.len * 8, v.0);
        self.set_u32(hdr.elems + hdr.len * 8 + 4, idx.0);
        self.set_u32(arr.0 + 4, hdr.len + 1);
    }

    /// Overwrite the element in slot `i`; the index sidecar is untouched.
    pub fn array_set(&mut self, arr: Value, i: u32, v: Value) {
        let Cell::Array(hdr) = self.load(arr) else {
            abort("value: not an array");
        };
        if i >= hdr.len {
            abort("value: array index out of range");
        }
        self.set_u32(hdr.elems + i * 8, v.0);
    }

    /// Insertion sort of the elements under the given comparison.
    pub fn array_sort(&mut self, arr: Value) {
        let len = self.array_len(arr);
        let mut elems: Vec<Value> = (0..len)
            .map(|i| self.array_get(arr, i).unwrap_or_else(|| self.null()))
            .collect();

        for i in 1..elems.len() {
            let elem = elems[i];
            let mut j = i as isize - 1;
            while j >= 0 && self.compare(elems[j as usize], elem).is_gt() {
                elems[j as usize + 1] = elems[j as usize];
                j -= 1;
            }
            elems[(j + 1) as usize] = elem;
        }

        for (i, v) in elems.iter().enumerate() {
            self.array_set(arr, i as u32, *v);
        }
    }

    // --- Objects ---

    fn map_hdr(&self, v: Value) -> MapHdr {
        match self.load(v) {
            Cell::Object(hdr) | Cell::Set(hdr) => hdr,
            _ => abort("value: not an object or set"),
        }
    }

    fn bucket_head(&self, hdr: &MapHdr, i: u32) -> u32 {
        self.u32_at(hdr.buckets + i * 4)
    }

    /// Chain element for `key`, or 0.
    fn object_find(&self, obj: Value, key: Value) -> u32 {
        let hdr = self.map_hdr(obj);
        let i = self.hash(key) % hdr.n;
        let mut elem = self.bucket_head(&hdr, i);
        while elem != 0 {
            if self.compare(Value(self.u32_at(elem)), key).is_eq() {
                return elem;
            }
            elem = self.u32_at(elem + 8);
        }
        0
    }

    /// Value stored under `key` in an object.
    #[must_use]
    pub fn object_get(&self, obj: Value, key: Value) -> Option<Value> {
        let elem = self.object_find(obj, key);
        if elem == 0 {
            None
        } else {
            Some(Value(self.u32_at(elem + 4)))
        }
    }

    /// Insert or overwrite a key. Bucket chains stay sorted under the total
    /// order; the table doubles when the load factor exceeds 0.7.
    pub fn object_insert(&mut self, obj: Value, key: Value, value: Value) {
        let existing = self.object_find(obj, key);
        if existing != 0 {
            self.set_u32(existing + 4, value.0);
            return;
        }

        let hdr = self.map_hdr(obj);
        if (hdr.len + 1) as f64 > hdr.n as f64 * LOAD_FACTOR {
            self.object_grow(obj);
        }

        let elem = self.malloc(12);
        self.set_u32(elem, key.0);
        self.set_u32(elem + 4, value.0);
        self.set_u32(elem + 8, 0);
        self.object_link_elem(obj, elem);
        let hdr = self.map_hdr(obj);
        self.set_u32(obj.0 + 4, hdr.len + 1);
    }

    /// Link an element cell into its sorted bucket chain.
    fn object_link_elem(&mut self, obj: Value, elem: u32) {
        let hdr = self.map_hdr(obj);
        let key = Value(self.u32_at(elem));
        let i = self.hash(key) % hdr.n;

        let mut prev = 0u32;
        let mut cur = self.bucket_head(&hdr, i);
        while cur != 0 && self.compare(key, Value(self.u32_at(cur))).is_gt() {
            prev = cur;
            cur = self.u32_at(cur + 8);
        }

        self.set_u32(elem + 8, cur);
        if prev == 0 {
            self.set_u32(hdr.buckets + i * 4, elem);
        } else {
            self.set_u32(prev + 8, elem);
        }
    }

    fn object_grow(&mut self, obj: Value) {
        let hdr = self.map_hdr(obj);
        let mut elems = Vec::with_capacity(hdr.len as usize);
        for i in 0..hdr.n {
            let mut elem = self.bucket_head(&hdr, i);
            while elem != 0 {
                elems.push(elem);
                elem = self.u32_at(elem + 8);
            }
        }

        let n = hdr.n * 2;
        let buckets = self.malloc(n * 4);
        for i in 0..n {
            self.set_u32(buckets + i * 4, 0);
        }
        self.free(hdr.buckets);
        self.set_u32(obj.0 + 8, n);
        self.set_u32(obj.0 + 12, buckets);

        for elem in elems {
            self.set_u32(elem + 8, 0);
            self.object_link_elem(obj, elem);
        }
    }

    /// Remove a key, deep-freeing the stored key and value. Missing keys
    /// are considered removed.
    pub fn object_remove(&mut self, obj: Value, key: Value) {
        let hdr = self.map_hdr(obj);
        let i = self.hash(key) % hdr.n;

        let mut prev = 0u32;
        let mut cur = self.bucket_head(&hdr, i);
        while cur != 0 {
            let k = Value(self.u32_at(cur));
            if self.compare(k, key).is_eq() {
                let next = self.u32_at(cur + 8);
                if prev == 0 {
                    self.set_u32(hdr.buckets + i * 4, next);
                } else {
                    self.set_u32(prev + 8, next);
                }
                self.set_u32(obj.0 + 4, hdr.len - 1);
                let v = Value(self.u32_at(cur + 4));
                self.free_value(k);
                self.free_value(v);
                self.free(cur);
                return;
            }
            prev = cur;
            cur = self.u32_at(cur + 8);
        }
    }

    /// Keys of an object sorted under the total order.
    #[must_use]
    pub fn object_keys(&self, obj: Value) -> Vec<Value> {
        let hdr = self.map_hdr(obj);
        let mut keys = Vec::with_capacity(hdr.len as usize);
        for i in 0..hdr.n {
            let mut elem = self.bucket_head(&hdr, i);
            while elem != 0 {
                keys.push(Value(self.u32_at(elem)));
                elem = self.u32_at(elem + 8);
            }
        }
        keys.sort_by(|a, b| self.compare(*a, *b));
        keys
    }

    // --- Sets ---

    /// Chain element holding `v`, or 0.
    fn set_find(&self, set: Value, v: Value) -> u32 {
        let hdr = self.map_hdr(set);
        let i = self.hash(v) % hdr.n;
        let mut elem = self.bucket_head(&hdr, i);
        while elem != 0 {
            if self.compare(Value(self.u32_at(elem)), v).is_eq() {
                return elem;
            }
            elem = self.u32_at(elem + 4);
        }
        0
    }

    /// Membership lookup returning the stored element.
    #[must_use]
    pub fn set_get(&self, set: Value, v: Value) -> Option<Value> {
        let elem = self.set_find(set, v);
        if elem == 0 { None } else { Some(Value(self.u32_at(elem))) }
    }

    /// Add an element; duplicates are ignored.
    pub fn set_add(&mut self, set: Value, v: Value) {
        if self.set_find(set, v) != 0 {
            return;
        }

        let hdr = self.map_hdr(set);
        if (hdr.len + 1) as f64 > hdr.n as f64 * LOAD_FACTOR {
            self.set_grow(set);
        }

        let elem = self.malloc(8);
        self.set_u32(elem, v.0);
        self.set_u32(elem + 4, 0);
        self.set_link_elem(set, elem);
        let hdr = self.map_hdr(set);
        self.set_u32(set.0 + 4, hdr.len + 1);
    }

    fn set_link_elem(&mut self, set: Value, elem: u32) {
        let hdr = self.map_hdr(set);
        let v = Value(self.u32_at(elem));
        let i = self.hash(v) % hdr.n;

        let mut prev = 0u32;
        let mut cur = self.bucket_head(&hdr, i);
        while cur != 0 && self.compare(v, Value(self.u32_at(cur))).is_gt() {
            prev = cur;
            cur = self.u32_at(cur + 4);
        }

        self.set_u32(elem + 4, cur);
        if prev == 0 {
            self.set_u32(hdr.buckets + i * 4, elem);
        } else {
            self.set_u32(prev + 4, elem);
        }
    }

    fn set_grow(&mut self, set: Value) {
        let hdr = self.map_hdr(set);
        let mut elems = Vec::with_capacity(hdr.len as usize);
        for i in 0..hdr.n {
            let mut elem = self.bucket_head(&hdr, i);
            while elem != 0 {
                elems.push(elem);
                elem = self.u32_at(elem + 4);
            }
        }

        let n = hdr.n * 2;
        let buckets = self.malloc(n * 4);
        for i in 0..n {
            self.set_u32(buckets + i * 4, 0);
        }
        self.free(hdr.buckets);
        self.set_u32(set.0 + 8, n);
        self.set_u32(set.0 + 12, buckets);

        for elem in elems {
            self.set_u32(elem + 4, 0);
            self.set_link_elem(set, elem);
        }
    }

    /// Elements of a set sorted under the total order.
    #[must_use]
    pub fn set_values(&self, set: Value) -> Vec<Value> {
        let hdr = self.map_hdr(set);
        let mut values = Vec::with_capacity(hdr.len as usize);
        for i in 0..hdr.n {
            let mut elem = self.bucket_head(&hdr, i);
            while elem != 0 {
                values.push(Value(self.u32_at(elem)));
                elem = self.u32_at(elem + 4);
            }
        }
        values.sort_by(|a, b| self.compare(*a, *b));
        values
    }

    // --- Generic operations ---

    /// Container lookup: numeric index for arrays, hashed lookup for
    /// objects and sets. Anything else is absent.
    #[must_use]
    pub fn get(&self, v: Value, key: Value) -> Option<Value> {
        match self.ty(v) {
            Type::Array => {
                let i = self.number_try_int(key)?;
                if i < 0 {
                    return None;
                }
                self.array_get(v, u32::try_from(i).ok()?)
            }
            Type::Object => self.object_get(v, key),
            Type::Set => self.set_get(v, key),
            _ => None,
        }
    }

    /// Container size for composites, code-point count for strings, 0
    /// otherwise.
    #[must_use]
    pub fn length(&self, v: Value) -> u32 {
        match self.load(v) {
            Cell::Array(hdr) => hdr.len,
            Cell::Object(hdr) | Cell::Set(hdr) => hdr.len,
            Cell::String(span) => {
                let bytes = self.bytes(span.addr, span.len);
                let mut units = 0u32;
                let mut i = 0;
                while i < bytes.len() {
                    let Some((_, n)) = crate::unicode::decode_utf8(bytes, i) else {
                        abort("string: invalid unicode");
                    };
                    i += n;
                    units += 1;
                }
                units
            }
            _ => 0,
        }
    }

    // --- Deallocation ---

    /// Release the cell and any owned payload. Children stay live: the
    /// checkpoint discipline reclaims whole trees. Interned cells are
    /// skipped entirely.
    pub fn free_value(&mut self, v: Value) {
        self.free_value_with(v, false);
    }

    /// [`Heap::free_value`] with deferred block release.
    pub fn free_value_bulk(&mut self, v: Value) {
        self.free_value_with(v, true);
    }

    fn release(&mut self, addr: u32, bulk: bool) {
        if bulk {
            self.free_bulk(addr);
        } else {
            self.free(addr);
        }
    }

    fn free_value_with(&mut self, v: Value, bulk: bool) {
        if self.interned(v) {
            return;
        }
        match self.load(v) {
            Cell::Null | Cell::Boolean(_) => self.release(v.0, bulk),
            Cell::Number(repr) => {
                if let NumberRepr::Ref(span) = repr {
                    if self.owned(v) {
                        self.release(span.addr, bulk);
                    }
                }
                self.release(v.0, bulk);
            }
            Cell::String(span) => {
                if self.owned(v) {
                    self.release(span.addr, bulk);
                }
                self.release(v.0, bulk);
            }
            Cell::Array(hdr) => {
                for i in 0..hdr.len {
                    let idx = self.u32_at(hdr.elems + i * 8 + 4);
                    self.release(idx, bulk);
                }
                if hdr.elems != 0 {
                    self.release(hdr.elems, bulk);
                }
                self.release(v.0, bulk);
            }
            Cell::Object(hdr) => {
                for i in 0..hdr.n {
                    let mut elem = self.u32_at(hdr.buckets + i * 4);
                    while elem != 0 {
                        let next = self.u32_at(elem + 8);
                        self.release(elem, bulk);
                        elem = next;
                    }
                }
                self.release(hdr.buckets, bulk);
                self.release(v.0, bulk);
            }
            Cell::Set(hdr) => {
                for i in 0..hdr.n {
                    let mut elem = self.u32_at(hdr.buckets + i * 4);
                    while elem != 0 {
                        let next = self.u32_at(elem + 4);
                        self.release(elem, bulk);
                        elem = next;
                    }
                }
                self.release(hdr.buckets, bulk);
                self.release(v.0, bulk);
            }
        }
    }
}

/// Parse an optionally signed run of ASCII digits; `None` on any other
/// shape (fractions and exponents take the big-decimal path).
fn parse_int(bytes: &[u8]) -> Option<i64> {
    if bytes.is_empty() {
        return None;
    }
    let (neg, digits) = match bytes[0] {
        b'-' => (true, &bytes[1..]),
        _ => (false, bytes),
    };
    if digits.is_empty() {
        return None;
    }
    let mut n: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?;
        n = n.checked_add(i64::from(b - b'0'))?;
    }
    Some(if neg { -n } else { n })
}
