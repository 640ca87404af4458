// SPDX-License-Identifier: Apache-2.0

//! C-ABI exports.
//!
//! Values, contexts and buffers cross this boundary as 32-bit offsets
//! into the module's heap region (`vd_heap_base` maps them to host
//! pointers). An address of 0 is the absent value. The export names are
//! contract with the policy compiler and the host loader.

use verdict_builtins::{
    aggregates, arithmetic, array, bits, cidr, comparisons, conversions, encoding,
    glob, graphs, numbers, object, regex, sets, strings, template, types,
};
use verdict_core::error::abort;
use verdict_core::{EvalCtx, Span, Value, json};

use crate::instance::{Instance, with};

#[inline]
fn val(addr: u32) -> Value {
    Value::from_addr(addr)
}

#[inline]
fn opt(addr: u32) -> Option<Value> {
    if addr == 0 { None } else { Some(Value::from_addr(addr)) }
}

#[inline]
fn ret(v: Option<Value>) -> u32 {
    v.map_or(0, Value::addr)
}

// --- Allocator ---

#[unsafe(no_mangle)]
pub extern "C" fn vd_malloc(size: u32) -> u32 {
    with(|inst| inst.heap.malloc(size))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_free(addr: u32) {
    with(|inst| inst.heap.free(addr));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_realloc(addr: u32, size: u32) -> u32 {
    with(|inst| inst.heap.realloc(addr, size))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_free_bulk(addr: u32) {
    with(|inst| inst.heap.free_bulk(addr));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_free_bulk_commit() {
    with(|inst| inst.heap.free_bulk_commit());
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_heap_ptr_get() -> u32 {
    with(|inst| inst.heap.ptr_get())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_heap_ptr_set(ptr: u32) {
    with(|inst| inst.heap.ptr_set(ptr));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_heap_blocks_stash() {
    with(|inst| inst.heap.blocks_stash());
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_heap_blocks_restore() {
    with(|inst| inst.heap.blocks_restore());
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_heap_stash_clear() {
    with(|inst| inst.heap.stash_clear());
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_heap_free_blocks() -> u32 {
    with(|inst| inst.heap.free_blocks() as u32)
}

/// Host pointer of heap offset 0, for translating returned addresses.
#[unsafe(no_mangle)]
pub extern "C" fn vd_heap_base() -> *const u8 {
    with(|inst| inst.heap.base_ptr())
}

// --- Value constructors and mutators (called from generated code) ---

#[unsafe(no_mangle)]
pub extern "C" fn vd_null() -> u32 {
    with(|inst| inst.heap.null().addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_boolean(v: u32) -> u32 {
    with(|inst| inst.heap.boolean(v != 0).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_number_int(v: i64) -> u32 {
    with(|inst| inst.heap.number_int(v).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_number_ref(addr: u32, len: u32) -> u32 {
    with(|inst| inst.heap.number_ref(Span { addr, len }).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_string(addr: u32, len: u32) -> u32 {
    with(|inst| inst.heap.string_ref(Span { addr, len }).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_array() -> u32 {
    with(|inst| inst.heap.array().addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_object() -> u32 {
    with(|inst| inst.heap.object().addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_set() -> u32 {
    with(|inst| inst.heap.set().addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_array_append(arr: u32, v: u32) {
    with(|inst| inst.heap.array_append(val(arr), val(v)));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_object_insert(obj: u32, k: u32, v: u32) {
    with(|inst| inst.heap.object_insert(val(obj), val(k), val(v)));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_set_add(set: u32, v: u32) {
    with(|inst| inst.heap.set_add(val(set), val(v)));
}

// --- Value operations ---

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_type(v: u32) -> u32 {
    with(|inst| inst.heap.ty(val(v)) as u32)
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_compare(a: u32, b: u32) -> i32 {
    with(|inst| match inst.heap.compare(val(a), val(b)) {
        core::cmp::Ordering::Less => -1,
        core::cmp::Ordering::Equal => 0,
        core::cmp::Ordering::Greater => 1,
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_hash(v: u32) -> u32 {
    with(|inst| inst.heap.hash(val(v)))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_get(v: u32, key: u32) -> u32 {
    with(|inst| ret(inst.heap.get(val(v), val(key))))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_iter(v: u32, prev: u32) -> u32 {
    with(|inst| ret(inst.heap.iter_after(val(v), opt(prev))))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_length(v: u32) -> u32 {
    with(|inst| inst.heap.length(val(v)))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_merge(a: u32, b: u32) -> u32 {
    with(|inst| inst.heap.merge(val(a), val(b)).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_shallow_copy(v: u32) -> u32 {
    with(|inst| inst.heap.shallow_copy(val(v)).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_transitive_closure(v: u32) -> u32 {
    with(|inst| inst.heap.transitive_closure(val(v)).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_free(v: u32) {
    with(|inst| inst.heap.free_value(val(v)));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_add_path(data: u32, path: u32, v: u32) -> i32 {
    with(|inst| inst.heap.add_path(val(data), val(path), val(v)) as i32)
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_remove_path(data: u32, path: u32) -> i32 {
    with(|inst| inst.heap.remove_path(val(data), val(path)) as i32)
}

// --- Serialization ---

#[unsafe(no_mangle)]
pub extern "C" fn vd_json_parse(addr: u32, len: u32) -> u32 {
    with(|inst| {
        match json::parse_span(&mut inst.heap, Span { addr, len }) {
            Ok(v) => v.addr(),
            Err(err) => {
                log::debug!("json parse failed: {err}");
                0
            }
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_parse(addr: u32, len: u32) -> u32 {
    with(|inst| {
        match json::parse_span_extended(&mut inst.heap, Span { addr, len }) {
            Ok(v) => v.addr(),
            Err(err) => {
                log::debug!("value parse failed: {err}");
                0
            }
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_json_dump(v: u32) -> u32 {
    with(|inst| json::dump_into_heap(&mut inst.heap, val(v), false))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_value_dump(v: u32) -> u32 {
    with(|inst| json::dump_into_heap(&mut inst.heap, val(v), true))
}

// --- Evaluation context ---

#[unsafe(no_mangle)]
pub extern "C" fn vd_eval_ctx_new() -> u32 {
    with(|inst| EvalCtx::new(&mut inst.heap).addr())
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_eval_ctx_set_input(ctx: u32, v: u32) {
    with(|inst| EvalCtx::from_addr(ctx).set_input(&mut inst.heap, val(v)));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_eval_ctx_set_data(ctx: u32, v: u32) {
    with(|inst| EvalCtx::from_addr(ctx).set_data(&mut inst.heap, val(v)));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_eval_ctx_set_entrypoint(ctx: u32, entrypoint: i32) {
    with(|inst| EvalCtx::from_addr(ctx).set_entrypoint(&mut inst.heap, entrypoint));
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_eval_ctx_get_result(ctx: u32) -> u32 {
    with(|inst| ret(EvalCtx::from_addr(ctx).result(&inst.heap)))
}

/// Placeholder evaluator. The policy compiler replaces this function in
/// the emitted module with generated rule code.
#[unsafe(no_mangle)]
pub extern "C" fn eval(_ctx: u32) -> i32 {
    0
}

/// One-shot evaluation entry: restore the heap checkpoint, parse the
/// input, run `eval` and dump the result as a NUL-terminated string.
#[unsafe(no_mangle)]
pub extern "C" fn vd_eval(
    reserved: u32,
    entrypoint: i32,
    data: u32,
    input: u32,
    input_len: u32,
    heap_ptr: u32,
    want_value: u32,
) -> u32 {
    if reserved != 0 {
        abort("invalid reserved argument");
    }

    let ctx = with(|inst| {
        inst.heap.ptr_set(heap_ptr);
        inst.memoize.init(&mut inst.heap);
        log::debug!("eval: entrypoint {entrypoint}, {input_len} input bytes");

        let ctx = EvalCtx::new(&mut inst.heap);
        ctx.set_entrypoint(&mut inst.heap, entrypoint);
        if let Some(data) = opt(data) {
            ctx.set_data(&mut inst.heap, data);
        }
        if input != 0 {
            let span = Span { addr: input, len: input_len };
            match json::parse_span_extended(&mut inst.heap, span) {
                Ok(v) => ctx.set_input(&mut inst.heap, v),
                Err(_) => abort("eval: input parse failed"),
            }
        }
        ctx
    });

    // The generated evaluator re-enters the exports; the instance lock is
    // not held across the call.
    if eval(ctx.addr()) != 0 {
        abort("eval failed");
    }

    with(|inst| {
        let result = EvalCtx::from_addr(ctx.addr())
            .result(&inst.heap)
            .unwrap_or_else(|| inst.heap.null());
        json::dump_into_heap(&mut inst.heap, result, want_value != 0)
    })
}

/// Formatted runtime failure raised by generated code: traps with
/// `loc:row:col: msg`. Both strings are NUL-terminated heap buffers.
#[unsafe(no_mangle)]
pub extern "C" fn vd_runtime_error(loc: u32, row: u32, col: u32, msg: u32) -> ! {
    let (loc, msg) = with(|inst| (read_cstr(&inst.heap, loc), read_cstr(&inst.heap, msg)));
    verdict_core::error::runtime_error(&loc, row, col, &msg)
}

fn read_cstr(heap: &verdict_core::Heap, addr: u32) -> String {
    let mut out = Vec::new();
    let mut i = addr;
    loop {
        let b = heap.bytes(i, 1)[0];
        if b == 0 {
            break;
        }
        out.push(b);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

// --- Mapping and memoization hooks ---

#[unsafe(no_mangle)]
pub extern "C" fn vd_mapping_init(addr: u32, len: u32) {
    with(|inst| {
        let Instance { heap, mapping, .. } = inst;
        mapping.init(heap, Span { addr, len });
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_mapping_lookup(path: u32) -> i32 {
    with(|inst| inst.mapping.lookup(&inst.heap, val(path)))
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_memoize_init() {
    with(|inst| {
        let Instance { heap, memoize, .. } = inst;
        memoize.init(heap);
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_memoize_push() {
    with(|inst| {
        let Instance { heap, memoize, .. } = inst;
        memoize.push(heap);
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_memoize_pop() {
    with(|inst| inst.memoize.pop());
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_memoize_insert(id: i32, v: u32) {
    with(|inst| {
        let Instance { heap, memoize, .. } = inst;
        memoize.insert(heap, id, val(v));
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_memoize_get(id: i32) -> u32 {
    with(|inst| {
        let Instance { heap, memoize, .. } = inst;
        ret(memoize.get(heap, id))
    })
}

// --- Host builtin dispatch (bodies supplied by the compiler) ---

#[unsafe(no_mangle)]
pub extern "C" fn vd_builtin0(_id: i32, _ctx: u32) -> u32 {
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_builtin1(_id: i32, _ctx: u32, _a: u32) -> u32 {
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_builtin2(_id: i32, _ctx: u32, _a: u32, _b: u32) -> u32 {
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_builtin3(_id: i32, _ctx: u32, _a: u32, _b: u32, _c: u32) -> u32 {
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_builtin4(_id: i32, _ctx: u32, _a: u32, _b: u32, _c: u32, _d: u32) -> u32 {
    0
}

// --- Builtin library exports ---

macro_rules! export1 {
    ($(($name:ident, $func:path)),+ $(,)?) => {$(
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(a: u32) -> u32 {
            with(|inst| ret($func(&mut inst.heap, val(a))))
        }
    )+};
}

macro_rules! export2 {
    ($(($name:ident, $func:path)),+ $(,)?) => {$(
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(a: u32, b: u32) -> u32 {
            with(|inst| ret($func(&mut inst.heap, val(a), val(b))))
        }
    )+};
}

macro_rules! export3 {
    ($(($name:ident, $func:path)),+ $(,)?) => {$(
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(a: u32, b: u32, c: u32) -> u32 {
            with(|inst| ret($func(&mut inst.heap, val(a), val(b), val(c))))
        }
    )+};
}

export1![
    (vd_agg_count, aggregates::count),
    (vd_agg_sum, aggregates::sum),
    (vd_agg_product, aggregates::product),
    (vd_agg_max, aggregates::max),
    (vd_agg_min, aggregates::min),
    (vd_agg_sort, aggregates::sort),
    (vd_agg_all, aggregates::all),
    (vd_agg_any, aggregates::any),
    (vd_arith_abs, arithmetic::abs),
    (vd_arith_round, arithmetic::round),
    (vd_arith_ceil, arithmetic::ceil),
    (vd_arith_floor, arithmetic::floor),
    (vd_arith_neg, arithmetic::neg),
    (vd_bits_negate, bits::negate),
    (vd_to_number, conversions::to_number),
    (vd_types_is_number, types::is_number),
    (vd_types_is_string, types::is_string),
    (vd_types_is_boolean, types::is_boolean),
    (vd_types_is_array, types::is_array),
    (vd_types_is_set, types::is_set),
    (vd_types_is_object, types::is_object),
    (vd_types_is_null, types::is_null),
    (vd_types_name, types::name),
    (vd_strings_reverse, strings::reverse),
    (vd_strings_trim_space, strings::trim_space),
    (vd_strings_lower, strings::lower),
    (vd_strings_upper, strings::upper),
    (vd_array_reverse, array::reverse),
    (vd_sets_intersection, sets::intersection_of),
    (vd_sets_union, sets::union_of),
    (vd_object_keys, object::keys),
    (vd_base64_encode, encoding::base64_encode),
    (vd_base64_decode, encoding::base64_decode),
    (vd_base64_is_valid, encoding::base64_is_valid),
    (vd_base64_url_encode, encoding::base64_url_encode),
    (vd_base64_url_decode, encoding::base64_url_decode),
    (vd_json_marshal, encoding::json_marshal),
    (vd_json_unmarshal, encoding::json_unmarshal),
    (vd_json_is_valid, encoding::json_is_valid),
    (vd_regex_is_valid, regex::is_valid),
    (vd_template_string, template::template_string),
];

export2![
    (vd_arith_plus, arithmetic::plus),
    (vd_arith_minus, arithmetic::minus),
    (vd_arith_multiply, arithmetic::multiply),
    (vd_arith_divide, arithmetic::divide),
    (vd_arith_rem, arithmetic::rem),
    (vd_bits_or, bits::or),
    (vd_bits_and, bits::and),
    (vd_bits_xor, bits::xor),
    (vd_bits_shiftleft, bits::shiftleft),
    (vd_bits_shiftright, bits::shiftright),
    (vd_numbers_range, numbers::range),
    (vd_cmp_eq, comparisons::eq),
    (vd_cmp_neq, comparisons::neq),
    (vd_cmp_lt, comparisons::lt),
    (vd_cmp_lte, comparisons::lte),
    (vd_cmp_gt, comparisons::gt),
    (vd_cmp_gte, comparisons::gte),
    (vd_strings_concat, strings::concat),
    (vd_strings_contains, strings::contains),
    (vd_strings_startswith, strings::startswith),
    (vd_strings_endswith, strings::endswith),
    (vd_strings_any_prefix_match, strings::any_prefix_match),
    (vd_strings_any_suffix_match, strings::any_suffix_match),
    (vd_strings_indexof, strings::indexof),
    (vd_strings_replace_n, strings::replace_n),
    (vd_strings_split, strings::split),
    (vd_strings_trim, strings::trim),
    (vd_strings_trim_left, strings::trim_left),
    (vd_strings_trim_right, strings::trim_right),
    (vd_strings_trim_prefix, strings::trim_prefix),
    (vd_strings_trim_suffix, strings::trim_suffix),
    (vd_strings_format_int, strings::format_int),
    (vd_array_concat, array::concat),
    (vd_set_diff, sets::diff),
    (vd_set_intersection, sets::intersection),
    (vd_set_union, sets::union),
    (vd_object_filter, object::filter),
    (vd_object_remove, object::remove),
    (vd_object_union, object::union),
    (vd_json_remove, object::json_remove),
    (vd_json_filter, object::json_filter),
    (vd_graph_reachable, graphs::reachable),
    (vd_cidr_contains, cidr::contains),
    (vd_cidr_intersects, cidr::intersects),
];

export3![
    (vd_strings_replace, strings::replace),
    (vd_strings_substring, strings::substring),
    (vd_array_slice, array::slice),
    (vd_object_get, object::get),
];

#[unsafe(no_mangle)]
pub extern "C" fn vd_regex_match(pattern: u32, value: u32) -> u32 {
    with(|inst| {
        let Instance { heap, cache, .. } = inst;
        ret(regex::is_match(heap, cache, val(pattern), val(value)))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_regex_find_all_string_submatch(
    pattern: u32,
    value: u32,
    number: u32,
) -> u32 {
    with(|inst| {
        let Instance { heap, cache, .. } = inst;
        ret(regex::find_all_string_submatch(
            heap,
            cache,
            val(pattern),
            val(value),
            val(number),
        ))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn vd_glob_match(pattern: u32, delimiters: u32, value: u32) -> u32 {
    with(|inst| {
        let Instance { heap, cache, .. } = inst;
        ret(glob::glob_match(heap, cache, val(pattern), val(delimiters), val(value)))
    })
}
