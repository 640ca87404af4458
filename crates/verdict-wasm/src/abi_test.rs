// SPDX-License-Identifier: Apache-2.0

//! End-to-end exercise of the export surface.
//!
//! The exports share one process-wide instance, so everything runs in a
//! single test to keep the call sequence deterministic.

use crate::abi::*;
use crate::instance::with;

fn stage(text: &str) -> (u32, u32) {
    let addr = vd_malloc(text.len() as u32);
    with(|inst| inst.heap.write_bytes(addr, text.as_bytes()));
    (addr, text.len() as u32)
}

fn read_cstr(addr: u32) -> String {
    with(|inst| {
        let mut out = Vec::new();
        let mut i = addr;
        loop {
            let b = inst.heap.bytes(i, 1)[0];
            if b == 0 {
                break;
            }
            out.push(b);
            i += 1;
        }
        String::from_utf8(out).unwrap_or_default()
    })
}

#[test]
fn export_surface_roundtrip() {
    // Parse, inspect and dump through the ABI. The keys are picked so
    // that bucket order matches the written order.
    let (addr, len) = stage(r#"{"b":[1,2],"x":"y"}"#);
    let v = vd_json_parse(addr, len);
    assert_ne!(v, 0);
    assert_eq!(vd_value_type(v), 6); // object tag
    assert_eq!(vd_value_length(v), 2);

    let dumped = vd_json_dump(v);
    assert_eq!(read_cstr(dumped), r#"{"b":[1,2],"x":"y"}"#);

    // Lookup through the generic getter.
    let (kaddr, klen) = stage("\"b\"");
    let key = vd_json_parse(kaddr, klen);
    let arr = vd_value_get(v, key);
    assert_ne!(arr, 0);
    assert_eq!(vd_value_type(arr), 5); // array tag
    assert_eq!(vd_value_length(arr), 2);

    // Iteration by previous key covers the whole array.
    let first = vd_value_iter(arr, 0);
    assert_ne!(first, 0);
    let second = vd_value_iter(arr, first);
    assert_ne!(second, 0);
    assert_eq!(vd_value_iter(arr, second), 0);

    // Builtin dispatch over the same values.
    let total = vd_agg_sum(arr);
    let three = vd_number_int(3);
    assert_eq!(vd_value_compare(total, three), 0);

    // Extended parse and dump.
    let (saddr, slen) = stage("{1,2}");
    let set = vd_value_parse(saddr, slen);
    assert_ne!(set, 0);
    assert_eq!(vd_value_type(set), 7); // set tag
    assert_eq!(read_cstr(vd_value_dump(set)), "{1,2}");
    assert_eq!(read_cstr(vd_json_dump(set)), "[1,2]");

    let (eaddr, elen) = stage("set( )");
    let empty = vd_value_parse(eaddr, elen);
    assert_eq!(read_cstr(vd_value_dump(empty)), "set()");

    // Parse errors surface as the absent address.
    let (baddr, blen) = stage("{1,2}");
    assert_eq!(vd_json_parse(baddr, blen), 0);

    // Path mutation with error codes.
    let data = vd_object();
    let (paddr, plen) = stage(r#"["users","alice"]"#);
    let path = vd_json_parse(paddr, plen);
    let flag = vd_boolean(1);
    assert_eq!(vd_value_add_path(data, path, flag), 0);
    let nested = vd_value_get(data, vd_value_iter(data, 0));
    assert_ne!(nested, 0);
    assert_eq!(vd_value_remove_path(data, path), 0);
    let (bad, badlen) = stage("[]");
    let bad_path = vd_json_parse(bad, badlen);
    assert_eq!(vd_value_add_path(data, bad_path, flag), 3); // invalid path

    // Memoization hooks.
    vd_memoize_init();
    vd_memoize_insert(7, three);
    assert_eq!(vd_memoize_get(7), three);
    vd_memoize_push();
    assert_eq!(vd_memoize_get(7), 0);
    vd_memoize_pop();
    assert_eq!(vd_memoize_get(7), three);

    // Mapping table lookup.
    let (maddr, mlen) = stage(r#"{"count":{"plus":4}}"#);
    vd_mapping_init(maddr, mlen);
    let (qaddr, qlen) = stage(r#"["count","plus"]"#);
    let query = vd_json_parse(qaddr, qlen);
    assert_eq!(vd_mapping_lookup(query), 4);
    let (xaddr, xlen) = stage(r#"["nope"]"#);
    let missing = vd_json_parse(xaddr, xlen);
    assert_eq!(vd_mapping_lookup(missing), 0);

    // The one-shot eval entry: the placeholder evaluator leaves no
    // result, so the dump is null, but the input parsed and the heap
    // checkpoint was honoured. The checkpoint sits above the staged
    // input so evaluation allocations cannot clobber it.
    let (iaddr, ilen) = stage(r#"{"user":"alice"}"#);
    let checkpoint = vd_heap_ptr_get();
    let out = vd_eval(0, 0, 0, iaddr, ilen, checkpoint, 0);
    assert_eq!(read_cstr(out), "null");

    // Heap checkpoint discipline: free lists reset with the pointer.
    let checkpoint = vd_heap_ptr_get();
    let p = vd_malloc(512);
    vd_free(p);
    assert!(vd_heap_free_blocks() > 0);
    vd_heap_ptr_set(checkpoint);
    assert_eq!(vd_heap_free_blocks(), 0);

    // Stash survives a checkpoint cycle.
    let q = vd_malloc(16);
    vd_free(q);
    vd_heap_blocks_stash();
    assert_eq!(vd_heap_free_blocks(), 0);
    vd_heap_blocks_restore();
    assert_eq!(vd_heap_free_blocks(), 1);
    vd_heap_ptr_set(checkpoint);
}
