// SPDX-License-Identifier: Apache-2.0

//! Graph builtins.

use verdict_core::{Heap, Type, Value};

use crate::collection_elements;

/// Nodes reachable from `initial` through `graph`, an object mapping each
/// node to its neighbours (an array or set). The result is the set of
/// nodes that were expanded.
pub fn reachable(heap: &mut Heap, graph: Value, initial: Value) -> Option<Value> {
    if heap.ty(graph) != Type::Object {
        return None;
    }
    if heap.ty(initial) != Type::Array && heap.ty(initial) != Type::Set {
        return None;
    }

    let mut queue = collection_elements(heap, initial)?;
    let reached = heap.set();

    let mut index = 0;
    while index < queue.len() {
        let node = queue[index];
        index += 1;

        if let Some(edges) = heap.get(graph, node) {
            if let Some(neighbours) = collection_elements(heap, edges) {
                for n in neighbours {
                    if heap.set_get(reached, n).is_none() {
                        queue.push(n);
                    }
                }
            }
            heap.set_add(reached, node);
        }
    }

    Some(reached)
}
