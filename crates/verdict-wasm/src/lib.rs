// SPDX-License-Identifier: Apache-2.0

//! # Verdict Wasm core
//!
//! The export surface the policy compiler and host loader link against.
//! Exported functions speak 32-bit heap addresses; the module instance
//! (heap, memoization stack, mapping table, builtin caches) is
//! process-wide, owned by one host thread per call.
//!
//! The `eval` function exported here is a placeholder: the policy
//! compiler replaces it with generated code that walks values, invokes
//! builtins and writes the result into the evaluation context.

mod abi;
mod instance;

#[cfg(test)]
mod abi_test;

pub use abi::*;
pub use instance::{Instance, with};
