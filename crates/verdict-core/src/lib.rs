// SPDX-License-Identifier: Apache-2.0

//! # Verdict core
//!
//! Runtime value-and-serialization core of the Verdict policy engine's
//! WebAssembly target.
//!
//! This crate provides:
//! - A linear heap with segregated free lists, bulk-free deferral and
//!   checkpoint/restore, sized for a Wasm linear memory
//! - The dynamically-typed value model with a total order, stable hashing,
//!   deterministic iteration and in-place path mutation
//! - A JSON and extended-value lexer, parser and printer that round-trip
//!   through the value model
//! - A numeric layer bridging number cells to arbitrary-precision decimals
//! - The evaluation context, memoization stack and builtin-id mapping the
//!   compiler-generated code drives
//!
//! The builtin library lives in `verdict-builtins`; the C-ABI export
//! surface lives in `verdict-wasm`.

pub mod ctx;
pub mod error;
pub mod heap;
pub mod json;
pub mod mapping;
pub mod memoize;
pub mod num;
pub mod unicode;
pub mod value;

#[cfg(test)]
mod num_test;
#[cfg(test)]
mod unicode_test;

pub use ctx::EvalCtx;
pub use error::Errc;
pub use heap::Heap;
pub use mapping::Mapping;
pub use memoize::Memoize;
pub use value::{Cell, Span, Type, Value};
