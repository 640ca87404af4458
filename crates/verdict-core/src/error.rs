// SPDX-License-Identifier: Apache-2.0

//! Error codes and the abort path.
//!
//! Two regimes coexist: builtins signal soft failure by returning an absent
//! result, while broken internal invariants abort. Aborting never returns;
//! compiled for wasm32 with `panic = "abort"` it traps the module, which
//! the host observes and recovers from by resetting the heap checkpoint.

use core::fmt;

/// Result codes of the path-mutation entry points. Everything else either
/// succeeds, returns absent, or aborts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(i32)]
pub enum Errc {
    Ok = 0,
    Internal = 1,
    InvalidType = 2,
    InvalidPath = 3,
}

impl fmt::Display for Errc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Internal => write!(f, "internal error"),
            Self::InvalidType => write!(f, "invalid type"),
            Self::InvalidPath => write!(f, "invalid path"),
        }
    }
}

/// Terminal failure: log and trap. The module instance is unusable
/// afterwards; the host discards it or restores the heap checkpoint.
pub fn abort(msg: &str) -> ! {
    log::error!("abort: {msg}");
    panic!("{msg}");
}

/// Format `loc:row:col: msg` and abort.
pub fn runtime_error(loc: &str, row: u32, col: u32, msg: &str) -> ! {
    abort(&format!("{loc}:{row}:{col}: {msg}"));
}
