//! Test utilities and mock types for Cairn development.
//!
//! Provides an in-memory [`TableSource`], a deterministic [`FailingSource`],
//! and a [`CountingRuntime`] whose array references record materializations,
//! retains, and releases so tests can assert the no-leak/no-double-free
//! ownership properties.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod runtime;
mod source;

pub use runtime::{CountingRuntime, MockArray, RuntimeStats};
pub use source::{FailingSource, TableSource};
