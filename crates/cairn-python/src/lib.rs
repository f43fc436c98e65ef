//! Python bindings for the Cairn structured-array bridge.
//!
//! This crate implements Cairn's array-runtime interface against real NumPy
//! and exposes the result as the `_cairn` native extension: an `Array`
//! handle class plus a minimal in-memory `Table` acting as the point
//! storage collaborator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(unsafe_code)]

use pyo3::prelude::*;

mod array;
mod dtype;
mod error;
mod runtime;
mod table;

/// The native `_cairn` extension module.
#[pymodule]
fn _cairn(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<array::Array>()?;
    m.add_class::<table::Table>()?;
    Ok(())
}
