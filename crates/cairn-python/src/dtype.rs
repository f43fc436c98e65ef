//! Building NumPy structured dtypes from schemas.

use cairn::Schema;
use numpy::PyArrayDescr;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

/// Build a structured dtype descriptor from a schema.
///
/// Produces the dict form NumPy accepts for record dtypes —
/// `{'names': ['X', ...], 'formats': ['f8', ...]}` — and runs it through
/// NumPy's descriptor converter. Field order matches the schema's packing
/// order, so the resulting itemsize equals the schema's row stride.
pub(crate) fn dtype_from_schema<'py>(
    py: Python<'py>,
    schema: &Schema,
) -> PyResult<Bound<'py, PyArrayDescr>> {
    let names = PyList::new(py, schema.fields().iter().map(|f| f.name.as_str()))?;
    let formats = PyList::new(py, schema.format_tags())?;
    let dict = PyDict::new(py);
    dict.set_item("names", names)?;
    dict.set_item("formats", formats)?;
    PyArrayDescr::new(py, &dict)
}
