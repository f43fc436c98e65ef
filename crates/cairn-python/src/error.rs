//! ArrayError -> Python exception mapping.

use cairn::ArrayError;
use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::PyErr;

/// Map a conversion error to the Python exception type callers expect.
///
/// Borrowing a non-array raises `TypeError`; structural problems the caller
/// can fix (bad schema, update on a borrowed handle) raise `ValueError`;
/// packing and materialization failures raise `RuntimeError`.
pub(crate) fn to_py_err(err: ArrayError) -> PyErr {
    let msg = err.to_string();
    match err {
        ArrayError::NotAnArray => PyTypeError::new_err(msg),
        ArrayError::Schema(_) | ArrayError::UpdateBorrowed => PyValueError::new_err(msg),
        ArrayError::Pack(_) | ArrayError::Materialize { .. } => PyRuntimeError::new_err(msg),
    }
}
