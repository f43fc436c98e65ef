//! The `Array` class: owning or borrowed structured-array handles.

use cairn::ArrayHandle;
use pyo3::prelude::*;

use crate::error::to_py_err;
use crate::runtime::NumpyRuntime;
use crate::table::Table;

/// A structured-array handle over point data.
///
/// Owning handles are built from a `Table` snapshot and own the packed
/// buffer their NumPy array aliases; the array is valid only while the
/// handle is alive. Borrowed handles wrap a caller-supplied NumPy array and
/// own no buffer — dropping them releases the reference and nothing else.
#[pyclass]
pub(crate) struct Array {
    handle: ArrayHandle<NumpyRuntime>,
}

#[pymethods]
impl Array {
    /// Wrap an existing NumPy array (borrowed mode).
    ///
    /// Raises TypeError if `obj` is not a NumPy array.
    #[new]
    fn new(obj: Py<PyAny>) -> PyResult<Self> {
        let handle = ArrayHandle::borrow(NumpyRuntime, obj).map_err(to_py_err)?;
        Ok(Array { handle })
    }

    /// Snapshot a table into a new owning handle.
    ///
    /// Builds the schema from the table's dimensions, packs every point
    /// into one contiguous buffer, and materializes a structured NumPy
    /// array aliasing that buffer.
    #[staticmethod]
    fn from_table(table: PyRef<'_, Table>) -> PyResult<Self> {
        let handle = ArrayHandle::snapshot(NumpyRuntime, &*table).map_err(to_py_err)?;
        Ok(Array { handle })
    }

    /// Re-snapshot a table, replacing the owned buffer and array.
    ///
    /// Only valid on owning handles; raises ValueError in borrowed mode.
    /// The previous array reference is released before its buffer is freed,
    /// and on failure the handle keeps its previous state.
    fn update(&mut self, table: PyRef<'_, Table>) -> PyResult<()> {
        self.handle.update(&*table).map_err(to_py_err)
    }

    /// The held NumPy array (owning or borrowed mode).
    #[getter]
    fn array(&self, py: Python<'_>) -> Py<PyAny> {
        self.handle.array().clone_ref(py)
    }

    /// Whether this handle owns its packed buffer.
    #[getter]
    fn owner(&self) -> bool {
        self.handle.is_owner()
    }
}
