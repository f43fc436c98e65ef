//! NumPy-backed implementation of the array runtime interface.

use std::os::raw::c_int;

use cairn::{ArrayError, ArrayRuntime, Schema};
use numpy::npyffi::{self, npy_intp, PY_ARRAY_API};
use numpy::PyUntypedArray;
use pyo3::prelude::*;

/// Materializes NumPy structured arrays over Rust-owned packed buffers.
///
/// Arrays are created with `PyArray_NewFromDescr` pointing directly at the
/// buffer's memory — no copy is made and NumPy does not take ownership of
/// the data. The array handle keeps the buffer alive, unmoved, and releases
/// it only after the array reference is gone. The NumPy C-API binding
/// initializes itself lazily on first use and is idempotent afterwards, so
/// no explicit bootstrap call is needed here.
pub(crate) struct NumpyRuntime;

impl ArrayRuntime for NumpyRuntime {
    type Array = Py<PyAny>;

    fn materialize(&self, schema: &Schema, data: &mut [u8]) -> Result<Py<PyAny>, ArrayError> {
        Python::attach(|py| {
            let descr = crate::dtype::dtype_from_schema(py, schema).map_err(|err| {
                ArrayError::Materialize {
                    reason: err.to_string(),
                }
            })?;

            let stride = schema.row_stride();
            let rows = if stride == 0 { 0 } else { data.len() / stride };
            let mut dims: [npy_intp; 1] = [rows as npy_intp];

            // PyArray_NewFromDescr steals the descriptor reference, hence
            // into_ptr. A null data pointer would make NumPy allocate; we
            // always pass the packed buffer so the array aliases it.
            let ptr = unsafe {
                PY_ARRAY_API.PyArray_NewFromDescr(
                    py,
                    PY_ARRAY_API.get_type_object(py, npyffi::NpyTypes::PyArray_Type),
                    descr.into_ptr().cast(),
                    1,
                    dims.as_mut_ptr(),
                    std::ptr::null_mut(),
                    data.as_mut_ptr().cast(),
                    npyffi::NPY_ARRAY_CARRAY as c_int,
                    std::ptr::null_mut(),
                )
            };
            if ptr.is_null() {
                let reason = PyErr::take(py)
                    .map(|err| err.to_string())
                    .unwrap_or_else(|| "NumPy rejected the dtype/buffer pair".into());
                return Err(ArrayError::Materialize { reason });
            }
            Ok(unsafe { Py::from_owned_ptr(py, ptr) })
        })
    }

    fn is_array(&self, candidate: &Py<PyAny>) -> bool {
        Python::attach(|py| candidate.bind(py).downcast::<PyUntypedArray>().is_ok())
    }

    fn retain(&self, array: &Py<PyAny>) -> Py<PyAny> {
        Python::attach(|py| array.clone_ref(py))
    }
}
