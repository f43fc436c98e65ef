//! A minimal in-memory point table exposed to Python.

use cairn::{DimKind, Dimension, PointSource, SourceError};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// An in-memory point table: ordered typed dimensions plus packed rows.
///
/// Plays the storage-collaborator role for the Python surface so owning
/// arrays can be built and refreshed without a full storage engine behind
/// them. Dimensions are declared first (their order is the packing order),
/// then rows are appended as packed bytes.
#[pyclass]
pub(crate) struct Table {
    dims: Vec<Dimension>,
    row_stride: usize,
    rows: usize,
    data: Vec<u8>,
}

#[pymethods]
impl Table {
    /// Create an empty table with no dimensions.
    #[new]
    fn new() -> Self {
        Table {
            dims: Vec::new(),
            row_stride: 0,
            rows: 0,
            data: Vec::new(),
        }
    }

    /// Declare a dimension.
    ///
    /// Args:
    ///     name: Field name (e.g. "X").
    ///     kind: One-character kind code: "u", "i", or "f".
    ///     size: Storage width in bytes.
    fn add_dimension(&mut self, name: &str, kind: &str, size: usize) -> PyResult<()> {
        if self.rows > 0 {
            return Err(PyValueError::new_err(
                "cannot add dimensions after rows have been appended",
            ));
        }
        let kind = match kind {
            "u" => DimKind::Unsigned,
            "i" => DimKind::Signed,
            "f" => DimKind::Floating,
            other => {
                return Err(PyValueError::new_err(format!(
                    "unknown kind code '{other}' (expected 'u', 'i', or 'f')"
                )));
            }
        };
        let id = self.dims.len() as u32;
        self.dims.push(Dimension::new(id, name, kind, size));
        self.row_stride += size;
        Ok(())
    }

    /// Append one point as packed bytes (all fields, dimension order).
    fn append_row(&mut self, row: Vec<u8>) -> PyResult<()> {
        if row.len() != self.row_stride {
            return Err(PyValueError::new_err(format!(
                "row is {} bytes, expected the row stride {}",
                row.len(),
                self.row_stride
            )));
        }
        self.data.extend_from_slice(&row);
        self.rows += 1;
        Ok(())
    }

    /// Bytes per point.
    #[getter]
    fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Number of points.
    #[getter]
    fn point_count(&self) -> usize {
        self.rows
    }
}

impl PointSource for Table {
    fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    fn point_count(&self) -> usize {
        self.rows
    }

    fn write_packed(&self, index: usize, out: &mut [u8]) -> Result<(), SourceError> {
        if index >= self.rows {
            return Err(SourceError::OutOfBounds {
                index,
                count: self.rows,
            });
        }
        if out.len() != self.row_stride {
            return Err(SourceError::StrideMismatch {
                expected: self.row_stride,
                actual: out.len(),
            });
        }
        let base = index * self.row_stride;
        out.copy_from_slice(&self.data[base..base + self.row_stride]);
        Ok(())
    }
}
