//! In-memory point sources for tests.

use cairn::{Dimension, PointSource, SourceError};

/// In-memory point table with packed row-major storage.
///
/// Rows are appended pre-packed (one row stride of bytes each), so the
/// accessor is a straight copy — handy for byte-exact round-trip assertions.
#[derive(Debug)]
pub struct TableSource {
    dims: Vec<Dimension>,
    row_stride: usize,
    rows: usize,
    data: Vec<u8>,
}

impl TableSource {
    /// Create an empty table over `dims`.
    pub fn new(dims: Vec<Dimension>) -> Self {
        let row_stride = dims.iter().map(|d| d.size).sum();
        Self {
            dims,
            row_stride,
            rows: 0,
            data: Vec::new(),
        }
    }

    /// Append one packed row.
    ///
    /// Panics if `row` is not exactly one row stride long.
    pub fn push_row(&mut self, row: &[u8]) {
        assert_eq!(
            row.len(),
            self.row_stride,
            "row length must equal the row stride"
        );
        self.data.extend_from_slice(row);
        self.rows += 1;
    }

    /// The packed bytes of one row.
    pub fn row(&self, index: usize) -> &[u8] {
        &self.data[index * self.row_stride..(index + 1) * self.row_stride]
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }
}

impl PointSource for TableSource {
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
        out.copy_from_slice(self.row(index));
        Ok(())
    }
}

/// A point source whose accessor fails deterministically at one point index.
///
/// Points before and after the failing index read as zeros, so tests can
/// check that a mid-copy failure aborts the whole pack.
pub struct FailingSource {
    dims: Vec<Dimension>,
    rows: usize,
    fail_at: usize,
}

impl FailingSource {
    /// A source with `rows` points that fails at point `fail_at`.
    pub fn new(dims: Vec<Dimension>, rows: usize, fail_at: usize) -> Self {
        Self {
            dims,
            rows,
            fail_at,
        }
    }
}

impl PointSource for FailingSource {
    fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    fn point_count(&self) -> usize {
        self.rows
    }

    fn write_packed(&self, index: usize, out: &mut [u8]) -> Result<(), SourceError> {
        if index == self.fail_at {
            return Err(SourceError::ReadFailed {
                reason: format!("injected read failure at point {index}"),
            });
        }
        out.fill(0);
        Ok(())
    }
}
