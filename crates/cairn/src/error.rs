//! Error types for the conversion pipeline.
//!
//! One enum per stage: schema building ([`SchemaError`]), point access
//! ([`SourceError`]), packing ([`PackError`]), and array-handle operations
//! ([`ArrayError`]). All are unrecoverable at the point of conversion — the
//! operations are deterministic, so a retry would fail identically.

use std::error::Error;
use std::fmt;

use crate::dim::DimKind;

/// Errors from building a [`Schema`](crate::schema::Schema) out of a
/// dimension list.
///
/// Any schema error is fatal to the whole conversion; no partial schema,
/// buffer, or array is ever produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A dimension's type category has no kind-code mapping.
    UnmappableKind {
        /// Name of the offending dimension.
        dimension: String,
        /// The category that could not be mapped.
        kind: DimKind,
    },
    /// Two dimensions in the same list share a name.
    DuplicateDimension {
        /// The repeated name.
        name: String,
    },
    /// The summed field widths overflow `usize`.
    StrideOverflow,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappableKind { dimension, kind } => {
                write!(f, "cannot map dimension '{dimension}' of {kind} kind to a kind code")
            }
            Self::DuplicateDimension { name } => {
                write!(f, "duplicate dimension name '{name}'")
            }
            Self::StrideOverflow => write!(f, "summed dimension widths overflow usize"),
        }
    }
}

impl Error for SchemaError {}

/// Errors from a point source's per-point accessor.
///
/// Returned by [`PointSource::write_packed`](crate::source::PointSource) and
/// wrapped in [`PackError::SourceFailed`] by the packer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceError {
    /// Point index beyond the source's row count.
    OutOfBounds {
        /// The requested point index.
        index: usize,
        /// The source's row count.
        count: usize,
    },
    /// Destination length does not match the source's row stride.
    StrideMismatch {
        /// The source's row stride.
        expected: usize,
        /// The destination slice length.
        actual: usize,
    },
    /// Backend-specific read failure.
    ReadFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, count } => {
                write!(f, "point index {index} out of bounds for {count} points")
            }
            Self::StrideMismatch { expected, actual } => {
                write!(f, "destination is {actual} bytes, row stride is {expected}")
            }
            Self::ReadFailed { reason } => write!(f, "point read failed: {reason}"),
        }
    }
}

impl Error for SourceError {}

/// Errors from packing a point source into a contiguous buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackError {
    /// The schema does not describe the source's dimension list.
    SchemaMismatch {
        /// Description of the mismatch.
        reason: String,
    },
    /// `row_stride * point_count` overflows `usize`.
    SizeOverflow {
        /// Bytes per record.
        row_stride: usize,
        /// Number of points.
        point_count: usize,
    },
    /// The per-point accessor failed; the whole pack is aborted and no
    /// partial buffer escapes.
    SourceFailed {
        /// Index of the point whose accessor failed.
        index: usize,
        /// The underlying accessor error.
        reason: SourceError,
    },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaMismatch { reason } => write!(f, "schema mismatch: {reason}"),
            Self::SizeOverflow {
                row_stride,
                point_count,
            } => {
                write!(
                    f,
                    "buffer size overflows usize ({row_stride} bytes/record x {point_count} points)"
                )
            }
            Self::SourceFailed { index, reason } => {
                write!(f, "packing point {index} failed: {reason}")
            }
        }
    }
}

impl Error for PackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors from array-handle construction, rebuild, and borrowing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// Schema building failed.
    Schema(SchemaError),
    /// Packing failed.
    Pack(PackError),
    /// The array runtime rejected the schema/buffer pair.
    Materialize {
        /// The runtime's description of the rejection.
        reason: String,
    },
    /// Borrowing construction was given an object that is not an array.
    /// The handle is left unconstructed and nothing is acquired.
    NotAnArray,
    /// Rebuild was requested on a handle in borrowed mode, which owns no
    /// data to refresh.
    UpdateBorrowed,
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "schema build failed: {err}"),
            Self::Pack(err) => write!(f, "pack failed: {err}"),
            Self::Materialize { reason } => write!(f, "array materialization failed: {reason}"),
            Self::NotAnArray => write!(f, "object is not a recognized array"),
            Self::UpdateBorrowed => write!(f, "cannot update a handle in borrowed mode"),
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            Self::Pack(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaError> for ArrayError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<PackError> for ArrayError {
    fn from(err: PackError) -> Self {
        Self::Pack(err)
    }
}
