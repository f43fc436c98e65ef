//! Cairn: point tables to structured arrays.
//!
//! Cairn snapshots an ordered, typed point table into one contiguous packed
//! buffer plus a [`Schema`] describing how to reinterpret that buffer as a
//! structured array (field names, kind codes, byte widths, field order), and
//! manages the buffer's lifetime against an external array object through an
//! [`ArrayHandle`].
//!
//! Both collaborators are reached through traits: [`PointSource`] is the
//! storage engine's face (dimension list, row count, per-point packed
//! accessor), and [`ArrayRuntime`] is the array host's face (materialize a
//! structured array over a buffer without copying it, validate candidate
//! objects, mint shared references). The `cairn-python` crate implements
//! [`ArrayRuntime`] against NumPy; `cairn-test-utils` provides a counting
//! mock for ownership tests.
//!
//! # Quick start
//!
//! ```
//! use cairn::{pack, DimKind, Dimension, PointSource, Schema, SourceError};
//!
//! // Two points with a single f8 dimension, stored row-major.
//! struct Pair {
//!     dims: Vec<Dimension>,
//!     rows: [f64; 2],
//! }
//!
//! impl PointSource for Pair {
//!     fn dims(&self) -> &[Dimension] {
//!         &self.dims
//!     }
//!     fn point_count(&self) -> usize {
//!         self.rows.len()
//!     }
//!     fn write_packed(&self, index: usize, out: &mut [u8]) -> Result<(), SourceError> {
//!         out.copy_from_slice(&self.rows[index].to_ne_bytes());
//!         Ok(())
//!     }
//! }
//!
//! let source = Pair {
//!     dims: vec![Dimension::new(0u32, "X", DimKind::Floating, 8)],
//!     rows: [1.5, -2.5],
//! };
//! let schema = Schema::from_dims(source.dims()).unwrap();
//! assert_eq!(schema.format_tags(), vec!["f8"]);
//!
//! let buffer = pack(&source, &schema).unwrap();
//! assert_eq!(buffer.len(), 16);
//! assert_eq!(f64::from_ne_bytes(buffer[8..16].try_into().unwrap()), -2.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dim;
pub mod error;
pub mod handle;
pub mod pack;
pub mod runtime;
pub mod schema;
pub mod source;

pub use dim::{DimId, DimKind, Dimension};
pub use error::{ArrayError, PackError, SchemaError, SourceError};
pub use handle::ArrayHandle;
pub use pack::pack;
pub use runtime::ArrayRuntime;
pub use schema::{map_kind, FieldDescr, KindCode, Schema};
pub use source::PointSource;
