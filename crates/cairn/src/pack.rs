//! The packing loop: point table to contiguous row-major buffer.

use crate::error::PackError;
use crate::schema::Schema;
use crate::source::PointSource;

/// Pack every point of `source` into one contiguous buffer laid out per
/// `schema`.
///
/// Allocates a single zero-initialized buffer of `row_stride * point_count`
/// bytes, then asks the source to write each point's packed fields at base
/// offset `index * row_stride`. One allocation total, no per-field
/// intermediates, O(points x fields). The transform is deterministic:
/// packing an unchanged source twice yields byte-identical buffers.
///
/// A row count of zero or an empty dimension list yields a zero-length
/// buffer, which is valid and not an error.
///
/// # Errors
///
/// `schema` must have been built from the source's current dimension list;
/// a field-count or stride disagreement fails with
/// [`PackError::SchemaMismatch`]. An accessor failure aborts the whole pack
/// with [`PackError::SourceFailed`] — no partial buffer escapes.
pub fn pack<S>(source: &S, schema: &Schema) -> Result<Vec<u8>, PackError>
where
    S: PointSource + ?Sized,
{
    let dims = source.dims();
    if dims.len() != schema.len() {
        return Err(PackError::SchemaMismatch {
            reason: format!(
                "schema describes {} fields but the source has {} dimensions",
                schema.len(),
                dims.len()
            ),
        });
    }
    let mut summed = 0usize;
    for dim in dims {
        summed = summed
            .checked_add(dim.size)
            .ok_or_else(|| PackError::SchemaMismatch {
                reason: "summed dimension widths overflow usize".into(),
            })?;
    }
    let stride = schema.row_stride();
    if summed != stride {
        return Err(PackError::SchemaMismatch {
            reason: format!("schema row stride is {stride} but the source dimensions sum to {summed}"),
        });
    }

    let count = source.point_count();
    let len = stride.checked_mul(count).ok_or(PackError::SizeOverflow {
        row_stride: stride,
        point_count: count,
    })?;
    let mut buffer = vec![0u8; len];
    if stride == 0 {
        return Ok(buffer);
    }
    for (index, record) in buffer.chunks_exact_mut(stride).enumerate() {
        source
            .write_packed(index, record)
            .map_err(|reason| PackError::SourceFailed { index, reason })?;
    }
    Ok(buffer)
}
