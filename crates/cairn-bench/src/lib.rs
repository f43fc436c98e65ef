//! Shared fixtures for Cairn benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use cairn::{DimKind, Dimension};
use cairn_test_utils::TableSource;

/// The 16-dimension layout of a typical LAS-style point record.
pub fn reference_dims() -> Vec<Dimension> {
    let defs: [(&str, DimKind, usize); 16] = [
        ("X", DimKind::Floating, 8),
        ("Y", DimKind::Floating, 8),
        ("Z", DimKind::Floating, 8),
        ("Intensity", DimKind::Unsigned, 2),
        ("ReturnNumber", DimKind::Unsigned, 1),
        ("NumberOfReturns", DimKind::Unsigned, 1),
        ("ScanDirectionFlag", DimKind::Unsigned, 1),
        ("EdgeOfFlightLine", DimKind::Unsigned, 1),
        ("Classification", DimKind::Unsigned, 1),
        ("ScanAngleRank", DimKind::Floating, 4),
        ("UserData", DimKind::Unsigned, 1),
        ("PointSourceId", DimKind::Unsigned, 2),
        ("GpsTime", DimKind::Floating, 8),
        ("Red", DimKind::Unsigned, 2),
        ("Green", DimKind::Unsigned, 2),
        ("Blue", DimKind::Unsigned, 2),
    ];
    defs.into_iter()
        .enumerate()
        .map(|(i, (name, kind, size))| Dimension::new(i as u32, name, kind, size))
        .collect()
}

/// A populated table with `points` rows over [`reference_dims`].
///
/// Row contents are a cheap deterministic byte pattern; the packer copies
/// bytes without interpreting them, so the pattern does not matter.
pub fn populated_table(points: usize) -> TableSource {
    let dims = reference_dims();
    let stride: usize = dims.iter().map(|d| d.size).sum();
    let mut table = TableSource::new(dims);
    let mut row = vec![0u8; stride];
    for point in 0..points {
        for (i, byte) in row.iter_mut().enumerate() {
            *byte = (point.wrapping_add(i) & 0xff) as u8;
        }
        table.push_row(&row);
    }
    table
}
