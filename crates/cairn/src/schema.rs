//! Schema building: dimension lists to packed field layouts.
//!
//! A [`Schema`] is the descriptor a consumer needs to reinterpret a packed
//! buffer as a structured array: one [`FieldDescr`] per dimension, in
//! dimension order, with cumulative byte offsets and the derived row stride.
//! Field order is the packing contract — the packer writes fields in exactly
//! this order, with no padding between them.

use indexmap::IndexMap;

use crate::dim::{DimKind, Dimension};
use crate::error::SchemaError;

/// One-character kind code identifying a field's numeric category.
///
/// Codes follow the array-protocol convention: `u` for unsigned integers,
/// `i` for signed integers, `f` for floating point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KindCode {
    /// Unsigned integer (`u`).
    Unsigned,
    /// Signed integer (`i`).
    Signed,
    /// Floating point (`f`).
    Floating,
}

impl KindCode {
    /// The single-character code used in format tags.
    pub fn as_char(self) -> char {
        match self {
            Self::Unsigned => 'u',
            Self::Signed => 'i',
            Self::Floating => 'f',
        }
    }
}

/// Map a dimension's type category to its kind code and byte width.
///
/// Fails if the category is not one of the three recognized numeric kinds.
/// A mapping failure is fatal to the whole conversion: no partial schema is
/// produced.
pub fn map_kind(dim: &Dimension) -> Result<(KindCode, usize), SchemaError> {
    let code = match dim.kind {
        DimKind::Unsigned => KindCode::Unsigned,
        DimKind::Signed => KindCode::Signed,
        DimKind::Floating => KindCode::Floating,
        DimKind::Untyped => {
            return Err(SchemaError::UnmappableKind {
                dimension: dim.name.clone(),
                kind: dim.kind,
            });
        }
    };
    Ok((code, dim.size))
}

/// Describes one packed field: name, kind code, byte width, and the byte
/// offset of the field within a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescr {
    /// Field name, copied from the dimension.
    pub name: String,
    /// Numeric kind code.
    pub code: KindCode,
    /// Byte width of the stored value.
    pub size: usize,
    /// Byte offset from the start of a record.
    pub offset: usize,
}

impl FieldDescr {
    /// Array-protocol format tag, e.g. `"f8"` for an 8-byte float.
    pub fn format_tag(&self) -> String {
        format!("{}{}", self.code.as_char(), self.size)
    }
}

/// Ordered field layout describing one packed record.
///
/// Built from a dimension list by [`Schema::from_dims`]; the field order is
/// bit-identical to the dimension order. `row_stride` is the summed field
/// widths — the byte length of one packed record.
///
/// # Examples
///
/// ```
/// use cairn::{DimKind, Dimension, Schema};
///
/// let dims = vec![
///     Dimension::new(0u32, "X", DimKind::Floating, 8),
///     Dimension::new(1u32, "Intensity", DimKind::Unsigned, 2),
/// ];
/// let schema = Schema::from_dims(&dims).unwrap();
///
/// assert_eq!(schema.row_stride(), 10);
/// assert_eq!(schema.fields()[0].format_tag(), "f8");
/// assert_eq!(schema.field("Intensity").unwrap().offset, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDescr>,
    /// Name -> field index. `IndexMap` keeps lookup O(1) while preserving
    /// the registration order for iteration and diagnostics.
    by_name: IndexMap<String, usize>,
    row_stride: usize,
}

impl Schema {
    /// Build a schema from an ordered dimension list.
    ///
    /// Descriptors are appended in input order; offsets are cumulative.
    /// Mapping errors propagate unchanged from [`map_kind`]. Duplicate
    /// dimension names are rejected — the array runtime would reject the
    /// resulting field list anyway, so the failure surfaces here with a
    /// structured error.
    pub fn from_dims(dims: &[Dimension]) -> Result<Self, SchemaError> {
        let mut fields = Vec::with_capacity(dims.len());
        let mut by_name = IndexMap::with_capacity(dims.len());
        let mut offset = 0usize;
        for dim in dims {
            let (code, size) = map_kind(dim)?;
            if by_name.insert(dim.name.clone(), fields.len()).is_some() {
                return Err(SchemaError::DuplicateDimension {
                    name: dim.name.clone(),
                });
            }
            fields.push(FieldDescr {
                name: dim.name.clone(),
                code,
                size,
                offset,
            });
            offset = offset.checked_add(size).ok_or(SchemaError::StrideOverflow)?;
        }
        Ok(Self {
            fields,
            by_name,
            row_stride: offset,
        })
    }

    /// Field descriptors in packing order.
    pub fn fields(&self) -> &[FieldDescr] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescr> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Byte length of one packed record.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format tags for all fields, in packing order.
    pub fn format_tags(&self) -> Vec<String> {
        self.fields.iter().map(FieldDescr::format_tag).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn xyz_f8() -> Vec<Dimension> {
        vec![
            Dimension::new(0u32, "X", DimKind::Floating, 8),
            Dimension::new(1u32, "Y", DimKind::Floating, 8),
            Dimension::new(2u32, "Z", DimKind::Floating, 8),
        ]
    }

    #[test]
    fn xyz_formats_and_stride() {
        let schema = Schema::from_dims(&xyz_f8()).unwrap();
        assert_eq!(schema.format_tags(), vec!["f8", "f8", "f8"]);
        assert_eq!(schema.row_stride(), 24);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn offsets_are_cumulative() {
        let dims = vec![
            Dimension::new(0u32, "X", DimKind::Floating, 8),
            Dimension::new(1u32, "Intensity", DimKind::Unsigned, 2),
            Dimension::new(2u32, "Classification", DimKind::Unsigned, 1),
            Dimension::new(3u32, "ScanAngle", DimKind::Signed, 4),
        ];
        let schema = Schema::from_dims(&dims).unwrap();
        let offsets: Vec<usize> = schema.fields().iter().map(|f| f.offset).collect();
        assert_eq!(offsets, vec![0, 8, 10, 11]);
        assert_eq!(schema.row_stride(), 15);
        assert_eq!(schema.format_tags(), vec!["f8", "u2", "u1", "i4"]);
    }

    #[test]
    fn empty_dimension_list_is_valid() {
        let schema = Schema::from_dims(&[]).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.row_stride(), 0);
    }

    #[test]
    fn untyped_dimension_is_rejected() {
        let dims = vec![Dimension::new(0u32, "Flags", DimKind::Untyped, 1)];
        let err = Schema::from_dims(&dims).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnmappableKind {
                dimension: "Flags".into(),
                kind: DimKind::Untyped,
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dims = vec![
            Dimension::new(0u32, "X", DimKind::Floating, 8),
            Dimension::new(1u32, "X", DimKind::Floating, 4),
        ];
        let err = Schema::from_dims(&dims).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateDimension { name: "X".into() });
    }

    #[test]
    fn lookup_by_name() {
        let dims = vec![
            Dimension::new(0u32, "X", DimKind::Floating, 8),
            Dimension::new(1u32, "Intensity", DimKind::Unsigned, 2),
        ];
        let schema = Schema::from_dims(&dims).unwrap();
        assert_eq!(schema.field("Intensity").unwrap().offset, 8);
        assert!(schema.field("Missing").is_none());
    }

    #[test]
    fn kind_codes_map_to_chars() {
        let cases = [
            (DimKind::Unsigned, 'u'),
            (DimKind::Signed, 'i'),
            (DimKind::Floating, 'f'),
        ];
        for (kind, expected) in cases {
            let dim = Dimension::new(0u32, "d", kind, 4);
            let (code, size) = map_kind(&dim).unwrap();
            assert_eq!(code.as_char(), expected);
            assert_eq!(size, 4);
        }
    }

    fn arb_dims() -> impl Strategy<Value = Vec<Dimension>> {
        prop::collection::vec(
            (
                prop_oneof![
                    Just(DimKind::Unsigned),
                    Just(DimKind::Signed),
                    Just(DimKind::Floating),
                ],
                1usize..=8,
            ),
            0..16,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (kind, size))| Dimension::new(i as u32, format!("d{i}"), kind, size))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn stride_is_sum_of_widths(dims in arb_dims()) {
            let schema = Schema::from_dims(&dims).unwrap();
            prop_assert_eq!(schema.row_stride(), dims.iter().map(|d| d.size).sum::<usize>());
        }

        #[test]
        fn field_order_matches_dimension_order(dims in arb_dims()) {
            let schema = Schema::from_dims(&dims).unwrap();
            prop_assert_eq!(schema.len(), dims.len());
            for (field, dim) in schema.fields().iter().zip(&dims) {
                prop_assert_eq!(&field.name, &dim.name);
                prop_assert_eq!(field.size, dim.size);
            }
        }

        #[test]
        fn offsets_partition_the_record(dims in arb_dims()) {
            let schema = Schema::from_dims(&dims).unwrap();
            let mut expected = 0usize;
            for field in schema.fields() {
                prop_assert_eq!(field.offset, expected);
                expected += field.size;
            }
            prop_assert_eq!(schema.row_stride(), expected);
        }
    }
}
