//! Dimension identity and type classification.

use std::fmt;

/// Identifies a dimension within a point table.
///
/// Dimensions are registered in a stable order by the storage engine and
/// assigned sequential IDs. `DimId(n)` corresponds to the n-th dimension in
/// registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimId(pub u32);

impl fmt::Display for DimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DimId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Numeric category of a dimension's storage type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DimKind {
    /// Unsigned integer storage.
    Unsigned,
    /// Signed integer storage.
    Signed,
    /// IEEE-754 floating-point storage.
    Floating,
    /// No storage type assigned. Placeholder for dimensions that were
    /// declared but never typed; cannot appear in a schema.
    Untyped,
}

impl fmt::Display for DimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unsigned => "unsigned",
            Self::Signed => "signed",
            Self::Floating => "floating",
            Self::Untyped => "untyped",
        };
        write!(f, "{label}")
    }
}

/// One dimension of a point table: a named, typed per-point channel.
///
/// A dimension is immutable for the duration of one conversion; the storage
/// engine guarantees the list it hands out does not change while a snapshot
/// is being taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dimension {
    /// Stable identifier within the owning table.
    pub id: DimId,
    /// Human-readable name (e.g. `"X"`, `"Intensity"`).
    pub name: String,
    /// Numeric category of the stored value.
    pub kind: DimKind,
    /// Storage width in bytes.
    pub size: usize,
}

impl Dimension {
    /// Construct a dimension from its parts.
    pub fn new(id: impl Into<DimId>, name: impl Into<String>, kind: DimKind, size: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            size,
        }
    }
}
