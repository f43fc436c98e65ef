//! The external array-runtime interface.

use crate::error::ArrayError;
use crate::schema::Schema;

/// An array runtime materializes structured arrays over packed buffers and
/// manages shared references to array objects.
///
/// `Array` values are RAII shared references: acquisition and release are
/// paired by construction and drop, so a reference can never be released
/// twice or leaked past its owner. [`retain`](Self::retain) mints an
/// additional reference for callers that need the array to outlive a handle
/// accessor call.
pub trait ArrayRuntime {
    /// A shared reference to one of the runtime's array objects. Dropping
    /// the value releases the reference.
    type Array;

    /// Build a structured array over `data` without copying it.
    ///
    /// The returned array aliases `data`'s memory; the caller keeps `data`
    /// alive, unmoved, and unmutated for as long as the reference is held.
    /// The runtime may reject the schema/buffer pair with
    /// [`ArrayError::Materialize`].
    fn materialize(&self, schema: &Schema, data: &mut [u8]) -> Result<Self::Array, ArrayError>;

    /// Whether `candidate` is a structured array object of this runtime.
    ///
    /// Used by borrowing construction to validate caller-supplied objects.
    fn is_array(&self, candidate: &Self::Array) -> bool;

    /// Mint an additional shared reference to `array`.
    fn retain(&self, array: &Self::Array) -> Self::Array;
}
