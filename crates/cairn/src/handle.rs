//! Array handles: buffer ownership against a runtime array reference.
//!
//! An [`ArrayHandle`] pairs an array reference with what backs it. In owning
//! mode the handle allocated the packed buffer, the array aliases that
//! buffer's memory, and the handle must free the buffer exactly once — after
//! the array reference is gone. In borrowed mode the handle wraps a
//! caller-supplied array and owns no buffer at all.

use std::mem;

use crate::error::ArrayError;
use crate::pack::pack;
use crate::runtime::ArrayRuntime;
use crate::schema::Schema;
use crate::source::PointSource;

/// What backs a handle's array reference.
#[derive(Debug)]
enum Backing {
    /// The handle allocated the buffer; the array aliases its memory.
    Owned { schema: Schema, buffer: Vec<u8> },
    /// Caller-supplied array; the handle holds a reference but no buffer.
    Borrowed,
}

/// A structured-array view over point data, in owning or borrowed mode.
///
/// Handles are single-writer resources: rebuild and destruction must be
/// serialized by the caller, and nothing may mutate the owned buffer while
/// the array view over it is exposed.
#[derive(Debug)]
pub struct ArrayHandle<R: ArrayRuntime> {
    runtime: R,
    // Declared before `backing` so drop glue releases the array reference
    // before freeing the buffer it aliases.
    array: R::Array,
    backing: Backing,
}

impl<R: ArrayRuntime> ArrayHandle<R> {
    /// Owning construction: snapshot `source` into a fresh packed buffer and
    /// materialize a structured array over it.
    ///
    /// On any failure the partially built state (schema, buffer) is released
    /// before the error crosses this boundary; nothing leaks.
    pub fn snapshot<S>(runtime: R, source: &S) -> Result<Self, ArrayError>
    where
        S: PointSource + ?Sized,
    {
        let (schema, buffer, array) = build(&runtime, source)?;
        Ok(Self {
            runtime,
            array,
            backing: Backing::Owned { schema, buffer },
        })
    }

    /// Borrowing construction: validate and attach to a caller-supplied
    /// array.
    ///
    /// The handle takes over the reference `candidate` and owns no buffer.
    /// Fails with [`ArrayError::NotAnArray`] if the object does not pass the
    /// runtime's array check; the reference is released and nothing else was
    /// acquired.
    pub fn borrow(runtime: R, candidate: R::Array) -> Result<Self, ArrayError> {
        if !runtime.is_array(&candidate) {
            return Err(ArrayError::NotAnArray);
        }
        Ok(Self {
            runtime,
            array: candidate,
            backing: Backing::Borrowed,
        })
    }

    /// Re-snapshot `source`, replacing the owned buffer and array.
    ///
    /// Callable any number of times on an owning-mode handle. The new state
    /// is constructed fully before the old state is released, so no partial
    /// or dangling state is ever observable; the old array reference is
    /// released before the old buffer is freed. On error the handle keeps
    /// its previous state intact.
    ///
    /// Borrowed handles own no data to refresh and fail with
    /// [`ArrayError::UpdateBorrowed`].
    pub fn update<S>(&mut self, source: &S) -> Result<(), ArrayError>
    where
        S: PointSource + ?Sized,
    {
        if matches!(self.backing, Backing::Borrowed) {
            return Err(ArrayError::UpdateBorrowed);
        }
        let (schema, buffer, array) = build(&self.runtime, source)?;
        let old_array = mem::replace(&mut self.array, array);
        let old_backing = mem::replace(&mut self.backing, Backing::Owned { schema, buffer });
        // Release order: array reference first, then the buffer it aliased.
        drop(old_array);
        drop(old_backing);
        Ok(())
    }

    /// The array reference currently held.
    ///
    /// Callers must not assume which mode produced it.
    pub fn array(&self) -> &R::Array {
        &self.array
    }

    /// Mint an additional shared reference to the held array.
    pub fn share(&self) -> R::Array {
        self.runtime.retain(&self.array)
    }

    /// Layout of the owned buffer. `None` in borrowed mode.
    pub fn schema(&self) -> Option<&Schema> {
        match &self.backing {
            Backing::Owned { schema, .. } => Some(schema),
            Backing::Borrowed => None,
        }
    }

    /// The owned packed bytes. `None` in borrowed mode.
    ///
    /// Reading through this while the runtime array is being mutated falls
    /// under the caller's single-writer obligation.
    pub fn packed(&self) -> Option<&[u8]> {
        match &self.backing {
            Backing::Owned { buffer, .. } => Some(buffer),
            Backing::Borrowed => None,
        }
    }

    /// Whether this handle owns its backing buffer.
    pub fn is_owner(&self) -> bool {
        matches!(self.backing, Backing::Owned { .. })
    }
}

/// Run the full conversion: schema build, pack, materialize.
///
/// On a materialize failure the just-packed buffer is dropped here, before
/// the error propagates.
fn build<R, S>(runtime: &R, source: &S) -> Result<(Schema, Vec<u8>, R::Array), ArrayError>
where
    R: ArrayRuntime,
    S: PointSource + ?Sized,
{
    let schema = Schema::from_dims(source.dims())?;
    let mut buffer = pack(source, &schema)?;
    let array = runtime.materialize(&schema, &mut buffer)?;
    Ok((schema, buffer, array))
}
